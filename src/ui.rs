use crate::models::{ChallengeData, DailyEntry, date_key};
use crate::stats::{build_stats_at, day_number};
use crate::time_utils::seconds_to_time_string;
use chrono::NaiveDate;
use maud::{Markup, html};

pub fn render_index(data: &ChallengeData, today: NaiveDate, share_mode: bool) -> String {
    let stats = build_stats_at(today, data);

    let recent_rows = html! {
        @if stats.recent_entries.is_empty() {
            tr { td colspan="7" class="empty" { "No entries yet." } }
        }
        @for entry in &stats.recent_entries {
            (render_row(data, entry, share_mode))
        }
    };

    let (share_link, entry_form) = if share_mode {
        (html! {}, html! {})
    } else {
        (
            html! { a class="share" href="/?share=true" { "Share dashboard" } },
            render_entry_form(today),
        )
    };

    INDEX_HTML
        .replace("{{SHARE_LINK}}", &share_link.into_string())
        .replace("{{CURRENT_DAY}}", &stats.progress.current_day.to_string())
        .replace("{{PROGRESS}}", &stats.progress.progress_percentage.to_string())
        .replace("{{COMPLETED}}", &stats.completed_days.to_string())
        .replace(
            "{{COMPLETION}}",
            &format!("{:.1}", stats.completion_percentage),
        )
        .replace("{{RUN_TIME}}", &stats.total_run_time_text)
        .replace("{{DISTANCE}}", &format!("{:.1}", stats.total_distance))
        .replace("{{BURNED}}", &stats.total_calories_burned.to_string())
        .replace("{{WEIGHT_LOST}}", &format!("{:.1}", stats.total_weight_lost))
        .replace(
            "{{AVG_CALORIES}}",
            &format!("{:.0}", stats.average_calories_consumed),
        )
        .replace("{{TARGET}}", &stats.target_calories.to_string())
        .replace("{{STRENGTH}}", &stats.workout_types.strength.to_string())
        .replace("{{RECOVERY}}", &stats.workout_types.recovery.to_string())
        .replace("{{RECENT_ROWS}}", &recent_rows.into_string())
        .replace("{{ENTRY_FORM}}", &entry_form.into_string())
}

fn render_row(data: &ChallengeData, entry: &DailyEntry, share_mode: bool) -> Markup {
    html! {
        tr {
            td { "Day " (day_number(&data.start_date, &entry.date)) }
            td { (entry.date) }
            td { (entry.weight) }
            td { (entry.calories) }
            td { (seconds_to_time_string(i64::from(entry.run.time))) }
            td { (entry.additional_workout.kind.as_str()) }
            td {
                @if !share_mode {
                    form method="post" action=(format!("/entries/{}/delete", entry.date)) {
                        button class="btn-delete" type="submit" { "Delete" }
                    }
                }
            }
        }
    }
}

fn render_entry_form(today: NaiveDate) -> Markup {
    html! {
        section class="card" {
            h2 { "Daily entry" }
            form class="entry" method="post" action="/entries" {
                label { "Date " input type="date" name="date" value=(date_key(today)) required; }
                label { "Weight (lb) " input type="number" step="0.1" min="0.1" name="weight" required; }
                label { "Calories " input type="number" min="0" name="calories" value="0"; }
                label { "Run time (MM:SS) " input type="text" name="run_time" placeholder="25:30" pattern="[0-9]+:[0-5][0-9]" required; }
                label { "Distance (mi) " input type="number" step="0.01" min="0" name="run_distance" value="0"; }
                label { "Run calories " input type="number" min="0" name="run_calories" value="0"; }
                label { "Pace (MM:SS/mi) " input type="text" name="run_pace" placeholder="8:30"; }
                label { "Elevation (ft) " input type="number" name="run_elevation" value="0"; }
                label { "Run heart rate " input type="number" min="0" name="run_heart_rate" value="0"; }
                label {
                    "Workout "
                    select name="workout_type" {
                        option value="strength" { "Strength" }
                        option value="recovery" { "Recovery" }
                    }
                }
                label { "Length (min) " input type="number" min="0" name="workout_length" value="20"; }
                label { "Workout calories " input type="number" min="0" name="workout_calories" value="0"; }
                label { "Workout heart rate " input type="number" min="0" name="workout_heart_rate" value="0"; }
                button class="btn-save" type="submit" { "Save entry" }
            }
        }
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>75 SMART Challenge</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: flex-start;
      gap: 12px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5f5c57;
    }

    .progress {
      display: flex;
      align-items: center;
      gap: 10px;
      margin-top: 10px;
      font-size: 0.9rem;
    }

    .bar {
      width: 160px;
      height: 6px;
      background: rgba(47, 72, 88, 0.12);
      border-radius: 999px;
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--accent);
    }

    .card {
      background: var(--card);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      display: block;
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td, th {
      text-align: left;
      padding: 8px 6px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .empty {
      color: #8b857d;
      text-align: center;
    }

    form.entry {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 12px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
    }

    input, select {
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    button, .share {
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
      text-decoration: none;
    }

    .btn-save, .share {
      background: var(--accent);
      color: white;
    }

    .btn-delete {
      background: var(--accent-2);
      color: white;
      padding: 6px 12px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>75 SMART Challenge</h1>
        <p class="subtitle">Sustainable Momentum And Real Transformation</p>
        <div class="progress">
          <span>Day {{CURRENT_DAY}} of 75</span>
          <div class="bar"><span style="width: {{PROGRESS}}%"></span></div>
          <span>{{PROGRESS}}%</span>
        </div>
      </div>
      {{SHARE_LINK}}
    </header>

    <section class="card panel">
      <div class="stat"><span class="label">Days completed</span><span class="value">{{COMPLETED}}/75</span><span>{{COMPLETION}}% complete</span></div>
      <div class="stat"><span class="label">Run time</span><span class="value">{{RUN_TIME}}</span><span>{{DISTANCE}} mi total</span></div>
      <div class="stat"><span class="label">Calories burned</span><span class="value">{{BURNED}}</span><span>run + workout</span></div>
      <div class="stat"><span class="label">Weight lost</span><span class="value">{{WEIGHT_LOST}} lb</span><span>since day 1</span></div>
      <div class="stat"><span class="label">Avg calories</span><span class="value">{{AVG_CALORIES}}</span><span>target {{TARGET}}</span></div>
      <div class="stat"><span class="label">Workouts</span><span class="value">{{STRENGTH}} / {{RECOVERY}}</span><span>strength / recovery</span></div>
    </section>

    <section class="card">
      <h2>Recent entries</h2>
      <table>
        <thead><tr><th>Day</th><th>Date</th><th>Weight</th><th>Calories</th><th>Run</th><th>Workout</th><th></th></tr></thead>
        <tbody>
{{RECENT_ROWS}}
        </tbody>
      </table>
    </section>

  {{ENTRY_FORM}}
  </main>
</body>
</html>
"#;

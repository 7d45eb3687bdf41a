use crate::models::{
    CHALLENGE_DAYS, ChallengeData, ChartPoint, DailyEntry, HistoryItem, Progress, StatsResponse,
    WorkoutDistribution, WorkoutType, date_key, parse_date,
};
use crate::time_utils::seconds_to_time_string;
use chrono::{Days, Local, NaiveDate};

const RECENT_COUNT: usize = 7;

pub fn build_stats(data: &ChallengeData) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), data)
}

pub fn build_stats_at(today: NaiveDate, data: &ChallengeData) -> StatsResponse {
    let total_run_time = total_run_time(data);
    StatsResponse {
        completed_days: completed_days(data),
        completion_percentage: completion_percentage(data),
        total_run_time,
        total_run_time_text: seconds_to_time_string(i64::try_from(total_run_time).unwrap_or(i64::MAX)),
        total_distance: total_distance(data),
        total_calories_burned: total_calories_burned(data),
        total_weight_lost: total_weight_lost(data),
        average_calories_consumed: average_calories_consumed(data),
        target_calories: data.target_calories,
        workout_types: workout_type_distribution(data),
        recent_entries: recent_entries(data),
        progress: progress_at(today, data),
    }
}

pub fn completed_days(data: &ChallengeData) -> usize {
    data.entries.len()
}

/// Not clamped: re-keyed edits can push this past 100.
pub fn completion_percentage(data: &ChallengeData) -> f64 {
    completed_days(data) as f64 / f64::from(CHALLENGE_DAYS) * 100.0
}

/// Seconds.
pub fn total_run_time(data: &ChallengeData) -> u64 {
    data.entries
        .values()
        .map(|entry| u64::from(entry.run.time))
        .sum()
}

pub fn total_distance(data: &ChallengeData) -> f64 {
    data.entries.values().map(|entry| entry.run.distance).sum()
}

pub fn total_calories_burned(data: &ChallengeData) -> u64 {
    data.entries
        .values()
        .map(|entry| u64::from(entry.run.calories) + u64::from(entry.additional_workout.calories))
        .sum()
}

/// Weight at the start date minus the latest weight. Zero unless an entry
/// exists on exactly the start date.
pub fn total_weight_lost(data: &ChallengeData) -> f64 {
    let Some(start) = data.entries.get(&data.start_date) else {
        return 0.0;
    };
    match latest_entry(data) {
        Some(latest) => start.weight - latest.weight,
        None => 0.0,
    }
}

pub fn average_calories_consumed(data: &ChallengeData) -> f64 {
    if data.entries.is_empty() {
        return 0.0;
    }
    let sum: u64 = data
        .entries
        .values()
        .map(|entry| u64::from(entry.calories))
        .sum();
    sum as f64 / data.entries.len() as f64
}

pub fn workout_type_distribution(data: &ChallengeData) -> WorkoutDistribution {
    let mut distribution = WorkoutDistribution {
        strength: 0,
        recovery: 0,
    };
    for entry in data.entries.values() {
        match entry.additional_workout.kind {
            WorkoutType::Strength => distribution.strength += 1,
            WorkoutType::Recovery => distribution.recovery += 1,
            WorkoutType::Other(_) => {}
        }
    }
    distribution
}

pub fn latest_entry(data: &ChallengeData) -> Option<&DailyEntry> {
    data.entries.values().max_by(|a, b| a.date.cmp(&b.date))
}

/// Newest first.
pub fn entries_by_date_desc(data: &ChallengeData) -> Vec<&DailyEntry> {
    let mut entries: Vec<&DailyEntry> = data.entries.values().collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

pub fn recent_entries(data: &ChallengeData) -> Vec<DailyEntry> {
    entries_by_date_desc(data)
        .into_iter()
        .take(RECENT_COUNT)
        .cloned()
        .collect()
}

/// One point per calendar day of the challenge. Days without an entry keep
/// every metric empty so charts show a gap rather than a dip to zero.
///
/// The series stops early if the calendar runs out past `start`.
pub fn chart_series(start: NaiveDate, data: &ChallengeData) -> Vec<ChartPoint> {
    (0..CHALLENGE_DAYS)
        .map_while(|offset| {
            let date = date_key(start.checked_add_days(Days::new(u64::from(offset)))?);
            let entry = data.entries.get(&date);
            Some(ChartPoint {
                day: offset + 1,
                weight: entry.map(|e| e.weight),
                calories: entry.map(|e| e.calories),
                run_time: entry
                    .filter(|e| e.run.time > 0)
                    .map(|e| (f64::from(e.run.time) / 60.0 * 10.0).round() / 10.0),
                run_distance: entry.map(|e| e.run.distance),
                workout_calories: entry.map(DailyEntry::workout_calories),
                date,
            })
        })
        .collect()
}

pub fn build_chart(data: &ChallengeData) -> Vec<ChartPoint> {
    let start = data.start().unwrap_or_else(|| Local::now().date_naive());
    chart_series(start, data)
}

/// Calendar-elapsed day of the challenge: the start date is day 1, clamped
/// to `1..=75`. An unreadable start date reads as day 1.
pub fn current_day(start: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(start) = start else {
        return 1;
    };
    let elapsed = (today - start).num_days().saturating_add(1);
    elapsed.clamp(1, i64::from(CHALLENGE_DAYS)) as u32
}

pub fn progress_at(today: NaiveDate, data: &ChallengeData) -> Progress {
    let current_day = current_day(data.start(), today);
    Progress {
        current_day,
        total_days: CHALLENGE_DAYS,
        progress_percentage: (f64::from(current_day) / f64::from(CHALLENGE_DAYS) * 100.0).round()
            as u32,
    }
}

/// 1-based challenge day of `date`; 0 if either date is unreadable.
pub fn day_number(start_date: &str, date: &str) -> i64 {
    match (parse_date(start_date), parse_date(date)) {
        (Some(start), Some(date)) => (date - start).num_days() + 1,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistorySort {
    #[default]
    Date,
    Weight,
    Calories,
}

impl HistorySort {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("weight") => HistorySort::Weight,
            Some("calories") => HistorySort::Calories,
            _ => HistorySort::Date,
        }
    }
}

/// Matches on date, weight text, or workout type (case-insensitive).
pub fn matches_search(entry: &DailyEntry, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let lowered = term.to_lowercase();
    entry.date.contains(term)
        || entry.weight.to_string().contains(term)
        || entry
            .additional_workout
            .kind
            .as_str()
            .to_lowercase()
            .contains(&lowered)
}

pub fn build_history(data: &ChallengeData, search: &str, sort: HistorySort) -> Vec<HistoryItem> {
    let mut entries: Vec<&DailyEntry> = data
        .entries
        .values()
        .filter(|entry| matches_search(entry, search))
        .collect();

    match sort {
        HistorySort::Date => entries.sort_by(|a, b| b.date.cmp(&a.date)),
        HistorySort::Weight => entries.sort_by(|a, b| b.weight.total_cmp(&a.weight)),
        HistorySort::Calories => entries.sort_by(|a, b| b.calories.cmp(&a.calories)),
    }

    entries
        .into_iter()
        .map(|entry| HistoryItem {
            day: day_number(&data.start_date, &entry.date),
            run_time_text: seconds_to_time_string(i64::from(entry.run.time)),
            entry: entry.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdditionalWorkoutData, RunData};
    use chrono::Duration;

    fn day(date: &str) -> NaiveDate {
        parse_date(date).unwrap()
    }

    fn entry(date: &str, weight: f64, kind: WorkoutType) -> DailyEntry {
        DailyEntry {
            date: date.to_string(),
            weight,
            calories: 2000,
            run: RunData {
                time: 1800,
                distance: 3.0,
                calories: 300,
                ..RunData::default()
            },
            additional_workout: AdditionalWorkoutData {
                kind,
                length: 30,
                calories: 150,
                avg_heart_rate: 110,
            },
        }
    }

    fn challenge(entries: Vec<DailyEntry>) -> ChallengeData {
        let mut data = ChallengeData::starting(day("2024-01-01"));
        for entry in entries {
            data.upsert_entry(entry);
        }
        data
    }

    #[test]
    fn empty_challenge_is_all_zero() {
        let data = challenge(vec![]);
        let stats = build_stats_at(day("2024-01-01"), &data);
        assert_eq!(stats.completed_days, 0);
        assert_eq!(stats.completion_percentage, 0.0);
        assert_eq!(stats.average_calories_consumed, 0.0);
        assert_eq!(stats.total_weight_lost, 0.0);
        assert_eq!(stats.total_run_time_text, "0:00");
        assert!(stats.recent_entries.is_empty());
    }

    #[test]
    fn weight_lost_from_start_entry_to_latest() {
        let data = challenge(vec![
            entry("2024-01-01", 200.0, WorkoutType::Strength),
            entry("2024-01-05", 195.0, WorkoutType::Recovery),
        ]);
        let stats = build_stats_at(day("2024-01-05"), &data);
        assert_eq!(stats.total_weight_lost, 5.0);
        assert_eq!(stats.completed_days, 2);
        assert!((stats.completion_percentage - 2.6667).abs() < 0.001);
    }

    #[test]
    fn weight_lost_needs_entry_on_start_date() {
        let data = challenge(vec![
            entry("2024-01-02", 200.0, WorkoutType::Strength),
            entry("2024-01-05", 195.0, WorkoutType::Strength),
        ]);
        assert_eq!(total_weight_lost(&data), 0.0);
    }

    #[test]
    fn totals_sum_over_entries() {
        let data = challenge(vec![
            entry("2024-01-01", 200.0, WorkoutType::Strength),
            entry("2024-01-02", 199.0, WorkoutType::Strength),
        ]);
        assert_eq!(total_run_time(&data), 3600);
        assert_eq!(total_distance(&data), 6.0);
        assert_eq!(total_calories_burned(&data), 900);
        assert_eq!(average_calories_consumed(&data), 2000.0);
    }

    #[test]
    fn completion_is_not_clamped() {
        let start = day("2024-01-01");
        let entries = (0..80)
            .map(|offset| {
                entry(
                    &date_key(start + Duration::days(offset)),
                    180.0,
                    WorkoutType::Strength,
                )
            })
            .collect();
        let data = challenge(entries);
        assert!(completion_percentage(&data) > 100.0);
    }

    #[test]
    fn workout_distribution_ignores_other_types() {
        let data = challenge(vec![
            entry("2024-01-01", 200.0, WorkoutType::Strength),
            entry("2024-01-02", 200.0, WorkoutType::Strength),
            entry("2024-01-03", 200.0, WorkoutType::Recovery),
            entry("2024-01-04", 200.0, WorkoutType::Other("yoga".into())),
        ]);
        assert_eq!(
            workout_type_distribution(&data),
            WorkoutDistribution {
                strength: 2,
                recovery: 1
            }
        );
    }

    #[test]
    fn recent_entries_newest_seven() {
        let start = day("2024-01-01");
        let entries = (0..10)
            .map(|offset| {
                entry(
                    &date_key(start + Duration::days(offset)),
                    200.0,
                    WorkoutType::Strength,
                )
            })
            .collect();
        let recent = recent_entries(&challenge(entries));
        assert_eq!(recent.len(), 7);
        assert_eq!(recent[0].date, "2024-01-10");
        assert_eq!(recent[6].date, "2024-01-04");
    }

    #[test]
    fn chart_series_has_gaps_for_missing_days() {
        let mut logged = entry("2024-01-03", 198.0, WorkoutType::Strength);
        logged.run.time = 1530;
        let data = challenge(vec![logged]);
        let series = chart_series(day("2024-01-01"), &data);

        assert_eq!(series.len(), 75);
        assert_eq!(series[0].day, 1);
        assert_eq!(series[74].date, "2024-03-15");
        assert_eq!(series[0].weight, None);
        assert_eq!(series[0].workout_calories, None);
        assert_eq!(series[2].weight, Some(198.0));
        assert_eq!(series[2].run_time, Some(25.5));
        assert_eq!(series[2].workout_calories, Some(450));
    }

    #[test]
    fn chart_series_stops_at_end_of_calendar() {
        let mut data = challenge(vec![]);
        data.start_date = "+262142-12-31".to_string();
        assert!(data.start().is_some());

        let series = build_chart(&data);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].day, 1);
        assert_eq!(series[0].weight, None);
    }

    #[test]
    fn current_day_follows_calendar() {
        let start = Some(day("2024-01-01"));
        assert_eq!(current_day(start, day("2024-01-01")), 1);
        assert_eq!(current_day(start, day("2024-01-10")), 10);
        assert_eq!(current_day(start, day("2023-12-25")), 1);
        assert_eq!(current_day(start, day("2024-06-01")), 75);
        assert_eq!(current_day(None, day("2024-06-01")), 1);
    }

    #[test]
    fn progress_percentage_is_rounded() {
        let data = challenge(vec![]);
        let progress = progress_at(day("2024-01-10"), &data);
        assert_eq!(progress.current_day, 10);
        assert_eq!(progress.progress_percentage, 13);
    }

    #[test]
    fn history_filters_and_sorts() {
        let mut heavy = entry("2024-01-02", 210.5, WorkoutType::Recovery);
        heavy.calories = 1500;
        let data = challenge(vec![
            entry("2024-01-01", 200.0, WorkoutType::Strength),
            heavy,
            entry("2024-01-03", 190.0, WorkoutType::Strength),
        ]);

        let by_date = build_history(&data, "", HistorySort::Date);
        assert_eq!(by_date[0].entry.date, "2024-01-03");
        assert_eq!(by_date[0].day, 3);

        let by_weight = build_history(&data, "", HistorySort::Weight);
        assert_eq!(by_weight[0].entry.weight, 210.5);

        let by_calories = build_history(&data, "", HistorySort::Calories);
        assert_eq!(by_calories[2].entry.date, "2024-01-02");

        let recovery = build_history(&data, "RECOVERY", HistorySort::Date);
        assert_eq!(recovery.len(), 1);
        assert_eq!(build_history(&data, "210.5", HistorySort::Date).len(), 1);
        assert_eq!(build_history(&data, "01-0", HistorySort::Date).len(), 3);
    }

    #[test]
    fn history_sort_parses_with_default() {
        assert_eq!(HistorySort::parse(Some("weight")), HistorySort::Weight);
        assert_eq!(HistorySort::parse(Some("calories")), HistorySort::Calories);
        assert_eq!(HistorySort::parse(Some("bogus")), HistorySort::Date);
        assert_eq!(HistorySort::parse(None), HistorySort::Date);
    }
}

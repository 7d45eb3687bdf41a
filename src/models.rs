use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CHALLENGE_DAYS: u32 = 75;
pub const DEFAULT_TARGET_CALORIES: u32 = 2000;

/// Kind of the second workout of the day.
///
/// Values other than `strength` and `recovery` are kept verbatim so that a
/// hand-edited data file round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    #[default]
    Strength,
    Recovery,
    #[serde(untagged)]
    Other(String),
}

impl WorkoutType {
    pub fn as_str(&self) -> &str {
        match self {
            WorkoutType::Strength => "strength",
            WorkoutType::Recovery => "recovery",
            WorkoutType::Other(value) => value,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "strength" => WorkoutType::Strength,
            "recovery" => WorkoutType::Recovery,
            other => WorkoutType::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RunData {
    /// Duration in seconds.
    pub time: u32,
    /// Miles.
    pub distance: f64,
    pub calories: u32,
    /// Free text, `MM:SS`. Not checked against time and distance.
    pub avg_pace_per_mile: String,
    /// Feet.
    pub elevation_gain: i32,
    pub avg_heart_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalWorkoutData {
    #[serde(rename = "type")]
    pub kind: WorkoutType,
    /// Minutes.
    pub length: u32,
    pub calories: u32,
    pub avg_heart_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub date: String,
    pub weight: f64,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub run: RunData,
    #[serde(default)]
    pub additional_workout: AdditionalWorkoutData,
}

impl DailyEntry {
    pub fn workout_calories(&self) -> u32 {
        self.run
            .calories
            .saturating_add(self.additional_workout.calories)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeData {
    pub start_date: String,
    #[serde(default)]
    pub entries: BTreeMap<String, DailyEntry>,
    #[serde(default = "default_target_calories")]
    pub target_calories: u32,
}

fn default_target_calories() -> u32 {
    DEFAULT_TARGET_CALORIES
}

impl ChallengeData {
    /// Empty challenge anchored at `start`.
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start_date: date_key(start),
            entries: BTreeMap::new(),
            target_calories: DEFAULT_TARGET_CALORIES,
        }
    }

    /// Inserts or replaces the entry stored under `entry.date`.
    pub fn upsert_entry(&mut self, entry: DailyEntry) -> Option<DailyEntry> {
        self.entries.insert(entry.date.clone(), entry)
    }

    pub fn remove_entry(&mut self, date: &str) -> Option<DailyEntry> {
        self.entries.remove(date)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        parse_date(&self.start_date)
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Zero-padded key for a date typed by hand. Unparseable input is returned
/// as-is so lookups on it simply miss.
pub fn normalise_date_key(value: &str) -> String {
    parse_date(value).map_or_else(|| value.to_string(), date_key)
}

/// Body of the JSON create/update endpoints.
///
/// `run_time` carries the `MM:SS` text typed by the user; when present it
/// overrides `entry.run.time`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySubmission {
    pub entry: DailyEntry,
    #[serde(default)]
    pub run_time: Option<String>,
}

/// Flat form posted by the HTML page.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryForm {
    pub date: String,
    pub weight: f64,
    #[serde(default)]
    pub calories: u32,
    pub run_time: String,
    #[serde(default)]
    pub run_distance: f64,
    #[serde(default)]
    pub run_calories: u32,
    #[serde(default)]
    pub run_pace: String,
    #[serde(default)]
    pub run_elevation: i32,
    #[serde(default)]
    pub run_heart_rate: u32,
    #[serde(default)]
    pub workout_type: String,
    #[serde(default)]
    pub workout_length: u32,
    #[serde(default)]
    pub workout_calories: u32,
    #[serde(default)]
    pub workout_heart_rate: u32,
}

impl From<EntryForm> for EntrySubmission {
    fn from(form: EntryForm) -> Self {
        EntrySubmission {
            entry: DailyEntry {
                date: form.date,
                weight: form.weight,
                calories: form.calories,
                run: RunData {
                    time: 0,
                    distance: form.run_distance,
                    calories: form.run_calories,
                    avg_pace_per_mile: form.run_pace,
                    elevation_gain: form.run_elevation,
                    avg_heart_rate: form.run_heart_rate,
                },
                additional_workout: AdditionalWorkoutData {
                    kind: WorkoutType::parse(&form.workout_type),
                    length: form.workout_length,
                    calories: form.workout_calories,
                    avg_heart_rate: form.workout_heart_rate,
                },
            },
            run_time: Some(form.run_time),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetCaloriesRequest {
    pub target_calories: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    #[serde(default)]
    pub share: Option<String>,
}

impl IndexQuery {
    pub fn share_mode(&self) -> bool {
        self.share.as_deref() == Some("true")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkoutDistribution {
    pub strength: usize,
    pub recovery: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub current_day: u32,
    pub total_days: u32,
    pub progress_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub completed_days: usize,
    pub completion_percentage: f64,
    pub total_run_time: u64,
    pub total_run_time_text: String,
    pub total_distance: f64,
    pub total_calories_burned: u64,
    pub total_weight_lost: f64,
    pub average_calories_consumed: f64,
    pub target_calories: u32,
    pub workout_types: WorkoutDistribution,
    pub recent_entries: Vec<DailyEntry>,
    pub progress: Progress,
}

/// One calendar day of the chart series. Fields are `None` when nothing was
/// logged for the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub day: u32,
    pub date: String,
    pub weight: Option<f64>,
    pub calories: Option<u32>,
    /// Decimal minutes, one decimal.
    pub run_time: Option<f64>,
    pub run_distance: Option<f64>,
    pub workout_calories: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub day: i64,
    pub run_time_text: String,
    #[serde(flatten)]
    pub entry: DailyEntry,
}

//! One-time repair of run durations that were saved in minutes.
//!
//! Older saves stored `run.time` in minutes. Any positive value below two
//! hours' worth of seconds is taken to be minutes and scaled up. The rule is
//! content-based and not idempotent, so it must only ever run behind the
//! persisted migration flag (see [`crate::loader`]).

use crate::models::ChallengeData;

/// Values strictly below this are treated as minutes.
pub const LEGACY_MINUTES_CEILING: u32 = 7200;

pub fn migrate_run_times(mut data: ChallengeData) -> ChallengeData {
    for entry in data.entries.values_mut() {
        let time = entry.run.time;
        if time > 0 && time < LEGACY_MINUTES_CEILING {
            entry.run.time = time.saturating_mul(60);
        }
    }
    data
}

/// How many entries [`migrate_run_times`] would rewrite.
pub fn legacy_entry_count(data: &ChallengeData) -> usize {
    data.entries
        .values()
        .filter(|entry| entry.run.time > 0 && entry.run.time < LEGACY_MINUTES_CEILING)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyEntry, RunData};
    use chrono::NaiveDate;

    fn data_with_times(times: &[(&str, u32)]) -> ChallengeData {
        let mut data = ChallengeData::starting(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        for (date, time) in times {
            data.upsert_entry(DailyEntry {
                date: date.to_string(),
                weight: 190.0,
                calories: 2000,
                run: RunData {
                    time: *time,
                    ..RunData::default()
                },
                additional_workout: Default::default(),
            });
        }
        data
    }

    #[test]
    fn scales_minute_values() {
        let data = migrate_run_times(data_with_times(&[("2024-01-01", 45)]));
        assert_eq!(data.entries["2024-01-01"].run.time, 2700);
    }

    #[test]
    fn leaves_zero_and_large_values() {
        let data = migrate_run_times(data_with_times(&[
            ("2024-01-01", 0),
            ("2024-01-02", 7200),
            ("2024-01-03", 9000),
            ("2024-01-04", 7199),
        ]));
        assert_eq!(data.entries["2024-01-01"].run.time, 0);
        assert_eq!(data.entries["2024-01-02"].run.time, 7200);
        assert_eq!(data.entries["2024-01-03"].run.time, 9000);
        assert_eq!(data.entries["2024-01-04"].run.time, 7199 * 60);
    }

    #[test]
    fn running_twice_double_converts() {
        let once = migrate_run_times(data_with_times(&[("2024-01-01", 30)]));
        assert_eq!(once.entries["2024-01-01"].run.time, 1800);
        let twice = migrate_run_times(once);
        assert_eq!(twice.entries["2024-01-01"].run.time, 108_000);
    }

    #[test]
    fn counts_legacy_entries() {
        let data = data_with_times(&[("2024-01-01", 30), ("2024-01-02", 1800 * 5), ("2024-01-03", 0)]);
        assert_eq!(legacy_entry_count(&data), 1);
    }
}

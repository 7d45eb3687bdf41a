use crate::errors::ValidationError;
use crate::models::{DailyEntry, EntrySubmission, date_key, parse_date};
use crate::time_utils::{time_string_to_seconds, validate_time_string};

/// 20 minutes.
pub const MIN_RUN_SECONDS: i64 = 1200;

/// Applies the save/update business rules and returns the entry to store.
pub fn accept_submission(submission: EntrySubmission) -> Result<DailyEntry, ValidationError> {
    let EntrySubmission {
        mut entry,
        run_time,
    } = submission;

    if let Some(text) = run_time {
        let text = text.trim();
        if !validate_time_string(text) {
            return Err(ValidationError::InvalidTimeFormat(text.to_string()));
        }
        let seconds = time_string_to_seconds(text);
        entry.run.time = u32::try_from(seconds)
            .map_err(|_| ValidationError::InvalidTimeFormat(text.to_string()))?;
    }

    check_run_time(i64::from(entry.run.time))?;

    let Some(date) = parse_date(&entry.date) else {
        return Err(ValidationError::InvalidDate(entry.date));
    };
    // Normalise padding so "2024-1-5" and "2024-01-05" share one key.
    entry.date = date_key(date);

    if !entry.weight.is_finite() || entry.weight <= 0.0 {
        return Err(ValidationError::InvalidWeight(entry.weight));
    }

    Ok(entry)
}

pub fn check_run_time(seconds: i64) -> Result<(), ValidationError> {
    if seconds < MIN_RUN_SECONDS {
        return Err(ValidationError::RunTooShort { seconds });
    }
    Ok(())
}

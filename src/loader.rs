//! Startup sequence: remote override first, then local state, with the
//! one-time run-time migration gated on the persisted flag.

use crate::migration::{legacy_entry_count, migrate_run_times};
use crate::models::ChallengeData;
use crate::remote::RemoteSource;
use crate::storage::Persistence;
use crate::store::write_document;
use chrono::NaiveDate;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Remote override document.
    Remote,
    /// Local state, already migrated.
    Local,
    /// Local state migrated on this load.
    Migrated,
    /// Nothing stored yet; a new challenge starting today.
    Fresh,
    /// Stored state was unreadable; a new challenge held in memory only.
    Recovered,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub data: ChallengeData,
    pub source: LoadSource,
}

pub async fn load_challenge<P: Persistence>(
    persistence: &P,
    remote: Option<&RemoteSource>,
    today: NaiveDate,
) -> LoadOutcome {
    if let Some(remote) = remote {
        match remote.fetch().await {
            Ok(data) => {
                info!(url = remote.url(), entries = data.entries.len(), "using remote challenge data");
                return LoadOutcome {
                    data,
                    source: LoadSource::Remote,
                };
            }
            Err(err) => warn!(url = remote.url(), error = %err, "remote data unavailable, using local state"),
        }
    }

    load_local(persistence, today).await
}

pub async fn load_local<P: Persistence>(persistence: &P, today: NaiveDate) -> LoadOutcome {
    let bytes = match persistence.read_data().await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(error = %err, "failed to read challenge data");
            return LoadOutcome {
                data: ChallengeData::starting(today),
                source: LoadSource::Recovered,
            };
        }
    };

    let Some(bytes) = bytes else {
        let data = ChallengeData::starting(today);
        if let Err(err) = write_document(persistence, &data).await {
            warn!(error = %err, "failed to persist new challenge");
        } else {
            mark_migrated(persistence).await;
        }
        info!(start_date = %data.start_date, "starting new challenge");
        return LoadOutcome {
            data,
            source: LoadSource::Fresh,
        };
    };

    let data: ChallengeData = match serde_json::from_slice(&bytes) {
        Ok(data) => data,
        Err(err) => {
            error!(error = %err, "failed to parse challenge data");
            // Whatever gets saved from here on is already in seconds.
            mark_migrated(persistence).await;
            return LoadOutcome {
                data: ChallengeData::starting(today),
                source: LoadSource::Recovered,
            };
        }
    };

    let migrated = match persistence.migration_complete().await {
        Ok(done) => done,
        Err(err) => {
            // An unreadable flag skips migration.
            warn!(error = %err, "failed to read migration flag, skipping migration");
            true
        }
    };

    if migrated {
        info!(entries = data.entries.len(), "loaded challenge data");
        return LoadOutcome {
            data,
            source: LoadSource::Local,
        };
    }

    let rewritten = legacy_entry_count(&data);
    let data = migrate_run_times(data);
    match write_document(persistence, &data).await {
        Ok(()) => mark_migrated(persistence).await,
        Err(err) => warn!(error = %err, "failed to persist migrated data, will retry next start"),
    }
    info!(entries = data.entries.len(), rewritten, "migrated run times from minutes to seconds");

    LoadOutcome {
        data,
        source: LoadSource::Migrated,
    }
}

async fn mark_migrated<P: Persistence>(persistence: &P) {
    if let Err(err) = persistence.mark_migration_complete().await {
        warn!(error = %err, "failed to persist migration flag");
    }
}

use crate::errors::StorageError;
use crate::models::{ChallengeData, DailyEntry};
use crate::storage::Persistence;
use std::sync::Arc;
use tracing::{debug, warn};

/// The challenge document plus the persistence it is written through to.
///
/// Every mutation serializes the whole document, writes it, and only then
/// swaps it in, so memory never runs ahead of what was saved. The first
/// successful write also sets the migration flag: this process only ever
/// holds run times in seconds.
pub struct ChallengeStore<P> {
    data: ChallengeData,
    persistence: Arc<P>,
    flag_written: bool,
}

/// Entries displaced by [`ChallengeStore::replace`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Replaced {
    /// The entry previously stored under the original date, when re-keyed.
    pub moved_from: Option<DailyEntry>,
    /// An entry that already sat on the target date.
    pub overwritten: Option<DailyEntry>,
}

impl<P: Persistence> ChallengeStore<P> {
    pub fn new(data: ChallengeData, persistence: Arc<P>) -> Self {
        Self {
            data,
            persistence,
            flag_written: false,
        }
    }

    pub fn data(&self) -> &ChallengeData {
        &self.data
    }

    pub fn get(&self, date: &str) -> Option<&DailyEntry> {
        self.data.entries.get(date)
    }

    /// Inserts or replaces the entry at `entry.date`, returning the old one.
    pub async fn upsert(&mut self, entry: DailyEntry) -> Result<Option<DailyEntry>, StorageError> {
        let mut next = self.data.clone();
        let previous = next.upsert_entry(entry);
        self.commit(next).await?;
        Ok(previous)
    }

    /// Removes the entry at `date`. Missing keys are not an error.
    pub async fn remove(&mut self, date: &str) -> Result<Option<DailyEntry>, StorageError> {
        if !self.data.entries.contains_key(date) {
            return Ok(None);
        }
        let mut next = self.data.clone();
        let removed = next.remove_entry(date);
        self.commit(next).await?;
        Ok(removed)
    }

    /// Saves an edited entry that was loaded from `original_date`. A changed
    /// date re-keys the entry, replacing whatever was stored on the new date.
    pub async fn replace(
        &mut self,
        original_date: &str,
        entry: DailyEntry,
    ) -> Result<Replaced, StorageError> {
        let mut next = self.data.clone();
        let mut replaced = Replaced::default();
        if original_date != entry.date {
            replaced.moved_from = next.remove_entry(original_date);
        }
        replaced.overwritten = next.upsert_entry(entry);
        self.commit(next).await?;
        Ok(replaced)
    }

    pub async fn set_target_calories(&mut self, target: u32) -> Result<(), StorageError> {
        let mut next = self.data.clone();
        next.target_calories = target;
        self.commit(next).await
    }

    /// Pretty-printed persisted document, for pasting into the remote
    /// override file.
    pub async fn export_json(&self) -> Result<String, StorageError> {
        let persisted = match self.persistence.read_data().await? {
            Some(bytes) => serde_json::from_slice::<serde_json::Value>(&bytes).ok(),
            None => None,
        };
        let text = match persisted {
            Some(value) => serde_json::to_string_pretty(&value)?,
            None => serde_json::to_string_pretty(&self.data)?,
        };
        Ok(text)
    }

    async fn commit(&mut self, next: ChallengeData) -> Result<(), StorageError> {
        write_document(self.persistence.as_ref(), &next).await?;
        debug!(entries = next.entries.len(), "challenge data persisted");
        self.data = next;

        if !self.flag_written {
            match self.persistence.mark_migration_complete().await {
                Ok(()) => self.flag_written = true,
                Err(err) => warn!(error = %err, "failed to persist migration flag"),
            }
        }
        Ok(())
    }
}

pub async fn write_document<P: Persistence>(
    persistence: &P,
    data: &ChallengeData,
) -> Result<(), StorageError> {
    let payload = serde_json::to_vec(data)?;
    persistence.write_data(payload).await
}

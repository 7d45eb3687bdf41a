use crate::errors::StorageError;
use std::{future::Future, path::PathBuf};
use tokio::{fs, sync::Mutex};

pub const DATA_FILE: &str = "data.json";
pub const MIGRATION_FLAG_FILE: &str = "migration-flag";

/// Backing store for the challenge document and the one-time migration flag.
///
/// The store only moves bytes; encoding lives with [`crate::store`].
pub trait Persistence: Send + Sync + 'static {
    /// Raw bytes of the `data` key, `None` if nothing was ever written.
    fn read_data(&self) -> impl Future<Output = Result<Option<Vec<u8>>, StorageError>> + Send;

    fn write_data(&self, bytes: Vec<u8>) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn migration_complete(&self) -> impl Future<Output = Result<bool, StorageError>> + Send;

    fn mark_migration_complete(&self) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// One file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn data_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE)
    }

    pub fn flag_path(&self) -> PathBuf {
        self.dir.join(MIGRATION_FLAG_FILE)
    }
}

impl Persistence for FileStore {
    async fn read_data(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.data_path()).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_data(&self, bytes: Vec<u8>) -> Result<(), StorageError> {
        // Write next to the target and rename so a crash never leaves half a document.
        let path = self.data_path();
        let tmp = self.dir.join(format!("{DATA_FILE}.tmp"));
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn migration_complete(&self) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.flag_path()).await?)
    }

    async fn mark_migration_complete(&self) -> Result<(), StorageError> {
        fs::write(self.flag_path(), b"true").await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    data: Option<Vec<u8>>,
    migrated: bool,
    writes: usize,
}

/// In-process store, handy for tests and for embedding the core elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(bytes: impl Into<Vec<u8>>, migrated: bool) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                data: Some(bytes.into()),
                migrated,
                writes: 0,
            }),
        }
    }

    pub async fn snapshot(&self) -> Option<Vec<u8>> {
        self.inner.lock().await.data.clone()
    }

    /// Number of `write_data` calls so far.
    pub async fn writes(&self) -> usize {
        self.inner.lock().await.writes
    }
}

impl Persistence for MemoryStore {
    async fn read_data(&self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.inner.lock().await.data.clone())
    }

    async fn write_data(&self, bytes: Vec<u8>) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        inner.data = Some(bytes);
        inner.writes += 1;
        Ok(())
    }

    async fn migration_complete(&self) -> Result<bool, StorageError> {
        Ok(self.inner.lock().await.migrated)
    }

    async fn mark_migration_complete(&self) -> Result<(), StorageError> {
        self.inner.lock().await.migrated = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_reads_none_before_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.read_data().await.unwrap().is_none());
        assert!(!store.migration_complete().await.unwrap());
    }

    #[tokio::test]
    async fn file_store_round_trips_bytes_and_flag() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write_data(b"{\"a\":1}".to_vec()).await.unwrap();
        store.write_data(b"{\"a\":2}".to_vec()).await.unwrap();
        store.mark_migration_complete().await.unwrap();

        assert_eq!(store.read_data().await.unwrap().unwrap(), b"{\"a\":2}");
        assert!(store.migration_complete().await.unwrap());
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[tokio::test]
    async fn memory_store_counts_writes() {
        let store = MemoryStore::new();
        store.write_data(b"x".to_vec()).await.unwrap();
        store.write_data(b"y".to_vec()).await.unwrap();
        assert_eq!(store.writes().await, 2);
        assert_eq!(store.snapshot().await.unwrap(), b"y");
    }
}

use crate::core::PersistentStore;
use crate::utils::error::{CartError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Key-value store kept as one JSON object on disk, the same shape a browser
/// gives `localStorage`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(data) if data.is_empty() => Ok(BTreeMap::new()),
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Sibling file the next snapshot is staged in before the rename.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "storage".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PersistentStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(CartError::SerializationError(e)) => {
                tracing::warn!(
                    "Discarding unreadable storage file {}: {}",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(&entries)?;
        let staging = self.staging_path();
        tracing::debug!("Writing {} bytes to {}", data.len(), self.path.display());
        tokio::fs::write(&staging, data).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

/// In-process store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn lock_entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|e| CartError::StorageError {
            message: format!("memory store poisoned: {}", e),
        })
    }
}

impl PersistentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock_entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock_entries()?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `MemoryStore` whose writes can be switched to fail.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct FlakyStore {
    inner: MemoryStore,
    failing: Arc<AtomicBool>,
}

#[cfg(test)]
impl FlakyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn insert(&self, key: &str, value: &str) {
        self.inner.insert(key, value);
    }

    pub(crate) fn peek(&self, key: &str) -> Option<String> {
        self.inner.peek(key)
    }
}

#[cfg(test)]
impl PersistentStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CartError::StorageError {
                message: format!("write to {} refused", key),
            });
        }
        self.inner.set(key, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_missing_file_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("storage.json"));

        assert_eq!(store.get("@RocketShoes:cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested/storage.json"));

        store.set("@RocketShoes:theme", "dark").await.unwrap();
        store.set("@RocketShoes:cart", "[]").await.unwrap();
        store.set("@RocketShoes:cart", r#"[{"id":1}]"#).await.unwrap();

        assert_eq!(
            store.get("@RocketShoes:theme").await.unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(
            store.get("@RocketShoes:cart").await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_fails_reads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = FileStore::new(path);
        assert!(matches!(
            store.get("@RocketShoes:cart").await,
            Err(CartError::SerializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_file_store_write_replaces_truncated_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, r#"{"@RocketShoes:cart": "[]""#).unwrap();

        let store = FileStore::new(&path);
        store.set("@RocketShoes:cart", r#"[{"id":1}]"#).await.unwrap();

        assert_eq!(
            store.get("@RocketShoes:cart").await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert!(!temp_dir.path().join("storage.json.tmp").exists());
    }

    #[test]
    fn test_memory_store_shares_state_between_clones() {
        let store = MemoryStore::new();
        let other = store.clone();

        tokio_test::block_on(store.set("k", "v")).unwrap();
        assert_eq!(other.peek("k").as_deref(), Some("v"));
        assert_eq!(tokio_test::block_on(other.get("k")).unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_flaky_store_refuses_writes_when_failing() {
        let store = FlakyStore::new();
        tokio_test::block_on(store.set("k", "v")).unwrap();

        store.fail_writes(true);
        assert!(tokio_test::block_on(store.set("k", "w")).is_err());
        assert_eq!(store.peek("k").as_deref(), Some("v"));
    }
}

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};
use crate::platform::OperatingSystem;
use crate::tools::Tool;

/// Flat record of everything a session needs to be rebuilt. The detected OS
/// is never part of it, only an explicit choice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_os: Option<OperatingSystem>,
    #[serde(default)]
    pub selected: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_tools: Vec<Tool>,
}

/// Storage backend for session snapshots
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<SessionSnapshot>>;
    async fn save(&self, key: &str, snapshot: &SessionSnapshot) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}

/// In-memory store
pub struct MemoryStore {
    inner: RwLock<HashMap<String, SessionSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<SessionSnapshot>> {
        Ok(self.inner.read().get(key).cloned())
    }

    async fn save(&self, key: &str, snapshot: &SessionSnapshot) -> Result<()> {
        self.inner.write().insert(key.to_string(), snapshot.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.write().remove(key);
        Ok(())
    }
}

/// File store: one JSON file per key under a directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            || key.starts_with('.')
        {
            return Err(SetupError::validation(format!("invalid session key `{key}`")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<SessionSnapshot>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, key: &str, snapshot: &SessionSnapshot) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let contents = serde_json::to_string_pretty(snapshot)?;
        tokio::fs::write(&path, contents).await?;
        tracing::debug!(path = %path.display(), "session saved");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load("default").await.unwrap().is_none());

        let snapshot = SessionSnapshot {
            active_os: Some(OperatingSystem::Macos),
            selected: vec!["git".to_string()],
            custom_tools: Vec::new(),
        };
        store.save("default", &snapshot).await.unwrap();
        assert_eq!(store.load("default").await.unwrap(), Some(snapshot));

        store.delete("default").await.unwrap();
        assert!(store.load("default").await.unwrap().is_none());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let store = FileStore::new("/tmp/ugsetup");
        assert!(store.path_for("../etc/passwd").is_err());
        assert!(store.path_for(".hidden").is_err());
        assert!(store.path_for("").is_err());
        assert_eq!(
            store.path_for("work").unwrap(),
            PathBuf::from("/tmp/ugsetup/work.json")
        );
    }

    #[test]
    fn snapshot_omits_detected_os() {
        let json = serde_json::to_value(SessionSnapshot::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "selected": [] }));
    }
}

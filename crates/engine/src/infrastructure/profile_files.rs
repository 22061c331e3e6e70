//! JSON file profile storage: one `<session>.json` per profile.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use raidledger_domain::SessionId;

use crate::infrastructure::ports::{ProfileStoragePort, RepoError};

const PROFILE_EXTENSION: &str = "json";

pub struct JsonFileProfileStorage {
    dir: PathBuf,
}

impl JsonFileProfileStorage {
    /// Uses `dir`, creating it when missing.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| RepoError::storage("create_profile_dir", e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, session_id: &SessionId) -> PathBuf {
        self.dir
            .join(format!("{}.{}", session_id.as_str(), PROFILE_EXTENSION))
    }
}

#[async_trait]
impl ProfileStoragePort for JsonFileProfileStorage {
    async fn list_sessions(&self) -> Result<Vec<SessionId>, RepoError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| RepoError::storage("list_sessions", e))?;

        let mut sessions = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RepoError::storage("list_sessions", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PROFILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                sessions.push(SessionId::new(stem));
            }
        }
        sessions.sort();
        Ok(sessions)
    }

    async fn read(&self, session_id: &SessionId) -> Result<Option<String>, RepoError> {
        match tokio::fs::read_to_string(self.path_for(session_id)).await {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RepoError::storage("read_profile", e)),
        }
    }

    async fn write(&self, session_id: &SessionId, json: &str) -> Result<(), RepoError> {
        // Write to a sibling file first so a crash never leaves a half-written profile.
        let path = self.path_for(session_id);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepoError::storage("write_profile", e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| RepoError::storage("write_profile", e))
    }

    async fn remove(&self, session_id: &SessionId) -> Result<(), RepoError> {
        match tokio::fs::remove_file(self.path_for(session_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepoError::storage("remove_profile", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_read_returns_document() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileProfileStorage::new(dir.path()).await.unwrap();
        let session = SessionId::new("abc");

        storage.write(&session, r#"{"a":1}"#).await.unwrap();
        assert_eq!(storage.read(&session).await.unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[tokio::test]
    async fn missing_profile_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileProfileStorage::new(dir.path()).await.unwrap();
        assert_eq!(storage.read(&SessionId::new("nobody")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_sessions_only_sees_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileProfileStorage::new(dir.path()).await.unwrap();
        storage.write(&SessionId::new("b"), "{}").await.unwrap();
        storage.write(&SessionId::new("a"), "{}").await.unwrap();
        tokio::fs::write(dir.path().join("notes.txt"), "x").await.unwrap();

        let sessions = storage.list_sessions().await.unwrap();
        assert_eq!(sessions, vec![SessionId::new("a"), SessionId::new("b")]);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileProfileStorage::new(dir.path()).await.unwrap();
        let session = SessionId::new("gone");
        storage.write(&session, "{}").await.unwrap();

        storage.remove(&session).await.unwrap();
        storage.remove(&session).await.unwrap();
        assert_eq!(storage.read(&session).await.unwrap(), None);
    }
}

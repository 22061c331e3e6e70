//! Authoritative profile store.
//!
//! Every profile lives in memory behind its own `tokio::sync::Mutex`; holding
//! the guard returned by [`ProfileStore::lock`] is what serializes work on a
//! session. Writes go through the pre-save hook chain and are skipped when
//! the serialized document hashes the same as the last write.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tokio::sync::{Mutex, OwnedMutexGuard};

use raidledger_domain::{repair_profile, Profile, SessionId};

use crate::infrastructure::ports::{ProfileStoragePort, RepoError};

use super::save_hooks::{run_save_hooks, SaveHook};

/// Outcome of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    Unchanged,
}

/// Summary of a startup load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub repaired: usize,
    pub skipped: usize,
}

pub struct ProfileStore {
    storage: Arc<dyn ProfileStoragePort>,
    profiles: DashMap<SessionId, Arc<Mutex<Profile>>>,
    hashes: DashMap<SessionId, String>,
    hooks: Vec<SaveHook>,
}

impl ProfileStore {
    pub fn new(storage: Arc<dyn ProfileStoragePort>) -> Self {
        Self {
            storage,
            profiles: DashMap::new(),
            hashes: DashMap::new(),
            hooks: Vec::new(),
        }
    }

    /// Registers a hook to run before every save, after those already registered.
    pub fn with_save_hook(mut self, hook: SaveHook) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn exists(&self, session_id: &SessionId) -> bool {
        self.profiles.contains_key(session_id)
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.profiles.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Exclusive access to a session's profile for as long as the guard lives.
    pub async fn lock(&self, session_id: &SessionId) -> Result<OwnedMutexGuard<Profile>, RepoError> {
        // Clone the Arc out so no map shard lock is held while waiting.
        let slot = self
            .profiles
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RepoError::not_found("Profile", session_id))?;
        Ok(slot.lock_owned().await)
    }

    /// A copy of the current profile.
    pub async fn get(&self, session_id: &SessionId) -> Result<Profile, RepoError> {
        let guard = self.lock(session_id).await?;
        Ok(guard.clone())
    }

    /// Adds a new profile and writes it.
    pub async fn create(&self, profile: Profile) -> Result<(), RepoError> {
        let session_id = profile.session_id().clone();
        let slot = match self.profiles.entry(session_id.clone()) {
            Entry::Occupied(_) => return Err(RepoError::already_exists("Profile", &session_id)),
            Entry::Vacant(vacant) => Arc::clone(vacant.insert(Arc::new(Mutex::new(profile))).value()),
        };

        let mut guard = slot.lock_owned().await;
        self.save_profile(&mut guard).await?;
        tracing::info!(session_id = %session_id, "Profile created");
        Ok(())
    }

    /// Drops the profile from memory and from storage.
    pub async fn delete(&self, session_id: &SessionId) -> Result<(), RepoError> {
        let Some((_, slot)) = self.profiles.remove(session_id) else {
            return Err(RepoError::not_found("Profile", session_id));
        };
        // Wait out any in-flight work on the session before removing the file.
        let _guard = slot.lock().await;
        self.hashes.remove(session_id);
        self.storage.remove(session_id).await?;
        tracing::info!(session_id = %session_id, "Profile deleted");
        Ok(())
    }

    /// Loads every stored profile, repairing what can be repaired.
    ///
    /// Documents that do not parse are logged and skipped. Profiles that
    /// needed no repair are recorded as already written so an immediate
    /// save is a no-op.
    pub async fn load_all(&self) -> Result<LoadReport, RepoError> {
        let mut report = LoadReport::default();

        for session_id in self.storage.list_sessions().await? {
            let Some(raw) = self.storage.read(&session_id).await? else {
                continue;
            };

            let mut profile: Profile = match serde_json::from_str(&raw) {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::error!(
                        session_id = %session_id,
                        error = %e,
                        "Profile document is not valid, skipping"
                    );
                    report.skipped += 1;
                    continue;
                }
            };

            if profile.session_id() != &session_id {
                tracing::warn!(
                    session_id = %session_id,
                    profile_id = %profile.session_id(),
                    "Profile id does not match its file name, using the file name"
                );
                profile.info.id = session_id.clone();
            }

            let events = repair_profile(&mut profile);
            for event in &events {
                tracing::error!(session_id = %session_id, repair = %event, "Repaired profile on load");
            }
            if events.is_empty() {
                self.hashes
                    .insert(session_id.clone(), content_hash(&serialize(&profile)?));
            } else {
                report.repaired += 1;
            }

            self.profiles
                .insert(session_id.clone(), Arc::new(Mutex::new(profile)));
            report.loaded += 1;
            tracing::info!(session_id = %session_id, "Profile loaded");
        }

        Ok(report)
    }

    /// Locks and saves one session.
    pub async fn save(&self, session_id: &SessionId) -> Result<SaveOutcome, RepoError> {
        let mut guard = self.lock(session_id).await?;
        self.save_profile(&mut guard).await
    }

    /// Saves a profile the caller already holds the guard for.
    pub async fn save_profile(&self, profile: &mut Profile) -> Result<SaveOutcome, RepoError> {
        run_save_hooks(&self.hooks, profile);

        let session_id = profile.session_id().clone();
        let json = serialize(profile)?;
        let hash = content_hash(&json);

        if self
            .hashes
            .get(&session_id)
            .is_some_and(|previous| *previous == hash)
        {
            tracing::debug!(session_id = %session_id, "Profile unchanged, skipping write");
            return Ok(SaveOutcome::Unchanged);
        }

        self.storage.write(&session_id, &json).await?;
        self.hashes.insert(session_id.clone(), hash);
        tracing::debug!(session_id = %session_id, "Profile written");
        Ok(SaveOutcome::Written)
    }

    /// Saves every profile. Returns how many were actually written.
    pub async fn save_all(&self) -> Result<usize, RepoError> {
        let mut written = 0;
        for session_id in self.session_ids() {
            if self.save(&session_id).await? == SaveOutcome::Written {
                written += 1;
            }
        }
        tracing::info!(written, total = self.profiles.len(), "Saved all profiles");
        Ok(written)
    }
}

fn serialize(profile: &Profile) -> Result<String, RepoError> {
    serde_json::to_string_pretty(profile).map_err(RepoError::serialization)
}

fn content_hash(json: &str) -> String {
    hex::encode(Sha256::digest(json.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockProfileStoragePort;
    use crate::stores::{SaveHook, SaveHookError};
    use crate::test_fixtures::profiles;

    fn store_with(storage: MockProfileStoragePort) -> ProfileStore {
        ProfileStore::new(Arc::new(storage))
    }

    #[tokio::test]
    async fn saving_unchanged_profile_twice_writes_once() {
        let mut storage = MockProfileStoragePort::new();
        storage.expect_write().times(1).returning(|_, _| Ok(()));
        let store = store_with(storage);
        let session = SessionId::new("s1");

        store.create(profiles::basic("s1")).await.unwrap();

        assert_eq!(store.save(&session).await.unwrap(), SaveOutcome::Unchanged);
        assert_eq!(store.save(&session).await.unwrap(), SaveOutcome::Unchanged);
    }

    #[tokio::test]
    async fn saving_after_mutation_writes_again() {
        let mut storage = MockProfileStoragePort::new();
        storage.expect_write().times(2).returning(|_, _| Ok(()));
        let store = store_with(storage);
        let session = SessionId::new("s1");
        store.create(profiles::basic("s1")).await.unwrap();

        {
            let mut profile = store.lock(&session).await.unwrap();
            profile.characters.pmc.info.experience += 100;
        }

        assert_eq!(store.save(&session).await.unwrap(), SaveOutcome::Written);
        assert_eq!(store.save(&session).await.unwrap(), SaveOutcome::Unchanged);
    }

    #[tokio::test]
    async fn when_profile_missing_returns_error() {
        let store = store_with(MockProfileStoragePort::new());
        let result = store.lock(&SessionId::new("nobody")).await;
        assert!(matches!(result, Err(RepoError::NotFound { .. })));
    }

    #[tokio::test]
    async fn when_creating_existing_profile_returns_error() {
        let mut storage = MockProfileStoragePort::new();
        storage.expect_write().times(1).returning(|_, _| Ok(()));
        let store = store_with(storage);

        store.create(profiles::basic("s1")).await.unwrap();
        let result = store.create(profiles::basic("s1")).await;

        assert!(matches!(result, Err(RepoError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn failing_hook_does_not_block_the_save() {
        let mut storage = MockProfileStoragePort::new();
        storage
            .expect_write()
            .times(1)
            .withf(|_, json| json.contains("\"username\": \"hooked\"") && !json.contains("broken"))
            .returning(|_, _| Ok(()));
        let store = store_with(storage)
            .with_save_hook(SaveHook::new("broken", |p: &mut Profile| {
                p.info.username = "broken".into();
                Err(SaveHookError::new("nope"))
            }))
            .with_save_hook(SaveHook::new("name", |p: &mut Profile| {
                p.info.username = "hooked".into();
                Ok(())
            }));

        store.create(profiles::basic("s1")).await.unwrap();
        let profile = store.get(&SessionId::new("s1")).await.unwrap();
        assert_eq!(profile.info.username, "hooked");
    }

    #[tokio::test]
    async fn load_all_skips_bad_documents_and_repairs_the_rest() {
        let good = serde_json::to_string(&profiles::basic("good")).unwrap();
        let mut damaged_profile = profiles::basic("damaged");
        damaged_profile.characters.pmc.fence_info_mut().standing = 40.0;
        let damaged = serde_json::to_string(&damaged_profile).unwrap();

        let mut storage = MockProfileStoragePort::new();
        storage.expect_list_sessions().returning(|| {
            Ok(vec![
                SessionId::new("bad"),
                SessionId::new("damaged"),
                SessionId::new("good"),
            ])
        });
        storage.expect_read().returning(move |session| {
            Ok(Some(match session.as_str() {
                "bad" => "{ not json".to_string(),
                "damaged" => damaged.clone(),
                _ => good.clone(),
            }))
        });
        // Only the repaired profile differs from what is on disk.
        storage
            .expect_write()
            .times(1)
            .withf(|session, _| session.as_str() == "damaged")
            .returning(|_, _| Ok(()));
        let store = store_with(storage);

        let report = store.load_all().await.unwrap();
        assert_eq!(
            report,
            LoadReport {
                loaded: 2,
                repaired: 1,
                skipped: 1
            }
        );

        assert_eq!(store.save_all().await.unwrap(), 1);
        let repaired = store.get(&SessionId::new("damaged")).await.unwrap();
        assert_eq!(repaired.pmc().fence_info().map(|f| f.standing), Some(15.0));
    }

    #[tokio::test]
    async fn delete_removes_memory_and_storage() {
        let mut storage = MockProfileStoragePort::new();
        storage.expect_write().returning(|_, _| Ok(()));
        storage
            .expect_remove()
            .times(1)
            .withf(|session| session.as_str() == "s1")
            .returning(|_| Ok(()));
        let store = store_with(storage);
        let session = SessionId::new("s1");
        store.create(profiles::basic("s1")).await.unwrap();

        store.delete(&session).await.unwrap();

        assert!(!store.exists(&session));
        assert!(store.session_ids().is_empty());
    }

    #[tokio::test]
    async fn sessions_are_serialized_by_the_guard() {
        let mut storage = MockProfileStoragePort::new();
        storage.expect_write().returning(|_, _| Ok(()));
        let store = Arc::new(store_with(storage));
        let session = SessionId::new("s1");
        store.create(profiles::basic("s1")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            let session = session.clone();
            handles.push(tokio::spawn(async move {
                let mut profile = store.lock(&session).await.unwrap();
                let level = profile.characters.pmc.info.level;
                tokio::task::yield_now().await;
                profile.characters.pmc.info.level = level + 1;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let profile = store.get(&session).await.unwrap();
        assert_eq!(profile.characters.pmc.info.level, profiles::basic("s1").pmc().info.level + 8);
    }
}

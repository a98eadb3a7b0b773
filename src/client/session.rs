//! Client-side persistence of the signed-in identity.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use super::error::ClientResult;
use crate::domain::model::Identity;

/// Fixed key the identity is stored under.
pub const SESSION_KEY: &str = "auth_user";

/// Small key-value storage for session records.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// One `<key>.json` file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Single owner of the current identity. Screens read it through
/// [`SessionManager::current`] instead of touching the store.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    current: Mutex<Option<Identity>>,
}

impl SessionManager {
    /// Restores whatever identity the store holds. Unreadable or corrupt
    /// records count as signed out.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let restored = match store.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    log::warn!("Discarding unreadable session record: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Session store unavailable: {e}");
                None
            }
        };
        Self {
            store,
            current: Mutex::new(restored),
        }
    }

    pub fn begin(&self, identity: Identity) -> ClientResult<()> {
        self.store
            .set(SESSION_KEY, &serde_json::to_string(&identity)?)?;
        log::info!("Session started for {} ({})", identity.name, identity.role);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(identity);
        Ok(())
    }

    /// Forgets the identity in memory and in the store.
    pub fn end(&self) {
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Err(e) = self.store.remove(SESSION_KEY) {
            log::warn!("Could not clear session record: {e}");
        }
        if let Some(identity) = previous {
            log::info!("Session ended for {}", identity.name);
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Role;

    fn anna() -> Identity {
        Identity {
            employee_id: 5,
            name: "Anna".into(),
            role: Role::Employee,
        }
    }

    #[test]
    fn file_store_persists_identity_across_managers() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(dir.path()));

        SessionManager::new(store.clone()).begin(anna()).unwrap();
        assert!(dir.path().join("auth_user.json").exists());

        let restored = SessionManager::new(store);
        assert_eq!(restored.current(), Some(anna()));
    }

    #[test]
    fn end_clears_memory_and_store() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(dir.path()));
        let session = SessionManager::new(store.clone());
        session.begin(anna()).unwrap();

        session.end();

        assert_eq!(session.current(), None);
        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
        // ending twice is harmless
        session.end();
    }

    #[test]
    fn corrupt_record_means_no_session() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(SESSION_KEY, "{not json").unwrap();

        let session = SessionManager::new(store);
        assert_eq!(session.current(), None);
    }
}

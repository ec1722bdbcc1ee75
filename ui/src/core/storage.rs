//! Durable key/value persistence behind the session manager.
//!
//! Web builds write to `window.localStorage`; native builds keep a small JSON
//! document under the platform data directory. Tests use [`MemoryStore`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage document is malformed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same map so a test can keep a handle
/// while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{KeyValueStore, StorageError};

    /// `window.localStorage`, looked up on every call.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserStore;

    impl BrowserStore {
        fn storage() -> Result<web_sys::Storage, StorageError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or(StorageError::Unavailable)
        }

        pub fn available() -> bool {
            Self::storage().is_ok()
        }
    }

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Option<String> {
            Self::storage().ok()?.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|_| StorageError::Unavailable)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            Self::storage()?
                .remove_item(key)
                .map_err(|_| StorageError::Unavailable)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;

    use super::{KeyValueStore, StorageError};

    /// JSON object on disk, rewritten on every change.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
        entries: BTreeMap<String, String>,
    }

    impl FileStore {
        pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
            let path = path.into();
            let entries = match fs::read_to_string(&path) {
                Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
                Ok(raw) => serde_json::from_str(&raw)?,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
                Err(err) => return Err(err.into()),
            };
            Ok(Self { path, entries })
        }

        /// Store under the per-user data directory.
        pub fn open_default() -> Result<Self, StorageError> {
            let dirs = directories::ProjectDirs::from("com", "Transloom", "Transloom")
                .ok_or(StorageError::Unavailable)?;
            Self::open(dirs.data_dir().join("session.json"))
        }

        fn flush(&self) -> Result<(), StorageError> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let raw = serde_json::to_string_pretty(&self.entries)?;
            fs::write(&self.path, raw)?;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entries.insert(key.to_string(), value.to_string());
            self.flush()
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            if self.entries.remove(key).is_some() {
                self.flush()?;
            }
            Ok(())
        }
    }
}

/// The platform's durable store, or a memory store when none is reachable.
pub fn default_store() -> Box<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    {
        if BrowserStore::available() {
            return Box::new(BrowserStore);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match FileStore::open_default() {
            Ok(store) => return Box::new(store),
            Err(err) => tracing::warn!(error = %err, "file store unavailable"),
        }
    }

    tracing::warn!("falling back to in-memory session storage");
    Box::new(MemoryStore::new())
}

//! Persisted session marker: a single durable string holding the signed-in
//! role, read on startup to rebuild the session.
//!
//! Only the session store writes the marker.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("marker I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("marker storage unavailable: {0}")]
    Unavailable(String),
}

/// Read/write primitive for the durable session key.
pub trait MarkerStore: Send + Sync {
    /// Current marker, `None` when nothing is stored.
    fn load(&self) -> Result<Option<String>, MarkerError>;

    fn save(&self, value: &str) -> Result<(), MarkerError>;

    /// Remove the marker. Clearing an absent marker succeeds.
    fn clear(&self) -> Result<(), MarkerError>;
}

/// Process-local marker. Intended for tests and throwaway shells.
#[derive(Debug, Default)]
pub struct InMemoryMarkerStore {
    value: RwLock<Option<String>>,
}

impl InMemoryMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a marker already present (e.g. a previous session's role).
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(Some(value.into())),
        }
    }
}

impl MarkerStore for InMemoryMarkerStore {
    fn load(&self) -> Result<Option<String>, MarkerError> {
        let value = self
            .value
            .read()
            .map_err(|_| MarkerError::Unavailable("lock poisoned".to_string()))?;
        Ok(value.clone())
    }

    fn save(&self, value: &str) -> Result<(), MarkerError> {
        let mut slot = self
            .value
            .write()
            .map_err(|_| MarkerError::Unavailable("lock poisoned".to_string()))?;
        *slot = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), MarkerError> {
        let mut slot = self
            .value
            .write()
            .map_err(|_| MarkerError::Unavailable("lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// Marker kept in a small file, surviving process restarts.
#[derive(Debug, Clone)]
pub struct FileMarkerStore {
    path: PathBuf,
}

impl FileMarkerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MarkerStore for FileMarkerStore {
    fn load(&self) -> Result<Option<String>, MarkerError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let value = contents.trim();
                Ok((!value.is_empty()).then(|| value.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, value: &str) -> Result<(), MarkerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, value)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), MarkerError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_saves_and_clears() {
        let store = InMemoryMarkerStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save("hr").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("hr"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_survives_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session-role");

        FileMarkerStore::new(&path).save("accounts").unwrap();
        let reopened = FileMarkerStore::new(&path);
        assert_eq!(reopened.load().unwrap().as_deref(), Some("accounts"));

        reopened.clear().unwrap();
        assert_eq!(reopened.load().unwrap(), None);
        // clearing twice is fine
        reopened.clear().unwrap();
    }

    #[test]
    fn file_store_treats_blank_file_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session-role");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(FileMarkerStore::new(&path).load().unwrap(), None);
    }
}

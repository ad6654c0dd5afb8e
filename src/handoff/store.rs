//! Keyed handoff stores
//!
//! A small key/value surface shared between the recorder and the flow that
//! names and saves a route. Values are JSON documents.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Handoff-related errors
#[derive(Error, Debug)]
pub enum HandoffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Shared keyed storage for handoff documents
pub trait HandoffStore: Send + Sync {
    /// Write `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: &str) -> Result<(), HandoffError>;
    
    /// Read the value under `key` without removing it
    fn get(&self, key: &str) -> Result<Option<String>, HandoffError>;
    
    /// Read and remove the value under `key`
    fn take(&self, key: &str) -> Result<Option<String>, HandoffError>;
}

/// In-process store, used when no handoff directory is configured
#[derive(Default)]
pub struct MemoryHandoffStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryHandoffStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandoffStore for MemoryHandoffStore {
    fn put(&self, key: &str, value: &str) -> Result<(), HandoffError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
    
    fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        Ok(self.entries.lock().get(key).cloned())
    }
    
    fn take(&self, key: &str) -> Result<Option<String>, HandoffError> {
        Ok(self.entries.lock().remove(key))
    }
}

/// Directory-backed store holding one `<key>.json` file per key
pub struct FileHandoffStore {
    dir: PathBuf,
}

impl FileHandoffStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, HandoffError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }
    
    pub fn dir(&self) -> &Path {
        &self.dir
    }
    
    fn path_for(&self, key: &str) -> Result<PathBuf, HandoffError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(HandoffError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl HandoffStore for FileHandoffStore {
    fn put(&self, key: &str, value: &str) -> Result<(), HandoffError> {
        let path = self.path_for(key)?;
        
        // Write to a sibling first so readers never see a partial document
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        
        tracing::debug!("Wrote handoff '{}' to {:?}", key, path);
        Ok(())
    }
    
    fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
    
    fn take(&self, key: &str) -> Result<Option<String>, HandoffError> {
        let path = self.path_for(key)?;
        
        // Claim by rename; only one reader can move the file away
        let claimed = path.with_extension(format!("json.{}.claim", Uuid::new_v4().simple()));
        match fs::rename(&path, &claimed) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }
        
        let content = fs::read_to_string(&claimed)?;
        fs::remove_file(&claimed)?;
        tracing::debug!("Took handoff '{}' from {:?}", key, path);
        Ok(Some(content))
    }
}

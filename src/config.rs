//! Recorder configuration
//!
//! Loaded from a camelCase JSON document; every field has a default so an
//! empty object (or no file at all) gives the standard recorder.

use crate::handoff::RECORDED_ROUTE_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for a [`RouteRecorder`](crate::recorder::RouteRecorder)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecorderConfig {
    /// Upper bound for one position request in milliseconds
    pub sample_timeout_ms: u64,
    
    /// Consecutive failed samples before a weak-signal event
    pub weak_signal_threshold: u32,
    
    /// Key the finished route is published under
    pub handoff_key: String,
    
    /// Directory for the file-backed handoff store (in-memory when unset)
    pub handoff_dir: Option<PathBuf>,
    
    /// Capacity of the recording event channel
    pub event_capacity: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            sample_timeout_ms: 15_000,
            weak_signal_threshold: 3,
            handoff_key: RECORDED_ROUTE_KEY.to_string(),
            handoff_dir: None,
            event_capacity: 100,
        }
    }
}

impl RecorderConfig {
    /// Read and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: RecorderConfig = serde_json::from_str(&content)?;
        config.validate()?;
        
        tracing::debug!("Loaded recorder config from {:?}", path);
        Ok(config)
    }
    
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_timeout_ms == 0 {
            return Err(ConfigError::Invalid("sampleTimeoutMs must be > 0".to_string()));
        }
        if self.weak_signal_threshold == 0 {
            return Err(ConfigError::Invalid("weakSignalThreshold must be > 0".to_string()));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Invalid("eventCapacity must be > 0".to_string()));
        }
        if self.handoff_key.trim().is_empty() {
            return Err(ConfigError::Invalid("handoffKey must not be empty".to_string()));
        }
        Ok(())
    }
    
    pub fn sample_timeout(&self) -> Duration {
        Duration::from_millis(self.sample_timeout_ms)
    }
}

//! Capture trait definitions
//!
//! Platform-agnostic interface to the device's positioning capability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single position request produced no coordinate
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "camelCase")]
pub enum SampleError {
    #[error("location permission denied")]
    PermissionDenied,
    
    #[error("position unavailable: {0}")]
    Unavailable(String),
    
    #[error("position request timed out")]
    Timeout,
}

/// Raw reading returned by the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionFix {
    /// Latitude in decimal degrees
    pub latitude: f64,
    
    /// Longitude in decimal degrees
    pub longitude: f64,
    
    /// Horizontal accuracy radius in meters (if reported)
    pub accuracy_meters: Option<f64>,
}

impl PositionFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters: None,
        }
    }
}

/// A one-shot "get current position" capability
///
/// Implementations make a single request per call and carry no cadence of
/// their own; the recorder decides when to ask.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;
    
    /// Request the current position
    async fn current_position(&self) -> Result<PositionFix, SampleError>;
}

//! Geo sampler
//!
//! Turns the platform capability into a bounded, validated sample request.
//! A failed sample is reported to the caller and never aborts anything.

use super::traits::{PositionSource, SampleError};
use crate::geo::Coordinate;
use std::sync::Arc;
use std::time::Duration;

/// Default upper bound for a single position request
pub const DEFAULT_SAMPLE_TIMEOUT: Duration = Duration::from_secs(15);

/// Requests one position per call from a [`PositionSource`]
pub struct GeoSampler {
    source: Arc<dyn PositionSource>,
    timeout: Duration,
}

impl GeoSampler {
    /// Create a sampler with the default request timeout
    pub fn new(source: Arc<dyn PositionSource>) -> Self {
        Self::with_timeout(source, DEFAULT_SAMPLE_TIMEOUT)
    }
    
    pub fn with_timeout(source: Arc<dyn PositionSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }
    
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
    
    /// Request a single sample
    ///
    /// Resolves as [`SampleError::Timeout`] when the source does not answer
    /// within the configured timeout, and as [`SampleError::Unavailable`]
    /// when the fix is outside valid coordinate ranges.
    pub async fn request_sample(&self) -> Result<Coordinate, SampleError> {
        let fix = match tokio::time::timeout(self.timeout, self.source.current_position()).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(
                    "Position request to {} timed out after {:?}",
                    self.source.name(),
                    self.timeout
                );
                return Err(SampleError::Timeout);
            }
        };
        
        Coordinate::new(fix.latitude, fix.longitude).map_err(|e| {
            tracing::warn!("Discarding invalid fix from {}: {}", self.source.name(), e);
            SampleError::Unavailable(e.to_string())
        })
    }
}

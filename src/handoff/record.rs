//! Route record
//!
//! The immutable artifact produced by a confirmed stop.

use crate::geo::{total_distance, Coordinate};
use crate::recorder::transport::TransportMode;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A completed recording, as handed to the save flow
///
/// `start_time` is derived from the recorded elapsed seconds rather than the
/// moment the session was armed, so paused stretches are not counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    path: Vec<Coordinate>,
    
    #[serde(with = "chrono::serde::ts_milliseconds")]
    start_time: DateTime<Utc>,
    
    #[serde(with = "chrono::serde::ts_milliseconds")]
    end_time: DateTime<Utc>,
    
    distance_meters: f64,
    
    transport_mode: TransportMode,
}

impl RouteRecord {
    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }
    
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
    
    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }
    
    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }
    
    pub fn transport_mode(&self) -> &TransportMode {
        &self.transport_mode
    }
    
    /// Recorded duration, excluding pauses
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// Assembles [`RouteRecord`]s from a session's captured data
pub struct RouteRecordBuilder;

impl RouteRecordBuilder {
    /// Build a record ending now
    pub fn build(path: Vec<Coordinate>, elapsed_seconds: u64, mode: TransportMode) -> RouteRecord {
        Self::build_at(path, elapsed_seconds, mode, Utc::now())
    }
    
    /// Build a record ending at `ended_at`
    pub fn build_at(
        path: Vec<Coordinate>,
        elapsed_seconds: u64,
        mode: TransportMode,
        ended_at: DateTime<Utc>,
    ) -> RouteRecord {
        let elapsed = Duration::milliseconds(elapsed_seconds.saturating_mul(1000) as i64);
        let distance_meters = total_distance(&path);
        
        RouteRecord {
            path,
            start_time: ended_at - elapsed,
            end_time: ended_at,
            distance_meters,
            transport_mode: mode,
        }
    }
}

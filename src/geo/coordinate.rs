//! Coordinate type
//!
//! A latitude/longitude pair that is range-checked on construction, so every
//! `Coordinate` held by a session is known to be well-formed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a raw latitude/longitude pair is out of range
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),
    
    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
}

/// A position in decimal degrees
///
/// Serialized as a two-element array `[lat, lng]`, the shape the downstream
/// save flow reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self { latitude, longitude })
    }
    
    pub fn latitude(&self) -> f64 {
        self.latitude
    }
    
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.latitude, coord.longitude]
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = CoordinateError;
    
    fn try_from([latitude, longitude]: [f64; 2]) -> Result<Self, Self::Error> {
        Coordinate::new(latitude, longitude)
    }
}

//! Geographic primitives
//!
//! Validated coordinates and geodesic distance over recorded paths.

pub mod coordinate;
pub mod distance;

pub use coordinate::{Coordinate, CoordinateError};
pub use distance::{distance, total_distance, EARTH_RADIUS_M};

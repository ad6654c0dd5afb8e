//! Position capture
//!
//! This module provides the positioning seam and the sampler built on it.

pub mod sampler;
pub mod scripted;
pub mod traits;

pub use sampler::{GeoSampler, DEFAULT_SAMPLE_TIMEOUT};
pub use scripted::ScriptedPositionSource;
pub use traits::{PositionFix, PositionSource, SampleError};

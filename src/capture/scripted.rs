//! Scripted position source
//!
//! Replays a fixed list of readings, one per request. Used by the demo
//! binary and in tests where a real positioning service is not available.

use super::traits::{PositionFix, PositionSource, SampleError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Replays scripted readings in order
///
/// Once the script is exhausted every request resolves as
/// [`SampleError::Unavailable`].
pub struct ScriptedPositionSource {
    readings: Mutex<VecDeque<Result<PositionFix, SampleError>>>,
}

impl ScriptedPositionSource {
    pub fn new(readings: Vec<Result<PositionFix, SampleError>>) -> Self {
        Self {
            readings: Mutex::new(readings.into()),
        }
    }
    
    /// Script made only of successful fixes
    pub fn from_fixes(fixes: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::new(
            fixes
                .into_iter()
                .map(|(lat, lng)| Ok(PositionFix::new(lat, lng)))
                .collect(),
        )
    }
    
    /// Number of readings not yet handed out
    pub fn remaining(&self) -> usize {
        self.readings.lock().len()
    }
}

#[async_trait]
impl PositionSource for ScriptedPositionSource {
    fn name(&self) -> &str {
        "scripted"
    }
    
    async fn current_position(&self) -> Result<PositionFix, SampleError> {
        self.readings
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(SampleError::Unavailable("script exhausted".to_string())))
    }
}

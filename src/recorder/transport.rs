//! Transport modes
//!
//! The mode is an opaque identifier chosen when a session is armed. The
//! built-in registry only carries display attributes; ids missing from it
//! are still accepted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the mode of travel for a recording
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportMode(String);

impl TransportMode {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
    
    pub fn id(&self) -> &str {
        &self.0
    }
    
    /// Display attributes from the built-in registry, if this id is known
    pub fn info(&self) -> Option<&'static TransportModeInfo> {
        TRANSPORT_MODES.iter().find(|m| m.id == self.0)
    }
}

impl Default for TransportMode {
    fn default() -> Self {
        Self::new(TRANSPORT_MODES[0].id)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransportMode {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Display attributes of a known transport mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransportModeInfo {
    pub id: &'static str,
    pub label: &'static str,
    /// Route colour as a CSS hex string
    pub color: &'static str,
}

/// Known transport modes; the first entry is the default
pub const TRANSPORT_MODES: &[TransportModeInfo] = &[
    TransportModeInfo {
        id: "manual_wheelchair",
        label: "Manual Wheelchair",
        color: "#15803d",
    },
    TransportModeInfo {
        id: "electric_wheelchair",
        label: "Electric Wheelchair",
        color: "#3e3bf6",
    },
    TransportModeInfo {
        id: "bicycle",
        label: "Bicycle",
        color: "#ec4899",
    },
    TransportModeInfo {
        id: "walk",
        label: "Walk",
        color: "#f59e0b",
    },
];

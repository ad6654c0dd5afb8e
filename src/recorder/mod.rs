//! Route recording module
//!
//! This module implements the recording session:
//! - SessionMachine, the lifecycle state machine and path buffer
//! - RouteRecorder to drive sampling and hand finished routes off
//! - Transport mode identifiers and their registry

pub mod coordinator;
pub mod state;
pub mod transport;

pub use coordinator::{RecorderError, RecordingEvent, RouteRecorder, TICK_INTERVAL};
pub use state::{SessionCommand, SessionError, SessionMachine, SessionSnapshot, SessionStateKind};
pub use transport::{TransportMode, TransportModeInfo, TRANSPORT_MODES};

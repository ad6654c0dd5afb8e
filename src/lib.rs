//! Route Recorder - record accessible routes from live position samples.
//!
//! This is the main library crate. It turns a stream of position samples
//! into a validated route record and hands it to the save flow.

pub mod capture;
pub mod commands;
pub mod config;
pub mod geo;
pub mod handoff;
pub mod recorder;
pub mod utils;

pub use config::RecorderConfig;
pub use recorder::{RecordingEvent, RouteRecorder, SessionStateKind};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
///
/// Honours `RUST_LOG`; defaults to debug output for this crate.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_recorder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

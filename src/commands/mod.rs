//! Command handlers
//!
//! This module contains the entry points a frontend calls to drive a
//! recording.

pub mod recording;

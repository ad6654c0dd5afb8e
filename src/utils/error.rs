//! Error types and handling
//!
//! Common error types used across the application.

use crate::capture::SampleError;
use crate::config::ConfigError;
use crate::handoff::HandoffError;
use crate::recorder::{RecorderError, SessionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    
    #[error("Sample error: {0}")]
    Sample(#[from] SampleError),
    
    #[error("Handoff error: {0}")]
    Handoff(#[from] HandoffError),
    
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<RecorderError> for AppError {
    fn from(error: RecorderError) -> Self {
        match error {
            RecorderError::Session(e) => AppError::Session(e),
            RecorderError::Handoff(e) => AppError::Handoff(e),
            RecorderError::Config(e) => AppError::Config(e),
        }
    }
}

/// Error response for frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let code = match &error {
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Session(SessionError::EmptyRecording) => "EMPTY_RECORDING",
            AppError::Session(SessionError::SessionActive(_)) => "SESSION_ACTIVE",
            AppError::Session(SessionError::InvalidTransition { .. }) => "INVALID_TRANSITION",
            AppError::Sample(SampleError::PermissionDenied) => "PERMISSION_DENIED",
            AppError::Sample(_) => "POSITION_UNAVAILABLE",
            AppError::Handoff(_) => "HANDOFF_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        };
        
        ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

impl From<RecorderError> for ErrorResponse {
    fn from(error: RecorderError) -> Self {
        AppError::from(error).into()
    }
}

//! Recording command handlers
//!
//! Frontend-facing entry points over a shared [`RouteRecorder`]. Errors are
//! mapped to [`ErrorResponse`] so the UI can switch on a stable code.

use crate::handoff::RouteRecord;
use crate::recorder::{
    RouteRecorder, SessionSnapshot, TransportMode, TransportModeInfo, TRANSPORT_MODES,
};
use crate::utils::ErrorResponse;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state for recording
#[derive(Clone)]
pub struct RecorderState {
    pub recorder: Arc<Mutex<RouteRecorder>>,
}

impl RecorderState {
    pub fn new(recorder: RouteRecorder) -> Self {
        Self {
            recorder: Arc::new(Mutex::new(recorder)),
        }
    }
}

/// List the known transport modes
pub fn get_transport_modes() -> &'static [TransportModeInfo] {
    TRANSPORT_MODES
}

/// Arm a session; `None` selects the default mode
pub async fn arm_recording(
    state: &RecorderState,
    mode: Option<String>,
) -> Result<(), ErrorResponse> {
    let mode = mode.map(TransportMode::new).unwrap_or_default();
    let mut recorder = state.recorder.lock().await;
    recorder.arm(mode).await.map_err(ErrorResponse::from)
}

/// Start recording
pub async fn start_recording(state: &RecorderState) -> Result<(), ErrorResponse> {
    let mut recorder = state.recorder.lock().await;
    recorder.start().await.map_err(ErrorResponse::from)
}

/// Pause recording
pub async fn pause_recording(state: &RecorderState) -> Result<(), ErrorResponse> {
    let mut recorder = state.recorder.lock().await;
    recorder.pause().await.map_err(ErrorResponse::from)
}

/// Resume recording
pub async fn resume_recording(state: &RecorderState) -> Result<(), ErrorResponse> {
    let mut recorder = state.recorder.lock().await;
    recorder.resume().await.map_err(ErrorResponse::from)
}

/// Open the stop confirmation
pub async fn request_stop_recording(state: &RecorderState) -> Result<(), ErrorResponse> {
    let mut recorder = state.recorder.lock().await;
    recorder.request_stop().await.map_err(ErrorResponse::from)
}

/// Confirm the stop and hand the route off
pub async fn confirm_stop_recording(state: &RecorderState) -> Result<RouteRecord, ErrorResponse> {
    let mut recorder = state.recorder.lock().await;
    recorder.confirm_stop().await.map_err(ErrorResponse::from)
}

/// Close the stop confirmation without stopping
pub async fn cancel_stop_recording(state: &RecorderState) -> Result<(), ErrorResponse> {
    let mut recorder = state.recorder.lock().await;
    recorder.cancel_stop_dialog().await.map_err(ErrorResponse::from)
}

/// Discard the current recording
pub async fn discard_recording(state: &RecorderState) -> Result<(), ErrorResponse> {
    let mut recorder = state.recorder.lock().await;
    recorder.discard().await.map_err(ErrorResponse::from)
}

/// Return a finished or discarded recorder to idle
pub async fn reset_recording(state: &RecorderState) -> Result<(), ErrorResponse> {
    let mut recorder = state.recorder.lock().await;
    recorder.reset().await.map_err(ErrorResponse::from)
}

/// Get the current recording status
pub async fn get_recording_status(state: &RecorderState) -> SessionSnapshot {
    let recorder = state.recorder.lock().await;
    recorder.snapshot()
}

/// Take the route waiting to be named and saved, if any
pub async fn take_recorded_route(
    state: &RecorderState,
) -> Result<Option<RouteRecord>, ErrorResponse> {
    let recorder = state.recorder.lock().await;
    recorder
        .handoff()
        .take_pending()
        .map_err(|e| ErrorResponse::from(crate::utils::AppError::from(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ScriptedPositionSource;
    use crate::handoff::{MemoryHandoffStore, RouteHandoff};
    use crate::recorder::SessionStateKind;
    use std::time::Duration;
    
    fn state() -> RecorderState {
        let source = Arc::new(ScriptedPositionSource::from_fixes([
            (13.7563, 100.5018),
            (13.7600, 100.5100),
        ]));
        let handoff = RouteHandoff::new(Arc::new(MemoryHandoffStore::new()));
        RecorderState::new(RouteRecorder::new(source, handoff))
    }
    
    #[tokio::test(start_paused = true)]
    async fn test_default_mode_and_status() {
        let state = state();
        arm_recording(&state, None).await.unwrap();
        
        let status = get_recording_status(&state).await;
        assert_eq!(status.state, SessionStateKind::Armed);
        assert_eq!(status.transport_mode.unwrap().id(), "manual_wheelchair");
        assert!(status.session_id.is_some());
    }
    
    #[tokio::test(start_paused = true)]
    async fn test_error_codes_reach_frontend() {
        let state = state();
        
        let err = start_recording(&state).await.unwrap_err();
        assert_eq!(err.code, "INVALID_TRANSITION");
        
        arm_recording(&state, Some("walk".to_string())).await.unwrap();
        let err = arm_recording(&state, Some("bicycle".to_string())).await.unwrap_err();
        assert_eq!(err.code, "SESSION_ACTIVE");
        
        start_recording(&state).await.unwrap();
        request_stop_recording(&state).await.unwrap();
        let err = confirm_stop_recording(&state).await.unwrap_err();
        assert_eq!(err.code, "EMPTY_RECORDING");
    }
    
    #[tokio::test(start_paused = true)]
    async fn test_record_and_take_route() {
        let state = state();
        arm_recording(&state, Some("electric_wheelchair".to_string())).await.unwrap();
        start_recording(&state).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        request_stop_recording(&state).await.unwrap();
        confirm_stop_recording(&state).await.unwrap();
        
        let route = take_recorded_route(&state).await.unwrap().unwrap();
        assert_eq!(route.path().len(), 2);
        assert!((route.distance_meters() - 976.5).abs() < 1.0);
        assert!(take_recorded_route(&state).await.unwrap().is_none());
        
        reset_recording(&state).await.unwrap();
        assert_eq!(get_recording_status(&state).await.state, SessionStateKind::Idle);
    }
    
    #[test]
    fn test_lists_four_modes() {
        let ids: Vec<_> = get_transport_modes().iter().map(|m| m.id).collect();
        assert_eq!(ids, ["manual_wheelchair", "electric_wheelchair", "bicycle", "walk"]);
    }
}

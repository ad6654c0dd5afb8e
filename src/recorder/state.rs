//! Recording state management
//!
//! Defines the session state machine. All lifecycle changes go through
//! [`SessionMachine::apply`]; cadence ticks and sample completions go through
//! [`SessionMachine::begin_tick`] and [`SessionMachine::complete_sample`].

use crate::capture::SampleError;
use crate::geo::{total_distance, Coordinate};
use crate::handoff::{RouteRecord, RouteRecordBuilder};
use crate::recorder::transport::TransportMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Externally visible state of the recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStateKind {
    /// No session
    Idle,
    /// Transport mode selected, not yet sampling
    Armed,
    /// Sampling once per tick
    Recording,
    /// Sampling suspended
    Paused,
    /// Waiting for the user to confirm or cancel a stop
    AwaitingStopDecision,
    /// Route record built
    Completed,
    /// Session thrown away
    Discarded,
}

impl Default for SessionStateKind {
    fn default() -> Self {
        Self::Idle
    }
}

/// User-level commands accepted by the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Arm(TransportMode),
    Start,
    Pause,
    Resume,
    RequestStop,
    ConfirmStop,
    CancelStopDialog,
    Discard,
    Reset,
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::Arm(_) => "arm",
            SessionCommand::Start => "start",
            SessionCommand::Pause => "pause",
            SessionCommand::Resume => "resume",
            SessionCommand::RequestStop => "requestStop",
            SessionCommand::ConfirmStop => "confirmStop",
            SessionCommand::CancelStopDialog => "cancelStopDialog",
            SessionCommand::Discard => "discard",
            SessionCommand::Reset => "reset",
        }
    }
}

/// Session-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {command} while {state:?}")]
    InvalidTransition {
        state: SessionStateKind,
        command: &'static str,
    },

    #[error("a recording session is already active ({0:?})")]
    SessionActive(SessionStateKind),

    #[error("no route points were captured")]
    EmptyRecording,
}

/// Data captured by a started session
#[derive(Debug, Clone)]
struct ActiveSession {
    id: Uuid,
    mode: TransportMode,
    path: Vec<Coordinate>,
    elapsed_seconds: u64,
    /// Tick whose sample was appended last (0 = none yet)
    last_appended_tick: u64,
    consecutive_failures: u32,
}

/// Where a cancelled stop dialog returns to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopOrigin {
    Recording,
    Paused,
}

#[derive(Debug, Clone)]
enum SessionState {
    Idle,
    Armed { id: Uuid, mode: TransportMode },
    Recording(ActiveSession),
    Paused(ActiveSession),
    AwaitingStopDecision {
        session: ActiveSession,
        origin: StopOrigin,
    },
    Completed(RouteRecord),
    Discarded,
}

impl SessionState {
    fn kind(&self) -> SessionStateKind {
        match self {
            SessionState::Idle => SessionStateKind::Idle,
            SessionState::Armed { .. } => SessionStateKind::Armed,
            SessionState::Recording(_) => SessionStateKind::Recording,
            SessionState::Paused(_) => SessionStateKind::Paused,
            SessionState::AwaitingStopDecision { .. } => SessionStateKind::AwaitingStopDecision,
            SessionState::Completed(_) => SessionStateKind::Completed,
            SessionState::Discarded => SessionStateKind::Discarded,
        }
    }

    fn session(&self) -> Option<&ActiveSession> {
        match self {
            SessionState::Recording(s)
            | SessionState::Paused(s)
            | SessionState::AwaitingStopDecision { session: s, .. } => Some(s),
            _ => None,
        }
    }
}

/// Handle for one tick's in-flight sample request
///
/// A ticket is only honoured while the cadence that issued it is still
/// running; pausing, stopping, discarding or restarting invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleTicket {
    generation: u64,
    tick: u64,
}

impl SampleTicket {
    /// Tick number within the session (1-based)
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

/// What happened to a completed sample request
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    /// Coordinate appended; `points` is the new path length
    Appended { coordinate: Coordinate, points: usize },
    /// Request failed; `consecutive` counts the current failure streak
    Failed { error: SampleError, consecutive: u32 },
    /// Result arrived after its cadence ended or behind a newer tick
    Dropped,
}

/// Read-only view of the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: SessionStateKind,
    pub session_id: Option<Uuid>,
    pub transport_mode: Option<TransportMode>,
    pub elapsed_seconds: u64,
    pub point_count: usize,
    pub distance_meters: f64,
    pub consecutive_failures: u32,
}

/// The recording session state machine
///
/// Owns the path buffer and elapsed counter; nothing else mutates them.
#[derive(Debug)]
pub struct SessionMachine {
    state: SessionState,
    /// Bumped whenever running cadence ends, invalidating older tickets
    generation: u64,
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMachine {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            generation: 0,
        }
    }

    pub fn kind(&self) -> SessionStateKind {
        self.state.kind()
    }

    /// Number of captured points in the active session
    pub fn point_count(&self) -> usize {
        self.state.session().map(|s| s.path.len()).unwrap_or(0)
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.state.session().map(|s| s.elapsed_seconds).unwrap_or(0)
    }

    /// The record built by the last confirmed stop, while `Completed`
    pub fn completed_record(&self) -> Option<&RouteRecord> {
        match &self.state {
            SessionState::Completed(record) => Some(record),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (session_id, transport_mode) = match &self.state {
            SessionState::Armed { id, mode } => (Some(*id), Some(mode.clone())),
            other => match other.session() {
                Some(s) => (Some(s.id), Some(s.mode.clone())),
                None => (None, None),
            },
        };
        let session = self.state.session();

        SessionSnapshot {
            state: self.kind(),
            session_id,
            transport_mode,
            elapsed_seconds: session.map(|s| s.elapsed_seconds).unwrap_or(0),
            point_count: session.map(|s| s.path.len()).unwrap_or(0),
            distance_meters: session.map(|s| total_distance(&s.path)).unwrap_or(0.0),
            consecutive_failures: session.map(|s| s.consecutive_failures).unwrap_or(0),
        }
    }

    /// Apply a lifecycle command
    ///
    /// On error the state is left exactly as it was.
    pub fn apply(&mut self, command: SessionCommand) -> Result<SessionStateKind, SessionError> {
        let from = self.kind();
        let name = command.name();
        let invalid = || SessionError::InvalidTransition {
            state: from,
            command: name,
        };

        let next = match (&mut self.state, command) {
            (
                SessionState::Idle | SessionState::Completed(_) | SessionState::Discarded,
                SessionCommand::Arm(mode),
            ) => SessionState::Armed {
                id: Uuid::new_v4(),
                mode,
            },
            (_, SessionCommand::Arm(_)) => return Err(SessionError::SessionActive(from)),

            (SessionState::Armed { id, mode }, SessionCommand::Start) => {
                self.generation += 1;
                SessionState::Recording(ActiveSession {
                    id: *id,
                    mode: mode.clone(),
                    path: Vec::new(),
                    elapsed_seconds: 0,
                    last_appended_tick: 0,
                    consecutive_failures: 0,
                })
            }

            (SessionState::Recording(session), SessionCommand::Pause) => {
                self.generation += 1;
                SessionState::Paused(session.clone())
            }
            (SessionState::Paused(session), SessionCommand::Resume) => {
                SessionState::Recording(session.clone())
            }

            (SessionState::Recording(session), SessionCommand::RequestStop) => {
                self.generation += 1;
                SessionState::AwaitingStopDecision {
                    session: session.clone(),
                    origin: StopOrigin::Recording,
                }
            }
            (SessionState::Paused(session), SessionCommand::RequestStop) => {
                SessionState::AwaitingStopDecision {
                    session: session.clone(),
                    origin: StopOrigin::Paused,
                }
            }

            (SessionState::AwaitingStopDecision { session, .. }, SessionCommand::ConfirmStop) => {
                if session.path.is_empty() {
                    return Err(SessionError::EmptyRecording);
                }
                SessionState::Completed(RouteRecordBuilder::build(
                    session.path.clone(),
                    session.elapsed_seconds,
                    session.mode.clone(),
                ))
            }
            (
                SessionState::AwaitingStopDecision { session, origin },
                SessionCommand::CancelStopDialog,
            ) => match origin {
                StopOrigin::Recording => SessionState::Recording(session.clone()),
                StopOrigin::Paused => SessionState::Paused(session.clone()),
            },

            (
                SessionState::Armed { .. }
                | SessionState::Recording(_)
                | SessionState::Paused(_)
                | SessionState::AwaitingStopDecision { .. },
                SessionCommand::Discard,
            ) => {
                self.generation += 1;
                SessionState::Discarded
            }

            (SessionState::Idle, SessionCommand::Reset) => SessionState::Idle,
            (SessionState::Completed(_) | SessionState::Discarded, SessionCommand::Reset) => {
                self.generation += 1;
                SessionState::Idle
            }

            _ => return Err(invalid()),
        };

        self.state = next;
        let to = self.kind();
        if from != to {
            tracing::info!("Session {:?} -> {:?} ({})", from, to, name);
        }
        Ok(to)
    }

    /// Current cadence generation; a cadence captures it when spawned
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Count one cadence tick and hand out a ticket for its sample request
    ///
    /// `generation` is the value the calling cadence was spawned with.
    /// Returns `None` unless recording under that generation; the caller
    /// should stop its cadence.
    pub fn begin_tick(&mut self, generation: u64) -> Option<SampleTicket> {
        if generation != self.generation {
            tracing::debug!("Ignoring tick from cadence generation {}", generation);
            return None;
        }
        match &mut self.state {
            SessionState::Recording(session) => {
                session.elapsed_seconds += 1;
                Some(SampleTicket {
                    generation,
                    tick: session.elapsed_seconds,
                })
            }
            _ => None,
        }
    }

    /// Resolve a tick's sample request against the current state
    pub fn complete_sample(
        &mut self,
        ticket: SampleTicket,
        result: Result<Coordinate, SampleError>,
    ) -> SampleOutcome {
        let current = self.generation == ticket.generation;
        let session = match &mut self.state {
            SessionState::Recording(session) if current => session,
            _ => {
                tracing::debug!("Dropping sample for tick {} (cadence ended)", ticket.tick);
                return SampleOutcome::Dropped;
            }
        };

        // Anything older than the last success is stale, failures included
        if ticket.tick <= session.last_appended_tick {
            tracing::debug!(
                "Dropping sample for tick {} behind tick {}",
                ticket.tick,
                session.last_appended_tick
            );
            return SampleOutcome::Dropped;
        }

        match result {
            Ok(coordinate) => {
                session.path.push(coordinate);
                session.last_appended_tick = ticket.tick;
                session.consecutive_failures = 0;
                tracing::debug!(
                    "Tick {}: appended ({:.6}, {:.6})",
                    ticket.tick,
                    coordinate.latitude(),
                    coordinate.longitude()
                );
                SampleOutcome::Appended {
                    coordinate,
                    points: session.path.len(),
                }
            }
            Err(error) => {
                session.consecutive_failures += 1;
                tracing::warn!("Tick {}: sample failed: {}", ticket.tick, error);
                SampleOutcome::Failed {
                    error,
                    consecutive: session.consecutive_failures,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn recording(mode: &str) -> SessionMachine {
        let mut machine = SessionMachine::new();
        machine.apply(SessionCommand::Arm(mode.into())).unwrap();
        machine.apply(SessionCommand::Start).unwrap();
        machine
    }

    fn tick_ok(machine: &mut SessionMachine, lat: f64, lng: f64) -> SampleOutcome {
        let ticket = machine.begin_tick(machine.generation()).unwrap();
        machine.complete_sample(ticket, Ok(coord(lat, lng)))
    }

    #[test]
    fn test_walk_scenario() {
        let mut machine = recording("walk");
        tick_ok(&mut machine, 13.7563, 100.5018);
        tick_ok(&mut machine, 13.7570, 100.5025);
        tick_ok(&mut machine, 13.7580, 100.5030);

        machine.apply(SessionCommand::RequestStop).unwrap();
        let state = machine.apply(SessionCommand::ConfirmStop).unwrap();
        assert_eq!(state, SessionStateKind::Completed);

        let record = machine.completed_record().unwrap();
        assert_eq!(record.path().len(), 3);
        assert_eq!(record.duration().num_milliseconds(), 3000);
        assert_eq!(record.distance_meters(), total_distance(record.path()));
        assert_eq!(record.transport_mode().id(), "walk");
    }

    #[test]
    fn test_arm_rejected_while_active() {
        let mut machine = SessionMachine::new();
        machine.apply(SessionCommand::Arm("walk".into())).unwrap();

        assert_eq!(
            machine.apply(SessionCommand::Arm("bicycle".into())),
            Err(SessionError::SessionActive(SessionStateKind::Armed))
        );

        machine.apply(SessionCommand::Start).unwrap();
        assert!(matches!(
            machine.apply(SessionCommand::Arm("bicycle".into())),
            Err(SessionError::SessionActive(SessionStateKind::Recording))
        ));
        assert_eq!(
            machine.snapshot().transport_mode.unwrap().id(),
            "walk"
        );
    }

    #[test]
    fn test_arm_allowed_from_terminal_states() {
        let mut machine = recording("walk");
        machine.apply(SessionCommand::Discard).unwrap();
        assert_eq!(
            machine.apply(SessionCommand::Arm("bicycle".into())),
            Ok(SessionStateKind::Armed)
        );
    }

    #[test]
    fn test_invalid_transition_keeps_state() {
        let mut machine = SessionMachine::new();
        assert_eq!(
            machine.apply(SessionCommand::Start),
            Err(SessionError::InvalidTransition {
                state: SessionStateKind::Idle,
                command: "start",
            })
        );

        let mut machine = recording("walk");
        tick_ok(&mut machine, 1.0, 1.0);
        assert!(machine.apply(SessionCommand::Resume).is_err());
        assert!(machine.apply(SessionCommand::ConfirmStop).is_err());
        assert_eq!(machine.kind(), SessionStateKind::Recording);
        assert_eq!(machine.point_count(), 1);
    }

    #[test]
    fn test_pause_resume_preserves_data() {
        let mut machine = recording("walk");
        tick_ok(&mut machine, 1.0, 1.0);
        tick_ok(&mut machine, 1.0, 1.001);

        let before = (machine.point_count(), machine.elapsed_seconds());
        machine.apply(SessionCommand::Pause).unwrap();
        machine.apply(SessionCommand::Resume).unwrap();

        assert_eq!((machine.point_count(), machine.elapsed_seconds()), before);
    }

    #[test]
    fn test_no_ticks_while_paused() {
        let mut machine = recording("walk");
        machine.apply(SessionCommand::Pause).unwrap();

        assert!(machine.begin_tick(machine.generation()).is_none());
        assert_eq!(machine.elapsed_seconds(), 0);
    }

    #[test]
    fn test_failed_sample_still_counts_time() {
        let mut machine = recording("walk");
        let ticket = machine.begin_tick(machine.generation()).unwrap();
        let outcome = machine.complete_sample(ticket, Err(SampleError::Timeout));

        assert_eq!(
            outcome,
            SampleOutcome::Failed {
                error: SampleError::Timeout,
                consecutive: 1,
            }
        );
        assert_eq!(machine.kind(), SessionStateKind::Recording);
        assert_eq!(machine.elapsed_seconds(), 1);
        assert_eq!(machine.point_count(), 0);
    }

    #[test]
    fn test_success_resets_failure_streak() {
        let mut machine = recording("walk");
        for _ in 0..2 {
            let ticket = machine.begin_tick(machine.generation()).unwrap();
            machine.complete_sample(ticket, Err(SampleError::PermissionDenied));
        }
        assert_eq!(machine.snapshot().consecutive_failures, 2);

        tick_ok(&mut machine, 1.0, 1.0);
        assert_eq!(machine.snapshot().consecutive_failures, 0);
    }

    #[test]
    fn test_empty_stop_is_rejected_then_recoverable() {
        let mut machine = recording("walk");
        let ticket = machine.begin_tick(machine.generation()).unwrap();
        machine.complete_sample(ticket, Err(SampleError::Timeout));

        machine.apply(SessionCommand::RequestStop).unwrap();
        assert_eq!(
            machine.apply(SessionCommand::ConfirmStop),
            Err(SessionError::EmptyRecording)
        );
        assert_eq!(machine.kind(), SessionStateKind::AwaitingStopDecision);
        assert!(machine.completed_record().is_none());

        // Back out, capture a point, stop again
        machine.apply(SessionCommand::CancelStopDialog).unwrap();
        assert_eq!(machine.kind(), SessionStateKind::Recording);
        tick_ok(&mut machine, 1.0, 1.0);
        machine.apply(SessionCommand::RequestStop).unwrap();
        assert_eq!(
            machine.apply(SessionCommand::ConfirmStop),
            Ok(SessionStateKind::Completed)
        );
        assert_eq!(machine.completed_record().unwrap().duration().num_seconds(), 2);
    }

    #[test]
    fn test_cancel_stop_returns_to_paused() {
        let mut machine = recording("walk");
        machine.apply(SessionCommand::Pause).unwrap();
        machine.apply(SessionCommand::RequestStop).unwrap();

        assert_eq!(
            machine.apply(SessionCommand::CancelStopDialog),
            Ok(SessionStateKind::Paused)
        );
    }

    #[test]
    fn test_discard_from_every_active_state() {
        let setups: Vec<(&str, Vec<SessionCommand>)> = vec![
            ("armed", vec![]),
            ("recording", vec![SessionCommand::Start]),
            ("paused", vec![SessionCommand::Start, SessionCommand::Pause]),
            (
                "awaiting",
                vec![SessionCommand::Start, SessionCommand::RequestStop],
            ),
        ];

        for (label, commands) in setups {
            let mut machine = SessionMachine::new();
            machine.apply(SessionCommand::Arm("walk".into())).unwrap();
            for command in commands {
                machine.apply(command).unwrap();
            }

            assert_eq!(
                machine.apply(SessionCommand::Discard),
                Ok(SessionStateKind::Discarded),
                "discard from {}",
                label
            );
            assert_eq!(machine.point_count(), 0);
            assert_eq!(machine.elapsed_seconds(), 0);

            machine.apply(SessionCommand::Arm("walk".into())).unwrap();
            machine.apply(SessionCommand::Start).unwrap();
            assert_eq!(machine.point_count(), 0, "fresh buffer after {}", label);
        }
    }

    #[test]
    fn test_discard_rejected_when_nothing_active() {
        let mut machine = SessionMachine::new();
        assert!(machine.apply(SessionCommand::Discard).is_err());
    }

    #[test]
    fn test_late_sample_after_discard_is_dropped() {
        let mut machine = recording("walk");
        tick_ok(&mut machine, 1.0, 1.0);
        let in_flight = machine.begin_tick(machine.generation()).unwrap();

        machine.apply(SessionCommand::Discard).unwrap();
        machine.apply(SessionCommand::Arm("walk".into())).unwrap();
        machine.apply(SessionCommand::Start).unwrap();

        assert_eq!(
            machine.complete_sample(in_flight, Ok(coord(9.0, 9.0))),
            SampleOutcome::Dropped
        );

        tick_ok(&mut machine, 2.0, 2.0);
        machine.apply(SessionCommand::RequestStop).unwrap();
        machine.apply(SessionCommand::ConfirmStop).unwrap();
        assert_eq!(machine.completed_record().unwrap().path(), &[coord(2.0, 2.0)]);
    }

    #[test]
    fn test_late_sample_after_pause_is_dropped() {
        let mut machine = recording("walk");
        let in_flight = machine.begin_tick(machine.generation()).unwrap();

        machine.apply(SessionCommand::Pause).unwrap();
        assert_eq!(
            machine.complete_sample(in_flight, Ok(coord(1.0, 1.0))),
            SampleOutcome::Dropped
        );

        // Still dropped once recording resumes
        machine.apply(SessionCommand::Resume).unwrap();
        assert_eq!(
            machine.complete_sample(in_flight, Ok(coord(1.0, 1.0))),
            SampleOutcome::Dropped
        );
        assert_eq!(machine.point_count(), 0);
    }

    #[test]
    fn test_late_sample_during_stop_decision_is_dropped() {
        let mut machine = recording("walk");
        let in_flight = machine.begin_tick(machine.generation()).unwrap();

        machine.apply(SessionCommand::RequestStop).unwrap();
        assert_eq!(
            machine.complete_sample(in_flight, Ok(coord(1.0, 1.0))),
            SampleOutcome::Dropped
        );
        assert_eq!(machine.point_count(), 0);
    }

    #[test]
    fn test_out_of_order_results_keep_tick_order() {
        let mut machine = recording("walk");
        let first = machine.begin_tick(machine.generation()).unwrap();
        let second = machine.begin_tick(machine.generation()).unwrap();

        // Tick 2 resolves first; tick 1's late answer is dropped
        assert!(matches!(
            machine.complete_sample(second, Ok(coord(2.0, 2.0))),
            SampleOutcome::Appended { points: 1, .. }
        ));
        assert_eq!(
            machine.complete_sample(first, Ok(coord(1.0, 1.0))),
            SampleOutcome::Dropped
        );
        assert_eq!(machine.elapsed_seconds(), 2);
    }

    #[test]
    fn test_stale_failure_does_not_extend_streak() {
        let mut machine = recording("walk");
        let first = machine.begin_tick(machine.generation()).unwrap();
        let second = machine.begin_tick(machine.generation()).unwrap();

        machine.complete_sample(second, Ok(coord(2.0, 2.0)));
        // Tick 1 failed before tick 2's fix; the streak stays broken
        assert_eq!(
            machine.complete_sample(first, Err(SampleError::Timeout)),
            SampleOutcome::Dropped
        );
        assert_eq!(machine.snapshot().consecutive_failures, 0);

        let third = machine.begin_tick(machine.generation()).unwrap();
        assert_eq!(
            machine.complete_sample(third, Err(SampleError::Timeout)),
            SampleOutcome::Failed {
                error: SampleError::Timeout,
                consecutive: 1,
            }
        );
    }

    #[test]
    fn test_superseded_cadence_cannot_tick() {
        let mut machine = recording("walk");
        let old_generation = machine.generation();

        machine.apply(SessionCommand::Pause).unwrap();
        machine.apply(SessionCommand::Resume).unwrap();

        assert!(machine.begin_tick(old_generation).is_none());
        assert_eq!(machine.elapsed_seconds(), 0);

        let ticket = machine.begin_tick(machine.generation()).unwrap();
        assert_eq!(ticket.tick(), 1);
        assert_eq!(machine.elapsed_seconds(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut machine = recording("walk");
        tick_ok(&mut machine, 1.0, 1.0);
        machine.apply(SessionCommand::RequestStop).unwrap();
        machine.apply(SessionCommand::ConfirmStop).unwrap();

        assert_eq!(machine.apply(SessionCommand::Reset), Ok(SessionStateKind::Idle));
        assert!(machine.completed_record().is_none());
        assert_eq!(machine.snapshot().session_id, None);

        // Reset from idle is a no-op
        assert_eq!(machine.apply(SessionCommand::Reset), Ok(SessionStateKind::Idle));
    }

    #[test]
    fn test_snapshot_reports_live_distance() {
        let mut machine = recording("bicycle");
        tick_ok(&mut machine, 13.7563, 100.5018);
        tick_ok(&mut machine, 13.7600, 100.5100);

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.state, SessionStateKind::Recording);
        assert_eq!(snapshot.point_count, 2);
        assert!((snapshot.distance_meters - 976.5).abs() < 1.0);
    }
}

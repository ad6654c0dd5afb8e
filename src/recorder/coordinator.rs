//! Recording coordinator
//!
//! Drives the session state machine: runs the sampling cadence, resolves
//! in-flight sample requests, and hands the finished route off.

use super::state::{
    SampleOutcome, SampleTicket, SessionCommand, SessionError, SessionMachine, SessionSnapshot,
    SessionStateKind,
};
use super::transport::TransportMode;
use crate::capture::{GeoSampler, PositionSource, SampleError};
use crate::config::{ConfigError, RecorderConfig};
use crate::geo::Coordinate;
use crate::handoff::{
    FileHandoffStore, HandoffError, HandoffStore, MemoryHandoffStore, RouteHandoff, RouteRecord,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Cadence of the sampling clock; each tick adds one elapsed second
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Errors returned by [`RouteRecorder`] commands
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Handoff failed: {0}")]
    Handoff(#[from] HandoffError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Events emitted during recording
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingEvent {
    /// Lifecycle state changed
    StateChanged {
        from: SessionStateKind,
        to: SessionStateKind,
    },
    /// A cadence tick was counted
    Tick { elapsed_seconds: u64 },
    /// A sample was appended to the path
    SampleRecorded { coordinate: Coordinate, points: usize },
    /// A sample request failed; recording continues
    SampleFailed(SampleError),
    /// A sample arrived too late to be used
    SampleDropped { tick: u64 },
    /// Several samples in a row have failed
    SignalWeak { consecutive: u32 },
    /// The finished route was published
    HandedOff { points: usize, distance_meters: f64 },
}

/// Records one route at a time from a position source
pub struct RouteRecorder {
    /// Session state, written only through this recorder and its tasks
    machine: Arc<Mutex<SessionMachine>>,

    sampler: Arc<GeoSampler>,

    handoff: RouteHandoff,

    weak_signal_threshold: u32,

    /// Running cadence task, present only while recording
    cadence: Option<JoinHandle<()>>,

    /// Event broadcaster
    event_tx: broadcast::Sender<RecordingEvent>,
}

impl RouteRecorder {
    /// Create a recorder with default settings
    pub fn new(source: Arc<dyn PositionSource>, handoff: RouteHandoff) -> Self {
        Self::with_config(source, handoff, &RecorderConfig::default())
    }

    /// Create a recorder publishing through `handoff`
    ///
    /// The config's handoff key and directory are ignored here; see
    /// [`RouteRecorder::from_config`].
    pub fn with_config(
        source: Arc<dyn PositionSource>,
        handoff: RouteHandoff,
        config: &RecorderConfig,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            machine: Arc::new(Mutex::new(SessionMachine::new())),
            sampler: Arc::new(GeoSampler::with_timeout(source, config.sample_timeout())),
            handoff,
            weak_signal_threshold: config.weak_signal_threshold,
            cadence: None,
            event_tx,
        }
    }

    /// Create a recorder and its handoff store from configuration
    pub fn from_config(
        source: Arc<dyn PositionSource>,
        config: &RecorderConfig,
    ) -> Result<Self, RecorderError> {
        config.validate()?;

        let store: Arc<dyn HandoffStore> = match &config.handoff_dir {
            Some(dir) => Arc::new(FileHandoffStore::open(dir)?),
            None => Arc::new(MemoryHandoffStore::new()),
        };
        let handoff = RouteHandoff::with_key(store, config.handoff_key.clone());

        Ok(Self::with_config(source, handoff, config))
    }

    /// Get the current session state
    pub fn state(&self) -> SessionStateKind {
        self.machine.lock().kind()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.machine.lock().snapshot()
    }

    /// Subscribe to recording events
    pub fn subscribe(&self) -> broadcast::Receiver<RecordingEvent> {
        self.event_tx.subscribe()
    }

    pub fn handoff(&self) -> &RouteHandoff {
        &self.handoff
    }

    /// Select the transport mode for a new session
    pub async fn arm(&mut self, mode: TransportMode) -> Result<(), RecorderError> {
        tracing::info!("Arming recorder for mode {}", mode);
        self.transition(SessionCommand::Arm(mode))
    }

    /// Start sampling with an empty path
    pub async fn start(&mut self) -> Result<(), RecorderError> {
        self.transition(SessionCommand::Start)
    }

    pub async fn pause(&mut self) -> Result<(), RecorderError> {
        self.transition(SessionCommand::Pause)
    }

    pub async fn resume(&mut self) -> Result<(), RecorderError> {
        self.transition(SessionCommand::Resume)
    }

    /// Halt sampling and wait for the user's stop decision
    pub async fn request_stop(&mut self) -> Result<(), RecorderError> {
        self.transition(SessionCommand::RequestStop)
    }

    /// Back out of the stop decision
    pub async fn cancel_stop_dialog(&mut self) -> Result<(), RecorderError> {
        self.transition(SessionCommand::CancelStopDialog)
    }

    /// Throw the session away without saving
    pub async fn discard(&mut self) -> Result<(), RecorderError> {
        self.transition(SessionCommand::Discard)?;
        tracing::info!("Recording discarded");
        Ok(())
    }

    /// Clear a finished session
    pub async fn reset(&mut self) -> Result<(), RecorderError> {
        self.transition(SessionCommand::Reset)
    }

    /// Commit the stop: build the route record and hand it off
    ///
    /// Fails with [`SessionError::EmptyRecording`] when no point was
    /// captured; the session then stays in `AwaitingStopDecision`. If only
    /// the handoff fails, the session is completed and
    /// [`RouteRecorder::retry_handoff`] can publish it again.
    pub async fn confirm_stop(&mut self) -> Result<RouteRecord, RecorderError> {
        if let Err(e) = self.transition(SessionCommand::ConfirmStop) {
            tracing::warn!("Stop not confirmed: {}", e);
            return Err(e);
        }

        let record = self.completed_record()?;
        self.publish(&record)?;
        Ok(record)
    }

    /// Publish the completed record again
    pub async fn retry_handoff(&self) -> Result<(), RecorderError> {
        let record = self.completed_record()?;
        self.publish(&record)
    }

    fn completed_record(&self) -> Result<RouteRecord, RecorderError> {
        let machine = self.machine.lock();
        machine.completed_record().cloned().ok_or_else(|| {
            SessionError::InvalidTransition {
                state: machine.kind(),
                command: "handoff",
            }
            .into()
        })
    }

    fn publish(&self, record: &RouteRecord) -> Result<(), RecorderError> {
        if let Err(e) = self.handoff.publish(record) {
            tracing::error!("Route handoff failed: {}", e);
            return Err(e.into());
        }

        let _ = self.event_tx.send(RecordingEvent::HandedOff {
            points: record.path().len(),
            distance_meters: record.distance_meters(),
        });
        Ok(())
    }

    /// Apply a command and bring the cadence in line with the new state
    fn transition(&mut self, command: SessionCommand) -> Result<(), RecorderError> {
        let (from, to, generation) = {
            let mut machine = self.machine.lock();
            let from = machine.kind();
            let to = machine.apply(command)?;
            (from, to, machine.generation())
        };

        if to != SessionStateKind::Recording {
            self.stop_cadence();
        } else if from != SessionStateKind::Recording {
            self.spawn_cadence(generation);
        }

        if from != to {
            let _ = self.event_tx.send(RecordingEvent::StateChanged { from, to });
        }
        Ok(())
    }

    fn stop_cadence(&mut self) {
        if let Some(handle) = self.cadence.take() {
            handle.abort();
        }
    }

    fn spawn_cadence(&mut self, generation: u64) {
        self.stop_cadence();

        let cadence = Cadence {
            generation,
            machine: self.machine.clone(),
            sampler: self.sampler.clone(),
            event_tx: self.event_tx.clone(),
            weak_signal_threshold: self.weak_signal_threshold,
        };
        self.cadence = Some(tokio::spawn(cadence.run(TICK_INTERVAL)));
    }
}

impl Drop for RouteRecorder {
    fn drop(&mut self) {
        self.stop_cadence();
    }
}

/// State shared by the cadence task and the sample tasks it spawns
#[derive(Clone)]
struct Cadence {
    /// Machine generation this cadence was spawned under
    generation: u64,
    machine: Arc<Mutex<SessionMachine>>,
    sampler: Arc<GeoSampler>,
    event_tx: broadcast::Sender<RecordingEvent>,
    weak_signal_threshold: u32,
}

impl Cadence {
    async fn run(self, interval: Duration) {
        // First tick one full interval after start/resume
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            // An aborted cadence may still wake once; the generation check stops it
            let Some(ticket) = self.machine.lock().begin_tick(self.generation) else {
                break;
            };
            let _ = self.event_tx.send(RecordingEvent::Tick {
                elapsed_seconds: ticket.tick(),
            });

            // Never wait on the request here; a slow fix must not delay the next tick
            tokio::spawn(self.clone().resolve(ticket));
        }
    }

    async fn resolve(self, ticket: SampleTicket) {
        let result = self.sampler.request_sample().await;
        let outcome = self.machine.lock().complete_sample(ticket, result);

        let event = match outcome {
            SampleOutcome::Appended { coordinate, points } => {
                RecordingEvent::SampleRecorded { coordinate, points }
            }
            SampleOutcome::Failed { error, consecutive } => {
                let _ = self.event_tx.send(RecordingEvent::SampleFailed(error));
                if consecutive != self.weak_signal_threshold {
                    return;
                }
                tracing::warn!("{} consecutive position samples failed", consecutive);
                RecordingEvent::SignalWeak { consecutive }
            }
            SampleOutcome::Dropped => RecordingEvent::SampleDropped {
                tick: ticket.tick(),
            },
        };
        let _ = self.event_tx.send(event);
    }
}

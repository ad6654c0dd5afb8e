//! Demo entry point: records a short scripted route and prints the handoff.
//!
//! Usage: `route-recorder [config.json]`

use anyhow::Context;
use route_recorder::capture::{PositionFix, SampleError, ScriptedPositionSource};
use route_recorder::recorder::{RecordingEvent, TransportMode, TICK_INTERVAL};
use route_recorder::{RecorderConfig, RouteRecorder};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    route_recorder::init_tracing();
    tracing::info!("Starting Route Recorder v{}", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            RecorderConfig::load(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => RecorderConfig::default(),
    };

    // A short walk around Lumphini Park with one dropped fix
    let source = Arc::new(ScriptedPositionSource::new(vec![
        Ok(PositionFix::new(13.7313, 100.5414)),
        Ok(PositionFix::new(13.7318, 100.5420)),
        Err(SampleError::Unavailable("no satellite fix".to_string())),
        Ok(PositionFix::new(13.7325, 100.5427)),
        Ok(PositionFix::new(13.7331, 100.5431)),
    ]));
    let ticks = source.remaining() as u32;

    let mut recorder = RouteRecorder::from_config(source, &config)?;
    let mut events = recorder.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                RecordingEvent::SampleRecorded { coordinate, points } => tracing::info!(
                    "Point {}: {:.4}, {:.4}",
                    points,
                    coordinate.latitude(),
                    coordinate.longitude()
                ),
                RecordingEvent::SampleFailed(e) => tracing::warn!("Sample failed: {}", e),
                other => tracing::debug!("{:?}", other),
            }
        }
    });

    recorder.arm(TransportMode::new("walk")).await?;
    recorder.start().await?;
    tokio::time::sleep(TICK_INTERVAL * ticks + TICK_INTERVAL / 2).await;
    recorder.request_stop().await?;
    let record = recorder.confirm_stop().await?;

    tracing::info!(
        "Recorded {} points over {}s, {:.1}m",
        record.path().len(),
        record.duration().num_seconds(),
        record.distance_meters()
    );

    let pending = recorder
        .handoff()
        .take_pending()?
        .context("recorded route was not handed off")?;
    println!("{}", serde_json::to_string_pretty(&pending)?);

    Ok(())
}

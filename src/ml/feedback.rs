use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::models::domain::{BudgetTier, RecommendContext, VenueType};

/// One confirmed prediction, kept for offline retraining
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEvent {
    pub lat: f64,
    pub lon: f64,
    pub time_available_min: u32,
    pub vibe: String,
    pub budget: BudgetTier,
    pub predicted: String,
    pub recorded_at: DateTime<Utc>,
}

impl FeedbackEvent {
    pub fn new(ctx: &RecommendContext, predicted: VenueType) -> Self {
        Self {
            lat: ctx.coords.lat,
            lon: ctx.coords.lon,
            time_available_min: ctx.time_available_min,
            vibe: ctx.vibe.clone(),
            budget: ctx.budget,
            predicted: predicted.label().to_string(),
            recorded_at: Utc::now(),
        }
    }
}

/// Fire-and-forget feedback sink
///
/// `record` is a non-blocking channel send; a spawned task drains the
/// channel and appends JSON lines to the feedback log. Write failures are
/// logged and never reach the scoring path.
#[derive(Clone)]
pub struct FeedbackRecorder {
    tx: Option<mpsc::UnboundedSender<FeedbackEvent>>,
}

impl FeedbackRecorder {
    /// Recorder that silently drops every event, for tests and for setups
    /// without a feedback log
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Start the drain task. Must run inside a tokio runtime.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<FeedbackEvent>();

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if let Err(e) = append_line(&path, &event).await {
                    tracing::warn!("Failed to append feedback event: {}", e);
                }
            }
        });

        Self { tx: Some(tx) }
    }

    /// Submit one event; never blocks, never fails the caller
    pub fn record(&self, event: FeedbackEvent) {
        if let Some(tx) = &self.tx {
            if tx.send(event).is_err() {
                tracing::warn!("Feedback channel closed, dropping event");
            }
        }
    }
}

async fn append_line(path: &PathBuf, event: &FeedbackEvent) -> std::io::Result<()> {
    let mut line = serde_json::to_string(event)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    line.push('\n');

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await
}

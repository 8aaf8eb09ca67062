//! Notification delivery
//!
//! Sinks receive `AssessmentEvent`s after an assessment is stored.
//! Delivery is best effort; callers log failures and carry on.

use async_trait::async_trait;
use reqwest::Client;
use risk_engine::events::AssessmentEvent;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook rejected event with status {0}")]
    Rejected(u16),
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, event: &AssessmentEvent) -> Result<(), NotifyError>;
}

/// Writes events to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn send(&self, event: &AssessmentEvent) -> Result<(), NotifyError> {
        if event.is_high_risk() {
            tracing::warn!(
                assessment_id = %event.assessment_id,
                owner = %event.owner,
                score = event.score.value(),
                risk_level = %event.risk_level,
                "high risk assessment"
            );
        } else {
            tracing::info!(
                assessment_id = %event.assessment_id,
                score = event.score.value(),
                event = ?event.event_type,
                "assessment completed"
            );
        }
        Ok(())
    }
}

/// POSTs each event as JSON to a fixed URL
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn send(&self, event: &AssessmentEvent) -> Result<(), NotifyError> {
        let res = self.client.post(&self.url).json(event).send().await?;
        if !res.status().is_success() {
            return Err(NotifyError::Rejected(res.status().as_u16()));
        }
        Ok(())
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AssessmentEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AssessmentEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, event: &AssessmentEvent) -> Result<(), NotifyError> {
        match self.events.lock() {
            Ok(mut guard) => guard.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
        Ok(())
    }
}

/// Deliver `events` in order, logging failures
pub async fn dispatch(sink: &dyn NotificationSink, events: &[AssessmentEvent]) {
    for event in events {
        if let Err(e) = sink.send(event).await {
            tracing::warn!(
                assessment_id = %event.assessment_id,
                error = %e,
                "failed to deliver notification"
            );
        }
    }
}

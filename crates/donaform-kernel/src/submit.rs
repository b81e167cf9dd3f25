//! Submission controller: a two-state machine gating the submit collaborator.
//!
//! ```text
//!            begin() [valid ∧ idle]
//!   Idle ──────────────────────────▶ Submitting
//!    ▲                                   │
//!    └──────── collaborator done ────────┘   (success or failure alike)
//! ```
//!
//! The state is published on a `watch` channel so a presentation layer can
//! follow it. Values are snapshotted when the submission begins; the store
//! stays editable while the collaborator runs.

use crate::error::{FormError, SubmitError};
use crate::store::FormStore;
use crate::values::FormValues;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// External destination of a submitted form.
#[async_trait]
pub trait SubmitCollaborator: Send + Sync {
    async fn submit(&self, values: FormValues) -> Result<(), SubmitError>;
}

/// Logs the submitted values and waits a fixed delay.
#[derive(Debug, Clone)]
pub struct LoggingSubmitter {
    delay: Duration,
}

impl LoggingSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SubmitCollaborator for LoggingSubmitter {
    async fn submit(&self, values: FormValues) -> Result<(), SubmitError> {
        let payload = serde_json::to_string(&values).map_err(|e| SubmitError(e.to_string()))?;
        let delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX);
        tracing::info!(values = %payload, delay_ms, "submitting donation form");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Record of one completed submission attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub values: FormValues,
}

#[derive(Debug, Clone)]
pub struct SubmissionController {
    state: Arc<watch::Sender<SubmissionState>>,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Enter `Submitting` with a snapshot of `store`.
    ///
    /// Refused while the form is invalid or another submission is pending.
    pub fn begin(&self, store: &FormStore) -> Result<InFlight, FormError> {
        if self.state() == SubmissionState::Submitting {
            return Err(FormError::AlreadySubmitting);
        }
        if !store.is_valid() {
            return Err(FormError::Invalid {
                error_count: store.errors().message_count(),
            });
        }

        let claimed = self.state.send_if_modified(|state| {
            if *state == SubmissionState::Idle {
                *state = SubmissionState::Submitting;
                true
            } else {
                false
            }
        });
        if !claimed {
            return Err(FormError::AlreadySubmitting);
        }

        let in_flight = InFlight {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            values: store.snapshot(),
            state: Arc::clone(&self.state),
        };
        tracing::info!(submission = %in_flight.id, "submission started");
        Ok(in_flight)
    }

    /// Begin and drive one submission to completion.
    pub async fn submit(
        &self,
        store: &FormStore,
        collaborator: &dyn SubmitCollaborator,
    ) -> Result<SubmissionReceipt, FormError> {
        let in_flight = self.begin(store)?;
        Ok(in_flight.complete(collaborator).await)
    }
}

/// A submission between `begin` and completion.
///
/// Dropping it, completed or not, returns the controller to `Idle`.
#[derive(Debug)]
pub struct InFlight {
    id: Uuid,
    started_at: DateTime<Utc>,
    values: FormValues,
    state: Arc<watch::Sender<SubmissionState>>,
}

impl InFlight {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The snapshot handed to the collaborator.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Hand the snapshot to `collaborator` once and wait for it.
    ///
    /// A collaborator failure is logged and otherwise treated as completion.
    pub async fn complete(self, collaborator: &dyn SubmitCollaborator) -> SubmissionReceipt {
        if let Err(e) = collaborator.submit(self.values.clone()).await {
            tracing::warn!(submission = %self.id, error = %e, "submit collaborator failed");
        }
        tracing::info!(submission = %self.id, "submission finished");

        SubmissionReceipt {
            id: self.id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            values: self.values.clone(),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.state.send_replace(SubmissionState::Idle);
    }
}

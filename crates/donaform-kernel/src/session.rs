//! A form session: store, submission controller and collaborator behind
//! one event-driven surface.
//!
//! Presentation layers send [`FormEvent`]s and render [`FormView`]s. Events
//! are applied strictly in order.

use crate::config::FormConfig;
use crate::error::FormError;
use crate::rules::RuleSet;
use crate::store::FormStore;
use crate::submit::{
    LoggingSubmitter, SubmissionController, SubmissionReceipt, SubmissionState, SubmitCollaborator,
};
use crate::validation::ValidationResult;
use crate::values::FormValues;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Input vocabulary of the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormEvent {
    SetField { path: String, value: Value },
    Touch { path: String },
    AddEntry,
    RemoveEntry { index: usize },
    Submit,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum EventOutcome {
    Updated,
    EntryAdded { index: usize },
    EntryRemoved { removed: bool },
    Submitted { receipt: SubmissionReceipt },
    SubmitRefused { reason: String },
}

/// Everything a presentation layer needs to render the form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub values: FormValues,
    pub errors: ValidationResult,
    pub valid: bool,
    pub submission: SubmissionState,
    pub can_submit: bool,
    pub submit_count: usize,
}

pub struct FormSession {
    store: FormStore,
    controller: SubmissionController,
    collaborator: Arc<dyn SubmitCollaborator>,
    submit_count: usize,
}

impl FormSession {
    pub fn new(store: FormStore, collaborator: Arc<dyn SubmitCollaborator>) -> Self {
        Self {
            store,
            controller: SubmissionController::new(),
            collaborator,
            submit_count: 0,
        }
    }

    /// Session over `values` with rules and the logging submitter taken from `config`.
    pub fn from_config(values: FormValues, config: &FormConfig) -> Self {
        let store = FormStore::new(values, RuleSet::from_limits(&config.limits));
        let collaborator = Arc::new(LoggingSubmitter::new(config.submit.delay()));
        Self::new(store, collaborator)
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    pub async fn dispatch(&mut self, event: FormEvent) -> Result<EventOutcome, FormError> {
        tracing::debug!(?event, "dispatching form event");
        match event {
            FormEvent::SetField { path, value } => {
                self.store.set_field(&path, value)?;
                Ok(EventOutcome::Updated)
            }
            FormEvent::Touch { path } => {
                self.store.touch(&path)?;
                Ok(EventOutcome::Updated)
            }
            FormEvent::AddEntry => Ok(EventOutcome::EntryAdded {
                index: self.store.add_entry(),
            }),
            FormEvent::RemoveEntry { index } => Ok(EventOutcome::EntryRemoved {
                removed: self.store.remove_entry(index),
            }),
            FormEvent::Submit => self.submit().await,
        }
    }

    async fn submit(&mut self) -> Result<EventOutcome, FormError> {
        self.store.touch_all();
        self.submit_count += 1;

        match self
            .controller
            .submit(&self.store, self.collaborator.as_ref())
            .await
        {
            Ok(receipt) => Ok(EventOutcome::Submitted { receipt }),
            Err(e @ (FormError::Invalid { .. } | FormError::AlreadySubmitting)) => {
                tracing::info!(reason = %e, "submit refused");
                Ok(EventOutcome::SubmitRefused {
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    pub fn view(&self) -> FormView {
        let valid = self.store.is_valid();
        let submission = self.controller.state();
        FormView {
            values: self.store.snapshot(),
            errors: self.store.errors().clone(),
            valid,
            submission,
            can_submit: valid && submission == SubmissionState::Idle,
            submit_count: self.submit_count,
        }
    }
}

//! The generation form controller.
//!
//! A controller owns one page session's form values, the images from the
//! last successful request, the busy flag and the attempt counter. State is
//! held in a [`watch`] channel so renderers can observe every change.

use serde::Serialize;
use tokio::sync::watch;

use crate::{
    image_service::ImageGenerator,
    params::{FormField, GenerationParams},
};

/// Successful requests allowed per session.
pub const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub params: GenerationParams,
    pub images: Vec<String>,
    pub busy: bool,
    pub attempts: u32,
}

impl FormState {
    pub fn attempts_remaining(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= MAX_ATTEMPTS
    }

    pub fn can_submit(&self) -> bool {
        !self.busy && !self.is_exhausted()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreReason {
    Busy,
    Exhausted,
}

/// What a call to [`GenerationController::submit`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service answered with an image list and the attempt was counted.
    Completed,
    /// The request failed; the failure was logged and nothing else changed.
    Failed,
    /// No request was sent.
    Ignored(IgnoreReason),
}

pub struct GenerationController<G> {
    generator: G,
    state: watch::Sender<FormState>,
}

impl<G: ImageGenerator> GenerationController<G> {
    pub fn new(generator: G) -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self { generator, state }
    }

    pub fn snapshot(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Sets one form field. Values are not checked against the form's choices.
    pub fn update_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|state| state.params.set(field, value));
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let mut ignored = None;
        let mut params = None;
        self.state.send_if_modified(|state| {
            if state.is_exhausted() {
                ignored = Some(IgnoreReason::Exhausted);
                return false;
            }
            if state.busy {
                ignored = Some(IgnoreReason::Busy);
                return false;
            }
            state.busy = true;
            params = Some(state.params.clone());
            true
        });
        let Some(params) = params else {
            let reason = ignored.unwrap_or(IgnoreReason::Busy);
            tracing::debug!(?reason, "submit ignored");
            return SubmitOutcome::Ignored(reason);
        };

        let _busy = BusyGuard { state: &self.state };
        match self.generator.generate(&params).await {
            Ok(images) => {
                tracing::info!(count = images.len(), "images generated");
                self.state.send_modify(|state| {
                    state.images = images;
                    state.attempts += 1;
                    state.busy = false;
                });
                SubmitOutcome::Completed
            }
            Err(err) => {
                tracing::error!(error = %err, "error generating images");
                SubmitOutcome::Failed
            }
        }
    }
}

/// Clears the busy flag when the in-flight request ends, however it ends.
struct BusyGuard<'a> {
    state: &'a watch::Sender<FormState>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            let was_busy = state.busy;
            state.busy = false;
            was_busy
        });
    }
}

use std::sync::{Arc, Mutex, MutexGuard};

use shared::{
    domain::{ContactField, ContactSubmission},
    protocol::ContactReceipt,
};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::{
    api::ContentApi, error::ApiClientError, events::SiteEvent, notify::NotificationSink,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// What a call to [`ContactFormController::submit`] did.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Another submission is in flight; nothing was sent.
    AlreadySubmitting,
    /// Required fields are empty; nothing was sent.
    Incomplete(Vec<ContactField>),
    Delivered(ContactReceipt),
    Failed(ApiClientError),
}

impl SubmitOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SubmitOutcome::Delivered(_))
    }
}

#[derive(Default)]
struct FormState {
    fields: ContactSubmission,
    status: SubmissionStatus,
}

/// Owns the contact form fields and the submission state machine.
pub struct ContactFormController {
    api: Arc<dyn ContentApi>,
    notifier: Arc<dyn NotificationSink>,
    state: Mutex<FormState>,
    events: broadcast::Sender<SiteEvent>,
}

impl ContactFormController {
    pub fn new(
        api: Arc<dyn ContentApi>,
        notifier: Arc<dyn NotificationSink>,
        events: broadcast::Sender<SiteEvent>,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            notifier,
            state: Mutex::new(FormState::default()),
            events,
        })
    }

    pub fn fields(&self) -> ContactSubmission {
        self.lock().fields.clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.lock().status
    }

    /// Accepted in every status. While a submission is in flight the edit is
    /// stored but observers are not told until the request resolves.
    pub fn update_field(&self, field: ContactField, value: impl Into<String>) {
        let in_flight = {
            let mut state = self.lock();
            state.fields.set_field(field, value);
            state.status == SubmissionStatus::Submitting
        };
        if !in_flight {
            let _ = self.events.send(SiteEvent::FieldsChanged);
        }
    }

    /// Sends the current fields once. If this future is dropped before the
    /// request resolves, the form moves to `Failed` and keeps its fields.
    pub async fn submit(&self) -> SubmitOutcome {
        let snapshot = {
            let mut state = self.lock();
            if state.status == SubmissionStatus::Submitting {
                debug!("contact submit ignored: a submission is already in flight");
                return SubmitOutcome::AlreadySubmitting;
            }
            let missing = state.fields.missing_fields();
            if !missing.is_empty() {
                debug!(?missing, "contact submit ignored: required fields are empty");
                return SubmitOutcome::Incomplete(missing);
            }
            state.status = SubmissionStatus::Submitting;
            state.fields.clone()
        };
        let in_flight = InFlight { form: Some(self) };
        self.publish_status(SubmissionStatus::Submitting);

        let result = self.api.submit_contact(&snapshot).await;
        in_flight.settle();

        match result {
            Ok(receipt) => {
                {
                    let mut state = self.lock();
                    state.status = SubmissionStatus::Succeeded;
                    state.fields = ContactSubmission::default();
                }
                info!(receipt_id = ?receipt.id, "contact message delivered");
                self.publish_status(SubmissionStatus::Succeeded);
                let _ = self.events.send(SiteEvent::FieldsChanged);
                self.notifier.notify_success();
                SubmitOutcome::Delivered(receipt)
            }
            Err(err) => {
                self.lock().status = SubmissionStatus::Failed;
                error!(
                    kind = err.kind(),
                    status = ?err.status(),
                    "contact submission failed: {err}"
                );
                self.publish_status(SubmissionStatus::Failed);
                let _ = self.events.send(SiteEvent::FieldsChanged);
                self.notifier.notify_failure();
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn abandon(&self) {
        self.lock().status = SubmissionStatus::Failed;
        warn!("contact submission abandoned before the backend answered");
        self.publish_status(SubmissionStatus::Failed);
        let _ = self.events.send(SiteEvent::FieldsChanged);
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish_status(&self, status: SubmissionStatus) {
        let _ = self
            .events
            .send(SiteEvent::SubmissionStatusChanged(status));
    }
}

/// Held across the backend call; moves the form out of `Submitting` if the
/// submitting future is dropped first.
struct InFlight<'a> {
    form: Option<&'a ContactFormController>,
}

impl InFlight<'_> {
    fn settle(mut self) {
        self.form = None;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(form) = self.form.take() {
            form.abandon();
        }
    }
}

#[cfg(test)]
#[path = "tests/contact_tests.rs"]
mod tests;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex as StdMutex,
};

use async_trait::async_trait;
use shared::{
    domain::{ContactSubmission, ResourceId, ResourceKind, TestimonialId},
    protocol::{ContactReceipt, Resource, Testimonial},
};
use tokio::sync::{Notify, Semaphore};

use crate::{api::ContentApi, error::ApiClientError, notify::NotificationSink};

pub(crate) fn testimonial(id: &str, rating: u8) -> Testimonial {
    Testimonial {
        id: TestimonialId::from(id),
        name: format!("author {id}"),
        role: "Parent d'élève".into(),
        content: "Très bon suivi".into(),
        rating,
        timestamp: None,
    }
}

pub(crate) fn resource(id: &str, kind: ResourceKind) -> Resource {
    Resource {
        id: ResourceId::from(id),
        title: format!("resource {id}"),
        description: "Fiche de révision".into(),
        category: "Mathématiques".into(),
        level: "Collège".into(),
        kind,
        url: format!("https://example.test/{id}"),
        timestamp: None,
    }
}

pub(crate) fn filled_submission() -> ContactSubmission {
    ContactSubmission {
        name: "A".into(),
        email: "a@b.com".into(),
        phone: "0600000000".into(),
        message: "hi".into(),
    }
}

pub(crate) fn server_error() -> ApiClientError {
    ApiClientError::rejected(500, "Internal Server Error")
}

/// Scripted [`ContentApi`] that records every call.
pub(crate) struct FakeContentApi {
    testimonials: Result<Vec<Testimonial>, ApiClientError>,
    resources: Result<Vec<Resource>, ApiClientError>,
    contact: Result<ContactReceipt, ApiClientError>,
    contact_gate: Option<Arc<Semaphore>>,
    pub contact_entered: Arc<Notify>,
    pub testimonial_calls: AtomicUsize,
    pub resource_calls: AtomicUsize,
    pub submissions: StdMutex<Vec<ContactSubmission>>,
}

impl FakeContentApi {
    pub(crate) fn ok() -> Self {
        Self {
            testimonials: Ok(Vec::new()),
            resources: Ok(Vec::new()),
            contact: Ok(ContactReceipt::default()),
            contact_gate: None,
            contact_entered: Arc::new(Notify::new()),
            testimonial_calls: AtomicUsize::new(0),
            resource_calls: AtomicUsize::new(0),
            submissions: StdMutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_testimonials(
        mut self,
        outcome: Result<Vec<Testimonial>, ApiClientError>,
    ) -> Self {
        self.testimonials = outcome;
        self
    }

    pub(crate) fn with_resources(mut self, outcome: Result<Vec<Resource>, ApiClientError>) -> Self {
        self.resources = outcome;
        self
    }

    pub(crate) fn with_contact(mut self, outcome: Result<ContactReceipt, ApiClientError>) -> Self {
        self.contact = outcome;
        self
    }

    /// Holds every `submit_contact` call until a permit is added to the
    /// returned semaphore.
    pub(crate) fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.contact_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub(crate) fn contact_calls(&self) -> usize {
        self.submissions.lock().expect("submissions").len()
    }
}

#[async_trait]
impl ContentApi for FakeContentApi {
    async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, ApiClientError> {
        self.testimonial_calls.fetch_add(1, Ordering::SeqCst);
        self.testimonials.clone()
    }

    async fn fetch_resources(&self) -> Result<Vec<Resource>, ApiClientError> {
        self.resource_calls.fetch_add(1, Ordering::SeqCst);
        self.resources.clone()
    }

    async fn submit_contact(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactReceipt, ApiClientError> {
        self.submissions
            .lock()
            .expect("submissions")
            .push(submission.clone());
        self.contact_entered.notify_one();
        if let Some(gate) = &self.contact_gate {
            gate.acquire().await.expect("gate open").forget();
        }
        self.contact.clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub successes: AtomicUsize,
    pub failures: AtomicUsize,
}

impl RecordingSink {
    pub(crate) fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    pub(crate) fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }
}

impl NotificationSink for RecordingSink {
    fn notify_success(&self) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn notify_failure(&self) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }
}

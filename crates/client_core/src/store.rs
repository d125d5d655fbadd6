use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::protocol::{Resource, Testimonial};
use tokio::{
    sync::{broadcast, RwLock},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{api::ContentApi, error::ApiClientError, events::SiteEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Failed,
}

/// A server-fed, client read-only collection and where its single load
/// stands. `items` is replaced wholesale, never merged.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    pub items: Arc<[T]>,
    pub status: LoadStatus,
    pub last_error: Option<String>,
}

impl<T> Collection<T> {
    fn loading() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            status: LoadStatus::Loading,
            last_error: None,
        }
    }

    fn apply(&mut self, outcome: Result<Vec<T>, ApiClientError>) {
        match outcome {
            Ok(items) => {
                self.items = Arc::from(items);
                self.status = LoadStatus::Loaded;
                self.last_error = None;
            }
            Err(err) => {
                self.items = Arc::from(Vec::new());
                self.status = LoadStatus::Failed;
                self.last_error = Some(err.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Owns the testimonials and resources collections. Each has exactly one
/// load, and the two loads never wait on each other.
pub struct CollectionStore {
    api: Arc<dyn ContentApi>,
    testimonials: RwLock<Collection<Testimonial>>,
    resources: RwLock<Collection<Resource>>,
    mounted: AtomicBool,
    events: broadcast::Sender<SiteEvent>,
}

impl CollectionStore {
    pub fn new(api: Arc<dyn ContentApi>, events: broadcast::Sender<SiteEvent>) -> Arc<Self> {
        Arc::new(Self {
            api,
            testimonials: RwLock::new(Collection::loading()),
            resources: RwLock::new(Collection::loading()),
            mounted: AtomicBool::new(false),
            events,
        })
    }

    pub async fn testimonials(&self) -> Collection<Testimonial> {
        self.testimonials.read().await.clone()
    }

    pub async fn resources(&self) -> Collection<Resource> {
        self.resources.read().await.clone()
    }

    pub async fn load_testimonials(&self) {
        let outcome = self.api.fetch_testimonials().await;
        log_outcome("testimonials", &outcome);
        let (status, count) = {
            let mut guard = self.testimonials.write().await;
            guard.apply(outcome);
            (guard.status, guard.len())
        };
        let _ = self
            .events
            .send(SiteEvent::TestimonialsChanged { status, count });
    }

    pub async fn load_resources(&self) {
        let outcome = self.api.fetch_resources().await;
        log_outcome("resources", &outcome);
        let (status, count) = {
            let mut guard = self.resources.write().await;
            guard.apply(outcome);
            (guard.status, guard.len())
        };
        let _ = self
            .events
            .send(SiteEvent::ResourcesChanged { status, count });
    }

    /// Runs both loads concurrently on the current task.
    pub async fn load_all(&self) {
        tokio::join!(self.load_testimonials(), self.load_resources());
    }

    /// Starts both loads as independent tasks and returns immediately.
    /// Only the first call starts anything; later calls return `None`.
    pub fn mount(self: &Arc<Self>) -> Option<MountHandle> {
        if self.mounted.swap(true, Ordering::SeqCst) {
            debug!("collection store already mounted");
            return None;
        }
        let store = Arc::clone(self);
        let testimonials = tokio::spawn(async move { store.load_testimonials().await });
        let store = Arc::clone(self);
        let resources = tokio::spawn(async move { store.load_resources().await });
        Some(MountHandle {
            testimonials,
            resources,
        })
    }
}

fn log_outcome<T>(collection: &'static str, outcome: &Result<Vec<T>, ApiClientError>) {
    match outcome {
        Ok(items) => info!(collection, count = items.len(), "collection loaded"),
        Err(err) => warn!(
            collection,
            kind = err.kind(),
            status = ?err.status(),
            "collection load failed: {err}"
        ),
    }
}

/// The two in-flight loads started by [`CollectionStore::mount`].
pub struct MountHandle {
    testimonials: JoinHandle<()>,
    resources: JoinHandle<()>,
}

impl MountHandle {
    /// Waits for both loads to settle.
    pub async fn join(self) {
        let (testimonials, resources) = tokio::join!(self.testimonials, self.resources);
        for (collection, result) in [("testimonials", testimonials), ("resources", resources)] {
            if let Err(err) = result {
                if !err.is_cancelled() {
                    warn!(collection, "collection load task ended abnormally: {err}");
                }
            }
        }
    }

    /// Drops interest in both loads. Collections still loading stay
    /// `Loading`.
    pub fn abort(&self) {
        self.testimonials.abort();
        self.resources.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.testimonials.is_finished() && self.resources.is_finished()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

pub mod api;
pub mod config;
pub mod contact;
pub mod error;
pub mod events;
pub mod notify;
pub mod render;
pub mod resource_view;
pub mod store;

pub use api::{ContentApi, HttpContentApi, MissingContentApi};
pub use config::{load_settings, Settings};
pub use contact::{ContactFormController, SubmissionStatus, SubmitOutcome};
pub use error::ApiClientError;
pub use events::SiteEvent;
pub use notify::{Notification, NotificationCenter, NotificationLevel, NotificationSink};
pub use resource_view::{filter_resources, ResourceFilter, ResourceView};
pub use store::{Collection, CollectionStore, LoadStatus, MountHandle};

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Everything one page instance needs, wired to a single event channel.
pub struct SiteSession {
    pub store: Arc<CollectionStore>,
    pub contact: Arc<ContactFormController>,
    pub notifications: Arc<NotificationCenter>,
    events: broadcast::Sender<SiteEvent>,
}

impl SiteSession {
    pub fn new(settings: &Settings) -> Self {
        let api: Arc<dyn ContentApi> = match settings.backend_url.as_deref() {
            Some(base_url) => {
                info!(backend_url = base_url, "using content backend");
                Arc::new(HttpContentApi::new(base_url))
            }
            None => {
                info!("no backend url configured; backend calls will fail");
                Arc::new(MissingContentApi)
            }
        };
        Self::with_api(api, settings)
    }

    pub fn with_api(api: Arc<dyn ContentApi>, settings: &Settings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let notifications = Arc::new(NotificationCenter::new(
            settings.notification_limit,
            settings.notification_ttl,
            events.clone(),
        ));
        let store = CollectionStore::new(Arc::clone(&api), events.clone());
        let contact = ContactFormController::new(
            api,
            Arc::clone(&notifications) as Arc<dyn NotificationSink>,
            events.clone(),
        );
        Self {
            store,
            contact,
            notifications,
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SiteEvent> {
        self.events.subscribe()
    }

    /// Kicks off both collection loads without waiting for either. Returns
    /// `None` if the session was already mounted.
    pub fn mount(&self) -> Option<MountHandle> {
        self.store.mount()
    }

    pub async fn resource_view(&self) -> ResourceView {
        ResourceView::new(self.store.resources().await.items)
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

use std::{
    collections::VecDeque,
    sync::Mutex,
    time::{Duration, Instant},
};

use tokio::sync::broadcast;
use tracing::debug;

use crate::events::SiteEvent;

pub const SUCCESS_TITLE: &str = "Message envoyé avec succès!";
pub const SUCCESS_DETAIL: &str = "Je vous répondrai dans les plus brefs délais.";
pub const FAILURE_TITLE: &str = "Erreur lors de l'envoi";
pub const FAILURE_DETAIL: &str = "Veuillez réessayer ou me contacter directement.";

pub const DEFAULT_NOTIFICATION_LIMIT: usize = 3;
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Receives the outcome of a contact submission.
pub trait NotificationSink: Send + Sync {
    fn notify_success(&self);
    fn notify_failure(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub level: NotificationLevel,
    pub title: &'static str,
    pub detail: &'static str,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

struct CenterState {
    next_id: u64,
    active: VecDeque<Notification>,
}

/// Toast-style sink: bounded, self-expiring, dismissible.
pub struct NotificationCenter {
    limit: usize,
    ttl: Duration,
    state: Mutex<CenterState>,
    events: broadcast::Sender<SiteEvent>,
}

impl NotificationCenter {
    pub fn new(limit: usize, ttl: Duration, events: broadcast::Sender<SiteEvent>) -> Self {
        Self {
            limit: limit.max(1),
            ttl,
            state: Mutex::new(CenterState {
                next_id: 1,
                active: VecDeque::new(),
            }),
            events,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Live notifications, oldest first. Expired ones are dropped on the way.
    pub fn active(&self) -> Vec<Notification> {
        self.active_at(Instant::now())
    }

    pub fn active_at(&self, now: Instant) -> Vec<Notification> {
        let mut state = self.lock();
        state.active.retain(|n| !n.is_expired(now));
        state.active.iter().cloned().collect()
    }

    pub fn dismiss(&self, id: NotificationId) -> bool {
        let removed = {
            let mut state = self.lock();
            let before = state.active.len();
            state.active.retain(|n| n.id != id);
            before != state.active.len()
        };
        if removed {
            let _ = self.events.send(SiteEvent::Dismissed(id));
        }
        removed
    }

    fn push(&self, level: NotificationLevel, title: &'static str, detail: &'static str) {
        let now = Instant::now();
        let (notification, evicted) = {
            let mut state = self.lock();
            state.active.retain(|n| !n.is_expired(now));

            let mut evicted = Vec::new();
            while state.active.len() >= self.limit {
                if let Some(oldest) = state.active.pop_front() {
                    evicted.push(oldest.id);
                }
            }

            let notification = Notification {
                id: NotificationId(state.next_id),
                level,
                title,
                detail,
                expires_at: now + self.ttl,
            };
            state.next_id += 1;
            state.active.push_back(notification.clone());
            (notification, evicted)
        };

        for id in evicted {
            debug!(id = id.0, "notification evicted");
            let _ = self.events.send(SiteEvent::Dismissed(id));
        }
        let _ = self.events.send(SiteEvent::Notified(notification));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CenterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NotificationSink for NotificationCenter {
    fn notify_success(&self) {
        self.push(NotificationLevel::Success, SUCCESS_TITLE, SUCCESS_DETAIL);
    }

    fn notify_failure(&self) {
        self.push(NotificationLevel::Error, FAILURE_TITLE, FAILURE_DETAIL);
    }
}

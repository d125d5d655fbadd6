//! Observer events published after every state transition.

use crate::{
    contact::SubmissionStatus,
    notify::{Notification, NotificationId},
    store::LoadStatus,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SiteEvent {
    TestimonialsChanged { status: LoadStatus, count: usize },
    ResourcesChanged { status: LoadStatus, count: usize },
    FieldsChanged,
    SubmissionStatusChanged(SubmissionStatus),
    Notified(Notification),
    Dismissed(NotificationId),
}

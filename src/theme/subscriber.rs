//! Theme change subscribers and their disposers

use super::ThemePreference;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubscriberError {
    /// The receiving side of the subscriber's channel is gone.
    #[error("Subscriber channel closed")]
    Disconnected,

    /// The subscriber's queue is full; the notification was dropped.
    #[error("Subscriber queue full")]
    Backpressure,

    #[error("Subscriber failed: {0}")]
    Failed(String),
}

impl<T> From<tokio::sync::mpsc::error::TrySendError<T>> for SubscriberError {
    fn from(err: tokio::sync::mpsc::error::TrySendError<T>) -> Self {
        match err {
            tokio::sync::mpsc::error::TrySendError::Full(_) => SubscriberError::Backpressure,
            tokio::sync::mpsc::error::TrySendError::Closed(_) => SubscriberError::Disconnected,
        }
    }
}

/// Reacts to theme changes.
///
/// Called synchronously on the thread that changed the theme. Implementations
/// that need slow work (a chart refresh) should only schedule it here.
/// Setting the theme from inside a notification is allowed: the store stops
/// the current pass and delivers the new value to every other subscriber.
pub trait ThemeSubscriber {
    fn theme_changed(&mut self, theme: ThemePreference) -> Result<(), SubscriberError>;
}

impl<F> ThemeSubscriber for F
where
    F: FnMut(ThemePreference) -> Result<(), SubscriberError>,
{
    fn theme_changed(&mut self, theme: ThemePreference) -> Result<(), SubscriberError> {
        self(theme)
    }
}

pub(crate) type SharedSubscriber = Rc<RefCell<dyn ThemeSubscriber>>;

pub(crate) struct SubscriberSlot {
    pub(crate) id: u64,
    pub(crate) subscriber: SharedSubscriber,
}

/// Registration list shared between the store and outstanding [`Subscription`]s.
pub(crate) type SubscriberRegistry = Rc<RefCell<Vec<SubscriberSlot>>>;

/// Handle returned by `ThemePreferenceStore::subscribe`.
///
/// Dropping the handle keeps the subscriber registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
#[must_use = "bind the subscription to `_` to keep the subscriber for the whole session"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Vec<SubscriberSlot>>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: &SubscriberRegistry) -> Self {
        Self {
            id,
            registry: Rc::downgrade(registry),
        }
    }

    /// Removes the subscriber. A no-op once the store is gone.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().retain(|slot| slot.id != self.id);
        }
    }
}

impl std::fmt::Debug for SubscriberSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberSlot").field("id", &self.id).finish()
    }
}

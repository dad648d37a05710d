//! Theme preference store
//!
//! Single source of truth for the active theme. Owns the in-memory value,
//! persists it through an injected [`PreferenceStorage`] and notifies
//! subscribers on every change.
//!
//! Storage failures never surface to callers: the in-memory value stays
//! authoritative and the worst case is that the preference does not survive
//! a restart.
//!
//! A subscriber that sets the theme from inside its own notification cuts the
//! running pass short; the newer value is then delivered to everyone except
//! that subscriber.

use super::effects::VisualEffects;
use super::subscriber::{
    SubscriberError, SubscriberRegistry, SubscriberSlot, Subscription, ThemeSubscriber,
};
use super::ThemePreference;
use crate::consts::cli_consts::THEME_STORAGE_KEY;
use crate::storage::PreferenceStorage;
use log::{debug, warn};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

/// Upper bound on back-to-back passes caused by subscribers setting the theme.
const MAX_NOTIFY_PASSES: usize = 8;

/// A value set while a pass was running, and the subscriber that set it.
#[derive(Debug, Clone, Copy)]
struct PendingChange {
    theme: ThemePreference,
    origin: u64,
}

pub struct ThemePreferenceStore {
    storage: Box<dyn PreferenceStorage>,
    current: Cell<Option<ThemePreference>>,
    subscribers: SubscriberRegistry,
    next_subscriber_id: Cell<u64>,
    effects: Option<Box<dyn VisualEffects>>,
    /// Subscriber currently being called, if a pass is running.
    notifying: Cell<Option<u64>>,
    pending: Cell<Option<PendingChange>>,
}

impl ThemePreferenceStore {
    /// Creates a store backed by `storage`. Nothing is read until the
    /// current theme is first requested.
    pub fn new(storage: Box<dyn PreferenceStorage>) -> Self {
        Self {
            storage,
            current: Cell::new(None),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_subscriber_id: Cell::new(0),
            effects: None,
            notifying: Cell::new(None),
            pending: Cell::new(None),
        }
    }

    /// Attaches a transition effect played by [`toggle`](Self::toggle).
    pub fn with_effects(mut self, effects: Box<dyn VisualEffects>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Returns the active theme, loading it from storage on first use.
    pub fn get_current(&self) -> ThemePreference {
        if let Some(theme) = self.current.get() {
            return theme;
        }
        let theme = self.load();
        self.current.set(Some(theme));
        theme
    }

    /// Makes `theme` current, persists it and notifies every subscriber,
    /// even if the value did not change.
    pub fn set_current(&self, theme: ThemePreference) {
        self.current.set(Some(theme));

        if let Err(e) = self.storage.write(THEME_STORAGE_KEY, theme.as_str()) {
            warn!("Theme preference not persisted: {}", e);
        }

        if let Some(origin) = self.notifying.get() {
            self.pending.set(Some(PendingChange { theme, origin }));
            return;
        }

        self.notify(theme, None);
        let mut passes = 1;
        while let Some(change) = self.pending.take() {
            if passes == MAX_NOTIFY_PASSES {
                warn!(
                    "Theme subscribers keep changing the theme; stopped after {} passes",
                    passes
                );
                break;
            }
            passes += 1;
            self.notify(change.theme, Some(change.origin));
        }
    }

    /// Flips the theme and returns the new value.
    pub fn toggle(&self) -> ThemePreference {
        let from = self.get_current();
        let to = from.toggled();
        self.set_current(to);

        if let Some(effects) = &self.effects {
            effects.theme_transition(from, to);
        }
        to
    }

    /// Registers `subscriber` for every future change. It is not called with
    /// the current value; use [`get_current`](Self::get_current) for that.
    pub fn subscribe<S>(&self, subscriber: S) -> Subscription
    where
        S: ThemeSubscriber + 'static,
    {
        let id = self.next_subscriber_id.get();
        self.next_subscriber_id.set(id + 1);

        self.subscribers.borrow_mut().push(SubscriberSlot {
            id,
            subscriber: Rc::new(RefCell::new(subscriber)),
        });
        Subscription::new(id, &self.subscribers)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn load(&self) -> ThemePreference {
        match self.storage.read(THEME_STORAGE_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                debug!("{}; falling back to light", e);
                ThemePreference::default()
            }),
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                warn!("Theme preference unavailable, using light: {}", e);
                ThemePreference::default()
            }
        }
    }

    fn notify(&self, theme: ThemePreference, skip: Option<u64>) {
        // Snapshot so subscribers may (un)subscribe while being notified.
        let snapshot: Vec<_> = self
            .subscribers
            .borrow()
            .iter()
            .map(|slot| (slot.id, slot.subscriber.clone()))
            .collect();

        for (id, subscriber) in snapshot {
            if skip == Some(id) {
                debug!("Theme subscriber #{} set {} itself; not echoed", id, theme);
                continue;
            }
            let Ok(mut subscriber) = subscriber.try_borrow_mut() else {
                warn!("Theme subscriber #{} is already running; skipped", id);
                continue;
            };

            self.notifying.set(Some(id));
            let outcome = catch_unwind(AssertUnwindSafe(|| subscriber.theme_changed(theme)))
                .unwrap_or_else(|payload| {
                    Err(SubscriberError::Failed(format!(
                        "panicked: {}",
                        panic_message(payload.as_ref())
                    )))
                });
            self.notifying.set(None);

            if let Err(e) = outcome {
                warn!("Theme subscriber #{} failed: {}", id, e);
            }

            // Superseded by a newer value; the caller delivers that instead.
            if self.pending.get().is_some() {
                break;
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

impl std::fmt::Debug for ThemePreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreferenceStore")
            .field("current", &self.current.get())
            .field("subscribers", &self.subscriber_count())
            .field("effects", &self.effects.is_some())
            .finish()
    }
}

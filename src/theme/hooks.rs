//! Subscribers and effects wired into the store for a dashboard session

use super::subscriber::{SubscriberError, ThemeSubscriber};
use super::{ThemePreference, VisualEffects};
use crate::consts::cli_consts::THEME_TRANSITION_FRAMES;
use crate::events::Event;
use crate::workers::RefreshReason;
use std::cell::Cell;
use std::rc::Rc;
use tokio::sync::mpsc;

/// The theme the renderer paints with. Clones share one value.
#[derive(Debug, Clone, Default)]
pub struct AppliedTheme(Rc<Cell<ThemePreference>>);

impl AppliedTheme {
    pub fn new(theme: ThemePreference) -> Self {
        Self(Rc::new(Cell::new(theme)))
    }

    pub fn get(&self) -> ThemePreference {
        self.0.get()
    }
}

impl ThemeSubscriber for AppliedTheme {
    fn theme_changed(&mut self, theme: ThemePreference) -> Result<(), SubscriberError> {
        self.0.set(theme);
        Ok(())
    }
}

/// Queues a chart refresh so charts pick up the new colours.
#[derive(Debug, Clone)]
pub struct RefreshTrigger {
    sender: mpsc::Sender<RefreshReason>,
}

impl RefreshTrigger {
    pub fn new(sender: mpsc::Sender<RefreshReason>) -> Self {
        Self { sender }
    }
}

impl ThemeSubscriber for RefreshTrigger {
    fn theme_changed(&mut self, theme: ThemePreference) -> Result<(), SubscriberError> {
        self.sender.try_send(RefreshReason::ThemeChanged(theme))?;
        Ok(())
    }
}

/// Records theme changes in the activity log.
#[derive(Debug, Clone)]
pub struct ActivityNotifier {
    sender: mpsc::Sender<Event>,
}

impl ActivityNotifier {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }
}

impl ThemeSubscriber for ActivityNotifier {
    fn theme_changed(&mut self, theme: ThemePreference) -> Result<(), SubscriberError> {
        self.sender.try_send(Event::theme_changed(theme))?;
        Ok(())
    }
}

/// Header spinner shown for a few frames after a toggle. Clones share the
/// frame counter, so the store can own one while the dashboard ticks another.
#[derive(Debug, Clone, Default)]
pub struct TransitionSpinner {
    frames_left: Rc<Cell<u16>>,
}

impl TransitionSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.frames_left.get() > 0
    }

    /// Consumes one frame. Returns whether the spinner was still running.
    pub fn advance(&self) -> bool {
        let left = self.frames_left.get();
        if left == 0 {
            return false;
        }
        self.frames_left.set(left - 1);
        true
    }
}

impl VisualEffects for TransitionSpinner {
    fn theme_transition(&self, from: ThemePreference, to: ThemePreference) {
        log::debug!("Theme transition {} -> {}", from, to);
        self.frames_left.set(THEME_TRANSITION_FRAMES);
    }
}

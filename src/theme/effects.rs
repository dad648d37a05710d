//! Optional visual effects played when the theme is toggled

use super::ThemePreference;

/// Cosmetic transition hook.
///
/// A store without effects is fully functional; nothing probes for one at
/// runtime. Implementations must return immediately and do any animation
/// from their own frame loop.
pub trait VisualEffects {
    fn theme_transition(&self, from: ThemePreference, to: ThemePreference);
}

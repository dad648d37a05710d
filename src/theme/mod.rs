//! Theme preference
//!
//! The light/dark preference, the store that owns it, and the hooks other
//! components use to react when it flips.

pub mod effects;
pub mod hooks;
pub mod palette;
pub mod store;
pub mod subscriber;

pub use effects::VisualEffects;
pub use hooks::{ActivityNotifier, AppliedTheme, RefreshTrigger, TransitionSpinner};
pub use palette::ThemePalette;
pub use store::ThemePreferenceStore;
pub use subscriber::SubscriberError;

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// A named visual mode governing every colour token in the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// The other theme. Toggling is the only transition the store exposes.
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// The literal persisted in preference storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown theme '{0}', expected 'light' or 'dark'")]
pub struct ParseThemeError(pub String);

impl FromStr for ThemePreference {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

impl Display for ThemePreference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_flips_between_themes() {
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggled(), ThemePreference::Light);
        assert_eq!(ThemePreference::Light.toggled().toggled(), ThemePreference::Light);
    }

    #[test]
    fn test_parse_accepts_stored_literals() {
        assert_eq!("light".parse::<ThemePreference>(), Ok(ThemePreference::Light));
        assert_eq!("dark".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
        assert_eq!(" Dark\n".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
        assert!("auto".parse::<ThemePreference>().is_err());
        assert!("".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn test_display_matches_storage_literal() {
        assert_eq!(ThemePreference::Light.to_string(), "light");
        assert_eq!(ThemePreference::Dark.to_string(), "dark");
        assert_eq!(ThemePreference::default(), ThemePreference::Light);
    }
}

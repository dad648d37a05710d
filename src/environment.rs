use crate::consts::cli_consts::API_URL_ENV_VAR;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The dashboard server the client talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Django development server on this machine.
    #[default]
    Local,
    /// Any other deployment, addressed by its base URL.
    Custom { url: String },
}

impl Environment {
    /// Returns the dashboard base URL, without a trailing slash.
    pub fn base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8000".to_string(),
            Environment::Custom { url } => url.trim_end_matches('/').to_string(),
        }
    }

    /// Picks the first configured source: command line, config file, then
    /// the `CLINIC_DASH_API_URL` environment variable.
    pub fn resolve(cli_url: Option<&str>, config_url: Option<&str>) -> Self {
        let env_url = std::env::var(API_URL_ENV_VAR).ok();
        [cli_url, config_url, env_url.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|candidate| candidate.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Environment::Custom { url: s.to_string() });
        }
        Err(())
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.base_url())
    }
}

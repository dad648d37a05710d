//! Console messages printed around a dashboard session

use crate::environment::Environment;

const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
const COLOR_WARN: &str = "\x1b[1;33m"; // Bold Yellow
const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
const COLOR_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMessage {
    Info(String),
    /// Non-fatal setup problems, e.g. no stored session cookie
    Warn(String),
    Success(String),
}

impl SessionMessage {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn warn(msg: impl Into<String>) -> Self {
        Self::Warn(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    fn tag(&self) -> (&'static str, &'static str, &str) {
        match self {
            Self::Info(msg) => (COLOR_INFO, "INFO", msg),
            Self::Warn(msg) => (COLOR_WARN, "WARN", msg),
            Self::Success(msg) => (COLOR_SUCCESS, "SUCCESS", msg),
        }
    }

    pub fn print(&self) {
        let (color, label, msg) = self.tag();
        println!("{}[{}]{} {}", color, label, COLOR_RESET, msg);
    }
}

pub fn print_session_starting(mode: &str, environment: &Environment) {
    SessionMessage::info(format!(
        "Starting {} mode against {}",
        mode,
        environment.base_url()
    ))
    .print();
}

/// Reminds the user that the analytics endpoint requires a dashboard login.
pub fn print_missing_session_hint() {
    SessionMessage::warn(
        "No session cookie configured; run `clinic-dash login --session-id <ID>` if charts fail to load",
    )
    .print();
}

pub fn print_session_shutdown() {
    SessionMessage::info("Shutting down...").print();
}

pub fn print_session_exit_success() {
    SessionMessage::success("Dashboard session closed").print();
}

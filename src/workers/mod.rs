//! Background workers

pub mod core;
pub mod refresher;

pub use refresher::{AnalyticsRefresher, RefreshReason};

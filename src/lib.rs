//! pubip-notify: Public IP change notifier
//!
//! A library for detecting changes of the host's public IP address between
//! runs and notifying external services when it changes.

pub mod config;
pub mod lookup;
pub mod monitor;
pub mod notify;
pub mod state;
pub mod time;
pub mod transport;

//! HTTP transport shared by the address lookup and the notifier.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The [`HttpClient`] abstraction used for dependency injection
//! - The production client ([`ReqwestClient`])

mod client;
mod error;
mod request;

#[cfg(test)]
mod client_tests;

#[cfg(test)]
pub mod mock;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};

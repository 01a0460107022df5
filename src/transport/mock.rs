//! Scripted HTTP client for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// A mock [`HttpClient`] that replays scripted results per URL.
///
/// Requests to a URL without remaining scripted results get an empty
/// `200 OK`. Every request is captured for later inspection.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    scripts: Mutex<HashMap<String, VecDeque<Result<HttpResponse, HttpError>>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedClient {
    /// Creates a client that answers every request with `200 OK`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a result for the next request to `url`.
    ///
    /// # Panics
    ///
    /// Panics if `url` is not a valid URL or the lock is poisoned.
    #[must_use]
    pub fn respond(self, url: &str, result: Result<HttpResponse, HttpError>) -> Self {
        let key = url::Url::parse(url).unwrap().to_string();
        self.scripts
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push_back(result);
        self
    }

    /// Queues a plain-text `200 OK` body for the next request to `url`.
    #[must_use]
    pub fn respond_text(self, url: &str, body: &str) -> Self {
        self.respond(url, Ok(HttpResponse::ok_text(body)))
    }

    /// Queues a bodiless response with the given status for `url`.
    #[must_use]
    pub fn respond_status(self, url: &str, status: http::StatusCode) -> Self {
        self.respond(
            url,
            Ok(HttpResponse::new(status, http::HeaderMap::new(), vec![])),
        )
    }

    /// Returns all captured requests in send order.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the number of requests sent to `url`.
    #[must_use]
    pub fn calls_to(&self, url: &str) -> usize {
        let key = url::Url::parse(url).unwrap().to_string();
        self.requests()
            .iter()
            .filter(|r| r.url.as_str() == key)
            .count()
    }
}

impl HttpClient for ScriptedClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(req.url.as_str())
            .and_then(VecDeque::pop_front);
        self.requests.lock().unwrap().push(req);
        next.unwrap_or_else(|| Ok(HttpResponse::ok_text("")))
    }
}

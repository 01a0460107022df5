//! HTTP webhook notifier with per-target retry.

use handlebars::Handlebars;
use http::header::{CONTENT_TYPE, HeaderValue};
use url::Url;

use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, HttpError, HttpRequest};

use super::{DispatchReport, Notification, NotificationError, Notifier, RetryPolicy};

/// Delivers notifications by POSTing them to each target URL.
///
/// Without a template the body is the JSON serialization of the
/// [`Notification`]. A Handlebars body template may replace it; the
/// notification fields are available as template variables. Double-stash
/// values (`{{body}}`) are escaped for use inside a JSON string literal;
/// triple-stash (`{{{body}}}`) inserts them raw.
///
/// Targets are attempted sequentially in the order given. Each target gets
/// its own retry budget, so a dead target cannot starve the others.
///
/// # Example
///
/// ```
/// use pubip_notify::notify::{RetryPolicy, WebhookNotifier};
/// use pubip_notify::transport::ReqwestClient;
///
/// let notifier = WebhookNotifier::new(ReqwestClient::new())
///     .with_retry_policy(RetryPolicy::new().with_max_attempts(2));
/// assert_eq!(notifier.retry_policy().max_attempts, 2);
/// ```
#[derive(Debug)]
pub struct WebhookNotifier<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    method: http::Method,
    headers: http::HeaderMap,
    body_template: Option<String>,
    retry_policy: RetryPolicy,
}

impl<H> WebhookNotifier<H, TokioSleeper> {
    /// Creates a notifier that POSTs JSON with the default retry policy.
    #[must_use]
    pub fn new(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            method: http::Method::POST,
            headers: http::HeaderMap::new(),
            body_template: None,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> WebhookNotifier<H, S> {
    /// Replaces the sleeper used between retries.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> WebhookNotifier<H, S2> {
        WebhookNotifier {
            client: self.client,
            sleeper,
            method: self.method,
            headers: self.headers,
            body_template: self.body_template,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: http::Method) -> Self {
        self.method = method;
        self
    }

    /// Sets extra headers sent with every request.
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a Handlebars body template.
    #[must_use]
    pub fn with_body_template(mut self, template: impl Into<String>) -> Self {
        self.body_template = Some(template.into());
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the configured HTTP method.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl<H: HttpClient, S: Sleeper> WebhookNotifier<H, S> {
    fn render_body(&self, notification: &Notification) -> Result<Vec<u8>, NotificationError> {
        match &self.body_template {
            Some(template) => template_engine()
                .render_template(template, notification)
                .map(String::into_bytes)
                .map_err(|e| NotificationError::Template(e.to_string())),
            None => serde_json::to_vec(notification).map_err(NotificationError::Encode),
        }
    }

    fn build_request(&self, target: &Url, body: Vec<u8>) -> HttpRequest {
        let mut request = HttpRequest::new(self.method.clone(), target.clone()).with_body(body);

        for (name, value) in &self.headers {
            request.headers.append(name, value.clone());
        }

        if self.body_template.is_none() && !request.headers.contains_key(CONTENT_TYPE) {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        request
    }

    async fn execute_request(&self, request: &HttpRequest) -> Result<(), NotificationError> {
        let response = self.client.request(request.clone()).await?;

        if response.is_success() {
            return Ok(());
        }

        Err(NotificationError::NonSuccessStatus {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }

    async fn deliver(&self, target: &Url, notification: &Notification) -> Result<(), NotificationError> {
        let body = self.render_body(notification)?;
        let request = self.build_request(target, body);

        let mut attempt = 1;
        loop {
            match self.execute_request(&request).await {
                Ok(()) => return Ok(()),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if !self.retry_policy.should_retry(attempt) => {
                    return Err(NotificationError::MaxRetriesExceeded {
                        attempts: attempt,
                        last_error: Box::new(e),
                    });
                }
                Err(e) => {
                    let delay = self.retry_policy.delay_for_retry(attempt - 1);
                    tracing::debug!(
                        "Attempt {attempt} to {target} failed ({e}), retrying in {}s",
                        delay.as_secs_f64()
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl<H: HttpClient, S: Sleeper> Notifier for WebhookNotifier<H, S> {
    async fn send(&self, targets: &[Url], notification: &Notification) -> DispatchReport {
        let mut report = DispatchReport::new();

        for target in targets {
            let result = self.deliver(target, notification).await;
            match &result {
                Ok(()) => tracing::debug!("Notification delivered to {target}"),
                Err(e) => tracing::warn!("Notification to {target} failed: {e}"),
            }
            report.record(target.clone(), result);
        }

        report
    }
}

fn template_engine() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(json_string_escape);
    hbs
}

/// Escapes `value` as the contents of a JSON string, without the quotes.
fn json_string_escape(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_owned()).to_string();
    quoted
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(&quoted)
        .to_string()
}

/// Extension trait for checking if an error is worth another attempt.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            Self::InvalidUrl(_) => false,
        }
    }
}

impl IsRetryable for NotificationError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_retryable(),
            Self::NonSuccessStatus { status, .. } => {
                status.is_server_error()
                    || *status == http::StatusCode::TOO_MANY_REQUESTS
                    || *status == http::StatusCode::REQUEST_TIMEOUT
            }
            Self::Template(_) | Self::Encode(_) | Self::MaxRetriesExceeded { .. } => false,
        }
    }
}

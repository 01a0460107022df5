//! HTTP based public address lookup with endpoint failover.

use url::Url;

use crate::transport::{HttpClient, HttpRequest, HttpResponse};

use super::{AddressLookup, FetchError, PublicAddress};

/// Maximum number of body characters kept in [`FetchError::InvalidBody`].
const MAX_BODY_PREVIEW: usize = 64;

/// JSON keys that lookup services commonly use for the caller's address.
const JSON_ADDRESS_KEYS: &[&str] = &["ip", "address", "origin", "query"];

/// Queries "what is my IP" endpoints in order until one answers.
///
/// Each endpoint is expected to return the caller's address either as plain
/// text (`203.0.113.7`) or as a small JSON object (`{"ip": "203.0.113.7"}`).
/// The first valid answer wins; failed endpoints are logged and skipped.
///
/// # Example
///
/// ```
/// use pubip_notify::lookup::HttpLookup;
/// use pubip_notify::transport::ReqwestClient;
/// use url::Url;
///
/// let lookup = HttpLookup::new(
///     ReqwestClient::new(),
///     vec![Url::parse("https://api.ipify.org").unwrap()],
/// );
/// assert_eq!(lookup.endpoints().len(), 1);
/// ```
#[derive(Debug)]
pub struct HttpLookup<H> {
    client: H,
    endpoints: Vec<Url>,
}

impl<H> HttpLookup<H> {
    /// Creates a lookup that tries `endpoints` in the given order.
    #[must_use]
    pub const fn new(client: H, endpoints: Vec<Url>) -> Self {
        Self { client, endpoints }
    }

    /// Returns the configured endpoints in query order.
    #[must_use]
    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }
}

impl<H: HttpClient> HttpLookup<H> {
    async fn query(&self, endpoint: &Url) -> Result<PublicAddress, FetchError> {
        let response = self
            .client
            .request(HttpRequest::get(endpoint.clone()))
            .await
            .map_err(|source| FetchError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.clone(),
                status: response.status,
            });
        }

        parse_body(&response).ok_or_else(|| FetchError::InvalidBody {
            endpoint: endpoint.clone(),
            body: preview(&response),
        })
    }
}

impl<H: HttpClient> AddressLookup for HttpLookup<H> {
    async fn lookup(&self) -> Result<PublicAddress, FetchError> {
        let mut last_error = None;

        for endpoint in &self.endpoints {
            match self.query(endpoint).await {
                Ok(address) => {
                    tracing::debug!("{endpoint} reported {address}");
                    return Ok(address);
                }
                Err(e) => {
                    tracing::warn!("Address lookup failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => Err(FetchError::Exhausted {
                attempts: self.endpoints.len(),
                last: Box::new(last),
            }),
            None => Err(FetchError::NoEndpoints),
        }
    }
}

/// Extracts an address from a plain-text or JSON response body.
fn parse_body(response: &HttpResponse) -> Option<PublicAddress> {
    let text = response.body_text()?.trim();

    if text.starts_with('{') {
        let value: serde_json::Value = serde_json::from_str(text).ok()?;
        return JSON_ADDRESS_KEYS
            .iter()
            .filter_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
            .find_map(|s| s.parse().ok());
    }

    text.parse().ok()
}

fn preview(response: &HttpResponse) -> String {
    String::from_utf8_lossy(&response.body)
        .chars()
        .take(MAX_BODY_PREVIEW)
        .collect()
}

//! Validated configuration after merging CLI and file sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use handlebars::Handlebars;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use url::Url;

use crate::notify::RetryPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::file::FileConfig;

/// Which of the two mutually exclusive run modes to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Single check: compare, persist and notify on change.
    Check,
    /// Sample the address over a window, then force a test notification.
    SelfTest,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::SelfTest => write!(f, "self-test"),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and an optional
/// config file. The function validates all inputs and returns errors for
/// invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Run mode selected by `--verbose`
    pub mode: RunMode,

    /// Notification targets (non-empty)
    pub targets: Vec<Url>,

    /// Lookup endpoints in failover order (non-empty)
    pub lookup_endpoints: Vec<Url>,

    /// Per-request lookup timeout
    pub lookup_timeout: Duration,

    /// File holding the last observed address
    pub state_file: PathBuf,

    /// Heartbeat statistics file. If `None`, heartbeats are disabled.
    pub heartbeat_file: Option<PathBuf>,

    /// Time between heartbeat notifications
    pub heartbeat_interval: Duration,

    /// HTTP method for notification requests
    pub method: Method,

    /// HTTP headers for notification requests
    pub headers: HeaderMap,

    /// Handlebars body template (optional)
    pub body_template: Option<String>,

    /// Retry policy for failed deliveries
    pub retry_policy: RetryPolicy,

    /// Self-test sampling window
    pub self_test_window: Duration,

    /// Gap between self-test samples
    pub self_test_interval: Duration,

    /// Debug logging enabled
    pub debug: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heartbeat_str = self
            .heartbeat_file
            .as_ref()
            .map_or_else(|| "disabled".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ mode: {}, targets: {}, lookup: {} endpoint(s)/{}s, method: {}, \
             retry: {}x/{}s, state_file: {}, heartbeat: {} }}",
            self.mode,
            self.targets.len(),
            self.lookup_endpoints.len(),
            self.lookup_timeout.as_secs(),
            self.method,
            self.retry_policy.max_attempts,
            self.retry_policy.initial_delay.as_secs(),
            self.state_file.display(),
            heartbeat_str,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and an optional config file.
    ///
    /// CLI arguments take precedence over file values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No notification target is configured
    /// - A target or lookup URL is invalid
    /// - A target is not an `http` or `https` URL
    /// - A duration is zero
    /// - The retry policy, header or body template is invalid
    pub fn from_raw(cli: &Cli, file: Option<&FileConfig>) -> Result<Self, ConfigError> {
        let targets = Self::resolve_targets(cli, file)?;
        let lookup_endpoints = Self::resolve_lookup_endpoints(cli, file)?;

        let lookup_timeout = positive_secs(
            "lookup.timeout",
            file.and_then(|f| f.lookup.timeout)
                .unwrap_or(defaults::LOOKUP_TIMEOUT_SECS),
        )?;

        let state_file = cli
            .state_file
            .clone()
            .or_else(|| file.and_then(|f| f.state.address_file.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::ADDRESS_FILE));

        let heartbeat_file = Self::resolve_heartbeat_file(cli, file);
        let heartbeat_interval = Self::resolve_heartbeat_interval(file)?;

        let method = Self::resolve_method(file)?;
        let headers = Self::resolve_headers(file)?;
        let body_template = Self::resolve_body_template(file)?;
        let retry_policy = Self::build_retry_policy(file)?;

        let self_test = file.map(|f| &f.self_test);
        let self_test_window = positive_secs(
            "self_test.window",
            self_test
                .and_then(|s| s.window)
                .unwrap_or(defaults::SELF_TEST_WINDOW_SECS),
        )?;
        let self_test_interval = positive_secs(
            "self_test.interval",
            self_test
                .and_then(|s| s.interval)
                .unwrap_or(defaults::SELF_TEST_INTERVAL_SECS),
        )?;

        let mode = if cli.verbose {
            RunMode::SelfTest
        } else {
            RunMode::Check
        };

        Ok(Self {
            mode,
            targets,
            lookup_endpoints,
            lookup_timeout,
            state_file,
            heartbeat_file,
            heartbeat_interval,
            method,
            headers,
            body_template,
            retry_policy,
            self_test_window,
            self_test_interval,
            debug: cli.debug,
        })
    }

    /// Loads and merges configuration from CLI and the config file.
    ///
    /// Uses `cli.config` if set, otherwise `pubip-notify.toml` in the working
    /// directory when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_with_fallback(cli, Path::new(defaults::CONFIG_FILE))
    }

    /// Like [`ValidatedConfig::load`], with an explicit fallback config path.
    ///
    /// # Errors
    ///
    /// See [`ValidatedConfig::load`].
    pub fn load_with_fallback(cli: &Cli, fallback: &Path) -> Result<Self, ConfigError> {
        let path = match cli.config {
            Some(ref path) => Some(path.as_path()),
            None if fallback.is_file() => Some(fallback),
            None => None,
        };

        let file = match path {
            Some(path) => {
                tracing::debug!("Loading config file '{}'", path.display());
                Some(FileConfig::load(path)?)
            }
            None => None,
        };

        Self::from_raw(cli, file.as_ref())
    }

    /// Returns true if debug-level logging should be enabled.
    ///
    /// The self-test is a diagnostic mode, so it always logs at debug level.
    #[must_use]
    pub fn debug_logging(&self) -> bool {
        self.debug || self.mode == RunMode::SelfTest
    }

    fn resolve_targets(cli: &Cli, file: Option<&FileConfig>) -> Result<Vec<Url>, ConfigError> {
        // CLI targets replace file targets entirely
        let raw: &[String] = if cli.targets.is_empty() {
            file.map(|f| f.notification_targets.as_slice())
                .unwrap_or_default()
        } else {
            &cli.targets
        };

        if raw.is_empty() {
            return Err(ConfigError::missing(
                field::NOTIFICATION_TARGETS,
                "Use --target or set notification_targets in config file",
            ));
        }

        raw.iter().map(|s| parse_target(s)).collect()
    }

    fn resolve_lookup_endpoints(
        cli: &Cli,
        file: Option<&FileConfig>,
    ) -> Result<Vec<Url>, ConfigError> {
        if !cli.lookup_urls.is_empty() {
            return cli.lookup_urls.iter().map(|s| parse_url(s)).collect();
        }

        match file.map(|f| f.lookup.endpoints.as_slice()) {
            Some([]) | None => defaults::LOOKUP_ENDPOINTS
                .iter()
                .map(|s| parse_url(s))
                .collect(),
            Some(endpoints) => endpoints.iter().map(|s| parse_url(s)).collect(),
        }
    }

    fn resolve_heartbeat_file(cli: &Cli, file: Option<&FileConfig>) -> Option<PathBuf> {
        if cli.no_heartbeat {
            return None;
        }

        Some(
            cli.heartbeat_file
                .clone()
                .or_else(|| file.and_then(|f| f.state.heartbeat_file.clone()))
                .unwrap_or_else(|| PathBuf::from(defaults::HEARTBEAT_FILE)),
        )
    }

    fn resolve_heartbeat_interval(file: Option<&FileConfig>) -> Result<Duration, ConfigError> {
        let days = file
            .and_then(|f| f.state.heartbeat_days)
            .unwrap_or(defaults::HEARTBEAT_DAYS);

        if days == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "state.heartbeat_days",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(defaults::days(days))
    }

    fn resolve_method(file: Option<&FileConfig>) -> Result<Method, ConfigError> {
        let method_str = file
            .and_then(|f| f.notify.method.as_deref())
            .unwrap_or(defaults::METHOD);

        method_str
            .parse::<Method>()
            .map_err(|_| ConfigError::InvalidMethod(method_str.to_string()))
    }

    fn resolve_headers(file: Option<&FileConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        if let Some(file) = file {
            for (name, value) in &file.notify.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        Ok(headers)
    }

    fn resolve_body_template(file: Option<&FileConfig>) -> Result<Option<String>, ConfigError> {
        let template = file.and_then(|f| f.notify.body_template.clone());

        if let Some(ref tmpl) = template {
            Self::validate_template(tmpl)?;
        }

        Ok(template)
    }

    fn validate_template(template: &str) -> Result<(), ConfigError> {
        let hbs = Handlebars::new();
        // Render with an empty context to check syntax only
        hbs.render_template(template, &serde_json::json!({}))
            .map_err(|e| ConfigError::InvalidTemplate {
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn build_retry_policy(file: Option<&FileConfig>) -> Result<RetryPolicy, ConfigError> {
        let retry = file.map(|f| &f.retry);

        let max_attempts = retry
            .and_then(|r| r.max_attempts)
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_delay_secs = retry
            .and_then(|r| r.initial_delay)
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_SECS);

        let max_delay_secs = retry
            .and_then(|r| r.max_delay)
            .unwrap_or(defaults::RETRY_MAX_DELAY_SECS);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if initial_delay_secs == 0 {
            return Err(ConfigError::InvalidRetry(
                "initial_delay must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if max_delay_secs < initial_delay_secs {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay ({max_delay_secs}s) must be >= initial_delay ({initial_delay_secs}s)"
            )));
        }

        Ok(RetryPolicy::new()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_secs(initial_delay_secs))
            .with_max_delay(Duration::from_secs(max_delay_secs))
            .with_multiplier(multiplier))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::file::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_url(s: &str) -> Result<Url, ConfigError> {
    Url::parse(s).map_err(|e| ConfigError::InvalidUrl {
        url: s.to_string(),
        reason: e.to_string(),
    })
}

/// Targets receive a plain HTTP request, so only web URLs are deliverable.
fn parse_target(s: &str) -> Result<Url, ConfigError> {
    let url = parse_url(s)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::UnsupportedTargetScheme {
            url: s.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

fn positive_secs(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(Duration::from_secs(seconds))
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

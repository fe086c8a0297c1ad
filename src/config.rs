//! Server configuration and HTTP transport settings.

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use reqwest::header::{HeaderValue, InvalidHeaderValue};
use thiserror::Error;
use url::Url;

/// Environment variable holding the server URL for [`Configuration::from_env`].
pub const SERVER_URL_VAR: &str = "SYSTEMLINK_SERVER_URL";

/// Environment variable holding the API key for [`Configuration::from_env`].
pub const API_KEY_VAR: &str = "SYSTEMLINK_API_KEY";

/// Request timeout applied when [`HttpClientConfig::timeout`] is not set.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("testmonitor-rs/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building a [`Configuration`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The server URL could not be parsed.
    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The server URL uses a scheme other than `http` or `https`.
    #[error("unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    /// The server URL has no host.
    #[error("server URL has no host")]
    MissingHost,

    /// The API key is empty.
    #[error("API key cannot be empty")]
    EmptyApiKey,

    /// The API key contains bytes that are not allowed in an HTTP header.
    #[error("API key is not a valid header value: {0}")]
    InvalidApiKey(#[from] InvalidHeaderValue),

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingVariable(&'static str),
}

/// Server address and API key used to authenticate every request.
///
/// The configuration is validated once at construction and is read-only
/// afterwards. Deletion calls borrow it for the duration of the call.
///
/// # Example
///
/// ```
/// use testmonitor::Configuration;
///
/// let config = Configuration::new("https://myserver:9091", "my-api-key").unwrap();
/// assert_eq!(config.server_address().host_str(), Some("myserver"));
///
/// assert!(Configuration::new("not a url", "my-api-key").is_err());
/// assert!(Configuration::new("https://myserver", "").is_err());
/// ```
#[derive(Clone)]
pub struct Configuration {
    server_address: Url,
    api_key: String,
    api_key_header: HeaderValue,
}

impl Configuration {
    /// Creates a configuration from a server URL string and an API key.
    ///
    /// The URL must include the scheme and host, and the port if it is not the
    /// default one (e.g. `https://myserver:9091`).
    pub fn new(server_address: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::from_url(Url::parse(server_address)?, api_key)
    }

    /// Creates a configuration from an already parsed server URL.
    pub fn from_url(server_address: Url, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        match server_address.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
        if server_address.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingHost);
        }

        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        let mut api_key_header = HeaderValue::from_str(&api_key)?;
        api_key_header.set_sensitive(true);

        Ok(Self {
            server_address,
            api_key,
            api_key_header,
        })
    }

    /// Reads the configuration from [`SERVER_URL_VAR`] and [`API_KEY_VAR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_address =
            std::env::var(SERVER_URL_VAR).map_err(|_| ConfigError::MissingVariable(SERVER_URL_VAR))?;
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| ConfigError::MissingVariable(API_KEY_VAR))?;
        Self::new(&server_address, api_key)
    }

    /// Returns the server base address.
    pub fn server_address(&self) -> &Url {
        &self.server_address
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The API key as a header value marked sensitive.
    pub(crate) fn api_key_header(&self) -> &HeaderValue {
        &self.api_key_header
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("server_address", &self.server_address.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Settings for the underlying HTTP transport.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use testmonitor::HttpClientConfig;
///
/// let config = HttpClientConfig::new()
///     .local_address("192.168.1.100".parse().unwrap())
///     .timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout, Some(Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Local IP address outgoing connections are bound to.
    pub local_address: Option<IpAddr>,
    /// Network interface outgoing connections are bound to.
    ///
    /// Only honored on Linux-like and Apple platforms.
    pub interface: Option<String>,
    /// Total timeout for each request. Defaults to 30 seconds.
    pub timeout: Option<Duration>,
}

impl HttpClientConfig {
    /// Creates a configuration with all settings left at their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds outgoing connections to a local IP address.
    pub fn local_address(mut self, addr: IpAddr) -> Self {
        self.local_address = Some(addr);
        self
    }

    /// Binds outgoing connections to a network interface (e.g. `"eth0"`).
    pub fn interface(mut self, iface: impl Into<String>) -> Self {
        self.interface = Some(iface.into());
        self
    }

    /// Sets the total timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds a [`reqwest::Client`] with these settings.
    ///
    /// The client never follows redirects: a 3xx answer is returned as is.
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));

        if let Some(addr) = self.local_address {
            builder = builder.local_address(addr);
        }

        #[cfg(any(
            target_os = "android",
            target_os = "fuchsia",
            target_os = "linux",
            target_os = "macos",
            target_os = "ios",
            target_os = "tvos",
            target_os = "watchos",
            target_os = "illumos",
            target_os = "solaris",
        ))]
        if let Some(ref iface) = self.interface {
            builder = builder.interface(iface);
        }

        builder.build()
    }
}

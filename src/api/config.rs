use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::api::error::EntitlementError;

/// Environment variable holding the entitlements service base URL
pub const ENV_BASE_URL: &str = "BTP_ENTITLEMENTS_URL";
/// Environment variable holding the pre-resolved access token
pub const ENV_ACCESS_TOKEN: &str = "BTP_ACCESS_TOKEN";
/// Environment variable overriding the token type
pub const ENV_TOKEN_TYPE: &str = "BTP_TOKEN_TYPE";

const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Connection settings for the entitlements service
///
/// The token is used as is; obtaining and refreshing it is up to the caller.
#[derive(Clone, PartialEq)]
pub struct EntitlementsConfig {
    /// Service base URL, e.g. `https://entitlements-service.cfapps.eu10.hana.ondemand.com`
    pub base_url: Url,
    /// Access token
    pub token: String,
    /// Authorization scheme, `Bearer` unless overridden
    pub token_type: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Per request timeout, none by default
    pub timeout: Option<Duration>,
}

impl fmt::Debug for EntitlementsConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EntitlementsConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EntitlementsConfig {
    /// Creates a configuration with default token type, user agent and no timeout
    pub fn new<S: Into<String>>(base_url: Url, token: S) -> Self {
        EntitlementsConfig {
            base_url,
            token: token.into(),
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout: None,
        }
    }

    /// Parses the base URL before building the configuration
    pub fn parse<S: Into<String>>(base_url: &str, token: S) -> Result<Self, EntitlementError> {
        match Url::parse(base_url) {
            Ok(url) => Ok(EntitlementsConfig::new(url, token)),
            Err(e) => Err(EntitlementError::InvalidConfig(format!(
                "invalid base url {}: {}",
                base_url, e
            ))),
        }
    }

    /// Reads the configuration from the `BTP_*` environment variables
    pub fn from_env() -> Result<Self, EntitlementError> {
        let base_url = env::var(ENV_BASE_URL)
            .map_err(|_| EntitlementError::InvalidConfig(format!("{} is not set", ENV_BASE_URL)))?;
        let token = env::var(ENV_ACCESS_TOKEN).map_err(|_| {
            EntitlementError::InvalidConfig(format!("{} is not set", ENV_ACCESS_TOKEN))
        })?;
        let config = EntitlementsConfig::parse(&base_url, token)?;
        Ok(match env::var(ENV_TOKEN_TYPE) {
            Ok(token_type) if !token_type.trim().is_empty() => {
                config.with_token_type(token_type.trim())
            }
            _ => config,
        })
    }

    /// Overrides the authorization scheme
    pub fn with_token_type<S: Into<String>>(mut self, token_type: S) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Overrides the user agent
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets a per request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Joins a relative `path` below the base URL, keeping any path prefix
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, EntitlementError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let prefix = format!("{}/", base.path());
            base.set_path(&prefix);
        }
        base.join(path.trim_start_matches('/')).map_err(|e| {
            EntitlementError::InvalidConfig(format!("cannot build url for {}: {}", path, e))
        })
    }
}

use async_trait::async_trait;
use log::error;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use url::Url;

use config::EntitlementsConfig;
use error::EntitlementError;
use types::catalog::EntitledAndAssignedServices;
use types::service_plans::SetServicePlansRequest;

/// Module holding the API types
pub mod types;

/// Error type
pub mod error;

/// Connection settings
pub mod config;

/// Remote calls against the entitlements service
pub mod assignments;

/// Catalog and assignment lookups
pub mod matcher;

/// Numeric versus boolean quota
pub mod quota;

/// Observe, create, update and delete
pub mod convergence;

/// Remote side of the engine
///
/// Both calls are single request/response round trips. Implementations must
/// not retry; that decision stays with the caller.
#[async_trait]
pub trait EntitlementsTransport: Send + Sync {
    /// Fetches entitled and assigned catalogs for an entity, filtered by service
    async fn get_assignments(
        &self,
        entity_id: &str,
        service_name: &str,
    ) -> Result<EntitledAndAssignedServices, EntitlementError>;

    /// Sets quota for the plans in `request`
    async fn set_service_plans(
        &self,
        request: &SetServicePlansRequest,
    ) -> Result<(), EntitlementError>;
}

/// HTTP client for the entitlements service
#[derive(Debug, Clone)]
pub struct EntitlementsAPI {
    client: Client,
    config: EntitlementsConfig,
}

impl EntitlementsAPI {
    /// Builds the HTTP client from `config`
    pub fn new(config: EntitlementsConfig) -> Result<Self, EntitlementError> {
        let client = match EntitlementsAPI::build_client(&config)?.build() {
            Ok(client) => client,
            Err(e) => {
                error!("{:?}", e);
                return Err(EntitlementError::InvalidConfig(e.to_string()));
            }
        };
        Ok(EntitlementsAPI { client, config })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &EntitlementsConfig {
        &self.config
    }

    fn build_client(config: &EntitlementsConfig) -> Result<ClientBuilder, EntitlementError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| EntitlementError::InvalidConfig(e.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }

    fn authorized_get_client(&self, url: Url) -> RequestBuilder {
        self.set_authorization_header(self.client.get(url))
    }

    fn authorized_put_client(&self, url: Url) -> RequestBuilder {
        self.set_authorization_header(self.client.put(url))
    }

    fn set_authorization_header(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.header(
            "Authorization",
            format!("{} {}", self.config.token_type, self.config.token),
        )
    }
}

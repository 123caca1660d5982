#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

//! # BTP Entitlements
//!
//! Converges a desired service plan entitlement of a subaccount or directory
//! against the state reported by the SAP BTP entitlements service.
//!
//! ## Current functionality
//!  - Locate orderable plans in the entitled catalog
//!  - Locate the current assignment of a plan to an entity
//!  - Classify numeric and boolean quota
//!  - Assign, update and revoke quota through one idempotent mutation
//!  - Turn remote error bodies into readable errors
//!
//! The engine does no scheduling, caching or retrying. It is driven by an
//! external control loop, once per reconcile pass.

use api::config::EntitlementsConfig;
use api::error::EntitlementError;
use api::{EntitlementsAPI, EntitlementsTransport};

/// Module for authenticated API communication
pub mod api;

pub use api::convergence::Deletion;
pub use api::types::entitlement::{
    DesiredEntitlement, Instance, Mutation, Observation, RequiredState,
};

/// Struct to converge entitlements through a transport
#[derive(Debug, Clone)]
pub struct Entitlements<T = EntitlementsAPI> {
    transport: T,
}

impl Entitlements<EntitlementsAPI> {
    /// Creates an engine talking HTTP to the entitlements service
    pub fn new(config: EntitlementsConfig) -> Result<Self, EntitlementError> {
        Ok(Entitlements {
            transport: EntitlementsAPI::new(config)?,
        })
    }
}

impl<T: EntitlementsTransport> Entitlements<T> {
    /// Creates an engine on top of any transport
    pub fn with_transport(transport: T) -> Self {
        Entitlements { transport }
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

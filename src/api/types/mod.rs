/// Entitled and assigned catalogs as reported by the remote service
pub mod catalog;

/// Request payloads for the set service plans mutation
pub mod service_plans;

/// Structured error body of the remote service
pub mod api_exception;

/// Desired state, required state and observed instance
pub mod entitlement;

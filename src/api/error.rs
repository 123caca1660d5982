use std::error::Error;
use std::fmt;

use crate::api::types::api_exception::ApiExceptionResponse;

/// Error enum for the entitlements engine
#[derive(Debug)]
pub enum EntitlementError {
    /// No entitled service carries the requested name
    ServiceNotFound(String),
    /// The service exists but has no plan with the requested name
    PlanNotFound(String),
    /// More than one assignment record targets the same entity
    MultipleAssignments,
    /// Untranslated failure of a remote call
    Remote(RemoteError),
    /// API error - see the contents
    APIError(String),
    /// Setting the service plan failed without a usable error body
    SetEntitlement {
        /// Service name of the failed mutation
        service: String,
        /// Plan name of the failed mutation
        plan: String,
        /// Underlying failure
        source: Box<EntitlementError>,
    },
    /// Reading assignments failed without a usable error body
    ReadAssignments {
        /// Service name the read was filtered by
        service: String,
        /// Underlying failure
        source: Box<EntitlementError>,
    },
    /// Configuration could not be used
    InvalidConfig(String),
}

impl EntitlementError {
    /// Errors that retrying cannot fix
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EntitlementError::ServiceNotFound(_)
                | EntitlementError::PlanNotFound(_)
                | EntitlementError::MultipleAssignments
                | EntitlementError::InvalidConfig(_)
        )
    }
}

impl fmt::Display for EntitlementError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntitlementError::ServiceNotFound(name) => {
                write!(f, "failed to find service with the given name {}", name)
            }
            EntitlementError::PlanNotFound(name) => {
                write!(f, "failed to find service plan with the given name {}", name)
            }
            EntitlementError::MultipleAssignments => {
                write!(f, "found multiple service plan assignments")
            }
            EntitlementError::Remote(e) => {
                write!(f, "{}", e)
            }
            EntitlementError::APIError(e) => {
                write!(f, "API Error: {}", e)
            }
            EntitlementError::SetEntitlement {
                service,
                plan,
                source,
            } => {
                write!(
                    f,
                    "failed to set entitlement for service {}/{}.: {}",
                    service, plan, source
                )
            }
            EntitlementError::ReadAssignments { service, source } => {
                write!(
                    f,
                    "failed to read assignments for service {}.: {}",
                    service, source
                )
            }
            EntitlementError::InvalidConfig(e) => {
                write!(f, "Invalid Configuration: {}", e)
            }
        }
    }
}

impl Error for EntitlementError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EntitlementError::Remote(e) => Some(e),
            EntitlementError::SetEntitlement { source, .. }
            | EntitlementError::ReadAssignments { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<RemoteError> for EntitlementError {
    fn from(e: RemoteError) -> Self {
        EntitlementError::Remote(e)
    }
}

/// Failure reported by the transport
///
/// Holds whatever the remote side gave back: the parsed error model, the raw
/// body, or neither when the request never got a response.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteError {
    /// HTTP status, absent for connection level failures
    pub status: Option<u16>,
    /// Parsed `{"error": {...}}` body
    pub model: Option<ApiExceptionResponse>,
    /// Raw response body
    pub body: Option<Vec<u8>>,
    /// Short description of what failed
    pub message: String,
}

impl RemoteError {
    /// Failure before any response was received
    pub fn transport<S: Into<String>>(message: S) -> Self {
        RemoteError {
            status: None,
            model: None,
            body: None,
            message: message.into(),
        }
    }

    /// Non-success response, keeping the body and its parsed form if any
    pub fn response(status: u16, body: Vec<u8>) -> Self {
        let model = serde_json::from_slice::<ApiExceptionResponse>(&body).ok();
        RemoteError {
            status: Some(status),
            model,
            body: if body.is_empty() { None } else { Some(body) },
            message: format!("unexpected status {}", status),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "Remote Error ({}): {}", status, self.message),
            None => write!(f, "Remote Error: {}", self.message),
        }
    }
}

impl Error for RemoteError {}

/// Turns a remote failure into a readable API error
///
/// Prefers the structured body, then the raw body, and hands `err` to
/// `fallback` otherwise. The error kind is left to the caller.
pub fn specify_api_error<F>(err: EntitlementError, fallback: F) -> EntitlementError
where
    F: FnOnce(EntitlementError) -> EntitlementError,
{
    if let EntitlementError::Remote(remote) = &err {
        if let Some(model) = &remote.model {
            return EntitlementError::APIError(format!(
                "{}, Code {}",
                model.error.message.as_deref().unwrap_or_default(),
                model.error.code.unwrap_or_default()
            ));
        }
        if let Some(body) = &remote.body {
            return EntitlementError::APIError(String::from_utf8_lossy(body).to_string());
        }
    }
    fallback(err)
}

//! Error taxonomy
//!
//! `GatewayError` describes what went wrong on the wire; `ActionError` is
//! what a user action can fail with, including the client-side checks that
//! happen before any request is made.

use thiserror::Error;

use crate::domain::{Capability, DraftField, FeatureKind};

pub type GatewayResult<T> = Result<T, GatewayError>;
pub type ActionResult<T> = Result<T, ActionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authorized: {0}")]
    Auth(String),

    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Map a non-2xx status to the matching variant
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => GatewayError::Auth(message.into()),
            _ => GatewayError::Server { status, message: message.into() },
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Sign in required")]
    AuthRequired,

    #[error("{} is required", .field.label())]
    Validation { field: DraftField },

    #[error("{kind:?} does not support {}", .capability.as_str())]
    Unsupported { kind: FeatureKind, capability: Capability },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ActionError {
    /// Short message shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ActionError::AuthRequired => "Please sign in to continue.".to_string(),
            ActionError::Validation { field } => format!("{} is required.", field.label()),
            ActionError::Unsupported { kind, capability } => {
                format!("{} cannot be used with {}.", capability.as_str(), kind.label())
            }
            ActionError::Gateway(GatewayError::Auth(_)) => {
                "Your session is no longer valid. Please sign in again.".to_string()
            }
            ActionError::Gateway(GatewayError::Network(_)) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ActionError::Gateway(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(matches!(GatewayError::from_status(401, "x"), GatewayError::Auth(_)));
        assert!(matches!(GatewayError::from_status(403, "x"), GatewayError::Auth(_)));
        assert_eq!(
            GatewayError::from_status(500, "boom"),
            GatewayError::Server { status: 500, message: "boom".into() }
        );
    }

    #[test]
    fn test_user_messages() {
        let err = ActionError::Validation { field: DraftField::Title };
        assert_eq!(err.user_message(), "Title is required.");
        assert_eq!(err.to_string(), "Title is required");
        let err: ActionError = GatewayError::Network("offline".into()).into();
        assert!(err.user_message().contains("connection"));
    }
}

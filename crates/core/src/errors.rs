use thiserror::Error;

use crate::view::ViewTransitionError;

/// Why a catalog fetch did not produce a product list.
///
/// Every variant ends the page in the failed state; the distinction exists for
/// logs and operator output only.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("catalog request failed: {0}")]
    Network(String),
    #[error("catalog endpoint returned HTTP {status}")]
    Status { status: u16 },
    #[error("catalog response did not match the expected shape: {0}")]
    Format(String),
    #[error("catalog load was cancelled before it completed")]
    Cancelled,
}

impl LoadError {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::Format(_) => "format",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    View(#[from] ViewTransitionError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Load(_) => "catalog_load",
            Self::View(_) => "view_transition",
            Self::InvalidInput(_) => "invalid_input",
            Self::Configuration(_) => "config_validation",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::ServiceUnavailable { .. } => "Products could not be loaded right now.",
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::InvalidInput(message) => {
                Self::BadRequest { message, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::View(error) => Self::BadRequest {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Load(error) => Self::ServiceUnavailable {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, InterfaceError, LoadError};

    #[test]
    fn invalid_input_maps_to_bad_request_interface_error() {
        let interface = ApplicationError::InvalidInput("unknown category `books`".to_owned())
            .into_interface("visit-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest {
                ref correlation_id,
                ..
            } if correlation_id == "visit-1"
        ));
        assert_eq!(
            interface.user_message(),
            "The request could not be processed. Check inputs and try again."
        );
    }

    #[test]
    fn load_failures_map_to_service_unavailable() {
        for error in [
            LoadError::Network("connection refused".to_owned()),
            LoadError::Status { status: 503 },
            LoadError::Format("expected a sequence".to_owned()),
        ] {
            let interface = ApplicationError::from(error).into_interface("visit-2");

            assert!(matches!(interface, InterfaceError::ServiceUnavailable { .. }));
            assert_eq!(interface.user_message(), "Products could not be loaded right now.");
            assert_eq!(interface.correlation_id(), "visit-2");
        }
    }

    #[test]
    fn configuration_error_maps_to_internal() {
        let interface = ApplicationError::Configuration("bad endpoint".to_owned())
            .into_interface("visit-3");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.user_message(), "An unexpected internal error occurred.");
    }

    #[test]
    fn error_classes_are_stable() {
        assert_eq!(LoadError::Status { status: 404 }.class(), "status");
        assert_eq!(LoadError::Cancelled.class(), "cancelled");
        assert_eq!(ApplicationError::from(LoadError::Cancelled).class(), "catalog_load");
        assert_eq!(ApplicationError::InvalidInput(String::new()).class(), "invalid_input");
    }
}

pub mod browse;
pub mod config;
pub mod doctor;
pub mod interactive;

use serde::Serialize;
use storefront_core::ApplicationError;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_LOAD_FAILED: u8 = 3;
pub const EXIT_INVALID_INPUT: u8 = 4;
pub const EXIT_INTERNAL: u8 = 5;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Failure envelope for an application error; the message pairs the
    /// user-safe text with the underlying detail.
    pub fn from_error(
        command: &str,
        error: ApplicationError,
        correlation_id: impl Into<String>,
    ) -> Self {
        let error_class = error.class();
        let exit_code = exit_code_for(&error);
        let detail = error.to_string();
        let interface = error.into_interface(correlation_id);
        let message = format!(
            "{} ({detail}; correlation_id={})",
            interface.user_message(),
            interface.correlation_id()
        );
        Self::failure(command, error_class, message, exit_code)
    }
}

pub fn exit_code_for(error: &ApplicationError) -> u8 {
    match error {
        ApplicationError::Configuration(_) => EXIT_CONFIG,
        ApplicationError::Load(_) => EXIT_LOAD_FAILED,
        ApplicationError::InvalidInput(_) => EXIT_INVALID_INPUT,
        ApplicationError::View(_) => EXIT_INTERNAL,
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

fn current_thread_runtime() -> Result<tokio::runtime::Runtime, ApplicationError> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        ApplicationError::Configuration(format!("failed to initialize async runtime: {error}"))
    })
}

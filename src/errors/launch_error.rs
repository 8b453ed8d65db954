use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchErrorKind {
    InvalidParams,
    InvalidConfiguration,
    NotFound,
    Service,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaunchError {
    pub kind: LaunchErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl LaunchError {
    pub fn new(
        kind: LaunchErrorKind,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(LaunchErrorKind::InvalidParams, "INVALID_PARAMS", message)
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(
            LaunchErrorKind::InvalidConfiguration,
            "INVALID_CONFIGURATION",
            message,
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(LaunchErrorKind::NotFound, "NOT_FOUND", message)
    }

    /// Failure raised by a service plugin. Carries the plugin name in `details`.
    pub fn service(service: &str, message: impl Into<String>) -> Self {
        Self::new(LaunchErrorKind::Service, "SERVICE_FAILED", message)
            .with_details(serde_json::json!({ "service": service }))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(LaunchErrorKind::Internal, "INTERNAL", message)
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for LaunchError {}

impl From<std::io::Error> for LaunchError {
    fn from(err: std::io::Error) -> Self {
        LaunchError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for LaunchError {
    fn from(err: serde_json::Error) -> Self {
        LaunchError::internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::{LaunchError, LaunchErrorKind};

    #[test]
    fn service_error_records_plugin_name() {
        let err = LaunchError::service("gradebook", "boom");
        assert_eq!(err.kind, LaunchErrorKind::Service);
        assert_eq!(err.code, "SERVICE_FAILED");
        assert_eq!(err.details.unwrap()["service"], "gradebook");
    }

    #[test]
    fn serializes_without_empty_hint() {
        let err = LaunchError::not_found("Resource link '7' not found");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "not_found");
        assert!(json.get("hint").is_none());
        assert_eq!(err.to_string(), "Resource link '7' not found");
    }
}

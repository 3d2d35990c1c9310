use serde::{Deserialize, Serialize};

/// Body of every non-2xx response.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: u16,
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

/// `{"success": true}` returned by deletes and link operations.
#[derive(Serialize, Deserialize, Debug)]
pub struct Acknowledgement {
    pub success: bool,
}

impl Acknowledgement {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

impl ErrorResponse {
    fn new(code: u16, error: &str, errors: Vec<ErrorDetail>) -> Self {
        Self {
            success: false,
            code,
            error: error.to_string(),
            errors,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn validation_failed(errors: Vec<ErrorDetail>) -> Self {
        Self::new(400, "Validation failed", errors)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::new(401, message, Vec::new())
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(404, message, Vec::new())
    }

    // The message is fixed; callers log the cause before building this.
    pub fn internal_error() -> Self {
        Self::new(500, "Internal server error", Vec::new())
    }
}

pub mod error_codes {
    pub const INVALID_BODY: &str = "INVALID_BODY";
    pub const INVALID_TYPE: &str = "invalid_type";
    pub const INVALID_ENUM: &str = "invalid_enum";
    pub const EMAIL_TAKEN: &str = "email_taken";
    pub const UNKNOWN_USER: &str = "unknown_user";
    pub const LABEL_PROJECT_MISMATCH: &str = "label_project_mismatch";
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

/// A single field-level error, e.g. `{field: "username", message: "..."}`.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failure discriminator used for HTTP status mapping, never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Authentication,
    NotFound,
    Internal,
}

/// Result of a flow. Success bodies serialize as `{message, data}`,
/// failures as `{message, errors}`; exactly one of the two is present.
#[derive(Debug, Clone)]
pub enum Outcome {
    Success {
        message: String,
        data: Value,
    },
    Failure {
        kind: FailureKind,
        message: String,
        errors: Vec<FieldError>,
    },
}

impl Outcome {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self::Success {
            message: message.into(),
            data,
        }
    }

    pub fn validation(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self::Failure {
            kind: FailureKind::Validation,
            message: message.into(),
            errors,
        }
    }

    pub fn authentication(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self::Failure {
            kind: FailureKind::Authentication,
            message: message.into(),
            errors,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Failure {
            kind: FailureKind::NotFound,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Sanitized failure for persistence errors; the raw error is only logged.
    pub fn internal() -> Self {
        Self::Failure {
            kind: FailureKind::Internal,
            message: "Internal Error".to_string(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Failure { message, .. } => message,
        }
    }

    #[must_use]
    pub fn status(&self, success: StatusCode) -> StatusCode {
        match self {
            Self::Success { .. } => success,
            Self::Failure { kind, .. } => match kind {
                FailureKind::Validation | FailureKind::Authentication => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                FailureKind::NotFound => StatusCode::NOT_FOUND,
                FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Map the outcome to an HTTP response, `success` being the status used
    /// when the flow succeeded (201 for registration, 200 elsewhere).
    pub fn into_response(self, success: StatusCode) -> Response {
        let status = self.status(success);

        match self {
            Self::Success { message, data } => {
                (status, Json(json!({ "message": message, "data": data }))).into_response()
            }
            Self::Failure {
                message, errors, ..
            } => (status, Json(json!({ "message": message, "errors": errors }))).into_response(),
        }
    }
}

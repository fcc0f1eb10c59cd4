//! Maps service failures onto the HTTP error body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::application_service::contact_service::DirectoryError;

pub const MALFORMED_ID_MESSAGE: &str = "malformed id";
pub const DUPLICATE_NAME_MESSAGE: &str = "Name must be unique";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
pub const UNKNOWN_ENDPOINT_MESSAGE: &str = "Unknown Endpoint";

/// Error body returned by every contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub status: u16,
    #[serde(rename = "timeStamped")]
    pub time_stamped: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: status.as_u16(),
            time_stamped: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<DirectoryError> for ApiError {
    fn from(error: DirectoryError) -> Self {
        match error {
            DirectoryError::Validation(errors) => {
                tracing::debug!(%errors, "rejected invalid contact");
                ApiError::new(StatusCode::BAD_REQUEST, errors.to_string())
            }
            DirectoryError::MalformedIdentifier(id) => {
                tracing::debug!(id = %id, "rejected malformed id");
                ApiError::new(StatusCode::BAD_REQUEST, MALFORMED_ID_MESSAGE)
            }
            DirectoryError::Conflict(name) => {
                tracing::debug!(name = %name, "rejected duplicate name");
                ApiError::new(StatusCode::BAD_REQUEST, DUPLICATE_NAME_MESSAGE)
            }
            DirectoryError::NotFound(id) => ApiError::new(
                StatusCode::NOT_FOUND,
                format!("Person with ID {id} not found"),
            ),
            DirectoryError::StoreUnavailable(cause) => {
                tracing::error!(%cause, "contact store unavailable");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Body of the catch-all 404.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownEndpoint {
    pub error: String,
}

impl Default for UnknownEndpoint {
    fn default() -> Self {
        Self {
            error: UNKNOWN_ENDPOINT_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for UnknownEndpoint {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::ContactInput;
    use crate::domain::validation::validate;

    #[test]
    fn test_status_codes() {
        let validation = validate(&ContactInput::new("Al", "04-01234567")).unwrap_err();
        let cases = [
            (DirectoryError::Validation(validation), 400),
            (DirectoryError::MalformedIdentifier("x".into()), 400),
            (DirectoryError::Conflict("Arto".into()), 400),
            (DirectoryError::NotFound("abc".into()), 404),
            (DirectoryError::StoreUnavailable("down".into()), 500),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status, status);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::from(DirectoryError::MalformedIdentifier("x".into())).error,
            "malformed id"
        );
        assert_eq!(
            ApiError::from(DirectoryError::Conflict("Arto".into())).error,
            "Name must be unique"
        );
        assert!(ApiError::from(DirectoryError::NotFound("abc-123".into()))
            .error
            .contains("abc-123"));

        let validation = validate(&ContactInput::new("Arto Hellas", "12")).unwrap_err();
        let message = ApiError::from(DirectoryError::Validation(validation)).error;
        assert!(message.contains("number"));
    }

    #[test]
    fn test_store_cause_is_not_echoed() {
        let error = ApiError::from(DirectoryError::StoreUnavailable(
            "connection refused (10.0.0.5:27017)".into(),
        ));
        assert_eq!(error.error, "Internal Server Error");
        assert!(!error.error.contains("10.0.0.5"));
    }

    #[test]
    fn test_wire_shape() {
        let error = ApiError::new(StatusCode::NOT_FOUND, "gone");
        let value = serde_json::to_value(&error).unwrap();

        assert_eq!(value["error"], "gone");
        assert_eq!(value["status"], 404);
        let stamp = value["timeStamped"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
        assert!(stamp.ends_with('Z'));
    }
}

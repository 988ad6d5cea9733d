use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::error::DomainError;

use super::dto::ErrorResponse;

pub const DISALLOWED_CHARACTERS_MESSAGE: &str = "Expression contains disallowed characters";
pub const CALCULATION_ERROR_MESSAGE: &str = "Calculation error";

/// Client-facing error: a status code and a fixed message.
///
/// Details of the underlying failure are logged, never returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    #[must_use]
    pub fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::DisallowedCharacters { .. } => {
                Self::bad_request(DISALLOWED_CHARACTERS_MESSAGE)
            }
            DomainError::Evaluation(_) => Self::bad_request(CALCULATION_ERROR_MESSAGE),
        }
    }
}

/// A body that is not `{"expression": "<string>"}` is reported like any
/// other expression that cannot be calculated.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected calculate request body");
        Self::bad_request(CALCULATION_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message.to_owned(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expr::EvalError;

    #[test]
    fn validation_failures_map_to_disallowed_message() {
        let api: ApiError = DomainError::disallowed(vec!['x']).into();
        assert_eq!(api, ApiError::bad_request(DISALLOWED_CHARACTERS_MESSAGE));
    }

    #[test]
    fn evaluation_failures_share_one_generic_message() {
        for cause in [EvalError::DivisionByZero, EvalError::Empty, EvalError::UnexpectedEnd] {
            let api: ApiError = DomainError::from(cause).into();
            assert_eq!(api, ApiError::bad_request(CALCULATION_ERROR_MESSAGE));
        }
    }
}

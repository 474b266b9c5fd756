use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use crate::{
    adapters::inbound::http::ErrorResponse,
    domain::{ErrorKind, SearchError},
};

pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code, message),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (code, message) = &self.body.error.text;
        write!(f, "{}: [{}] {}", self.status, code, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        let status = match err.kind() {
            ErrorKind::MissingParameter | ErrorKind::InvalidParameter => StatusCode::BAD_REQUEST,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_errors_are_bad_requests() {
        let err = ApiError::from(SearchError::invalid("Unable to find location"));
        assert_eq!(err.to_string(), "400 Bad Request: [1001] Unable to find location");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(SearchError::missing("name field is missing in query"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_are_server_errors() {
        let err = ApiError::from(SearchError::internal("Error querying database"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

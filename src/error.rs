use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::fmt::{self, Display};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_missing_token(&self) -> bool {
        self.code == MISSING_TOKEN
    }

    pub fn is_configuration(&self) -> bool {
        self.code == MISSING_TOKEN || self.code == REJECTED_TOKEN
    }

    pub fn is_transport(&self) -> bool {
        self.code == TRANSPORT || self.code == UPSTREAM
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

const TRANSPORT: i32 = 3;
const UPSTREAM: i32 = 4;
const UNEXPECTED: i32 = 5;
const MISSING_TOKEN: i32 = 6;
const REJECTED_TOKEN: i32 = 7;
const INVALID_INPUT: i32 = 101;

pub fn invalid_input_error() -> Error {
    Error {
        code: INVALID_INPUT,
        message: "invalid input".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::debug!("reqwest error: {}", err);

    Error {
        code: TRANSPORT,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: UPSTREAM,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: UNEXPECTED,
        message: "unexpected error".into(),
    }
}

pub fn missing_token_error() -> Error {
    Error {
        code: MISSING_TOKEN,
        message: "mapbox access token is not configured".into(),
    }
}

pub fn rejected_token_error() -> Error {
    Error {
        code: REJECTED_TOKEN,
        message: "mapbox rejected the access token".into(),
    }
}

#[test]
fn error_class_test() {
    assert!(missing_token_error().is_missing_token());
    assert!(!missing_token_error().is_transport());
    assert!(upstream_error().is_transport());
    assert!(!invalid_input_error().is_transport());

    assert!(missing_token_error().is_configuration());
    assert!(rejected_token_error().is_configuration());
    assert!(!rejected_token_error().is_missing_token());
    assert!(!invalid_input_error().is_configuration());
}

#[test]
fn error_status_test() {
    let response = unexpected_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = invalid_input_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

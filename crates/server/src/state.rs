use std::fmt::Display;

use axum::http::StatusCode;
use service::UserService;

use crate::errors::JsonApiError;

/// Shared router state; built once at startup and cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub users: UserService,
    pub expose_error_details: bool,
}

impl ServerState {
    pub fn new(users: UserService) -> Self {
        Self { users, expose_error_details: true }
    }

    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }

    /// 500 carrying `summary`, plus the underlying message when exposure is on.
    pub fn internal_error(&self, summary: &str, err: impl Display) -> JsonApiError {
        let details = self.expose_error_details.then(|| err.to_string());
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, summary, details)
    }
}

//! HTTP error mapping to RFC-9457 Problem Details
//!
//! Problems also carry `success: false` and an `error` message so clients can
//! treat every response body uniformly.

use crate::contract::MealError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Problem {
    /// Always false
    pub success: bool,

    /// Message suitable for showing to the user
    pub error: String,

    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// Where the client should send the user to authenticate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            success: false,
            error: title.clone(),
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title,
            status: status.as_u16(),
            login_url: None,
        }
    }

    /// Replace the user-facing message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.error = detail.into();
        self
    }

    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = Some(login_url.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: MealError, login_url: &str) -> Problem {
    match error {
        MealError::NotFound { resource, id } => Problem::new(
            StatusCode::NOT_FOUND,
            format!("{} Not Found", resource),
        )
        .with_detail(format!("{} with id '{}' was not found", resource, id)),

        MealError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        MealError::Validation { message } => {
            tracing::warn!(%message, "request rejected");
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        MealError::QuotaExceeded {
            category,
            limit,
            requested,
        } => Problem::new(StatusCode::UNPROCESSABLE_ENTITY, "Meal Limit Reached").with_detail(
            format!(
                "Your plan allows {} {} meals per week; this selection has {}",
                limit, category, requested
            ),
        ),

        MealError::Unauthorized => Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized")
            .with_detail("Please log in to continue")
            .with_login_url(login_url),

        MealError::Forbidden { reason } => {
            Problem::new(StatusCode::FORBIDDEN, "Forbidden").with_detail(reason)
        }

        MealError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .with_detail("An unexpected error occurred"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::MealCategory;

    #[test]
    fn test_unauthorized_carries_login_url() {
        let problem = map_domain_error(MealError::Unauthorized, "/login");
        assert_eq!(problem.status, 401);
        assert_eq!(problem.login_url.as_deref(), Some("/login"));
        assert!(!problem.success);
    }

    #[test]
    fn test_quota_problem_serializes_error_message() {
        let problem = map_domain_error(
            MealError::QuotaExceeded {
                category: MealCategory::Main,
                limit: 10,
                requested: 11,
            },
            "/login",
        );
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["status"], 422);
        assert_eq!(json["type"], "https://httpstatuses.io/422");
        assert!(json["error"].as_str().unwrap().contains("10 main meals"));
        assert!(json.get("login_url").is_none());
    }
}

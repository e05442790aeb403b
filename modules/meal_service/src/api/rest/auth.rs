//! Caller identity forwarded by the upstream auth layer

use crate::contract::{AuthContext, MealError};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use uuid::Uuid;

pub const CUSTOMER_ID_HEADER: &str = "x-customer-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const ADMIN_ROLE: &str = "admin";

/// Extracts the caller from request headers. Never rejects; endpoints decide
/// which identity they require.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub AuthContext);

impl Caller {
    /// Customer id of an authenticated caller
    pub fn customer_id(&self) -> Result<Uuid, MealError> {
        self.0.customer_id.ok_or(MealError::Unauthorized)
    }

    pub fn require_admin(&self) -> Result<(), MealError> {
        if self.0.is_admin {
            return Ok(());
        }
        if self.0.customer_id.is_none() {
            return Err(MealError::Unauthorized);
        }
        Err(MealError::Forbidden {
            reason: "Administrator access required".to_string(),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let customer_id = parts
            .headers
            .get(CUSTOMER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| match Uuid::parse_str(raw.trim()) {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::warn!(header = CUSTOMER_ID_HEADER, "ignoring malformed customer id");
                    None
                }
            });

        let is_admin = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|role| role.trim().eq_ignore_ascii_case(ADMIN_ROLE));

        Ok(Caller(AuthContext {
            customer_id,
            is_admin,
        }))
    }
}

//! Contract error types for the meal service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use super::model::MealCategory;
use thiserror::Error;

/// Meal service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MealError {
    /// Entity not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (customer, tier, menu_item, order, challenge)
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// Conflict (duplicate, order no longer editable, etc.)
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Input failed validation
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Selection exceeds the plan allowance
    #[error("Quota exceeded: {category} limit is {limit}, requested {requested}")]
    QuotaExceeded {
        category: MealCategory,
        limit: u32,
        requested: u32,
    },

    /// Caller identity missing
    #[error("Authentication required")]
    Unauthorized,

    /// Caller lacks the required role or ownership
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// Internal error
    #[error("Internal error")]
    Internal,
}

impl MealError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }
}

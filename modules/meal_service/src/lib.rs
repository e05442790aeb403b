//! Meal Service Module
//!
//! Subscription meal ordering: tiers and meal plans, weekly menus split into
//! two pickup halves, quota-checked weekly orders with allergen surcharges,
//! and aggregated kitchen prep reports.

// Public exports
pub mod contract;
pub use contract::{client::MealsApi, error::MealError};

pub mod config;
pub use config::{Config, SurchargePolicy};

pub mod module;
pub use module::MealServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

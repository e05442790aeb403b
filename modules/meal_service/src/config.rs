//! Configuration for the meal service module

use serde::{Deserialize, Serialize};

/// How the allergen surcharge scales with conflicting meals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargePolicy {
    /// One flat charge when any selected meal conflicts
    #[default]
    PerOrder,
    /// Flat charge for every conflicting portion
    PerMeal,
}

/// Meal service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Allergen surcharge in cents
    #[serde(default = "default_allergen_surcharge_cents")]
    pub allergen_surcharge_cents: i64,

    #[serde(default)]
    pub surcharge_policy: SurchargePolicy,

    /// Upper bound for a single order line quantity
    #[serde(default = "default_max_line_quantity")]
    pub max_line_quantity: u32,

    /// Prefix of generated order numbers
    #[serde(default = "default_order_number_prefix")]
    pub order_number_prefix: String,

    /// Where unauthenticated callers are sent
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allergen_surcharge_cents: default_allergen_surcharge_cents(),
            surcharge_policy: SurchargePolicy::default(),
            max_line_quantity: default_max_line_quantity(),
            order_number_prefix: default_order_number_prefix(),
            login_url: default_login_url(),
        }
    }
}

fn default_allergen_surcharge_cents() -> i64 {
    500 // $5.00
}

fn default_max_line_quantity() -> u32 {
    20
}

fn default_order_number_prefix() -> String {
    "MP".to_string()
}

fn default_login_url() -> String {
    "/login".to_string()
}

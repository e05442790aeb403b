//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::MealsApi;
pub use error::MealError;
pub use model::{
    Allowance, AuthContext, AvailableMenu, Challenge, ChallengeInput, ChallengeParticipant,
    Customer, HalfAvailability, KitchenMealLine, KitchenOrder, KitchenReport, KitchenTierSection,
    MealCategory, MealPlan, MenuItem, MenuItemInput, MenuSource, NewCustomer, Order, OrderItem,
    OrderLineRequest, OrderQuote, OrderStatus, OrderSubmission, OrderTotals, Preferences,
    PreferencesUpdate, Tier, TierInput, WeekHalf, WeeklyMenu, WeeklyMenuEntry,
};

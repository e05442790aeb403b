//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the meal service.
//! NO HTTP - direct function calls.

use super::{
    error::MealError,
    model::{
        AvailableMenu, Customer, KitchenReport, Order, OrderQuote, OrderStatus, OrderSubmission,
        Tier,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// Meal service API for inter-module communication
#[async_trait]
pub trait MealsApi: Send + Sync {
    /// Get a customer profile
    async fn get_customer(&self, customer_id: Uuid) -> Result<Customer, MealError>;

    /// List subscription tiers
    async fn list_tiers(&self, include_inactive: bool) -> Result<Vec<Tier>, MealError>;

    /// Resolve the menu offered for a week
    async fn menu_for_week(&self, week_start: NaiveDate) -> Result<AvailableMenu, MealError>;

    /// Get the customer's order for the week containing `today`
    async fn current_order(
        &self,
        customer_id: Uuid,
        today: NaiveDate,
    ) -> Result<Option<Order>, MealError>;

    /// Price a submission without persisting it
    async fn quote_order(
        &self,
        customer_id: Uuid,
        submission: &OrderSubmission,
        today: NaiveDate,
    ) -> Result<OrderQuote, MealError>;

    /// Submit (or replace a pending) weekly order
    async fn submit_order(
        &self,
        customer_id: Uuid,
        submission: OrderSubmission,
        today: NaiveDate,
    ) -> Result<Order, MealError>;

    /// Move an order forward in its lifecycle
    async fn update_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, MealError>;

    /// Aggregate the week's orders into a kitchen report
    async fn generate_kitchen_report(
        &self,
        week_start: NaiveDate,
    ) -> Result<KitchenReport, MealError>;
}

//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    AvailableMenu, Customer, KitchenReport, MealError, MealsApi, Order, OrderQuote, OrderStatus,
    OrderSubmission, Tier,
};
use crate::domain::Service;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
///
/// Used by in-process callers such as schedulers that confirm orders or
/// generate kitchen reports without going through HTTP.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MealsApi for NativeClient {
    async fn get_customer(&self, customer_id: Uuid) -> Result<Customer, MealError> {
        self.service.get_customer(customer_id).await
    }

    async fn list_tiers(&self, include_inactive: bool) -> Result<Vec<Tier>, MealError> {
        self.service.list_tiers(include_inactive).await
    }

    async fn menu_for_week(&self, week_start: NaiveDate) -> Result<AvailableMenu, MealError> {
        self.service.menu_for_week(week_start).await
    }

    async fn current_order(
        &self,
        customer_id: Uuid,
        today: NaiveDate,
    ) -> Result<Option<Order>, MealError> {
        self.service.current_order(customer_id, today).await
    }

    async fn quote_order(
        &self,
        customer_id: Uuid,
        submission: &OrderSubmission,
        today: NaiveDate,
    ) -> Result<OrderQuote, MealError> {
        self.service.quote_order(customer_id, submission, today).await
    }

    async fn submit_order(
        &self,
        customer_id: Uuid,
        submission: OrderSubmission,
        today: NaiveDate,
    ) -> Result<Order, MealError> {
        self.service.submit_order(customer_id, submission, today).await
    }

    async fn update_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, MealError> {
        self.service.update_order_status(order_id, status).await
    }

    async fn generate_kitchen_report(
        &self,
        week_start: NaiveDate,
    ) -> Result<KitchenReport, MealError> {
        self.service.generate_kitchen_report(week_start).await
    }
}

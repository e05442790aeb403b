//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Challenge, ChallengeParticipant, Customer, KitchenOrder, MenuItem, Order, OrderStatus, Tier,
    WeeklyMenu,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// A write rejected by a uniqueness constraint in storage.
///
/// Repositories return it inside `anyhow::Error` so the service can report a
/// lost race between its existence check and the insert as a conflict.
#[derive(Debug, thiserror::Error)]
#[error("unique constraint violated: {0}")]
pub struct UniqueViolation(pub String);

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<Customer>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>>;

    /// Lookup by normalized (lowercase) email
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>>;

    async fn update(&self, customer: &Customer) -> Result<Customer>;
}

#[async_trait]
pub trait TierRepository: Send + Sync {
    async fn create(&self, tier: &Tier) -> Result<Tier>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tier>>;

    /// Ordered by sort order, then price
    async fn list(&self, include_inactive: bool) -> Result<Vec<Tier>>;

    async fn update(&self, tier: &Tier) -> Result<Tier>;
}

#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn create_item(&self, item: &MenuItem) -> Result<MenuItem>;

    async fn update_item(&self, item: &MenuItem) -> Result<MenuItem>;

    async fn find_item(&self, id: Uuid) -> Result<Option<MenuItem>>;

    async fn find_items(&self, ids: &[Uuid]) -> Result<Vec<MenuItem>>;

    /// Active items flagged `always_available`, ordered by category then name
    async fn list_default_items(&self) -> Result<Vec<MenuItem>>;

    async fn find_weekly_menu(&self, week_start: NaiveDate) -> Result<Option<WeeklyMenu>>;

    /// Create or replace the menu for `menu.week_start`
    async fn upsert_weekly_menu(&self, menu: &WeeklyMenu) -> Result<WeeklyMenu>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>>;

    async fn find_by_customer_week(
        &self,
        customer_id: Uuid,
        week_start: NaiveDate,
    ) -> Result<Option<Order>>;

    /// Insert the order or replace it (header and line items) when the id exists
    async fn save(&self, order: &Order) -> Result<Order>;

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Option<Order>>;

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>>;

    async fn list_by_week(&self, week_start: NaiveDate) -> Result<Vec<Order>>;
}

#[async_trait]
pub trait ChallengeRepository: Send + Sync {
    async fn create(&self, challenge: &Challenge) -> Result<Challenge>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Challenge>>;

    /// Active challenges whose date range contains `date`
    async fn list_open_on(&self, date: NaiveDate) -> Result<Vec<Challenge>>;

    async fn add_participant(&self, participant: &ChallengeParticipant)
        -> Result<ChallengeParticipant>;

    async fn find_participant(
        &self,
        challenge_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<ChallengeParticipant>>;

    async fn list_participants(&self, challenge_id: Uuid) -> Result<Vec<ChallengeParticipant>>;
}

#[async_trait]
pub trait KitchenOrderRepository: Send + Sync {
    /// Replace every prep line of the week
    async fn replace_week(&self, week_start: NaiveDate, lines: &[KitchenOrder]) -> Result<()>;

    async fn list_week(&self, week_start: NaiveDate) -> Result<Vec<KitchenOrder>>;
}

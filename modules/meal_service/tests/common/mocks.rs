//! In-memory repository implementations for service tests

use async_trait::async_trait;
use chrono::NaiveDate;
use meal_service::contract::*;
use meal_service::domain::repository::{
    ChallengeRepository, CustomerRepository, KitchenOrderRepository, MenuRepository,
    OrderRepository, TierRepository, UniqueViolation,
};
use meal_service::domain::{EventPublisher, OrderEvent};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MockCustomerRepo {
    data: Arc<RwLock<HashMap<Uuid, Customer>>>,
}

#[async_trait]
impl CustomerRepository for MockCustomerRepo {
    async fn create(&self, customer: &Customer) -> anyhow::Result<Customer> {
        self.data.write().insert(customer.id, customer.clone());
        Ok(customer.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Customer>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Customer>> {
        Ok(self
            .data
            .read()
            .values()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn update(&self, customer: &Customer) -> anyhow::Result<Customer> {
        self.data.write().insert(customer.id, customer.clone());
        Ok(customer.clone())
    }
}

/// Customer store whose email lookups always miss, as when a concurrent
/// registration lands between the service's check and its insert
#[derive(Clone, Default)]
pub struct StaleEmailCustomerRepo {
    inner: MockCustomerRepo,
}

#[async_trait]
impl CustomerRepository for StaleEmailCustomerRepo {
    async fn create(&self, customer: &Customer) -> anyhow::Result<Customer> {
        if self.inner.find_by_email(&customer.email).await?.is_some() {
            return Err(UniqueViolation(format!("customers.email = {}", customer.email)).into());
        }
        self.inner.create(customer).await
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Customer>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<Customer>> {
        Ok(None)
    }

    async fn update(&self, customer: &Customer) -> anyhow::Result<Customer> {
        self.inner.update(customer).await
    }
}

#[derive(Clone, Default)]
pub struct MockTierRepo {
    data: Arc<RwLock<HashMap<Uuid, Tier>>>,
}

#[async_trait]
impl TierRepository for MockTierRepo {
    async fn create(&self, tier: &Tier) -> anyhow::Result<Tier> {
        self.data.write().insert(tier.id, tier.clone());
        Ok(tier.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Tier>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn list(&self, include_inactive: bool) -> anyhow::Result<Vec<Tier>> {
        let mut tiers: Vec<Tier> = self
            .data
            .read()
            .values()
            .filter(|t| include_inactive || t.active)
            .cloned()
            .collect();
        tiers.sort_by_key(|t| (t.sort_order, t.price_cents));
        Ok(tiers)
    }

    async fn update(&self, tier: &Tier) -> anyhow::Result<Tier> {
        self.data.write().insert(tier.id, tier.clone());
        Ok(tier.clone())
    }
}

#[derive(Clone, Default)]
pub struct MockMenuRepo {
    items: Arc<RwLock<HashMap<Uuid, MenuItem>>>,
    weekly: Arc<RwLock<HashMap<NaiveDate, WeeklyMenu>>>,
}

#[async_trait]
impl MenuRepository for MockMenuRepo {
    async fn create_item(&self, item: &MenuItem) -> anyhow::Result<MenuItem> {
        self.items.write().insert(item.id, item.clone());
        Ok(item.clone())
    }

    async fn update_item(&self, item: &MenuItem) -> anyhow::Result<MenuItem> {
        self.items.write().insert(item.id, item.clone());
        Ok(item.clone())
    }

    async fn find_item(&self, id: Uuid) -> anyhow::Result<Option<MenuItem>> {
        Ok(self.items.read().get(&id).cloned())
    }

    async fn find_items(&self, ids: &[Uuid]) -> anyhow::Result<Vec<MenuItem>> {
        let items = self.items.read();
        Ok(ids.iter().filter_map(|id| items.get(id).cloned()).collect())
    }

    async fn list_default_items(&self) -> anyhow::Result<Vec<MenuItem>> {
        let mut items: Vec<MenuItem> = self
            .items
            .read()
            .values()
            .filter(|i| i.active && i.always_available)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
        Ok(items)
    }

    async fn find_weekly_menu(&self, week_start: NaiveDate) -> anyhow::Result<Option<WeeklyMenu>> {
        Ok(self.weekly.read().get(&week_start).cloned())
    }

    async fn upsert_weekly_menu(&self, menu: &WeeklyMenu) -> anyhow::Result<WeeklyMenu> {
        self.weekly.write().insert(menu.week_start, menu.clone());
        Ok(menu.clone())
    }
}

#[derive(Clone, Default)]
pub struct MockOrderRepo {
    data: Arc<RwLock<HashMap<Uuid, Order>>>,
}

#[async_trait]
impl OrderRepository for MockOrderRepo {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_by_customer_week(
        &self,
        customer_id: Uuid,
        week_start: NaiveDate,
    ) -> anyhow::Result<Option<Order>> {
        Ok(self
            .data
            .read()
            .values()
            .find(|o| o.customer_id == customer_id && o.week_start == week_start)
            .cloned())
    }

    async fn save(&self, order: &Order) -> anyhow::Result<Order> {
        self.data.write().insert(order.id, order.clone());
        Ok(order.clone())
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> anyhow::Result<Option<Order>> {
        let mut data = self.data.write();
        Ok(data.get_mut(&id).map(|order| {
            order.status = status;
            order.clone()
        }))
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> anyhow::Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .data
            .read()
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.week_start.cmp(&a.week_start));
        Ok(orders)
    }

    async fn list_by_week(&self, week_start: NaiveDate) -> anyhow::Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .data
            .read()
            .values()
            .filter(|o| o.week_start == week_start)
            .cloned()
            .collect();
        orders.sort_by(|a, b| a.order_number.cmp(&b.order_number));
        Ok(orders)
    }
}

#[derive(Clone, Default)]
pub struct MockChallengeRepo {
    challenges: Arc<RwLock<HashMap<Uuid, Challenge>>>,
    participants: Arc<RwLock<Vec<ChallengeParticipant>>>,
}

#[async_trait]
impl ChallengeRepository for MockChallengeRepo {
    async fn create(&self, challenge: &Challenge) -> anyhow::Result<Challenge> {
        self.challenges.write().insert(challenge.id, challenge.clone());
        Ok(challenge.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Challenge>> {
        Ok(self.challenges.read().get(&id).cloned())
    }

    async fn list_open_on(&self, date: NaiveDate) -> anyhow::Result<Vec<Challenge>> {
        Ok(self
            .challenges
            .read()
            .values()
            .filter(|c| c.is_open_on(date))
            .cloned()
            .collect())
    }

    async fn add_participant(
        &self,
        participant: &ChallengeParticipant,
    ) -> anyhow::Result<ChallengeParticipant> {
        self.participants.write().push(participant.clone());
        Ok(participant.clone())
    }

    async fn find_participant(
        &self,
        challenge_id: Uuid,
        customer_id: Uuid,
    ) -> anyhow::Result<Option<ChallengeParticipant>> {
        Ok(self
            .participants
            .read()
            .iter()
            .find(|p| p.challenge_id == challenge_id && p.customer_id == customer_id)
            .cloned())
    }

    async fn list_participants(
        &self,
        challenge_id: Uuid,
    ) -> anyhow::Result<Vec<ChallengeParticipant>> {
        Ok(self
            .participants
            .read()
            .iter()
            .filter(|p| p.challenge_id == challenge_id)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct MockKitchenRepo {
    data: Arc<RwLock<HashMap<NaiveDate, Vec<KitchenOrder>>>>,
}

#[async_trait]
impl KitchenOrderRepository for MockKitchenRepo {
    async fn replace_week(
        &self,
        week_start: NaiveDate,
        lines: &[KitchenOrder],
    ) -> anyhow::Result<()> {
        self.data.write().insert(week_start, lines.to_vec());
        Ok(())
    }

    async fn list_week(&self, week_start: NaiveDate) -> anyhow::Result<Vec<KitchenOrder>> {
        Ok(self.data.read().get(&week_start).cloned().unwrap_or_default())
    }
}

/// Keeps every published event for assertions
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<RwLock<Vec<OrderEvent>>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<OrderEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: OrderEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

/// Publisher that always fails, to check events never fail an operation
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: OrderEvent) -> anyhow::Result<()> {
        anyhow::bail!("event bus unavailable")
    }
}

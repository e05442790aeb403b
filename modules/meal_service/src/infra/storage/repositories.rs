//! SeaORM repository implementations

use crate::contract::{
    Challenge, ChallengeParticipant, Customer, KitchenOrder, MenuItem, Order, OrderStatus, Tier,
    WeeklyMenu,
};
use crate::domain::repository::{
    ChallengeRepository, CustomerRepository, KitchenOrderRepository, MenuRepository,
    OrderRepository, TierRepository, UniqueViolation,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{
    challenge, challenge_participant, customer, kitchen_order, menu_item, order, order_item,
    tier, weekly_menu, weekly_menu_item,
};
use super::mapper;

fn insert_err(err: DbErr) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => UniqueViolation(detail).into(),
        _ => err.into(),
    }
}

// ===== Customer Repository =====

pub struct SeaOrmCustomerRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn create(&self, model: &Customer) -> Result<Customer> {
        let active: customer::ActiveModel = model.into();
        active.insert(&*self.db).await.map_err(insert_err)?.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        customer::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Customer::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        customer::Entity::find()
            .filter(customer::Column::Email.eq(email))
            .one(&*self.db)
            .await?
            .map(Customer::try_from)
            .transpose()
    }

    async fn update(&self, model: &Customer) -> Result<Customer> {
        let active: customer::ActiveModel = model.into();
        active.update(&*self.db).await?.try_into()
    }
}

// ===== Tier Repository =====

pub struct SeaOrmTierRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTierRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TierRepository for SeaOrmTierRepository {
    async fn create(&self, model: &Tier) -> Result<Tier> {
        let active: tier::ActiveModel = model.into();
        active.insert(&*self.db).await?.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tier>> {
        tier::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Tier::try_from)
            .transpose()
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<Tier>> {
        let mut query = tier::Entity::find();
        if !include_inactive {
            query = query.filter(tier::Column::Active.eq(true));
        }

        query
            .order_by_asc(tier::Column::SortOrder)
            .order_by_asc(tier::Column::PriceCents)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Tier::try_from)
            .collect()
    }

    async fn update(&self, model: &Tier) -> Result<Tier> {
        let active: tier::ActiveModel = model.into();
        active.update(&*self.db).await?.try_into()
    }
}

// ===== Menu Repository =====

pub struct SeaOrmMenuRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmMenuRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn load_weekly_menu<C: ConnectionTrait>(
        conn: &C,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyMenu>> {
        let Some(header) = weekly_menu::Entity::find()
            .filter(weekly_menu::Column::WeekStart.eq(week_start))
            .one(conn)
            .await?
        else {
            return Ok(None);
        };

        let entries = weekly_menu_item::Entity::find()
            .filter(weekly_menu_item::Column::WeeklyMenuId.eq(header.id))
            .all(conn)
            .await?;

        mapper::weekly_menu_from_entities(header, entries).map(Some)
    }
}

#[async_trait]
impl MenuRepository for SeaOrmMenuRepository {
    async fn create_item(&self, item: &MenuItem) -> Result<MenuItem> {
        let active: menu_item::ActiveModel = item.into();
        active.insert(&*self.db).await?.try_into()
    }

    async fn update_item(&self, item: &MenuItem) -> Result<MenuItem> {
        let active: menu_item::ActiveModel = item.into();
        active.update(&*self.db).await?.try_into()
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<MenuItem>> {
        menu_item::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(MenuItem::try_from)
            .transpose()
    }

    async fn find_items(&self, ids: &[Uuid]) -> Result<Vec<MenuItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        menu_item::Entity::find()
            .filter(menu_item::Column::Id.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(MenuItem::try_from)
            .collect()
    }

    async fn list_default_items(&self) -> Result<Vec<MenuItem>> {
        // Stored category names sort in category order
        menu_item::Entity::find()
            .filter(menu_item::Column::Active.eq(true))
            .filter(menu_item::Column::AlwaysAvailable.eq(true))
            .order_by_asc(menu_item::Column::Category)
            .order_by_asc(menu_item::Column::Name)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(MenuItem::try_from)
            .collect()
    }

    async fn find_weekly_menu(&self, week_start: NaiveDate) -> Result<Option<WeeklyMenu>> {
        Self::load_weekly_menu(&*self.db, week_start).await
    }

    async fn upsert_weekly_menu(&self, menu: &WeeklyMenu) -> Result<WeeklyMenu> {
        let txn = self.db.begin().await?;

        let existing = weekly_menu::Entity::find()
            .filter(weekly_menu::Column::WeekStart.eq(menu.week_start))
            .one(&txn)
            .await?;

        let menu_id = match existing {
            Some(header) => {
                let mut active = header.into_active_model();
                active.updated_at = Set(menu.updated_at);
                let header = active.update(&txn).await?;
                weekly_menu_item::Entity::delete_many()
                    .filter(weekly_menu_item::Column::WeeklyMenuId.eq(header.id))
                    .exec(&txn)
                    .await?;
                header.id
            }
            None => {
                let active: weekly_menu::ActiveModel = menu.into();
                active.insert(&txn).await?.id
            }
        };

        if !menu.entries.is_empty() {
            let rows = menu
                .entries
                .iter()
                .enumerate()
                .map(|(position, entry)| mapper::weekly_menu_item_active(menu_id, position, entry));
            weekly_menu_item::Entity::insert_many(rows).exec_without_returning(&txn).await?;
        }

        let saved = Self::load_weekly_menu(&txn, menu.week_start).await?;
        txn.commit().await?;

        saved.ok_or_else(|| {
            anyhow::anyhow!("weekly menu for {} vanished after save", menu.week_start)
        })
    }
}

// ===== Order Repository =====

pub struct SeaOrmOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Attach line items to order headers, preserving header order
    async fn with_items<C: ConnectionTrait>(
        conn: &C,
        headers: Vec<order::Model>,
    ) -> Result<Vec<Order>> {
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();
        let mut items: HashMap<Uuid, Vec<order_item::Model>> = HashMap::new();
        for item in order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(ids))
            .all(conn)
            .await?
        {
            items.entry(item.order_id).or_default().push(item);
        }

        headers
            .into_iter()
            .map(|header| {
                let lines = items.remove(&header.id).unwrap_or_default();
                mapper::order_from_entities(header, lines)
            })
            .collect()
    }

    async fn load<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Order>> {
        let headers: Vec<order::Model> = order::Entity::find_by_id(id)
            .one(conn)
            .await?
            .into_iter()
            .collect();
        Ok(Self::with_items(conn, headers).await?.into_iter().next())
    }
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        Self::load(&*self.db, id).await
    }

    async fn find_by_customer_week(
        &self,
        customer_id: Uuid,
        week_start: NaiveDate,
    ) -> Result<Option<Order>> {
        let headers: Vec<order::Model> = order::Entity::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .filter(order::Column::WeekStart.eq(week_start))
            .one(&*self.db)
            .await?
            .into_iter()
            .collect();
        Ok(Self::with_items(&*self.db, headers).await?.into_iter().next())
    }

    async fn save(&self, model: &Order) -> Result<Order> {
        let txn = self.db.begin().await?;

        let active: order::ActiveModel = model.into();
        if order::Entity::find_by_id(model.id).one(&txn).await?.is_some() {
            active.update(&txn).await?;
            order_item::Entity::delete_many()
                .filter(order_item::Column::OrderId.eq(model.id))
                .exec(&txn)
                .await?;
        } else {
            active.insert(&txn).await.map_err(insert_err)?;
        }

        if !model.items.is_empty() {
            let rows = model
                .items
                .iter()
                .enumerate()
                .map(|(position, item)| mapper::order_item_active(model.id, position, item));
            order_item::Entity::insert_many(rows).exec_without_returning(&txn).await?;
        }

        let saved = Self::load(&txn, model.id).await?;
        txn.commit().await?;

        saved.ok_or_else(|| anyhow::anyhow!("order {} vanished after save", model.id))
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Option<Order>> {
        let Some(header) = order::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active = header.into_active_model();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        Self::load(&*self.db, id).await
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>> {
        let headers = order::Entity::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .order_by_desc(order::Column::WeekStart)
            .all(&*self.db)
            .await?;
        Self::with_items(&*self.db, headers).await
    }

    async fn list_by_week(&self, week_start: NaiveDate) -> Result<Vec<Order>> {
        let headers = order::Entity::find()
            .filter(order::Column::WeekStart.eq(week_start))
            .order_by_asc(order::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Self::with_items(&*self.db, headers).await
    }
}

// ===== Challenge Repository =====

pub struct SeaOrmChallengeRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmChallengeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChallengeRepository for SeaOrmChallengeRepository {
    async fn create(&self, model: &Challenge) -> Result<Challenge> {
        let active: challenge::ActiveModel = model.into();
        Ok(active.insert(&*self.db).await?.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Challenge>> {
        Ok(challenge::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Into::into))
    }

    async fn list_open_on(&self, date: NaiveDate) -> Result<Vec<Challenge>> {
        let results = challenge::Entity::find()
            .filter(challenge::Column::Active.eq(true))
            .filter(challenge::Column::StartsOn.lte(date))
            .filter(challenge::Column::EndsOn.gte(date))
            .order_by_asc(challenge::Column::StartsOn)
            .order_by_asc(challenge::Column::Name)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn add_participant(
        &self,
        participant: &ChallengeParticipant,
    ) -> Result<ChallengeParticipant> {
        let active: challenge_participant::ActiveModel = participant.into();
        Ok(active.insert(&*self.db).await.map_err(insert_err)?.into())
    }

    async fn find_participant(
        &self,
        challenge_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<ChallengeParticipant>> {
        Ok(challenge_participant::Entity::find()
            .filter(challenge_participant::Column::ChallengeId.eq(challenge_id))
            .filter(challenge_participant::Column::CustomerId.eq(customer_id))
            .one(&*self.db)
            .await?
            .map(Into::into))
    }

    async fn list_participants(&self, challenge_id: Uuid) -> Result<Vec<ChallengeParticipant>> {
        let results = challenge_participant::Entity::find()
            .filter(challenge_participant::Column::ChallengeId.eq(challenge_id))
            .order_by_asc(challenge_participant::Column::JoinedAt)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }
}

// ===== Kitchen Order Repository =====

pub struct SeaOrmKitchenOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmKitchenOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KitchenOrderRepository for SeaOrmKitchenOrderRepository {
    async fn replace_week(&self, week_start: NaiveDate, lines: &[KitchenOrder]) -> Result<()> {
        let txn = self.db.begin().await?;

        kitchen_order::Entity::delete_many()
            .filter(kitchen_order::Column::WeekStart.eq(week_start))
            .exec(&txn)
            .await?;

        if !lines.is_empty() {
            let rows = lines
                .iter()
                .enumerate()
                .map(|(position, line)| mapper::kitchen_order_active(position, line));
            kitchen_order::Entity::insert_many(rows).exec_without_returning(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn list_week(&self, week_start: NaiveDate) -> Result<Vec<KitchenOrder>> {
        kitchen_order::Entity::find()
            .filter(kitchen_order::Column::WeekStart.eq(week_start))
            .order_by_asc(kitchen_order::Column::Position)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(KitchenOrder::try_from)
            .collect()
    }
}

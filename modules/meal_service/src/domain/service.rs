//! Domain service - business logic orchestration

use super::events::{EventPublisher, OrderEvent};
use super::pricing::{format_cents, normalize_allergens, Pricing, SelectedLine};
use super::quota::{MealAllowance, MealSelection};
use super::repository::{
    ChallengeRepository, CustomerRepository, KitchenOrderRepository, MenuRepository,
    OrderRepository, TierRepository, UniqueViolation,
};
use super::{report, validation, week};
use crate::config::Config;
use crate::contract::{
    Allowance, AuthContext, AvailableMenu, Challenge, ChallengeInput, ChallengeParticipant,
    Customer, HalfAvailability, KitchenOrder, KitchenReport, MealCategory, MealError, MenuItem,
    MenuItemInput, MenuSource, NewCustomer, Order, OrderQuote, OrderStatus, OrderSubmission,
    Preferences, PreferencesUpdate, Tier, TierInput, WeekHalf, WeeklyMenu, WeeklyMenuEntry,
};
use chrono::{NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

/// Storage handles used by the service
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub tiers: Arc<dyn TierRepository>,
    pub menu: Arc<dyn MenuRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub challenges: Arc<dyn ChallengeRepository>,
    pub kitchen: Arc<dyn KitchenOrderRepository>,
}

/// Domain service for meal subscriptions
pub struct Service {
    repos: Repositories,
    event_publisher: Arc<dyn EventPublisher>,
    config: Config,
    pricing: Pricing,
}

/// Submission after resolution against the menu and the customer's plan
struct ResolvedSubmission {
    week_start: NaiveDate,
    customer: Customer,
    quote: OrderQuote,
}

fn internal(err: anyhow::Error) -> MealError {
    tracing::error!(error = ?err, "storage operation failed");
    MealError::Internal
}

/// Like `internal`, but a unique-constraint rejection becomes a conflict
fn conflict_or_internal(reason: String) -> impl FnOnce(anyhow::Error) -> MealError {
    move |err| {
        if err.downcast_ref::<UniqueViolation>().is_some() {
            tracing::warn!(error = %err, "write lost a uniqueness race");
            return MealError::conflict(reason);
        }
        internal(err)
    }
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repos: Repositories,
        event_publisher: Arc<dyn EventPublisher>,
        config: Config,
    ) -> Self {
        let pricing = Pricing::from_config(&config);
        Self {
            repos,
            event_publisher,
            config,
            pricing,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ===== Customer Operations =====

    /// Register a customer profile
    pub async fn register_customer(&self, input: NewCustomer) -> Result<Customer, MealError> {
        let email = validation::normalize_email(&input.email)?;
        let first_name = validation::validate_name("first_name", &input.first_name)?;
        let last_name = validation::validate_name("last_name", &input.last_name)?;
        let phone = validation::validate_phone(input.phone.as_deref())?;

        if self
            .repos
            .customers
            .find_by_email(&email)
            .await
            .map_err(internal)?
            .is_some()
        {
            return Err(MealError::conflict(format!(
                "A customer with email '{}' already exists",
                email
            )));
        }

        let id = input.id.unwrap_or_else(Uuid::new_v4);
        if self.repos.customers.find_by_id(id).await.map_err(internal)?.is_some() {
            return Err(MealError::conflict(format!("Customer {} already registered", id)));
        }

        let now = Utc::now();
        let customer = Customer {
            id,
            email,
            first_name,
            last_name,
            phone,
            preferences: Preferences::default(),
            created_at: now,
            updated_at: now,
        };

        let reason = format!("A customer with email '{}' already exists", customer.email);
        let created = self
            .repos
            .customers
            .create(&customer)
            .await
            .map_err(conflict_or_internal(reason))?;
        tracing::info!(customer_id = %created.id, "customer registered");
        Ok(created)
    }

    pub async fn get_customer(&self, customer_id: Uuid) -> Result<Customer, MealError> {
        self.repos
            .customers
            .find_by_id(customer_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| MealError::not_found("customer", customer_id))
    }

    /// Apply the preferences wizard payload
    pub async fn update_preferences(
        &self,
        customer_id: Uuid,
        update: PreferencesUpdate,
    ) -> Result<Customer, MealError> {
        let mut customer = self.get_customer(customer_id).await?;

        validation::validate_plan(&update.plan)?;
        let dietary_notes =
            validation::validate_notes("dietary_notes", update.dietary_notes.as_deref())?;

        let tier = self.get_tier(update.tier_id).await?;
        if !tier.active {
            return Err(MealError::validation(format!(
                "Tier '{}' is not available",
                tier.name
            )));
        }

        customer.preferences = Preferences {
            tier_id: Some(tier.id),
            plan: Some(update.plan),
            allergies: normalize_allergens(&update.allergies),
            dietary_notes,
        };
        customer.updated_at = Utc::now();

        let updated = self.repos.customers.update(&customer).await.map_err(internal)?;
        tracing::info!(
            customer_id = %customer_id,
            tier = %tier.name,
            allergies = updated.preferences.allergies.len(),
            "preferences updated"
        );
        Ok(updated)
    }

    /// Quota usage of the customer's order for a week
    pub async fn allowance(
        &self,
        customer_id: Uuid,
        week_start: NaiveDate,
    ) -> Result<Allowance, MealError> {
        let customer = self.get_customer(customer_id).await?;
        let plan = customer
            .preferences
            .plan
            .ok_or_else(|| MealError::validation("Choose a meal plan before ordering"))?;
        let limits = MealAllowance::for_plan(&plan);
        let week_start = week::week_start_for(week_start);

        let order = self
            .repos
            .orders
            .find_by_customer_week(customer_id, week_start)
            .await
            .map_err(internal)?;
        let selection = MealSelection::from_lines(order.iter().flat_map(|o| {
            o.items
                .iter()
                .map(|i| (i.menu_item_id, i.category, i.week_half, i.quantity))
        }));

        Ok(Allowance {
            week_start,
            breakfast_limit: limits.breakfasts,
            main_limit: limits.mains,
            breakfasts_used: selection.count(MealCategory::Breakfast),
            mains_used: selection.count(MealCategory::Main),
            snacks_selected: selection.count(MealCategory::Snack),
        })
    }

    // ===== Tier Operations =====

    pub async fn list_tiers(&self, include_inactive: bool) -> Result<Vec<Tier>, MealError> {
        self.repos.tiers.list(include_inactive).await.map_err(internal)
    }

    pub async fn get_tier(&self, tier_id: Uuid) -> Result<Tier, MealError> {
        self.repos
            .tiers
            .find_by_id(tier_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| MealError::not_found("tier", tier_id))
    }

    pub async fn create_tier(&self, input: TierInput) -> Result<Tier, MealError> {
        validation::validate_tier_input(&input)?;
        let now = Utc::now();
        let tier = Tier {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            description: input.description,
            calorie_target: input.calorie_target,
            protein_target_g: input.protein_target_g,
            price_cents: input.price_cents,
            sort_order: input.sort_order,
            active: input.active,
            created_at: now,
            updated_at: now,
        };
        let created = self.repos.tiers.create(&tier).await.map_err(internal)?;
        tracing::info!(tier_id = %created.id, name = %created.name, "tier created");
        Ok(created)
    }

    pub async fn update_tier(&self, tier_id: Uuid, input: TierInput) -> Result<Tier, MealError> {
        validation::validate_tier_input(&input)?;
        let existing = self.get_tier(tier_id).await?;
        let tier = Tier {
            name: input.name.trim().to_string(),
            description: input.description,
            calorie_target: input.calorie_target,
            protein_target_g: input.protein_target_g,
            price_cents: input.price_cents,
            sort_order: input.sort_order,
            active: input.active,
            updated_at: Utc::now(),
            ..existing
        };
        self.repos.tiers.update(&tier).await.map_err(internal)
    }

    // ===== Menu Operations =====

    pub async fn create_menu_item(&self, input: MenuItemInput) -> Result<MenuItem, MealError> {
        validation::validate_menu_item_input(&input)?;
        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            description: input.description,
            category: input.category,
            allergens: normalize_allergens(&input.allergens),
            calories: input.calories,
            protein_g: input.protein_g,
            price_cents: input.price_cents,
            always_available: input.always_available,
            availability: input.availability,
            active: input.active,
            created_at: now,
            updated_at: now,
        };
        self.repos.menu.create_item(&item).await.map_err(internal)
    }

    pub async fn update_menu_item(
        &self,
        item_id: Uuid,
        input: MenuItemInput,
    ) -> Result<MenuItem, MealError> {
        validation::validate_menu_item_input(&input)?;
        let existing = self.get_menu_item(item_id).await?;
        let item = MenuItem {
            name: input.name.trim().to_string(),
            description: input.description,
            category: input.category,
            allergens: normalize_allergens(&input.allergens),
            calories: input.calories,
            protein_g: input.protein_g,
            price_cents: input.price_cents,
            always_available: input.always_available,
            availability: input.availability,
            active: input.active,
            updated_at: Utc::now(),
            ..existing
        };
        self.repos.menu.update_item(&item).await.map_err(internal)
    }

    pub async fn get_menu_item(&self, item_id: Uuid) -> Result<MenuItem, MealError> {
        self.repos
            .menu
            .find_item(item_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| MealError::not_found("menu_item", item_id))
    }

    /// Resolve the menu for a week. A weekly menu supersedes the default list.
    pub async fn menu_for_week(&self, week_start: NaiveDate) -> Result<AvailableMenu, MealError> {
        let week_start = week::week_start_for(week_start);

        let weekly = self
            .repos
            .menu
            .find_weekly_menu(week_start)
            .await
            .map_err(internal)?;

        let (source, offered): (MenuSource, Vec<(MenuItem, HalfAvailability)>) =
            match weekly {
                Some(menu) => {
                    let ids: Vec<Uuid> = menu.entries.iter().map(|e| e.menu_item_id).collect();
                    let items: HashMap<Uuid, MenuItem> = self
                        .repos
                        .menu
                        .find_items(&ids)
                        .await
                        .map_err(internal)?
                        .into_iter()
                        .map(|item| (item.id, item))
                        .collect();
                    let offered = menu
                        .entries
                        .iter()
                        .filter_map(|entry| {
                            items
                                .get(&entry.menu_item_id)
                                .filter(|item| item.active)
                                .map(|item| (item.clone(), entry.availability))
                        })
                        .collect();
                    (MenuSource::Weekly, offered)
                }
                None => {
                    let offered = self
                        .repos
                        .menu
                        .list_default_items()
                        .await
                        .map_err(internal)?
                        .into_iter()
                        .map(|item| {
                            let availability = item.availability;
                            (item, availability)
                        })
                        .collect();
                    (MenuSource::Default, offered)
                }
            };

        let mut first_half = Vec::new();
        let mut second_half = Vec::new();
        for (item, availability) in offered {
            if availability.includes(WeekHalf::First) {
                first_half.push(item.clone());
            }
            if availability.includes(WeekHalf::Second) {
                second_half.push(item);
            }
        }
        let by_category_then_name = |a: &MenuItem, b: &MenuItem| {
            a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name))
        };
        first_half.sort_by(by_category_then_name);
        second_half.sort_by(by_category_then_name);

        Ok(AvailableMenu {
            week_start,
            source,
            first_half,
            second_half,
        })
    }

    /// Create or replace the admin menu for a week
    pub async fn set_weekly_menu(
        &self,
        week_start: NaiveDate,
        entries: Vec<WeeklyMenuEntry>,
    ) -> Result<WeeklyMenu, MealError> {
        if !week::is_week_start(week_start) {
            return Err(MealError::validation(format!(
                "Weekly menus start on a Sunday, got {}",
                week_start
            )));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = entries.iter().find(|e| !seen.insert(e.menu_item_id)) {
            return Err(MealError::validation(format!(
                "Menu item {} listed more than once",
                dup.menu_item_id
            )));
        }

        let ids: Vec<Uuid> = entries.iter().map(|e| e.menu_item_id).collect();
        let found: HashSet<Uuid> = self
            .repos
            .menu
            .find_items(&ids)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|item| item.id)
            .collect();
        if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
            return Err(MealError::not_found("menu_item", missing));
        }

        let now = Utc::now();
        let existing = self
            .repos
            .menu
            .find_weekly_menu(week_start)
            .await
            .map_err(internal)?;
        let menu = WeeklyMenu {
            id: existing.as_ref().map(|m| m.id).unwrap_or_else(Uuid::new_v4),
            week_start,
            entries,
            created_at: existing.as_ref().map(|m| m.created_at).unwrap_or(now),
            updated_at: now,
        };

        let saved = self.repos.menu.upsert_weekly_menu(&menu).await.map_err(internal)?;
        tracing::info!(week_start = %week_start, items = saved.entries.len(), "weekly menu saved");
        Ok(saved)
    }

    // ===== Order Operations =====

    /// The customer's order for the week containing `today`
    pub async fn current_order(
        &self,
        customer_id: Uuid,
        today: NaiveDate,
    ) -> Result<Option<Order>, MealError> {
        self.get_customer(customer_id).await?;
        self.repos
            .orders
            .find_by_customer_week(customer_id, week::week_start_for(today))
            .await
            .map_err(internal)
    }

    /// Checkout summary without persisting
    pub async fn quote_order(
        &self,
        customer_id: Uuid,
        submission: &OrderSubmission,
        today: NaiveDate,
    ) -> Result<OrderQuote, MealError> {
        Ok(self.resolve_submission(customer_id, submission, today).await?.quote)
    }

    /// Submit the weekly order, replacing a still-pending order for the same week
    pub async fn submit_order(
        &self,
        customer_id: Uuid,
        submission: OrderSubmission,
        today: NaiveDate,
    ) -> Result<Order, MealError> {
        let notes = validation::validate_notes("notes", submission.notes.as_deref())?;
        let ResolvedSubmission {
            week_start,
            customer,
            quote,
        } = self.resolve_submission(customer_id, &submission, today).await?;

        let existing = self
            .repos
            .orders
            .find_by_customer_week(customer.id, week_start)
            .await
            .map_err(internal)?;

        let now = Utc::now();
        let (order, is_new) = match existing {
            Some(existing) if existing.status != OrderStatus::Pending => {
                return Err(MealError::conflict(format!(
                    "Order {} is already {} and can no longer be changed",
                    existing.order_number, existing.status
                )));
            }
            Some(existing) => (
                Order {
                    tier_id: quote.tier_id,
                    items: quote.items,
                    totals: quote.totals,
                    notes,
                    updated_at: now,
                    ..existing
                },
                false,
            ),
            None => (
                Order {
                    id: Uuid::new_v4(),
                    order_number: self.next_order_number(week_start),
                    customer_id: customer.id,
                    tier_id: quote.tier_id,
                    week_start,
                    status: OrderStatus::Pending,
                    items: quote.items,
                    totals: quote.totals,
                    notes,
                    created_at: now,
                    updated_at: now,
                },
                true,
            ),
        };

        let reason = format!("An order for the week of {} already exists", order.week_start);
        let saved = self
            .repos
            .orders
            .save(&order)
            .await
            .map_err(conflict_or_internal(reason))?;
        tracing::info!(
            order_number = %saved.order_number,
            customer_id = %saved.customer_id,
            week_start = %saved.week_start,
            total = %format_cents(saved.totals.total_cents),
            is_new,
            "order submitted"
        );
        self.publish(OrderEvent::submitted(&saved, is_new)).await;
        Ok(saved)
    }

    /// Owners and admins can read an order
    pub async fn get_order(&self, auth: &AuthContext, order_id: Uuid) -> Result<Order, MealError> {
        let order = self
            .repos
            .orders
            .find_by_id(order_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| MealError::not_found("order", order_id))?;

        if !auth.is_admin && auth.customer_id != Some(order.customer_id) {
            // Do not reveal other customers' orders
            return Err(MealError::not_found("order", order_id));
        }
        Ok(order)
    }

    pub async fn list_orders(&self, customer_id: Uuid) -> Result<Vec<Order>, MealError> {
        self.repos
            .orders
            .list_by_customer(customer_id)
            .await
            .map_err(internal)
    }

    /// Move an order forward in its lifecycle
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, MealError> {
        let current = self
            .repos
            .orders
            .find_by_id(order_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| MealError::not_found("order", order_id))?;

        if !current.status.can_transition_to(status) {
            return Err(MealError::conflict(format!(
                "Order {} cannot move from {} to {}",
                current.order_number, current.status, status
            )));
        }

        let updated = self
            .repos
            .orders
            .update_status(order_id, status)
            .await
            .map_err(internal)?
            .ok_or_else(|| MealError::not_found("order", order_id))?;

        tracing::info!(
            order_number = %updated.order_number,
            from = %current.status,
            to = %updated.status,
            "order status changed"
        );
        self.publish(OrderEvent::status_changed(&updated, current.status)).await;
        Ok(updated)
    }

    // ===== Challenge Operations =====

    pub async fn create_challenge(&self, input: ChallengeInput) -> Result<Challenge, MealError> {
        validation::validate_challenge_input(&input)?;
        let challenge = Challenge {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            description: input.description,
            starts_on: input.starts_on,
            ends_on: input.ends_on,
            active: input.active,
            created_at: Utc::now(),
        };
        self.repos.challenges.create(&challenge).await.map_err(internal)
    }

    pub async fn list_active_challenges(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Challenge>, MealError> {
        self.repos
            .challenges
            .list_open_on(today)
            .await
            .map_err(internal)
    }

    /// Join a challenge; the tier defaults to the customer's subscription tier
    pub async fn join_challenge(
        &self,
        customer_id: Uuid,
        challenge_id: Uuid,
        tier_id: Option<Uuid>,
        today: NaiveDate,
    ) -> Result<ChallengeParticipant, MealError> {
        let customer = self.get_customer(customer_id).await?;
        let challenge = self.get_challenge(challenge_id).await?;

        if !challenge.is_open_on(today) {
            return Err(MealError::validation(format!(
                "Challenge '{}' is not open for registration",
                challenge.name
            )));
        }

        let tier_id = tier_id
            .or(customer.preferences.tier_id)
            .ok_or_else(|| MealError::validation("A tier is required to join a challenge"))?;
        self.get_tier(tier_id).await?;

        if self
            .repos
            .challenges
            .find_participant(challenge_id, customer_id)
            .await
            .map_err(internal)?
            .is_some()
        {
            return Err(MealError::conflict(format!(
                "Already registered for challenge '{}'",
                challenge.name
            )));
        }

        let participant = ChallengeParticipant {
            id: Uuid::new_v4(),
            challenge_id,
            customer_id,
            tier_id,
            joined_at: Utc::now(),
        };
        let reason = format!("Already registered for challenge '{}'", challenge.name);
        self.repos
            .challenges
            .add_participant(&participant)
            .await
            .map_err(conflict_or_internal(reason))
    }

    pub async fn list_participants(
        &self,
        challenge_id: Uuid,
    ) -> Result<Vec<ChallengeParticipant>, MealError> {
        self.get_challenge(challenge_id).await?;
        self.repos
            .challenges
            .list_participants(challenge_id)
            .await
            .map_err(internal)
    }

    async fn get_challenge(&self, challenge_id: Uuid) -> Result<Challenge, MealError> {
        self.repos
            .challenges
            .find_by_id(challenge_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| MealError::not_found("challenge", challenge_id))
    }

    // ===== Kitchen Operations =====

    /// Aggregate the week's orders and store the resulting prep lines
    pub async fn generate_kitchen_report(
        &self,
        week_start: NaiveDate,
    ) -> Result<KitchenReport, MealError> {
        let week_start = week::week_start_for(week_start);
        let orders = self
            .repos
            .orders
            .list_by_week(week_start)
            .await
            .map_err(internal)?;
        let tiers: HashMap<Uuid, Tier> = self
            .repos
            .tiers
            .list(true)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|tier| (tier.id, tier))
            .collect();

        let report = report::aggregate(week_start, &orders, &tiers, Utc::now());
        self.repos
            .kitchen
            .replace_week(week_start, &report::prep_lines(&report))
            .await
            .map_err(internal)?;

        tracing::info!(
            week_start = %week_start,
            orders = report.order_count,
            portions = report.total_portions,
            "kitchen report generated"
        );
        self.publish(OrderEvent::report_generated(&report)).await;
        Ok(report)
    }

    pub async fn kitchen_report_csv(&self, week_start: NaiveDate) -> Result<String, MealError> {
        let report = self.generate_kitchen_report(week_start).await?;
        Ok(report::render_csv(&report))
    }

    /// Prep lines stored by the last report generation for the week
    pub async fn kitchen_prep_lines(
        &self,
        week_start: NaiveDate,
    ) -> Result<Vec<KitchenOrder>, MealError> {
        self.repos
            .kitchen
            .list_week(week::week_start_for(week_start))
            .await
            .map_err(internal)
    }

    // ===== Helper Methods =====

    async fn resolve_submission(
        &self,
        customer_id: Uuid,
        submission: &OrderSubmission,
        today: NaiveDate,
    ) -> Result<ResolvedSubmission, MealError> {
        let current_week = week::week_start_for(today);
        let week_start = submission.week_start.unwrap_or(current_week);
        if !week::is_week_start(week_start) {
            return Err(MealError::validation(format!(
                "week_start must be a Sunday, got {}",
                week_start
            )));
        }
        if week_start < current_week {
            return Err(MealError::validation(format!(
                "Week of {} is closed for ordering",
                week_start
            )));
        }

        let customer = self.get_customer(customer_id).await?;
        let (Some(tier_id), Some(plan)) = (customer.preferences.tier_id, customer.preferences.plan)
        else {
            return Err(MealError::validation(
                "Choose a tier and meal plan before ordering",
            ));
        };
        let tier = self.get_tier(tier_id).await?;

        let max = self.config.max_line_quantity;
        if let Some(line) = submission.lines.iter().find(|l| l.quantity > max) {
            return Err(MealError::validation(format!(
                "Quantity {} for menu item {} exceeds the maximum of {}",
                line.quantity, line.menu_item_id, max
            )));
        }

        let menu = self.menu_for_week(week_start).await?;
        let mut raw = Vec::with_capacity(submission.lines.len());
        for line in submission.lines.iter().filter(|l| l.quantity > 0) {
            let item = menu.find(line.menu_item_id, line.week_half).ok_or_else(|| {
                MealError::validation(format!(
                    "Menu item {} is not available for {} pickup in the week of {}",
                    line.menu_item_id,
                    line.week_half.pickup_days(),
                    week_start
                ))
            })?;
            raw.push((item.id, item.category, line.week_half, line.quantity));
        }

        let selection = MealSelection::from_lines(raw);
        if selection.is_empty() {
            return Err(MealError::validation("Select at least one meal"));
        }
        if let Some((item_id, half, _, quantity)) =
            selection.lines().find(|(_, _, _, qty)| *qty > max)
        {
            return Err(MealError::validation(format!(
                "Quantity {} for menu item {} in the {} half exceeds the maximum of {}",
                quantity, item_id, half, max
            )));
        }
        selection.validate(&MealAllowance::for_plan(&plan))?;

        let lines: Vec<SelectedLine<'_>> = selection
            .lines()
            .filter_map(|(item_id, half, _, quantity)| {
                menu.find(item_id, half).map(|item| SelectedLine {
                    item,
                    week_half: half,
                    quantity,
                })
            })
            .collect();
        let priced = self
            .pricing
            .price(tier.price_cents, &customer.preferences.allergies, &lines);

        let quote = OrderQuote {
            week_start,
            tier_id: Some(tier.id),
            items: priced.items,
            totals: priced.totals,
            conflicting_allergens: priced.conflicting_allergens,
        };

        Ok(ResolvedSubmission {
            week_start,
            customer,
            quote,
        })
    }

    fn next_order_number(&self, week_start: NaiveDate) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}",
            self.config.order_number_prefix,
            week_start.format("%Y%m%d"),
            suffix[..8].to_uppercase()
        )
    }

    async fn publish(&self, event: OrderEvent) {
        if let Err(e) = self.event_publisher.publish(event).await {
            tracing::warn!(error = %e, "failed to publish domain event");
        }
    }
}

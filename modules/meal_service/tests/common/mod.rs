//! Shared fixtures for meal service integration tests
//!
//! The catalog mirrors a small real menu: two tiers, a breakfast, two mains
//! (one containing peanuts, one second-half only) and a priced snack.

#![allow(dead_code)]

pub mod mocks;

use chrono::NaiveDate;
use meal_service::contract::*;
use meal_service::domain::{EventPublisher, Repositories, Service};
use meal_service::Config;
use mocks::*;
use std::sync::Arc;
use uuid::Uuid;

/// Sunday starting the week used throughout the tests
pub fn week() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// A Tuesday inside `week()`
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
}

pub fn next_week() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 25).unwrap()
}

pub struct TestContext {
    pub service: Arc<Service>,
    pub publisher: RecordingPublisher,
    pub orders: MockOrderRepo,
    pub kitchen: MockKitchenRepo,
}

pub fn context() -> TestContext {
    context_with(Config::default())
}

pub fn context_with(config: Config) -> TestContext {
    let publisher = RecordingPublisher::default();
    let orders = MockOrderRepo::default();
    let kitchen = MockKitchenRepo::default();
    let service = build_service(
        config,
        orders.clone(),
        kitchen.clone(),
        Arc::new(publisher.clone()),
    );
    TestContext {
        service,
        publisher,
        orders,
        kitchen,
    }
}

pub fn build_service(
    config: Config,
    orders: MockOrderRepo,
    kitchen: MockKitchenRepo,
    publisher: Arc<dyn EventPublisher>,
) -> Arc<Service> {
    let repos = Repositories {
        customers: Arc::new(MockCustomerRepo::default()),
        tiers: Arc::new(MockTierRepo::default()),
        menu: Arc::new(MockMenuRepo::default()),
        orders: Arc::new(orders),
        challenges: Arc::new(MockChallengeRepo::default()),
        kitchen: Arc::new(kitchen),
    };
    Arc::new(Service::new(repos, publisher, config))
}

pub fn tier_input(name: &str, price_cents: i64, sort_order: i32) -> TierInput {
    TierInput {
        name: name.to_string(),
        description: format!("{} portions", name),
        calorie_target: 1800,
        protein_target_g: 120,
        price_cents,
        sort_order,
        active: true,
    }
}

pub fn item_input(
    name: &str,
    category: MealCategory,
    allergens: &[&str],
    availability: HalfAvailability,
) -> MenuItemInput {
    MenuItemInput {
        name: name.to_string(),
        description: String::new(),
        category,
        allergens: allergens.iter().map(|a| a.to_string()).collect(),
        calories: Some(550),
        protein_g: Some(35),
        price_cents: match category {
            MealCategory::Snack => 350,
            _ => 0,
        },
        always_available: true,
        availability,
        active: true,
    }
}

pub fn plan(days_per_week: u8, meals_per_day: u8, include_breakfast: bool) -> MealPlan {
    MealPlan {
        days_per_week,
        meals_per_day,
        include_breakfast,
    }
}

pub fn new_customer(email: &str) -> NewCustomer {
    NewCustomer {
        id: None,
        email: email.to_string(),
        first_name: "Dana".to_string(),
        last_name: "Reyes".to_string(),
        phone: Some("+1 555 010 2000".to_string()),
    }
}

/// Catalog seeded into a service
pub struct Catalog {
    pub standard: Tier,
    pub performance: Tier,
    pub oats: MenuItem,
    pub chicken: MenuItem,
    pub satay: MenuItem,
    pub salmon: MenuItem,
    pub protein_bar: MenuItem,
}

pub async fn seed_catalog(service: &Service) -> Catalog {
    let standard = service
        .create_tier(tier_input("Standard", 8900, 1))
        .await
        .unwrap();
    let performance = service
        .create_tier(tier_input("Performance", 11900, 2))
        .await
        .unwrap();

    let oats = service
        .create_menu_item(item_input(
            "Overnight Oats",
            MealCategory::Breakfast,
            &["Dairy"],
            HalfAvailability::Both,
        ))
        .await
        .unwrap();
    let chicken = service
        .create_menu_item(item_input(
            "Chicken & Rice",
            MealCategory::Main,
            &[],
            HalfAvailability::Both,
        ))
        .await
        .unwrap();
    let satay = service
        .create_menu_item(item_input(
            "Peanut Satay Bowl",
            MealCategory::Main,
            &["peanuts", "soy"],
            HalfAvailability::Both,
        ))
        .await
        .unwrap();
    let salmon = service
        .create_menu_item(item_input(
            "Salmon & Greens",
            MealCategory::Main,
            &["fish"],
            HalfAvailability::Second,
        ))
        .await
        .unwrap();
    let protein_bar = service
        .create_menu_item(item_input(
            "Protein Bar",
            MealCategory::Snack,
            &["peanuts"],
            HalfAvailability::Both,
        ))
        .await
        .unwrap();

    Catalog {
        standard,
        performance,
        oats,
        chicken,
        satay,
        salmon,
        protein_bar,
    }
}

/// Register a customer on `tier` with a 5 day, 2 meal plan including breakfast
pub async fn subscribed_customer(
    service: &Service,
    email: &str,
    tier: &Tier,
    allergies: &[&str],
) -> Customer {
    let customer = service.register_customer(new_customer(email)).await.unwrap();
    service
        .update_preferences(
            customer.id,
            PreferencesUpdate {
                tier_id: tier.id,
                plan: plan(5, 2, true),
                allergies: allergies.iter().map(|a| a.to_string()).collect(),
                dietary_notes: None,
            },
        )
        .await
        .unwrap()
}

pub fn line(item: &MenuItem, week_half: WeekHalf, quantity: u32) -> OrderLineRequest {
    OrderLineRequest {
        menu_item_id: item.id,
        week_half,
        quantity,
    }
}

pub fn submission(lines: Vec<OrderLineRequest>) -> OrderSubmission {
    OrderSubmission {
        week_start: Some(week()),
        lines,
        notes: None,
    }
}

pub fn random_id() -> Uuid {
    Uuid::new_v4()
}

//! Contract models for the meal service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ===== Customers =====

/// Customer profile with the preferences captured by the onboarding wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    /// Stored lowercase, unique
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer preferences (tier, plan, allergies)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub tier_id: Option<Uuid>,
    pub plan: Option<MealPlan>,
    /// Normalized allergen names (trimmed, lowercase, deduplicated)
    pub allergies: Vec<String>,
    pub dietary_notes: Option<String>,
}

/// Weekly meal plan selected by the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealPlan {
    pub days_per_week: u8,
    pub meals_per_day: u8,
    pub include_breakfast: bool,
}

/// Input for registering a customer profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    /// Identity assigned by the upstream auth layer, generated when absent
    pub id: Option<Uuid>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

/// Final payload of the preferences wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesUpdate {
    pub tier_id: Uuid,
    pub plan: MealPlan,
    pub allergies: Vec<String>,
    pub dietary_notes: Option<String>,
}

// ===== Tiers =====

/// Calorie/nutrition-target subscription level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub calorie_target: u32,
    pub protein_target_g: u32,
    /// Weekly price in cents
    pub price_cents: i64,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierInput {
    pub name: String,
    pub description: String,
    pub calorie_target: u32,
    pub protein_target_g: u32,
    pub price_cents: i64,
    pub sort_order: i32,
    pub active: bool,
}

// ===== Menu =====

/// Meal category; only breakfasts and mains count against the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MealCategory {
    Breakfast,
    Main,
    Snack,
}

impl MealCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Main => "main",
            Self::Snack => "snack",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "main" => Ok(Self::Main),
            "snack" => Ok(Self::Snack),
            other => Err(format!("unknown meal category '{}'", other)),
        }
    }
}

/// Pickup window inside a week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeekHalf {
    /// Sunday/Monday pickup
    First,
    /// Wednesday/Thursday pickup
    Second,
}

impl WeekHalf {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
        }
    }

    /// Human label for the pickup days
    pub fn pickup_days(&self) -> &'static str {
        match self {
            Self::First => "Sun/Mon",
            Self::Second => "Wed/Thu",
        }
    }
}

impl fmt::Display for WeekHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekHalf {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "second" => Ok(Self::Second),
            other => Err(format!("unknown week half '{}'", other)),
        }
    }
}

/// Which halves of the week an item is offered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HalfAvailability {
    First,
    Second,
    Both,
}

impl HalfAvailability {
    pub fn includes(&self, half: WeekHalf) -> bool {
        matches!(
            (self, half),
            (Self::Both, _) | (Self::First, WeekHalf::First) | (Self::Second, WeekHalf::Second)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Both => "both",
        }
    }
}

impl FromStr for HalfAvailability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "second" => Ok(Self::Second),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown availability '{}'", other)),
        }
    }
}

/// Menu item offered to customers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: MealCategory,
    /// Normalized allergen tags
    pub allergens: Vec<String>,
    pub calories: Option<u32>,
    pub protein_g: Option<u32>,
    /// A la carte price in cents, charged for snacks only
    pub price_cents: i64,
    /// Part of the default menu used when no weekly menu exists
    pub always_available: bool,
    pub availability: HalfAvailability,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a menu item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemInput {
    pub name: String,
    pub description: String,
    pub category: MealCategory,
    pub allergens: Vec<String>,
    pub calories: Option<u32>,
    pub protein_g: Option<u32>,
    pub price_cents: i64,
    pub always_available: bool,
    pub availability: HalfAvailability,
    pub active: bool,
}

/// Admin-curated menu for one week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyMenu {
    pub id: Uuid,
    /// Always a Sunday
    pub week_start: NaiveDate,
    pub entries: Vec<WeeklyMenuEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyMenuEntry {
    pub menu_item_id: Uuid,
    pub availability: HalfAvailability,
}

/// Where a resolved menu came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSource {
    Weekly,
    Default,
}

/// Menu resolved for a week, split by pickup half
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableMenu {
    pub week_start: NaiveDate,
    pub source: MenuSource,
    pub first_half: Vec<MenuItem>,
    pub second_half: Vec<MenuItem>,
}

impl AvailableMenu {
    pub fn items_for(&self, half: WeekHalf) -> &[MenuItem] {
        match half {
            WeekHalf::First => &self.first_half,
            WeekHalf::Second => &self.second_half,
        }
    }

    pub fn find(&self, menu_item_id: Uuid, half: WeekHalf) -> Option<&MenuItem> {
        self.items_for(half).iter().find(|item| item.id == menu_item_id)
    }
}

// ===== Orders =====

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
        }
    }

    /// Statuses only move forward
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        next > *self
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown order status '{}'", other)),
        }
    }
}

/// Weekly order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub tier_id: Option<Uuid>,
    pub week_start: NaiveDate,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub totals: OrderTotals,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order line item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: Uuid,
    pub menu_item_id: Uuid,
    pub menu_item_name: String,
    pub category: MealCategory,
    pub week_half: WeekHalf,
    pub quantity: u32,
    pub unit_price_cents: i64,
    /// Item allergens intersect the customer's allergies
    pub allergen_conflict: bool,
}

/// Monetary breakdown of an order, in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderTotals {
    pub plan_cents: i64,
    pub extras_cents: i64,
    pub allergen_surcharge_cents: i64,
    pub total_cents: i64,
}

/// One requested line of an order submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLineRequest {
    pub menu_item_id: Uuid,
    pub week_half: WeekHalf,
    pub quantity: u32,
}

/// Order payload serialized by the ordering wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSubmission {
    /// Defaults to the current week
    pub week_start: Option<NaiveDate>,
    pub lines: Vec<OrderLineRequest>,
    pub notes: Option<String>,
}

/// Checkout summary computed without persisting anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuote {
    pub week_start: NaiveDate,
    pub tier_id: Option<Uuid>,
    pub items: Vec<OrderItem>,
    pub totals: OrderTotals,
    pub conflicting_allergens: Vec<String>,
}

/// Quota usage for a customer and week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allowance {
    pub week_start: NaiveDate,
    pub breakfast_limit: u32,
    pub main_limit: u32,
    pub breakfasts_used: u32,
    pub mains_used: u32,
    pub snacks_selected: u32,
}

impl Allowance {
    pub fn breakfasts_remaining(&self) -> u32 {
        self.breakfast_limit.saturating_sub(self.breakfasts_used)
    }

    pub fn mains_remaining(&self) -> u32 {
        self.main_limit.saturating_sub(self.mains_used)
    }
}

// ===== Challenges =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Challenge {
    /// Whether customers can join on the given date
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.active && self.starts_on <= date && date <= self.ends_on
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeInput {
    pub name: String,
    pub description: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeParticipant {
    pub id: Uuid,
    pub challenge_id: Uuid,
    pub customer_id: Uuid,
    pub tier_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

// ===== Kitchen =====

/// Aggregated prep report for one week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenReport {
    pub week_start: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub order_count: usize,
    pub total_portions: u32,
    pub tiers: Vec<KitchenTierSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenTierSection {
    /// None groups orders placed without a tier
    pub tier_id: Option<Uuid>,
    pub tier_name: String,
    pub total_portions: u32,
    pub meals: Vec<KitchenMealLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenMealLine {
    pub menu_item_id: Uuid,
    pub menu_item_name: String,
    pub category: MealCategory,
    pub first_half: u32,
    pub second_half: u32,
    /// Portions needing allergen-safe prep, per half
    pub first_half_flagged: u32,
    pub second_half_flagged: u32,
}

impl KitchenMealLine {
    pub fn total(&self) -> u32 {
        self.first_half + self.second_half
    }

    pub fn allergen_flagged(&self) -> u32 {
        self.first_half_flagged + self.second_half_flagged
    }
}

/// Persisted prep line of the last generated report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenOrder {
    pub id: Uuid,
    pub week_start: NaiveDate,
    pub tier_id: Option<Uuid>,
    pub tier_name: String,
    pub menu_item_id: Uuid,
    pub menu_item_name: String,
    pub category: MealCategory,
    pub week_half: WeekHalf,
    pub quantity: u32,
    pub allergen_flagged: u32,
    pub generated_at: DateTime<Utc>,
}

// ===== Caller =====

/// Caller identity forwarded by the upstream auth layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub customer_id: Option<Uuid>,
    pub is_admin: bool,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn customer(customer_id: Uuid) -> Self {
        Self {
            customer_id: Some(customer_id),
            is_admin: false,
        }
    }

    pub fn admin(customer_id: Option<Uuid>) -> Self {
        Self {
            customer_id,
            is_admin: true,
        }
    }
}

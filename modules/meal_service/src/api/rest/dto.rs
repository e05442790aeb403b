//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Envelope =====

/// Success envelope wrapping every JSON payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Optional `?week=YYYY-MM-DD` filter; any date selects its Sunday-based week
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeekQuery {
    pub week: Option<NaiveDate>,
}

// ===== Enumerations =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MealCategoryDto {
    Breakfast,
    Main,
    Snack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeekHalfDto {
    /// Sunday/Monday pickup
    First,
    /// Wednesday/Thursday pickup
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HalfAvailabilityDto {
    First,
    Second,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatusDto {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MenuSourceDto {
    Weekly,
    Default,
}

// ===== Tier DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TierDto {
    pub id: Uuid,
    #[schema(example = "Lean")]
    pub name: String,
    pub description: String,
    #[schema(example = 1800)]
    pub calorie_target: u32,
    pub protein_target_g: u32,
    /// Weekly price in cents
    #[schema(example = 11900)]
    pub price_cents: i64,
    #[schema(example = "$119.00")]
    pub price_display: String,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TierRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub calorie_target: u32,
    #[serde(default)]
    pub protein_target_g: u32,
    pub price_cents: i64,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTiersQuery {
    /// Include inactive tiers (admins only)
    #[serde(default)]
    pub all: bool,
}

fn default_true() -> bool {
    true
}

// ===== Customer DTOs =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct MealPlanDto {
    #[schema(example = 5)]
    pub days_per_week: u8,
    #[schema(example = 2)]
    pub meals_per_day: u8,
    #[serde(default)]
    pub include_breakfast: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreferencesDto {
    pub tier_id: Option<Uuid>,
    pub plan: Option<MealPlanDto>,
    pub allergies: Vec<String>,
    pub dietary_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerDto {
    pub id: Uuid,
    #[schema(example = "jane@example.com")]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub preferences: PreferencesDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterCustomerRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Final step of the preferences wizard
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePreferencesRequest {
    pub tier_id: Uuid,
    pub plan: MealPlanDto,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dietary_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AllowanceDto {
    pub week_start: NaiveDate,
    pub breakfast_limit: u32,
    pub main_limit: u32,
    pub breakfasts_used: u32,
    pub mains_used: u32,
    pub breakfasts_remaining: u32,
    pub mains_remaining: u32,
    pub snacks_selected: u32,
}

// ===== Menu DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuItemDto {
    pub id: Uuid,
    #[schema(example = "Grilled chicken & rice")]
    pub name: String,
    pub description: String,
    pub category: MealCategoryDto,
    pub allergens: Vec<String>,
    pub calories: Option<u32>,
    pub protein_g: Option<u32>,
    pub price_cents: i64,
    pub always_available: bool,
    pub availability: HalfAvailabilityDto,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MenuItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: MealCategoryDto,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub protein_g: Option<u32>,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub always_available: bool,
    #[serde(default = "default_availability")]
    pub availability: HalfAvailabilityDto,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_availability() -> HalfAvailabilityDto {
    HalfAvailabilityDto::Both
}

/// Menu resolved for a week
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuDto {
    pub week_start: NaiveDate,
    pub source: MenuSourceDto,
    pub first_half: Vec<MenuItemDto>,
    pub second_half: Vec<MenuItemDto>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct WeeklyMenuEntryDto {
    pub menu_item_id: Uuid,
    #[serde(default = "default_availability")]
    pub availability: HalfAvailabilityDto,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WeeklyMenuRequest {
    pub items: Vec<WeeklyMenuEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeeklyMenuDto {
    pub id: Uuid,
    pub week_start: NaiveDate,
    pub items: Vec<WeeklyMenuEntryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===== Order DTOs =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct OrderLineDto {
    pub menu_item_id: Uuid,
    pub week_half: WeekHalfDto,
    #[schema(example = 2)]
    pub quantity: u32,
}

/// Payload serialized by the ordering wizard
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderSubmissionRequest {
    /// Sunday of the ordered week; defaults to the current week
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
    #[serde(default)]
    pub lines: Vec<OrderLineDto>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    pub id: Uuid,
    pub menu_item_id: Uuid,
    pub menu_item_name: String,
    pub category: MealCategoryDto,
    pub week_half: WeekHalfDto,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub allergen_conflict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderTotalsDto {
    pub plan_cents: i64,
    pub extras_cents: i64,
    pub allergen_surcharge_cents: i64,
    pub total_cents: i64,
    #[schema(example = "$124.00")]
    pub total_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: Uuid,
    #[schema(example = "MP-20261018-0A1B2C3D")]
    pub order_number: String,
    pub customer_id: Uuid,
    pub tier_id: Option<Uuid>,
    pub week_start: NaiveDate,
    pub status: OrderStatusDto,
    pub items: Vec<OrderItemDto>,
    pub totals: OrderTotalsDto,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Checkout summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderQuoteDto {
    pub week_start: NaiveDate,
    pub tier_id: Option<Uuid>,
    pub items: Vec<OrderItemDto>,
    pub totals: OrderTotalsDto,
    pub conflicting_allergens: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatusDto,
}

// ===== Challenge DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChallengeDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChallengeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct JoinChallengeRequest {
    /// Defaults to the customer's subscription tier
    #[serde(default)]
    pub tier_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantDto {
    pub id: Uuid,
    pub challenge_id: Uuid,
    pub customer_id: Uuid,
    pub tier_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

// ===== Kitchen DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KitchenMealDto {
    pub menu_item_id: Uuid,
    pub menu_item_name: String,
    pub category: MealCategoryDto,
    pub first_half: u32,
    pub second_half: u32,
    pub total: u32,
    /// Portions requiring allergen-safe preparation
    pub allergen_flagged: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KitchenTierDto {
    pub tier_id: Option<Uuid>,
    pub tier_name: String,
    pub total_portions: u32,
    pub meals: Vec<KitchenMealDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KitchenReportDto {
    pub week_start: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub order_count: usize,
    pub total_portions: u32,
    pub tiers: Vec<KitchenTierDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KitchenOrderDto {
    pub id: Uuid,
    pub week_start: NaiveDate,
    pub tier_id: Option<Uuid>,
    pub tier_name: String,
    pub menu_item_id: Uuid,
    pub menu_item_name: String,
    pub category: MealCategoryDto,
    pub week_half: WeekHalfDto,
    pub quantity: u32,
    pub allergen_flagged: u32,
    pub generated_at: DateTime<Utc>,
}

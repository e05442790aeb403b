//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{
    challenge, challenge_participant, customer, kitchen_order, menu_item, order, order_item,
    tier, weekly_menu, weekly_menu_item,
};
use crate::contract::{
    Challenge, ChallengeParticipant, Customer, KitchenOrder, MealPlan, MenuItem, Order,
    OrderItem, OrderTotals, Preferences, Tier, WeeklyMenu, WeeklyMenuEntry,
};
use anyhow::{anyhow, Context, Result};
use sea_orm::ActiveValue::Set;
use std::str::FromStr;
use uuid::Uuid;

// ===== Column Helpers =====

fn parse_column<T>(column: &str, value: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e: String| anyhow!("invalid {} column: {}", column, e))
}

fn to_u32(column: &str, value: i32) -> Result<u32> {
    u32::try_from(value).with_context(|| format!("negative {} column: {}", column, value))
}

/// Catalog nutrition values are range-checked before they reach storage
fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn allergen_list(column: &str, value: serde_json::Value) -> Result<Vec<String>> {
    serde_json::from_value(value).with_context(|| format!("invalid {} column", column))
}

// ===== Customer Conversions =====

impl TryFrom<customer::Model> for Customer {
    type Error = anyhow::Error;

    fn try_from(entity: customer::Model) -> Result<Self> {
        let plan = match (entity.days_per_week, entity.meals_per_day) {
            (Some(days), Some(meals)) => Some(MealPlan {
                days_per_week: u8::try_from(days).context("days_per_week out of range")?,
                meals_per_day: u8::try_from(meals).context("meals_per_day out of range")?,
                include_breakfast: entity.include_breakfast.unwrap_or(false),
            }),
            _ => None,
        };

        Ok(Self {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone: entity.phone,
            preferences: Preferences {
                tier_id: entity.tier_id,
                plan,
                allergies: allergen_list("allergies", entity.allergies)?,
                dietary_notes: entity.dietary_notes,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&Customer> for customer::ActiveModel {
    fn from(model: &Customer) -> Self {
        let plan = model.preferences.plan;
        Self {
            id: Set(model.id),
            email: Set(model.email.clone()),
            first_name: Set(model.first_name.clone()),
            last_name: Set(model.last_name.clone()),
            phone: Set(model.phone.clone()),
            tier_id: Set(model.preferences.tier_id),
            days_per_week: Set(plan.map(|p| i32::from(p.days_per_week))),
            meals_per_day: Set(plan.map(|p| i32::from(p.meals_per_day))),
            include_breakfast: Set(plan.map(|p| p.include_breakfast)),
            allergies: Set(serde_json::Value::from(model.preferences.allergies.clone())),
            dietary_notes: Set(model.preferences.dietary_notes.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Tier Conversions =====

impl TryFrom<tier::Model> for Tier {
    type Error = anyhow::Error;

    fn try_from(entity: tier::Model) -> Result<Self> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            calorie_target: to_u32("calorie_target", entity.calorie_target)?,
            protein_target_g: to_u32("protein_target_g", entity.protein_target_g)?,
            price_cents: entity.price_cents,
            sort_order: entity.sort_order,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&Tier> for tier::ActiveModel {
    fn from(model: &Tier) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            calorie_target: Set(to_i32(model.calorie_target)),
            protein_target_g: Set(to_i32(model.protein_target_g)),
            price_cents: Set(model.price_cents),
            sort_order: Set(model.sort_order),
            active: Set(model.active),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Menu Conversions =====

impl TryFrom<menu_item::Model> for MenuItem {
    type Error = anyhow::Error;

    fn try_from(entity: menu_item::Model) -> Result<Self> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            category: parse_column("category", &entity.category)?,
            allergens: allergen_list("allergens", entity.allergens)?,
            calories: entity.calories.map(|v| to_u32("calories", v)).transpose()?,
            protein_g: entity.protein_g.map(|v| to_u32("protein_g", v)).transpose()?,
            price_cents: entity.price_cents,
            always_available: entity.always_available,
            availability: parse_column("availability", &entity.availability)?,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&MenuItem> for menu_item::ActiveModel {
    fn from(model: &MenuItem) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            category: Set(model.category.as_str().to_string()),
            allergens: Set(serde_json::Value::from(model.allergens.clone())),
            calories: Set(model.calories.map(to_i32)),
            protein_g: Set(model.protein_g.map(to_i32)),
            price_cents: Set(model.price_cents),
            always_available: Set(model.always_available),
            availability: Set(model.availability.as_str().to_string()),
            active: Set(model.active),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

/// Weekly menu from its header and entries (entries sorted by position)
pub fn weekly_menu_from_entities(
    header: weekly_menu::Model,
    mut entries: Vec<weekly_menu_item::Model>,
) -> Result<WeeklyMenu> {
    entries.sort_by_key(|e| e.position);
    let entries = entries
        .into_iter()
        .map(|e| {
            Ok(WeeklyMenuEntry {
                menu_item_id: e.menu_item_id,
                availability: parse_column("availability", &e.availability)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(WeeklyMenu {
        id: header.id,
        week_start: header.week_start,
        entries,
        created_at: header.created_at,
        updated_at: header.updated_at,
    })
}

impl From<&WeeklyMenu> for weekly_menu::ActiveModel {
    fn from(model: &WeeklyMenu) -> Self {
        Self {
            id: Set(model.id),
            week_start: Set(model.week_start),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

pub fn weekly_menu_item_active(
    weekly_menu_id: Uuid,
    position: usize,
    entry: &WeeklyMenuEntry,
) -> weekly_menu_item::ActiveModel {
    weekly_menu_item::ActiveModel {
        weekly_menu_id: Set(weekly_menu_id),
        menu_item_id: Set(entry.menu_item_id),
        availability: Set(entry.availability.as_str().to_string()),
        position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
    }
}

// ===== Order Conversions =====

/// Order from its header and line items (items sorted by position)
pub fn order_from_entities(
    header: order::Model,
    mut items: Vec<order_item::Model>,
) -> Result<Order> {
    items.sort_by_key(|i| i.position);
    let items = items
        .into_iter()
        .map(|i| {
            Ok(OrderItem {
                id: i.id,
                menu_item_id: i.menu_item_id,
                menu_item_name: i.menu_item_name,
                category: parse_column("category", &i.category)?,
                week_half: parse_column("week_half", &i.week_half)?,
                quantity: to_u32("quantity", i.quantity)?,
                unit_price_cents: i.unit_price_cents,
                allergen_conflict: i.allergen_conflict,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Order {
        id: header.id,
        order_number: header.order_number,
        customer_id: header.customer_id,
        tier_id: header.tier_id,
        week_start: header.week_start,
        status: parse_column("status", &header.status)?,
        items,
        totals: OrderTotals {
            plan_cents: header.plan_cents,
            extras_cents: header.extras_cents,
            allergen_surcharge_cents: header.allergen_surcharge_cents,
            total_cents: header.total_cents,
        },
        notes: header.notes,
        created_at: header.created_at,
        updated_at: header.updated_at,
    })
}

impl From<&Order> for order::ActiveModel {
    fn from(model: &Order) -> Self {
        Self {
            id: Set(model.id),
            order_number: Set(model.order_number.clone()),
            customer_id: Set(model.customer_id),
            tier_id: Set(model.tier_id),
            week_start: Set(model.week_start),
            status: Set(model.status.as_str().to_string()),
            plan_cents: Set(model.totals.plan_cents),
            extras_cents: Set(model.totals.extras_cents),
            allergen_surcharge_cents: Set(model.totals.allergen_surcharge_cents),
            total_cents: Set(model.totals.total_cents),
            notes: Set(model.notes.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

pub fn order_item_active(
    order_id: Uuid,
    position: usize,
    item: &OrderItem,
) -> order_item::ActiveModel {
    order_item::ActiveModel {
        id: Set(item.id),
        order_id: Set(order_id),
        menu_item_id: Set(item.menu_item_id),
        menu_item_name: Set(item.menu_item_name.clone()),
        category: Set(item.category.as_str().to_string()),
        week_half: Set(item.week_half.as_str().to_string()),
        quantity: Set(to_i32(item.quantity)),
        unit_price_cents: Set(item.unit_price_cents),
        allergen_conflict: Set(item.allergen_conflict),
        position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
    }
}

// ===== Challenge Conversions =====

impl From<challenge::Model> for Challenge {
    fn from(entity: challenge::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            starts_on: entity.starts_on,
            ends_on: entity.ends_on,
            active: entity.active,
            created_at: entity.created_at,
        }
    }
}

impl From<&Challenge> for challenge::ActiveModel {
    fn from(model: &Challenge) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            starts_on: Set(model.starts_on),
            ends_on: Set(model.ends_on),
            active: Set(model.active),
            created_at: Set(model.created_at),
        }
    }
}

impl From<challenge_participant::Model> for ChallengeParticipant {
    fn from(entity: challenge_participant::Model) -> Self {
        Self {
            id: entity.id,
            challenge_id: entity.challenge_id,
            customer_id: entity.customer_id,
            tier_id: entity.tier_id,
            joined_at: entity.joined_at,
        }
    }
}

impl From<&ChallengeParticipant> for challenge_participant::ActiveModel {
    fn from(model: &ChallengeParticipant) -> Self {
        Self {
            id: Set(model.id),
            challenge_id: Set(model.challenge_id),
            customer_id: Set(model.customer_id),
            tier_id: Set(model.tier_id),
            joined_at: Set(model.joined_at),
        }
    }
}

// ===== Kitchen Conversions =====

impl TryFrom<kitchen_order::Model> for KitchenOrder {
    type Error = anyhow::Error;

    fn try_from(entity: kitchen_order::Model) -> Result<Self> {
        Ok(Self {
            id: entity.id,
            week_start: entity.week_start,
            tier_id: entity.tier_id,
            tier_name: entity.tier_name,
            menu_item_id: entity.menu_item_id,
            menu_item_name: entity.menu_item_name,
            category: parse_column("category", &entity.category)?,
            week_half: parse_column("week_half", &entity.week_half)?,
            quantity: to_u32("quantity", entity.quantity)?,
            allergen_flagged: to_u32("allergen_flagged", entity.allergen_flagged)?,
            generated_at: entity.generated_at,
        })
    }
}

pub fn kitchen_order_active(position: usize, line: &KitchenOrder) -> kitchen_order::ActiveModel {
    kitchen_order::ActiveModel {
        id: Set(line.id),
        week_start: Set(line.week_start),
        tier_id: Set(line.tier_id),
        tier_name: Set(line.tier_name.clone()),
        menu_item_id: Set(line.menu_item_id),
        menu_item_name: Set(line.menu_item_name.clone()),
        category: Set(line.category.as_str().to_string()),
        week_half: Set(line.week_half.as_str().to_string()),
        quantity: Set(to_i32(line.quantity)),
        allergen_flagged: Set(to_i32(line.allergen_flagged)),
        position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
        generated_at: Set(line.generated_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{MealCategory, OrderStatus, WeekHalf};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_customer_without_plan_maps_to_none() {
        let now = Utc::now();
        let entity = customer::Model {
            id: Uuid::new_v4(),
            email: "a@b.co".to_string(),
            first_name: "Ada".to_string(),
            last_name: "L".to_string(),
            phone: None,
            tier_id: None,
            days_per_week: None,
            meals_per_day: Some(2),
            include_breakfast: None,
            allergies: serde_json::json!(["peanuts"]),
            dietary_notes: None,
            created_at: now,
            updated_at: now,
        };
        let customer = Customer::try_from(entity).unwrap();
        assert_eq!(customer.preferences.plan, None);
        assert_eq!(customer.preferences.allergies, vec!["peanuts".to_string()]);
    }

    #[test]
    fn test_order_items_sorted_by_position() {
        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let header = order::Model {
            id: order_id,
            order_number: "MP-20261018-ABCDEF12".to_string(),
            customer_id: Uuid::new_v4(),
            tier_id: None,
            week_start: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            status: "confirmed".to_string(),
            plan_cents: 10_000,
            extras_cents: 0,
            allergen_surcharge_cents: 0,
            total_cents: 10_000,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let item = |position: i32, name: &str| order_item::Model {
            id: Uuid::new_v4(),
            order_id,
            menu_item_id: Uuid::new_v4(),
            menu_item_name: name.to_string(),
            category: "main".to_string(),
            week_half: "second".to_string(),
            quantity: 2,
            unit_price_cents: 0,
            allergen_conflict: false,
            position,
        };

        let order = order_from_entities(header, vec![item(1, "B"), item(0, "A")]).unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.items[0].menu_item_name, "A");
        assert_eq!(order.items[0].category, MealCategory::Main);
        assert_eq!(order.items[0].week_half, WeekHalf::Second);
    }

    #[test]
    fn test_unknown_enum_value_is_an_error() {
        let now = Utc::now();
        let entity = kitchen_order::Model {
            id: Uuid::new_v4(),
            week_start: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            tier_id: None,
            tier_name: "Unassigned".to_string(),
            menu_item_id: Uuid::new_v4(),
            menu_item_name: "Soup".to_string(),
            category: "dessert".to_string(),
            week_half: "first".to_string(),
            quantity: 1,
            allergen_flagged: 0,
            position: 0,
            generated_at: now,
        };
        assert!(KitchenOrder::try_from(entity).is_err());
    }
}

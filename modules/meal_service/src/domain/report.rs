//! Kitchen report aggregation and CSV rendering

use crate::contract::{
    KitchenMealLine, KitchenOrder, KitchenReport, KitchenTierSection, Order, Tier, WeekHalf,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::borrow::Cow;
use std::collections::HashMap;
use uuid::Uuid;

const UNASSIGNED_TIER: &str = "Unassigned";

pub const CSV_HEADER: &str = "tier,meal,category,first_half,second_half,total,allergen_flagged";

/// Group the week's order lines by tier, then by meal
pub fn aggregate(
    week_start: NaiveDate,
    orders: &[Order],
    tiers: &HashMap<Uuid, Tier>,
    generated_at: DateTime<Utc>,
) -> KitchenReport {
    let mut sections: HashMap<Option<Uuid>, HashMap<Uuid, KitchenMealLine>> = HashMap::new();

    for order in orders.iter().filter(|o| o.week_start == week_start) {
        let meals = sections.entry(order.tier_id).or_default();
        for item in &order.items {
            let line = meals
                .entry(item.menu_item_id)
                .or_insert_with(|| KitchenMealLine {
                    menu_item_id: item.menu_item_id,
                    menu_item_name: item.menu_item_name.clone(),
                    category: item.category,
                    first_half: 0,
                    second_half: 0,
                    first_half_flagged: 0,
                    second_half_flagged: 0,
                });
            let flagged = if item.allergen_conflict { item.quantity } else { 0 };
            match item.week_half {
                WeekHalf::First => {
                    line.first_half += item.quantity;
                    line.first_half_flagged += flagged;
                }
                WeekHalf::Second => {
                    line.second_half += item.quantity;
                    line.second_half_flagged += flagged;
                }
            }
        }
    }

    let mut tier_sections: Vec<(Option<(i32, String)>, KitchenTierSection)> = sections
        .into_iter()
        .map(|(tier_id, meals)| {
            let tier = tier_id.and_then(|id| tiers.get(&id));
            let tier_name = match (tier_id, tier) {
                (None, _) => UNASSIGNED_TIER.to_string(),
                (Some(_), Some(tier)) => tier.name.clone(),
                (Some(id), None) => format!("Tier {}", id),
            };
            let sort_key = tier_id.map(|_| {
                let sort_order = tier.map(|t| t.sort_order).unwrap_or(i32::MAX);
                (sort_order, tier_name.clone())
            });

            let mut meals: Vec<KitchenMealLine> = meals.into_values().collect();
            meals.sort_by(|a, b| {
                a.category
                    .cmp(&b.category)
                    .then_with(|| a.menu_item_name.cmp(&b.menu_item_name))
                    .then_with(|| a.menu_item_id.cmp(&b.menu_item_id))
            });
            let total_portions = meals.iter().map(KitchenMealLine::total).sum();

            (
                sort_key,
                KitchenTierSection {
                    tier_id,
                    tier_name,
                    total_portions,
                    meals,
                },
            )
        })
        .collect();

    // Known tiers by sort order and name, unassigned last
    tier_sections.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let tiers: Vec<KitchenTierSection> = tier_sections.into_iter().map(|(_, s)| s).collect();
    let total_portions = tiers.iter().map(|s| s.total_portions).sum();
    let order_count = orders.iter().filter(|o| o.week_start == week_start).count();

    KitchenReport {
        week_start,
        generated_at,
        order_count,
        total_portions,
        tiers,
    }
}

/// Flatten a report into per-half prep lines
pub fn prep_lines(report: &KitchenReport) -> Vec<KitchenOrder> {
    let mut lines = Vec::new();
    for section in &report.tiers {
        for meal in &section.meals {
            for (half, quantity, allergen_flagged) in [
                (WeekHalf::First, meal.first_half, meal.first_half_flagged),
                (WeekHalf::Second, meal.second_half, meal.second_half_flagged),
            ] {
                if quantity == 0 {
                    continue;
                }
                lines.push(KitchenOrder {
                    id: Uuid::new_v4(),
                    week_start: report.week_start,
                    tier_id: section.tier_id,
                    tier_name: section.tier_name.clone(),
                    menu_item_id: meal.menu_item_id,
                    menu_item_name: meal.menu_item_name.clone(),
                    category: meal.category,
                    week_half: half,
                    quantity,
                    allergen_flagged,
                    generated_at: report.generated_at,
                });
            }
        }
    }
    lines
}

/// Render the report as CSV, one row per tier and meal
pub fn render_csv(report: &KitchenReport) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for section in &report.tiers {
        for meal in &section.meals {
            let row = [
                csv_field(&section.tier_name),
                csv_field(&meal.menu_item_name),
                Cow::Borrowed(meal.category.as_str()),
                Cow::Owned(meal.first_half.to_string()),
                Cow::Owned(meal.second_half.to_string()),
                Cow::Owned(meal.total().to_string()),
                Cow::Owned(meal.allergen_flagged().to_string()),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }
    }
    out
}

/// Quote a field when it contains a separator, quote or line break
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

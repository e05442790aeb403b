//! Order pricing and allergen surcharge

use crate::config::{Config, SurchargePolicy};
use crate::contract::{MealCategory, MenuItem, OrderItem, OrderTotals, WeekHalf};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Trim, lowercase, drop empties and deduplicate allergen names
pub fn normalize_allergens<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Allergens present both on the item and in the customer's allergy list
pub fn conflicting_allergens(item_allergens: &[String], allergies: &[String]) -> Vec<String> {
    let item: BTreeSet<String> = normalize_allergens(item_allergens).into_iter().collect();
    let declared: BTreeSet<String> = normalize_allergens(allergies).into_iter().collect();
    item.intersection(&declared).cloned().collect()
}

/// A resolved line ready to be priced
#[derive(Debug, Clone, Copy)]
pub struct SelectedLine<'a> {
    pub item: &'a MenuItem,
    pub week_half: WeekHalf,
    pub quantity: u32,
}

/// Priced order lines with totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedSelection {
    pub items: Vec<OrderItem>,
    pub totals: OrderTotals,
    pub conflicting_allergens: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    pub surcharge_cents: i64,
    pub policy: SurchargePolicy,
}

impl Pricing {
    pub fn from_config(config: &Config) -> Self {
        Self {
            surcharge_cents: config.allergen_surcharge_cents,
            policy: config.surcharge_policy,
        }
    }

    /// Surcharge for the given number of conflicting portions
    pub fn surcharge(&self, conflicting_portions: u32) -> i64 {
        if conflicting_portions == 0 {
            return 0;
        }
        match self.policy {
            SurchargePolicy::PerOrder => self.surcharge_cents,
            SurchargePolicy::PerMeal => self.surcharge_cents * i64::from(conflicting_portions),
        }
    }

    /// Price the lines. Breakfasts and mains are covered by the plan price;
    /// snacks are charged at their a la carte price.
    pub fn price(
        &self,
        plan_price_cents: i64,
        allergies: &[String],
        lines: &[SelectedLine<'_>],
    ) -> PricedSelection {
        let mut items = Vec::with_capacity(lines.len());
        let mut extras_cents = 0i64;
        let mut conflicting_portions = 0u32;
        let mut conflicts = BTreeSet::new();

        for line in lines {
            let matched = conflicting_allergens(&line.item.allergens, allergies);
            let allergen_conflict = !matched.is_empty();
            if allergen_conflict {
                conflicting_portions += line.quantity;
                conflicts.extend(matched);
            }

            let unit_price_cents = match line.item.category {
                MealCategory::Snack => line.item.price_cents,
                MealCategory::Breakfast | MealCategory::Main => 0,
            };
            extras_cents += unit_price_cents * i64::from(line.quantity);

            items.push(OrderItem {
                id: Uuid::new_v4(),
                menu_item_id: line.item.id,
                menu_item_name: line.item.name.clone(),
                category: line.item.category,
                week_half: line.week_half,
                quantity: line.quantity,
                unit_price_cents,
                allergen_conflict,
            });
        }

        let allergen_surcharge_cents = self.surcharge(conflicting_portions);
        let totals = OrderTotals {
            plan_cents: plan_price_cents,
            extras_cents,
            allergen_surcharge_cents,
            total_cents: plan_price_cents + extras_cents + allergen_surcharge_cents,
        };

        PricedSelection {
            items,
            totals,
            conflicting_allergens: conflicts.into_iter().collect(),
        }
    }
}

/// Render cents as a dollar amount, e.g. `1250` -> `12.50`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::HalfAvailability;
    use chrono::Utc;

    fn item(name: &str, category: MealCategory, allergens: &[&str], price_cents: i64) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            category,
            allergens: allergens.iter().map(|a| a.to_string()).collect(),
            calories: None,
            protein_g: None,
            price_cents,
            always_available: true,
            availability: HalfAvailability::Both,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn per_order() -> Pricing {
        Pricing {
            surcharge_cents: 500,
            policy: SurchargePolicy::PerOrder,
        }
    }

    #[test]
    fn test_normalize_allergens() {
        let normalized = normalize_allergens(["  Peanuts", "dairy", "DAIRY", "", "  "]);
        assert_eq!(normalized, vec!["dairy".to_string(), "peanuts".to_string()]);
    }

    #[test]
    fn test_conflicts_are_case_insensitive() {
        let conflicts = conflicting_allergens(
            &["Gluten".to_string(), "Soy".to_string()],
            &[" soy ".to_string(), "shellfish".to_string()],
        );
        assert_eq!(conflicts, vec!["soy".to_string()]);
        assert!(conflicting_allergens(&["gluten".to_string()], &[]).is_empty());
    }

    #[test]
    fn test_single_flat_surcharge_per_order() {
        let pasta = item("Pasta", MealCategory::Main, &["gluten", "dairy"], 0);
        let pancakes = item("Pancakes", MealCategory::Breakfast, &["gluten"], 0);
        let salad = item("Salad", MealCategory::Main, &[], 0);
        let allergies = vec!["gluten".to_string()];
        let lines = [
            SelectedLine { item: &pasta, week_half: WeekHalf::First, quantity: 3 },
            SelectedLine { item: &pancakes, week_half: WeekHalf::Second, quantity: 2 },
            SelectedLine { item: &salad, week_half: WeekHalf::Second, quantity: 1 },
        ];

        let priced = per_order().price(12_000, &allergies, &lines);
        assert_eq!(priced.totals.allergen_surcharge_cents, 500);
        assert_eq!(priced.totals.total_cents, 12_500);
        assert_eq!(priced.conflicting_allergens, vec!["gluten".to_string()]);
        let flagged: Vec<bool> = priced.items.iter().map(|i| i.allergen_conflict).collect();
        assert_eq!(flagged, vec![true, true, false]);
    }

    #[test]
    fn test_per_meal_surcharge_counts_portions() {
        let pasta = item("Pasta", MealCategory::Main, &["gluten"], 0);
        let bar = item("Protein bar", MealCategory::Snack, &["peanuts"], 350);
        let allergies = vec!["Gluten".to_string(), "peanuts".to_string()];
        let lines = [
            SelectedLine { item: &pasta, week_half: WeekHalf::First, quantity: 2 },
            SelectedLine { item: &bar, week_half: WeekHalf::First, quantity: 1 },
        ];
        let pricing = Pricing {
            surcharge_cents: 500,
            policy: SurchargePolicy::PerMeal,
        };

        let priced = pricing.price(0, &allergies, &lines);
        assert_eq!(priced.totals.allergen_surcharge_cents, 1_500);
        assert_eq!(priced.totals.extras_cents, 350);
        assert_eq!(priced.totals.total_cents, 1_850);
    }

    #[test]
    fn test_no_surcharge_without_overlap() {
        let pasta = item("Pasta", MealCategory::Main, &["gluten"], 0);
        let lines = [SelectedLine { item: &pasta, week_half: WeekHalf::First, quantity: 4 }];
        let priced = per_order().price(9_900, &["shellfish".to_string()], &lines);
        assert_eq!(priced.totals.allergen_surcharge_cents, 0);
        assert_eq!(priced.totals.total_cents, 9_900);
        assert!(priced.conflicting_allergens.is_empty());
    }

    #[test]
    fn test_only_snacks_are_charged() {
        let main = item("Steak", MealCategory::Main, &[], 1_500);
        let snack = item("Trail mix", MealCategory::Snack, &[], 275);
        let lines = [
            SelectedLine { item: &main, week_half: WeekHalf::First, quantity: 2 },
            SelectedLine { item: &snack, week_half: WeekHalf::Second, quantity: 4 },
        ];
        let priced = per_order().price(10_000, &[], &lines);
        assert_eq!(priced.items[0].unit_price_cents, 0);
        assert_eq!(priced.items[1].unit_price_cents, 275);
        assert_eq!(priced.totals.extras_cents, 1_100);
        assert_eq!(priced.totals.total_cents, 11_100);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(500), "5.00");
        assert_eq!(format_cents(12_345), "123.45");
        assert_eq!(format_cents(-75), "-0.75");
    }
}

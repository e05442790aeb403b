//! Meal quota allocation
//!
//! A plan grants `days_per_week * meals_per_day` mains and, when breakfast is
//! included, one breakfast per day. Both halves of the week draw from the same
//! allowance. Snacks are a la carte and never limited.

use crate::contract::{MealCategory, MealError, MealPlan, WeekHalf};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Per-category weekly limits derived from a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealAllowance {
    pub breakfasts: u32,
    pub mains: u32,
}

impl MealAllowance {
    pub fn for_plan(plan: &MealPlan) -> Self {
        let days = u32::from(plan.days_per_week);
        Self {
            breakfasts: if plan.include_breakfast { days } else { 0 },
            mains: days * u32::from(plan.meals_per_day),
        }
    }

    /// `None` means unlimited
    pub fn limit(&self, category: MealCategory) -> Option<u32> {
        match category {
            MealCategory::Breakfast => Some(self.breakfasts),
            MealCategory::Main => Some(self.mains),
            MealCategory::Snack => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SelectionLine {
    category: MealCategory,
    quantity: u32,
}

/// Running meal selection keyed by (menu item, week half)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealSelection {
    lines: BTreeMap<(Uuid, WeekHalf), SelectionLine>,
}

impl MealSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from raw lines, merging duplicates and dropping zeros
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = (Uuid, MealCategory, WeekHalf, u32)>,
    {
        let mut selection = Self::new();
        for (item_id, category, half, quantity) in lines {
            if quantity == 0 {
                continue;
            }
            selection
                .lines
                .entry((item_id, half))
                .and_modify(|line| line.quantity += quantity)
                .or_insert(SelectionLine { category, quantity });
        }
        selection
    }

    /// Add one portion, rejecting it once the category total reached the limit.
    /// Returns the new quantity of the line.
    pub fn increment(
        &mut self,
        item_id: Uuid,
        category: MealCategory,
        half: WeekHalf,
        allowance: &MealAllowance,
    ) -> Result<u32, MealError> {
        if let Some(limit) = allowance.limit(category) {
            let used = self.count(category);
            if used >= limit {
                return Err(MealError::QuotaExceeded {
                    category,
                    limit,
                    requested: used + 1,
                });
            }
        }

        let line = self
            .lines
            .entry((item_id, half))
            .or_insert(SelectionLine { category, quantity: 0 });
        line.quantity += 1;
        Ok(line.quantity)
    }

    /// Remove one portion. Floors at zero; empty lines disappear.
    pub fn decrement(&mut self, item_id: Uuid, half: WeekHalf) -> u32 {
        let key = (item_id, half);
        let Some(line) = self.lines.get_mut(&key) else {
            return 0;
        };
        line.quantity = line.quantity.saturating_sub(1);
        let remaining = line.quantity;
        if remaining == 0 {
            self.lines.remove(&key);
        }
        remaining
    }

    pub fn quantity(&self, item_id: Uuid, half: WeekHalf) -> u32 {
        self.lines
            .get(&(item_id, half))
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Total across both halves
    pub fn count(&self, category: MealCategory) -> u32 {
        self.lines
            .values()
            .filter(|line| line.category == category)
            .map(|line| line.quantity)
            .sum()
    }

    pub fn count_in_half(&self, category: MealCategory, half: WeekHalf) -> u32 {
        self.lines
            .iter()
            .filter(|((_, h), line)| *h == half && line.category == category)
            .map(|(_, line)| line.quantity)
            .sum()
    }

    /// Reject a selection whose breakfast or main total exceeds the allowance
    pub fn validate(&self, allowance: &MealAllowance) -> Result<(), MealError> {
        for category in [MealCategory::Breakfast, MealCategory::Main] {
            let requested = self.count(category);
            if let Some(limit) = allowance.limit(category) {
                if requested > limit {
                    return Err(MealError::QuotaExceeded {
                        category,
                        limit,
                        requested,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines as (menu item, half, category, quantity), ordered by item then half
    pub fn lines(&self) -> impl Iterator<Item = (Uuid, WeekHalf, MealCategory, u32)> + '_ {
        self.lines
            .iter()
            .map(|((item_id, half), line)| (*item_id, *half, line.category, line.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(days: u8, meals: u8, breakfast: bool) -> MealPlan {
        MealPlan {
            days_per_week: days,
            meals_per_day: meals,
            include_breakfast: breakfast,
        }
    }

    #[test]
    fn test_allowance_for_plan() {
        let allowance = MealAllowance::for_plan(&plan(5, 2, true));
        assert_eq!(allowance.mains, 10);
        assert_eq!(allowance.breakfasts, 5);
        assert_eq!(allowance.limit(MealCategory::Snack), None);

        let no_breakfast = MealAllowance::for_plan(&plan(7, 3, false));
        assert_eq!(no_breakfast.mains, 21);
        assert_eq!(no_breakfast.breakfasts, 0);
    }

    #[test]
    fn test_eleventh_main_rejected_across_halves() {
        let allowance = MealAllowance::for_plan(&plan(5, 2, false));
        let mut selection = MealSelection::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        for _ in 0..6 {
            selection
                .increment(a, MealCategory::Main, WeekHalf::First, &allowance)
                .unwrap();
        }
        for _ in 0..4 {
            selection
                .increment(b, MealCategory::Main, WeekHalf::Second, &allowance)
                .unwrap();
        }
        assert_eq!(selection.count(MealCategory::Main), 10);

        for half in [WeekHalf::First, WeekHalf::Second] {
            let err = selection
                .increment(b, MealCategory::Main, half, &allowance)
                .unwrap_err();
            assert_eq!(
                err,
                MealError::QuotaExceeded {
                    category: MealCategory::Main,
                    limit: 10,
                    requested: 11,
                }
            );
        }
        assert_eq!(selection.count(MealCategory::Main), 10);
    }

    #[test]
    fn test_breakfast_rejected_when_not_included() {
        let allowance = MealAllowance::for_plan(&plan(5, 1, false));
        let mut selection = MealSelection::new();
        let item = Uuid::new_v4();
        let result =
            selection.increment(item, MealCategory::Breakfast, WeekHalf::First, &allowance);
        assert!(matches!(
            result,
            Err(MealError::QuotaExceeded { category: MealCategory::Breakfast, limit: 0, .. })
        ));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_breakfast_limit_independent_from_mains() {
        let allowance = MealAllowance::for_plan(&plan(2, 1, true));
        let mut selection = MealSelection::new();
        let item = Uuid::new_v4();
        let main = Uuid::new_v4();

        selection.increment(main, MealCategory::Main, WeekHalf::First, &allowance).unwrap();
        selection.increment(main, MealCategory::Main, WeekHalf::Second, &allowance).unwrap();
        selection.increment(item, MealCategory::Breakfast, WeekHalf::First, &allowance).unwrap();
        selection.increment(item, MealCategory::Breakfast, WeekHalf::Second, &allowance).unwrap();

        assert!(selection
            .increment(item, MealCategory::Breakfast, WeekHalf::First, &allowance)
            .is_err());
        assert!(selection
            .increment(main, MealCategory::Main, WeekHalf::First, &allowance)
            .is_err());
    }

    #[test]
    fn test_snacks_unlimited() {
        let allowance = MealAllowance::for_plan(&plan(1, 1, false));
        let mut selection = MealSelection::new();
        let snack = Uuid::new_v4();
        for expected in 1..=50 {
            let qty = selection
                .increment(snack, MealCategory::Snack, WeekHalf::Second, &allowance)
                .unwrap();
            assert_eq!(qty, expected);
        }
        assert_eq!(selection.count(MealCategory::Snack), 50);
        assert!(selection.validate(&allowance).is_ok());
    }

    #[test]
    fn test_decrement_floors_at_zero_and_frees_quota() {
        let allowance = MealAllowance::for_plan(&plan(1, 1, false));
        let mut selection = MealSelection::new();
        let item = Uuid::new_v4();

        selection.increment(item, MealCategory::Main, WeekHalf::First, &allowance).unwrap();
        assert!(selection
            .increment(item, MealCategory::Main, WeekHalf::First, &allowance)
            .is_err());

        assert_eq!(selection.decrement(item, WeekHalf::First), 0);
        assert_eq!(selection.decrement(item, WeekHalf::First), 0);
        assert!(selection.is_empty());

        assert_eq!(
            selection.increment(item, MealCategory::Main, WeekHalf::Second, &allowance).unwrap(),
            1
        );
    }

    #[test]
    fn test_from_lines_merges_and_validates() {
        let item = Uuid::new_v4();
        let selection = MealSelection::from_lines([
            (item, MealCategory::Main, WeekHalf::First, 3),
            (item, MealCategory::Main, WeekHalf::First, 2),
            (item, MealCategory::Main, WeekHalf::Second, 0),
        ]);
        assert_eq!(selection.quantity(item, WeekHalf::First), 5);
        assert_eq!(selection.quantity(item, WeekHalf::Second), 0);
        assert_eq!(selection.count_in_half(MealCategory::Main, WeekHalf::First), 5);
        assert_eq!(selection.lines().count(), 1);

        let tight = MealAllowance { breakfasts: 0, mains: 4 };
        assert!(matches!(
            selection.validate(&tight),
            Err(MealError::QuotaExceeded { requested: 5, limit: 4, .. })
        ));
        let exact = MealAllowance { breakfasts: 0, mains: 5 };
        assert!(selection.validate(&exact).is_ok());
    }
}

//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract;
use crate::domain::pricing::format_cents;

// ===== Enumeration conversions =====

impl From<contract::MealCategory> for MealCategoryDto {
    fn from(value: contract::MealCategory) -> Self {
        match value {
            contract::MealCategory::Breakfast => Self::Breakfast,
            contract::MealCategory::Main => Self::Main,
            contract::MealCategory::Snack => Self::Snack,
        }
    }
}

impl From<MealCategoryDto> for contract::MealCategory {
    fn from(value: MealCategoryDto) -> Self {
        match value {
            MealCategoryDto::Breakfast => Self::Breakfast,
            MealCategoryDto::Main => Self::Main,
            MealCategoryDto::Snack => Self::Snack,
        }
    }
}

impl From<contract::WeekHalf> for WeekHalfDto {
    fn from(value: contract::WeekHalf) -> Self {
        match value {
            contract::WeekHalf::First => Self::First,
            contract::WeekHalf::Second => Self::Second,
        }
    }
}

impl From<WeekHalfDto> for contract::WeekHalf {
    fn from(value: WeekHalfDto) -> Self {
        match value {
            WeekHalfDto::First => Self::First,
            WeekHalfDto::Second => Self::Second,
        }
    }
}

impl From<contract::HalfAvailability> for HalfAvailabilityDto {
    fn from(value: contract::HalfAvailability) -> Self {
        match value {
            contract::HalfAvailability::First => Self::First,
            contract::HalfAvailability::Second => Self::Second,
            contract::HalfAvailability::Both => Self::Both,
        }
    }
}

impl From<HalfAvailabilityDto> for contract::HalfAvailability {
    fn from(value: HalfAvailabilityDto) -> Self {
        match value {
            HalfAvailabilityDto::First => Self::First,
            HalfAvailabilityDto::Second => Self::Second,
            HalfAvailabilityDto::Both => Self::Both,
        }
    }
}

impl From<contract::OrderStatus> for OrderStatusDto {
    fn from(value: contract::OrderStatus) -> Self {
        match value {
            contract::OrderStatus::Pending => Self::Pending,
            contract::OrderStatus::Confirmed => Self::Confirmed,
            contract::OrderStatus::Preparing => Self::Preparing,
            contract::OrderStatus::Ready => Self::Ready,
            contract::OrderStatus::Completed => Self::Completed,
        }
    }
}

impl From<OrderStatusDto> for contract::OrderStatus {
    fn from(value: OrderStatusDto) -> Self {
        match value {
            OrderStatusDto::Pending => Self::Pending,
            OrderStatusDto::Confirmed => Self::Confirmed,
            OrderStatusDto::Preparing => Self::Preparing,
            OrderStatusDto::Ready => Self::Ready,
            OrderStatusDto::Completed => Self::Completed,
        }
    }
}

impl From<contract::MenuSource> for MenuSourceDto {
    fn from(value: contract::MenuSource) -> Self {
        match value {
            contract::MenuSource::Weekly => Self::Weekly,
            contract::MenuSource::Default => Self::Default,
        }
    }
}

// ===== Tier conversions =====

impl From<contract::Tier> for TierDto {
    fn from(tier: contract::Tier) -> Self {
        Self {
            id: tier.id,
            name: tier.name,
            description: tier.description,
            calorie_target: tier.calorie_target,
            protein_target_g: tier.protein_target_g,
            price_cents: tier.price_cents,
            price_display: format_cents(tier.price_cents),
            sort_order: tier.sort_order,
            active: tier.active,
            created_at: tier.created_at,
            updated_at: tier.updated_at,
        }
    }
}

impl From<TierRequest> for contract::TierInput {
    fn from(req: TierRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            calorie_target: req.calorie_target,
            protein_target_g: req.protein_target_g,
            price_cents: req.price_cents,
            sort_order: req.sort_order,
            active: req.active,
        }
    }
}

// ===== Customer conversions =====

impl From<contract::MealPlan> for MealPlanDto {
    fn from(plan: contract::MealPlan) -> Self {
        Self {
            days_per_week: plan.days_per_week,
            meals_per_day: plan.meals_per_day,
            include_breakfast: plan.include_breakfast,
        }
    }
}

impl From<MealPlanDto> for contract::MealPlan {
    fn from(plan: MealPlanDto) -> Self {
        Self {
            days_per_week: plan.days_per_week,
            meals_per_day: plan.meals_per_day,
            include_breakfast: plan.include_breakfast,
        }
    }
}

impl From<contract::Customer> for CustomerDto {
    fn from(customer: contract::Customer) -> Self {
        Self {
            id: customer.id,
            email: customer.email,
            first_name: customer.first_name,
            last_name: customer.last_name,
            phone: customer.phone,
            preferences: PreferencesDto {
                tier_id: customer.preferences.tier_id,
                plan: customer.preferences.plan.map(Into::into),
                allergies: customer.preferences.allergies,
                dietary_notes: customer.preferences.dietary_notes,
            },
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

impl From<UpdatePreferencesRequest> for contract::PreferencesUpdate {
    fn from(req: UpdatePreferencesRequest) -> Self {
        Self {
            tier_id: req.tier_id,
            plan: req.plan.into(),
            allergies: req.allergies,
            dietary_notes: req.dietary_notes,
        }
    }
}

impl From<contract::Allowance> for AllowanceDto {
    fn from(allowance: contract::Allowance) -> Self {
        Self {
            week_start: allowance.week_start,
            breakfast_limit: allowance.breakfast_limit,
            main_limit: allowance.main_limit,
            breakfasts_used: allowance.breakfasts_used,
            mains_used: allowance.mains_used,
            breakfasts_remaining: allowance.breakfasts_remaining(),
            mains_remaining: allowance.mains_remaining(),
            snacks_selected: allowance.snacks_selected,
        }
    }
}

// ===== Menu conversions =====

impl From<contract::MenuItem> for MenuItemDto {
    fn from(item: contract::MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            category: item.category.into(),
            allergens: item.allergens,
            calories: item.calories,
            protein_g: item.protein_g,
            price_cents: item.price_cents,
            always_available: item.always_available,
            availability: item.availability.into(),
            active: item.active,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<MenuItemRequest> for contract::MenuItemInput {
    fn from(req: MenuItemRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            category: req.category.into(),
            allergens: req.allergens,
            calories: req.calories,
            protein_g: req.protein_g,
            price_cents: req.price_cents,
            always_available: req.always_available,
            availability: req.availability.into(),
            active: req.active,
        }
    }
}

impl From<contract::AvailableMenu> for MenuDto {
    fn from(menu: contract::AvailableMenu) -> Self {
        Self {
            week_start: menu.week_start,
            source: menu.source.into(),
            first_half: menu.first_half.into_iter().map(Into::into).collect(),
            second_half: menu.second_half.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<WeeklyMenuEntryDto> for contract::WeeklyMenuEntry {
    fn from(entry: WeeklyMenuEntryDto) -> Self {
        Self {
            menu_item_id: entry.menu_item_id,
            availability: entry.availability.into(),
        }
    }
}

impl From<contract::WeeklyMenu> for WeeklyMenuDto {
    fn from(menu: contract::WeeklyMenu) -> Self {
        Self {
            id: menu.id,
            week_start: menu.week_start,
            items: menu
                .entries
                .into_iter()
                .map(|e| WeeklyMenuEntryDto {
                    menu_item_id: e.menu_item_id,
                    availability: e.availability.into(),
                })
                .collect(),
            created_at: menu.created_at,
            updated_at: menu.updated_at,
        }
    }
}

// ===== Order conversions =====

impl From<OrderSubmissionRequest> for contract::OrderSubmission {
    fn from(req: OrderSubmissionRequest) -> Self {
        Self {
            week_start: req.week_start,
            lines: req
                .lines
                .into_iter()
                .map(|line| contract::OrderLineRequest {
                    menu_item_id: line.menu_item_id,
                    week_half: line.week_half.into(),
                    quantity: line.quantity,
                })
                .collect(),
            notes: req.notes,
        }
    }
}

impl From<contract::OrderItem> for OrderItemDto {
    fn from(item: contract::OrderItem) -> Self {
        Self {
            id: item.id,
            menu_item_id: item.menu_item_id,
            menu_item_name: item.menu_item_name,
            category: item.category.into(),
            week_half: item.week_half.into(),
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
            allergen_conflict: item.allergen_conflict,
        }
    }
}

impl From<contract::OrderTotals> for OrderTotalsDto {
    fn from(totals: contract::OrderTotals) -> Self {
        Self {
            plan_cents: totals.plan_cents,
            extras_cents: totals.extras_cents,
            allergen_surcharge_cents: totals.allergen_surcharge_cents,
            total_cents: totals.total_cents,
            total_display: format_cents(totals.total_cents),
        }
    }
}

impl From<contract::Order> for OrderDto {
    fn from(order: contract::Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            customer_id: order.customer_id,
            tier_id: order.tier_id,
            week_start: order.week_start,
            status: order.status.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            totals: order.totals.into(),
            notes: order.notes,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<contract::OrderQuote> for OrderQuoteDto {
    fn from(quote: contract::OrderQuote) -> Self {
        Self {
            week_start: quote.week_start,
            tier_id: quote.tier_id,
            items: quote.items.into_iter().map(Into::into).collect(),
            totals: quote.totals.into(),
            conflicting_allergens: quote.conflicting_allergens,
        }
    }
}

// ===== Challenge conversions =====

impl From<contract::Challenge> for ChallengeDto {
    fn from(challenge: contract::Challenge) -> Self {
        Self {
            id: challenge.id,
            name: challenge.name,
            description: challenge.description,
            starts_on: challenge.starts_on,
            ends_on: challenge.ends_on,
            active: challenge.active,
            created_at: challenge.created_at,
        }
    }
}

impl From<ChallengeRequest> for contract::ChallengeInput {
    fn from(req: ChallengeRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            starts_on: req.starts_on,
            ends_on: req.ends_on,
            active: req.active,
        }
    }
}

impl From<contract::ChallengeParticipant> for ParticipantDto {
    fn from(participant: contract::ChallengeParticipant) -> Self {
        Self {
            id: participant.id,
            challenge_id: participant.challenge_id,
            customer_id: participant.customer_id,
            tier_id: participant.tier_id,
            joined_at: participant.joined_at,
        }
    }
}

// ===== Kitchen conversions =====

impl From<contract::KitchenMealLine> for KitchenMealDto {
    fn from(line: contract::KitchenMealLine) -> Self {
        Self {
            total: line.total(),
            allergen_flagged: line.allergen_flagged(),
            menu_item_id: line.menu_item_id,
            menu_item_name: line.menu_item_name,
            category: line.category.into(),
            first_half: line.first_half,
            second_half: line.second_half,
        }
    }
}

impl From<contract::KitchenTierSection> for KitchenTierDto {
    fn from(section: contract::KitchenTierSection) -> Self {
        Self {
            tier_id: section.tier_id,
            tier_name: section.tier_name,
            total_portions: section.total_portions,
            meals: section.meals.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::KitchenReport> for KitchenReportDto {
    fn from(report: contract::KitchenReport) -> Self {
        Self {
            week_start: report.week_start,
            generated_at: report.generated_at,
            order_count: report.order_count,
            total_portions: report.total_portions,
            tiers: report.tiers.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::KitchenOrder> for KitchenOrderDto {
    fn from(line: contract::KitchenOrder) -> Self {
        Self {
            id: line.id,
            week_start: line.week_start,
            tier_id: line.tier_id,
            tier_name: line.tier_name,
            menu_item_id: line.menu_item_id,
            menu_item_name: line.menu_item_name,
            category: line.category.into(),
            week_half: line.week_half.into(),
            quantity: line.quantity,
            allergen_flagged: line.allergen_flagged,
            generated_at: line.generated_at,
        }
    }
}

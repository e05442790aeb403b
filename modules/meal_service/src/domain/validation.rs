//! Field-level validation for customer, catalog and order input

use crate::contract::{ChallengeInput, MealError, MealPlan, MenuItemInput, TierInput};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_NOTES_LEN: usize = 500;
pub const MAX_DAYS_PER_WEEK: u8 = 7;
pub const MAX_MEALS_PER_DAY: u8 = 4;
pub const MAX_CALORIES: u32 = 20_000;
pub const MAX_PROTEIN_G: u32 = 1_000;

/// Normalize and validate an email address
///
/// Accepts `local@domain.tld` with no whitespace; returns the lowercase form.
pub fn normalize_email(email: &str) -> Result<String, MealError> {
    let email = email.trim().to_lowercase();
    let invalid = || MealError::validation(format!("'{}' is not a valid email address", email));

    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    // Domain needs at least one dot with non-empty labels around it
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(email)
}

/// Validate a required, bounded display name
pub fn validate_name(field: &str, value: &str) -> Result<String, MealError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MealError::validation(format!("{} is required", field)));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(MealError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LEN
        )));
    }
    Ok(value.to_string())
}

/// Validate an optional phone number: digits, spaces and `+-()`, 7 to 20 characters
pub fn validate_phone(phone: Option<&str>) -> Result<Option<String>, MealError> {
    let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    let len = phone.chars().count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    if !allowed || !(7..=20).contains(&len) || digits < 7 {
        return Err(MealError::validation(format!(
            "'{}' is not a valid phone number",
            phone
        )));
    }
    Ok(Some(phone.to_string()))
}

pub fn validate_plan(plan: &MealPlan) -> Result<(), MealError> {
    if !(1..=MAX_DAYS_PER_WEEK).contains(&plan.days_per_week) {
        return Err(MealError::validation(format!(
            "days_per_week must be between 1 and {}",
            MAX_DAYS_PER_WEEK
        )));
    }
    if !(1..=MAX_MEALS_PER_DAY).contains(&plan.meals_per_day) {
        return Err(MealError::validation(format!(
            "meals_per_day must be between 1 and {}",
            MAX_MEALS_PER_DAY
        )));
    }
    Ok(())
}

/// Trim optional free text, rejecting anything over the notes limit
pub fn validate_notes(field: &str, notes: Option<&str>) -> Result<Option<String>, MealError> {
    let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(MealError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_NOTES_LEN
        )));
    }
    Ok(Some(notes.to_string()))
}

pub fn validate_tier_input(input: &TierInput) -> Result<(), MealError> {
    validate_name("name", &input.name)?;
    if input.price_cents < 0 {
        return Err(MealError::validation("price_cents must not be negative"));
    }
    if input.calorie_target == 0 {
        return Err(MealError::validation("calorie_target must be positive"));
    }
    validate_at_most("calorie_target", input.calorie_target, MAX_CALORIES)?;
    validate_at_most("protein_target_g", input.protein_target_g, MAX_PROTEIN_G)
}

pub fn validate_menu_item_input(input: &MenuItemInput) -> Result<(), MealError> {
    validate_name("name", &input.name)?;
    if input.price_cents < 0 {
        return Err(MealError::validation("price_cents must not be negative"));
    }
    if let Some(calories) = input.calories {
        validate_at_most("calories", calories, MAX_CALORIES)?;
    }
    if let Some(protein_g) = input.protein_g {
        validate_at_most("protein_g", protein_g, MAX_PROTEIN_G)?;
    }
    Ok(())
}

fn validate_at_most(field: &str, value: u32, max: u32) -> Result<(), MealError> {
    if value > max {
        return Err(MealError::validation(format!("{} must be at most {}", field, max)));
    }
    Ok(())
}

pub fn validate_challenge_input(input: &ChallengeInput) -> Result<(), MealError> {
    validate_name("name", &input.name)?;
    if input.ends_on < input.starts_on {
        return Err(MealError::validation("ends_on must not be before starts_on"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{HalfAvailability, MealCategory};
    use chrono::NaiveDate;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@Example.COM ").unwrap(), "jane.doe@example.com");
        assert!(normalize_email("a@b.co").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plain",
            "@example.com",
            "jane@",
            "jane@example",
            "jane@@example.com",
            "ja ne@example.com",
            "jane@example..com",
        ] {
            assert!(normalize_email(email).is_err(), "{} should be rejected", email);
        }
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("first_name", "  Ada ").unwrap(), "Ada");
        assert!(validate_name("first_name", "   ").is_err());
        assert!(validate_name("first_name", &"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone(None).unwrap(), None);
        assert_eq!(validate_phone(Some("  ")).unwrap(), None);
        assert_eq!(
            validate_phone(Some("+1 (555) 123-4567")).unwrap(),
            Some("+1 (555) 123-4567".to_string())
        );
        assert!(validate_phone(Some("555-CALL-NOW")).is_err());
        assert!(validate_phone(Some("12345")).is_err());
        assert!(validate_phone(Some("(((((((())))")).is_err());
    }

    #[test]
    fn test_validate_plan_bounds() {
        let ok = MealPlan {
            days_per_week: 5,
            meals_per_day: 2,
            include_breakfast: true,
        };
        assert!(validate_plan(&ok).is_ok());
        for (days_per_week, meals_per_day) in [(0, 2), (8, 2), (5, 0), (5, 5)] {
            let plan = MealPlan {
                days_per_week,
                meals_per_day,
                ..ok
            };
            assert!(validate_plan(&plan).is_err());
        }
    }

    #[test]
    fn test_validate_notes() {
        assert_eq!(
            validate_notes("notes", Some(" no onions ")).unwrap(),
            Some("no onions".to_string())
        );
        assert!(validate_notes("notes", Some(&"x".repeat(MAX_NOTES_LEN + 1))).is_err());
    }

    #[test]
    fn test_catalog_inputs() {
        let tier = TierInput {
            name: "Lean".to_string(),
            description: String::new(),
            calorie_target: 1800,
            protein_target_g: 140,
            price_cents: 9_900,
            sort_order: 1,
            active: true,
        };
        assert!(validate_tier_input(&tier).is_ok());
        for bad in [
            TierInput {
                price_cents: -1,
                ..tier.clone()
            },
            TierInput {
                calorie_target: 0,
                ..tier.clone()
            },
            TierInput {
                calorie_target: 3_000_000_000,
                ..tier.clone()
            },
            TierInput {
                protein_target_g: MAX_PROTEIN_G + 1,
                ..tier
            },
        ] {
            assert!(validate_tier_input(&bad).is_err());
        }

        let item = MenuItemInput {
            name: "Oats".to_string(),
            description: String::new(),
            category: MealCategory::Breakfast,
            allergens: vec![],
            calories: Some(400),
            protein_g: Some(20),
            price_cents: 0,
            always_available: true,
            availability: HalfAvailability::Both,
            active: true,
        };
        assert!(validate_menu_item_input(&item).is_ok());
        assert!(validate_menu_item_input(&MenuItemInput {
            name: " ".to_string(),
            ..item.clone()
        })
        .is_err());
        assert!(validate_menu_item_input(&MenuItemInput {
            calories: Some(u32::MAX),
            ..item
        })
        .is_err());

        let challenge = ChallengeInput {
            name: "Protein month".to_string(),
            description: String::new(),
            starts_on: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            ends_on: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            active: true,
        };
        assert!(validate_challenge_input(&challenge).is_err());
    }
}

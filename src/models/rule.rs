use chrono::{DateTime, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::PricingError;

/// Machine-readable replacement for the legacy free-text condition field.
///
/// Stored on the rule and surfaced to admin clients. The calculator does not
/// evaluate it; `Note` carries over conditions authored before the tagged
/// form existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DynamicCondition {
    DayOfWeek { day: Weekday },
    Note { text: String },
}

/// Administrator-configured pricing rule.
///
/// Read-only at calculation time: the sale endpoint reads a snapshot of the
/// rule attached to a ticket type and hands it to the calculator.
///
/// A threshold of `0` means that surcharge step is not configured. All
/// percentage fields are whole percentages (`10` means 10%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRule {
    pub id: Uuid,
    pub name: String,
    pub minimum_price: Decimal,
    pub maximum_price: Decimal,
    pub occupancy_threshold_1: Decimal,
    pub occupancy_percentage_1: Decimal,
    pub occupancy_threshold_2: Decimal,
    pub occupancy_percentage_2: Decimal,
    pub early_bird_percentage: Decimal,
    pub modifier: Decimal,
    pub dynamic_condition: Option<DynamicCondition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PricingRule {
    /// Fresh rule with price bounds set and every adjustment disabled.
    pub fn new(name: impl Into<String>, minimum_price: Decimal, maximum_price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            minimum_price,
            maximum_price,
            occupancy_threshold_1: Decimal::ZERO,
            occupancy_percentage_1: Decimal::ZERO,
            occupancy_threshold_2: Decimal::ZERO,
            occupancy_percentage_2: Decimal::ZERO,
            early_bird_percentage: Decimal::ZERO,
            modifier: Decimal::ZERO,
            dynamic_condition: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Consistency checks for the admin CRUD boundary. The calculator only
    /// re-checks the bound ordering it depends on.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.minimum_price < Decimal::ZERO {
            return Err(PricingError::InvalidRule(
                "minimum_price must not be negative".to_string(),
            ));
        }
        if self.minimum_price > self.maximum_price {
            return Err(PricingError::InvalidRule(format!(
                "minimum_price {} exceeds maximum_price {}",
                self.minimum_price, self.maximum_price
            )));
        }

        for (field, threshold) in [
            ("occupancy_threshold_1", self.occupancy_threshold_1),
            ("occupancy_threshold_2", self.occupancy_threshold_2),
        ] {
            if threshold < Decimal::ZERO || threshold > Decimal::ONE_HUNDRED {
                return Err(PricingError::InvalidRule(format!(
                    "{} must be within 0..=100, got {}",
                    field, threshold
                )));
            }
        }
        if !self.occupancy_threshold_1.is_zero()
            && !self.occupancy_threshold_2.is_zero()
            && self.occupancy_threshold_1 > self.occupancy_threshold_2
        {
            return Err(PricingError::InvalidRule(format!(
                "occupancy_threshold_1 {} exceeds occupancy_threshold_2 {}",
                self.occupancy_threshold_1, self.occupancy_threshold_2
            )));
        }

        if self.early_bird_percentage < Decimal::ZERO
            || self.early_bird_percentage > Decimal::ONE_HUNDRED
        {
            return Err(PricingError::InvalidRule(format!(
                "early_bird_percentage must be within 0..=100, got {}",
                self.early_bird_percentage
            )));
        }

        // Occupancy steps are surcharges; a negative or inverted ladder would
        // let the price drop as occupancy rises
        for (field, percentage) in [
            ("occupancy_percentage_1", self.occupancy_percentage_1),
            ("occupancy_percentage_2", self.occupancy_percentage_2),
        ] {
            if percentage < Decimal::ZERO {
                return Err(PricingError::InvalidRule(format!(
                    "{} must not be negative, got {}",
                    field, percentage
                )));
            }
        }
        if !self.occupancy_threshold_1.is_zero()
            && !self.occupancy_threshold_2.is_zero()
            && self.occupancy_percentage_2 < self.occupancy_percentage_1
        {
            return Err(PricingError::InvalidRule(format!(
                "occupancy_percentage_2 {} is below occupancy_percentage_1 {}",
                self.occupancy_percentage_2, self.occupancy_percentage_1
            )));
        }

        // A modifier at or below -100 would drive prices to zero or negative
        if self.modifier <= -Decimal::ONE_HUNDRED {
            return Err(PricingError::InvalidRule(format!(
                "modifier must be greater than -100, got {}",
                self.modifier
            )));
        }

        Ok(())
    }

    /// The surcharge step triggered by `occupancy_ratio`, if any.
    ///
    /// At most one step applies, the higher one winning; a threshold of `0`
    /// is treated as not configured.
    pub fn surcharge_step(&self, occupancy_ratio: Decimal) -> Option<(Decimal, Decimal)> {
        if !self.occupancy_threshold_2.is_zero() && occupancy_ratio >= self.occupancy_threshold_2 {
            Some((self.occupancy_threshold_2, self.occupancy_percentage_2))
        } else if !self.occupancy_threshold_1.is_zero()
            && occupancy_ratio >= self.occupancy_threshold_1
        {
            Some((self.occupancy_threshold_1, self.occupancy_percentage_1))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_rule() -> PricingRule {
        PricingRule::new("Weekend surge", dec!(50.00), dec!(250.00))
    }

    #[test]
    fn test_new_rule_validates_clean() {
        assert!(base_rule().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let rule = PricingRule::new("Inverted", dec!(100.00), dec!(90.00));
        let err = rule.validate().unwrap_err();
        assert_eq!(err.code(), "INVALID_RULE");
    }

    #[test]
    fn test_validate_rejects_threshold_above_100() {
        let mut rule = base_rule();
        rule.occupancy_threshold_1 = dec!(120);
        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut rule = base_rule();
        rule.occupancy_threshold_1 = dec!(80);
        rule.occupancy_threshold_2 = dec!(40);
        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_percentage_ladder() {
        // Crossing the higher threshold must never lower the price
        let mut rule = base_rule();
        rule.occupancy_threshold_1 = dec!(40);
        rule.occupancy_percentage_1 = dec!(25);
        rule.occupancy_threshold_2 = dec!(80);
        rule.occupancy_percentage_2 = dec!(10);

        let err = rule.validate().unwrap_err();
        assert_eq!(err.code(), "INVALID_RULE");
    }

    #[test]
    fn test_validate_rejects_negative_occupancy_percentage() {
        let mut rule = base_rule();
        rule.occupancy_threshold_1 = dec!(40);
        rule.occupancy_percentage_1 = dec!(-5);

        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_validate_allows_single_configured_step() {
        // Only the second step configured; the first stays at 0 (unset)
        let mut rule = base_rule();
        rule.occupancy_threshold_2 = dec!(80);
        rule.occupancy_percentage_2 = dec!(25);
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_modifier_at_minus_100() {
        let mut rule = base_rule();
        rule.modifier = dec!(-100);
        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_surcharge_step_picks_higher_step() {
        let mut rule = base_rule();
        rule.occupancy_threshold_1 = dec!(40);
        rule.occupancy_percentage_1 = dec!(10);
        rule.occupancy_threshold_2 = dec!(80);
        rule.occupancy_percentage_2 = dec!(25);

        assert_eq!(rule.surcharge_step(dec!(30)), None);
        assert_eq!(rule.surcharge_step(dec!(50)), Some((dec!(40), dec!(10))));
        // Exact boundary triggers the step
        assert_eq!(rule.surcharge_step(dec!(80)), Some((dec!(80), dec!(25))));
        assert_eq!(rule.surcharge_step(dec!(100)), Some((dec!(80), dec!(25))));
    }

    #[test]
    fn test_zero_thresholds_mean_unconfigured() {
        let rule = base_rule();
        assert_eq!(rule.surcharge_step(dec!(0)), None);
        assert_eq!(rule.surcharge_step(dec!(100)), None);
    }

    #[test]
    fn test_dynamic_condition_serializes_tagged() {
        let condition = DynamicCondition::DayOfWeek { day: Weekday::Mon };
        let json = serde_json::to_string(&condition).unwrap();
        assert!(json.contains("\"kind\":\"dayOfWeek\""));

        let back: DynamicCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, condition);
    }

    #[test]
    fn test_legacy_note_condition_round_trips() {
        let condition = DynamicCondition::Note {
            text: "only during festival week".to_string(),
        };
        let json = serde_json::to_string(&condition).unwrap();
        let back: DynamicCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, condition);
    }
}

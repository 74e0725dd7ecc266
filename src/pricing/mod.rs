//! The price calculator: a pure function over sale-time snapshots.
//!
//! Adjustments apply in a fixed order: occupancy surcharge, then early-bird
//! discount, then the flat modifier. The flat modifier acts on the already
//! adjusted price. Clamping into the rule's bounds is always the last
//! operation before rounding.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{PricingRule, SaleWindow, TicketType, Zone};
use crate::utils::error::PricingError;

/// Minor-unit digits for USD-like currencies.
const DEFAULT_MINOR_UNITS: u32 = 2;

/// Which bound rewrote the computed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClampBound {
    Minimum,
    Maximum,
}

/// One step of the computation, recorded in the order it was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Adjustment {
    OccupancySurcharge {
        threshold: Decimal,
        percentage: Decimal,
    },
    EarlyBird {
        percentage: Decimal,
    },
    Modifier {
        percentage: Decimal,
    },
    Clamped {
        bound: ClampBound,
    },
}

/// Priced sale with its audit trail, serialized into receipts by the sale
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub base_price: Decimal,
    /// Percentage of the zone's capacity already sold, 0–100.
    pub occupancy_ratio: Decimal,
    pub adjustments: Vec<Adjustment>,
    pub final_price: Decimal,
}

/// Computes the final ticket price for a sale.
///
/// With no rule attached the zone's base price passes through with no
/// adjustments. Every result, that branch included, is rounded to minor
/// units, so a base price carrying sub-minor-unit digits is normalized.
/// Deterministic and side-effect free: two calls with identical arguments
/// return identical prices.
pub fn compute_price(
    base_price: Decimal,
    capacity_sold: i32,
    total_capacity: i32,
    rule: Option<&PricingRule>,
    now: DateTime<Utc>,
    window: &SaleWindow,
) -> Result<Decimal, PricingError> {
    quote(base_price, capacity_sold, total_capacity, rule, now, window).map(|q| q.final_price)
}

/// Like [`compute_price`], but returns the full adjustment breakdown.
pub fn quote(
    base_price: Decimal,
    capacity_sold: i32,
    total_capacity: i32,
    rule: Option<&PricingRule>,
    now: DateTime<Utc>,
    window: &SaleWindow,
) -> Result<PriceQuote, PricingError> {
    quote_with_precision(
        base_price,
        capacity_sold,
        total_capacity,
        rule,
        now,
        window,
        DEFAULT_MINOR_UNITS,
    )
}

/// [`quote`] with an explicit minor-unit digit count, for currencies whose
/// exponent is not 2.
#[allow(clippy::too_many_arguments)]
pub fn quote_with_precision(
    base_price: Decimal,
    capacity_sold: i32,
    total_capacity: i32,
    rule: Option<&PricingRule>,
    now: DateTime<Utc>,
    window: &SaleWindow,
    minor_units: u32,
) -> Result<PriceQuote, PricingError> {
    if total_capacity <= 0 {
        return Err(PricingError::InvalidArgument(format!(
            "total_capacity must be positive, got {}",
            total_capacity
        )));
    }
    if capacity_sold < 0 || capacity_sold > total_capacity {
        return Err(PricingError::InvalidArgument(format!(
            "capacity_sold must be within 0..={}, got {}",
            total_capacity, capacity_sold
        )));
    }
    if base_price < Decimal::ZERO {
        return Err(PricingError::InvalidArgument(format!(
            "base_price must not be negative, got {}",
            base_price
        )));
    }

    let occupancy_ratio =
        Decimal::from(capacity_sold) / Decimal::from(total_capacity) * Decimal::ONE_HUNDRED;

    let Some(rule) = rule else {
        return Ok(PriceQuote {
            base_price,
            occupancy_ratio,
            adjustments: Vec::new(),
            final_price: round_minor(base_price, minor_units),
        });
    };

    if rule.minimum_price > rule.maximum_price {
        return Err(PricingError::InvalidRule(format!(
            "minimum_price {} exceeds maximum_price {}",
            rule.minimum_price, rule.maximum_price
        )));
    }

    let mut price = base_price;
    let mut adjustments = Vec::new();

    if let Some((threshold, percentage)) = rule.surcharge_step(occupancy_ratio) {
        price *= Decimal::ONE + percentage / Decimal::ONE_HUNDRED;
        tracing::debug!(%occupancy_ratio, %threshold, %percentage, "applied occupancy surcharge");
        adjustments.push(Adjustment::OccupancySurcharge {
            threshold,
            percentage,
        });
    }

    if window.is_early_bird(now) && !rule.early_bird_percentage.is_zero() {
        price *= Decimal::ONE - rule.early_bird_percentage / Decimal::ONE_HUNDRED;
        tracing::debug!(percentage = %rule.early_bird_percentage, "applied early-bird discount");
        adjustments.push(Adjustment::EarlyBird {
            percentage: rule.early_bird_percentage,
        });
    }

    if !rule.modifier.is_zero() {
        price *= Decimal::ONE + rule.modifier / Decimal::ONE_HUNDRED;
        tracing::debug!(percentage = %rule.modifier, "applied flat modifier");
        adjustments.push(Adjustment::Modifier {
            percentage: rule.modifier,
        });
    }

    if price < rule.minimum_price {
        tracing::warn!(
            computed = %price,
            minimum = %rule.minimum_price,
            rule_id = %rule.id,
            "computed price below rule minimum, clamping"
        );
        price = rule.minimum_price;
        adjustments.push(Adjustment::Clamped {
            bound: ClampBound::Minimum,
        });
    } else if price > rule.maximum_price {
        tracing::warn!(
            computed = %price,
            maximum = %rule.maximum_price,
            rule_id = %rule.id,
            "computed price above rule maximum, clamping"
        );
        price = rule.maximum_price;
        adjustments.push(Adjustment::Clamped {
            bound: ClampBound::Maximum,
        });
    }

    Ok(PriceQuote {
        base_price,
        occupancy_ratio,
        adjustments,
        final_price: round_minor(price, minor_units),
    })
}

/// Quotes a sale directly from ticket-type and zone snapshots.
pub fn quote_for_ticket_type(
    ticket_type: &TicketType,
    zone: &Zone,
    rule: Option<&PricingRule>,
    now: DateTime<Utc>,
    window: &SaleWindow,
) -> Result<PriceQuote, PricingError> {
    if ticket_type.zone_id != zone.id {
        return Err(PricingError::InvalidArgument(format!(
            "ticket type {} does not belong to zone {}",
            ticket_type.id, zone.id
        )));
    }
    if ticket_type.available_quantity < 0 || ticket_type.available_quantity > zone.total_capacity {
        return Err(PricingError::InvalidArgument(format!(
            "available_quantity must be within 0..={}, got {}",
            zone.total_capacity, ticket_type.available_quantity
        )));
    }

    quote(
        zone.base_price,
        ticket_type.capacity_sold(zone),
        zone.total_capacity,
        rule,
        now,
        window,
    )
}

/// Round-half-to-even at the currency's minor-unit precision, with the scale
/// pinned so `110` comes back as `110.00`.
fn round_minor(amount: Decimal, minor_units: u32) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(minor_units, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(minor_units);
    rounded
}

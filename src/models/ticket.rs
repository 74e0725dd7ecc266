use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::zone::Zone;

/// Ticket type snapshot as read at sale time.
///
/// `available_quantity` counts down as tickets sell; the zone's
/// `total_capacity` minus it gives the seats already sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketType {
    pub id: Uuid,
    pub event_id: Uuid,
    pub zone_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub available_quantity: i32,
    /// Pricing rules attached through the rule/ticket-type association.
    pub pricing_rule_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TicketType {
    /// Seats already sold out of the zone's capacity.
    pub fn capacity_sold(&self, zone: &Zone) -> i32 {
        zone.total_capacity - self.available_quantity
    }
}

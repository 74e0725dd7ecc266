use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Venue zone snapshot as read at sale time.
///
/// Every ticket type in the zone inherits `base_price`, and occupancy ratios
/// are measured against `total_capacity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub name: String,
    pub total_capacity: i32,
    pub base_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

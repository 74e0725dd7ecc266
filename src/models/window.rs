use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An event's ticket sale window.
///
/// The early-bird boundary is supplied by the organizer as a span after
/// `opens_at`, not derived from a fixed offset. It is stored as the absolute
/// instant the discount phase ends, capped at `closes_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleWindow {
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
    pub early_bird_until: DateTime<Utc>,
}

impl SaleWindow {
    pub fn new(
        opens_at: DateTime<Utc>,
        closes_at: DateTime<Utc>,
        early_bird_cutoff: Duration,
    ) -> Self {
        let early_bird_until = (opens_at + early_bird_cutoff).min(closes_at);
        Self {
            opens_at,
            closes_at,
            early_bird_until,
        }
    }

    /// Whether `now` falls in the early-bird phase of the window.
    pub fn is_early_bird(&self, now: DateTime<Utc>) -> bool {
        now < self.early_bird_until
    }

    /// Whether the window is open at `now`. Informational here; the sale
    /// endpoint enforces it before quoting a price.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.opens_at <= now && now < self.closes_at
    }
}

//! Dynamic ticket pricing for music events.
//!
//! Given a snapshot of a ticket type's occupancy, its zone's base price, and
//! an optional administrator-configured [`PricingRule`], the calculator in
//! [`pricing`] produces the final price to charge for a sale. The crate is a
//! pure domain library: no I/O, no shared state, safe to call from any number
//! of request handlers concurrently. The sale endpoint and the admin CRUD
//! surface live elsewhere and consume this crate in-process.

pub mod models;
pub mod pricing;
pub mod utils;

pub use models::{DynamicCondition, PricingRule, SaleWindow, TicketType, Zone};
pub use pricing::{
    compute_price, quote, quote_for_ticket_type, quote_with_precision, Adjustment, ClampBound,
    PriceQuote,
};
pub use utils::error::PricingError;

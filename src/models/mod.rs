pub mod rule;
pub mod ticket;
pub mod window;
pub mod zone;

pub use rule::{DynamicCondition, PricingRule};
pub use ticket::TicketType;
pub use window::SaleWindow;
pub use zone::Zone;

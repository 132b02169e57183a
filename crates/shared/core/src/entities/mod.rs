mod order;
mod schedule;
mod side;
mod trade;

pub use order::{Ask, Bid};
pub use schedule::MarginalSchedule;
pub use side::Side;
pub use trade::{Trade, TradeId};

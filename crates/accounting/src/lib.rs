//! Agora Accounting
//!
//! Sums what agents actually earned over a run and compares it with the
//! theoretical competitive surplus.

mod surplus;

pub use surplus::{SurplusAccountant, efficiency_percent};

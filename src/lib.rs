//! Seat allocation for proportional-representation elections with
//! constituency and adjustment seats.

pub mod apportion;
pub mod election;
pub mod formats;
pub mod methods;
pub mod model;
pub mod reports;
pub mod util;

pub use election::{compare_methods, Election, ElectionResults};
pub use methods::AdjustmentMethod;
pub use model::{ElectionError, Rules, RulesConfig};

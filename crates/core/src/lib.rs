//! Core data types for cycle arbitrage search.

pub mod currency;
pub mod market;
pub mod opportunity;
pub mod pair;
pub mod rate_table;
pub mod sports;

pub use currency::*;
pub use market::*;
pub use opportunity::*;
pub use pair::*;
pub use rate_table::*;
pub use sports::*;

//! Arbitrage search engine.
//!
//! This crate contains the bounded cycle search over currency conversion
//! graphs, plus the simpler two-market comparators for crypto prices and
//! sports odds.

pub mod budget;
pub mod crypto;
pub mod error;
pub mod matrix;
pub mod observer;
pub mod ranking;
pub mod scanner;
pub mod search;
pub mod sports;

pub use budget::*;
pub use crypto::*;
pub use error::*;
pub use matrix::*;
pub use observer::*;
pub use ranking::*;
pub use scanner::*;
pub use search::*;
pub use sports::*;

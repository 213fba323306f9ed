pub mod checkout;
pub mod config;
pub mod error;
pub mod handoff;
pub mod order;
pub mod roster;
pub mod sizing;

pub use error::{Error, Result};

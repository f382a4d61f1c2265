//! `taxinvoice-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod error;
pub mod money;
pub mod value_object;

pub use error::{require_text, DomainError, DomainResult};
pub use money::{format_money, format_rate, round_money, MONEY_SCALE};
pub use value_object::ValueObject;

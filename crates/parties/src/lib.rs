//! Parties on a tax invoice: the seller and the billing/shipping addressees.
//!
//! Pure value types with role-specific presence rules (no IO).

pub mod party;

pub use party::{Party, PartyRole};

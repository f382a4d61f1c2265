//! Value object trait: equality by value, not identity.
//!
//! Everything on an invoice is a value object. A party, a line item or a
//! computed row has no identity beyond its attributes, and none of them is
//! mutated after construction.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values.
///
/// The trait requires:
/// - **Clone**: values are copied freely between the calculator and renderer
/// - **PartialEq**: two rows with the same figures are the same row
/// - **Debug**: values show up in logs and test failures
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct TaxComponent {
///     name: String,
///     amount: Decimal,
/// }
///
/// impl ValueObject for TaxComponent {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

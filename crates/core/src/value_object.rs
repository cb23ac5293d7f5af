//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// An item stack is one: `3 × potion` equals any other `3 × potion`, whichever
/// slot it sits in.
///
/// They are immutable; to "modify" one, build a new value (e.g.
/// `ItemStack::with_quantity`).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Saveable owners (a character loadout, a chest) are entities: their stable
/// id keys their state in a save file.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

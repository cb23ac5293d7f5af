//! Container capability contract.

use satchel_catalog::Item;
use satchel_core::{DomainError, DomainResult, ItemId, Quantity, ValueObject};

/// One item type and how many units of it sit together in a slot.
#[derive(Debug, Clone)]
pub struct ItemStack {
    pub item: Item,
    pub quantity: Quantity,
}

impl ItemStack {
    pub fn new(item: Item, quantity: Quantity) -> Self {
        Self { item, quantity }
    }

    pub fn item_id(&self) -> ItemId {
        self.item.id
    }

    /// Identity comparison; quantities are ignored.
    pub fn holds(&self, item: &Item) -> bool {
        self.item.id == item.id
    }

    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self {
            item: self.item.clone(),
            quantity,
        }
    }
}

impl PartialEq for ItemStack {
    fn eq(&self, other: &Self) -> bool {
        self.item.id == other.item.id && self.quantity == other.quantity
    }
}

impl Eq for ItemStack {}

impl ValueObject for ItemStack {}

/// Capability surface of a set of addressable slots.
///
/// Each slot holds at most one [`ItemStack`]. A container kind (inventory
/// grid, equipment board, action bar, world sink) implements this once and
/// chooses its own `Slot` address type; several slots of the same owner can
/// then take part in a single transfer.
///
/// The engine relies on nothing but these four operations.
pub trait Container {
    type Slot: Copy + Eq + core::fmt::Debug;

    /// Current occupant of `slot`. Never mutates.
    fn content(&self, slot: Self::Slot) -> Option<ItemStack>;

    /// How many units of `item` `slot` could take right now.
    ///
    /// Must be side-effect free, `0` for incompatible items, and honoured by
    /// an `add_items` issued before any other mutation.
    fn max_acceptable(&self, slot: Self::Slot, item: &Item) -> Quantity;

    /// Put `quantity` units of `item` into `slot`.
    ///
    /// Asking for more than [`max_acceptable`](Self::max_acceptable) is a
    /// [`DomainError::ContractViolation`]; nothing is written in that case.
    fn add_items(&mut self, slot: Self::Slot, item: &Item, quantity: Quantity) -> DomainResult<()>;

    /// Take `quantity` units of whatever `slot` holds.
    ///
    /// Asking for more than the slot holds is a
    /// [`DomainError::ContractViolation`]; nothing is written in that case.
    fn remove_items(&mut self, slot: Self::Slot, quantity: Quantity) -> DomainResult<()>;

    /// Quantity currently in `slot` (`0` when empty).
    fn quantity(&self, slot: Self::Slot) -> Quantity {
        self.content(slot).map(|stack| stack.quantity).unwrap_or(0)
    }
}

/// Guard for `add_items` implementations.
pub fn ensure_capacity(permitted: Quantity, requested: Quantity) -> DomainResult<()> {
    if requested > permitted {
        return Err(DomainError::over_capacity(requested, permitted));
    }
    Ok(())
}

/// Guard for `remove_items` implementations.
pub fn ensure_held(held: Quantity, requested: Quantity) -> DomainResult<()> {
    if requested > held {
        return Err(DomainError::over_removal(requested, held));
    }
    Ok(())
}

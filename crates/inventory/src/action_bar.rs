use serde_json::Value as JsonValue;

use satchel_catalog::{Item, ItemCatalog};
use satchel_core::{DomainError, DomainResult, ItemId, Quantity, saturating_total};
use satchel_persistence::saveable::decode_state;
use satchel_persistence::{PersistenceResult, Saveable};
use satchel_transfer::{Container, ItemStack, ensure_capacity, ensure_held};

use crate::saved::SavedSlots;

/// Hotbar of action items.
///
/// Consumable actions stack up to `stack_limit`; other actions dock one at
/// a time.
#[derive(Debug, Clone)]
pub struct ActionBar {
    slots: Vec<Option<ItemStack>>,
    stack_limit: Quantity,
}

impl ActionBar {
    pub fn new(size: usize, stack_limit: Quantity) -> DomainResult<Self> {
        if stack_limit == 0 {
            return Err(DomainError::validation("action stack limit must be positive"));
        }
        Ok(Self {
            slots: vec![None; size],
            stack_limit,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn docked(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, stack)| stack.as_ref().map(|s| (slot, s)))
    }

    pub fn count_of(&self, item_id: ItemId) -> Quantity {
        saturating_total(
            self.docked()
                .filter(|(_, stack)| stack.item_id() == item_id)
                .map(|(_, stack)| stack.quantity),
        )
    }

    /// Trigger the action docked at `slot`. Consumables lose one unit.
    ///
    /// `Ok(None)` for an empty slot.
    pub fn use_action(&mut self, slot: usize) -> DomainResult<Option<Item>> {
        if slot >= self.slots.len() {
            return Err(DomainError::not_found(format!("action slot {slot}")));
        }
        let Some(stack) = self.get(slot) else {
            return Ok(None);
        };
        let item = stack.item.clone();
        if item.is_consumable() {
            self.remove_items(slot, 1)?;
        }
        tracing::info!(slot, item = %item.display_name, consumed = item.is_consumable(), "action used");
        Ok(Some(item))
    }
}

impl Container for ActionBar {
    type Slot = usize;

    fn content(&self, slot: usize) -> Option<ItemStack> {
        self.get(slot).cloned()
    }

    fn max_acceptable(&self, slot: usize, item: &Item) -> Quantity {
        if !item.is_action() {
            return 0;
        }
        let held = match self.slots.get(slot) {
            None => return 0,
            Some(None) => 0,
            Some(Some(stack)) if stack.holds(item) => stack.quantity,
            Some(Some(_)) => return 0,
        };
        if item.is_consumable() {
            self.stack_limit.saturating_sub(held)
        } else if held == 0 {
            1
        } else {
            0
        }
    }

    fn add_items(&mut self, slot: usize, item: &Item, quantity: Quantity) -> DomainResult<()> {
        ensure_capacity(self.max_acceptable(slot, item), quantity)?;
        if quantity == 0 {
            return Ok(());
        }
        if let Some(entry) = self.slots.get_mut(slot) {
            match entry {
                Some(stack) => stack.quantity += quantity,
                None => *entry = Some(ItemStack::new(item.clone(), quantity)),
            }
        }
        Ok(())
    }

    fn remove_items(&mut self, slot: usize, quantity: Quantity) -> DomainResult<()> {
        ensure_held(self.quantity(slot), quantity)?;
        if quantity == 0 {
            return Ok(());
        }
        if let Some(entry) = self.slots.get_mut(slot) {
            if let Some(stack) = entry {
                stack.quantity -= quantity;
                if stack.quantity == 0 {
                    *entry = None;
                }
            }
        }
        Ok(())
    }
}

impl Saveable for ActionBar {
    fn state_key(&self) -> &'static str {
        "action_bar"
    }

    fn capture_state(&self) -> PersistenceResult<JsonValue> {
        Ok(serde_json::to_value(SavedSlots::capture(&self.slots))?)
    }

    fn restore_state(&mut self, state: JsonValue, catalog: &ItemCatalog) -> PersistenceResult<()> {
        let saved: SavedSlots = decode_state(self.state_key(), state)?;
        let (mut slots, spilled) = saved.restore(self.slots.len(), catalog, self.state_key());
        for stack in spilled {
            tracing::warn!(item = %stack.item.display_name, quantity = stack.quantity, "no action slot left, dropping");
        }
        for (index, slot) in slots.iter_mut().enumerate() {
            let Some(stack) = slot else { continue };
            if !stack.item.is_action() {
                tracing::warn!(slot = index, "saved item is no longer an action, skipping");
                *slot = None;
                continue;
            }
            let cap = if stack.item.is_consumable() { self.stack_limit } else { 1 };
            if stack.quantity > cap {
                tracing::warn!(
                    slot = index,
                    item = %stack.item.display_name,
                    saved = stack.quantity,
                    dropped = stack.quantity - cap,
                    "saved action stack exceeds the slot limit, dropping the excess"
                );
                stack.quantity = cap;
            }
        }
        self.slots = slots;
        Ok(())
    }
}

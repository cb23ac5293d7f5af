//! Inventory grid: a fixed number of cells sharing one stack limit.

use serde_json::Value as JsonValue;

use satchel_catalog::{Item, ItemCatalog};
use satchel_core::{DomainError, DomainResult, ItemId, Quantity, saturating_total};
use satchel_persistence::saveable::decode_state;
use satchel_persistence::{PersistenceResult, Saveable};
use satchel_transfer::{Container, ItemStack, ensure_capacity, ensure_held};

use crate::saved::SavedSlots;

/// Backpack-style grid.
///
/// Stackable items share a cell up to `stack_limit`; non-stackable items
/// take one cell per unit. A cell's capacity query reports the room left in
/// the whole grid, and additions that do not fit the addressed cell overflow
/// into other cells.
#[derive(Debug, Clone)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
    stack_limit: Quantity,
}

impl Inventory {
    pub fn new(size: usize, stack_limit: Quantity) -> DomainResult<Self> {
        if size == 0 {
            return Err(DomainError::validation("inventory needs at least one cell"));
        }
        if stack_limit == 0 {
            return Err(DomainError::validation("inventory stack limit must be positive"));
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

    pub fn stack_limit(&self) -> Quantity {
        self.stack_limit
    }

    pub fn get(&self, cell: usize) -> Option<&ItemStack> {
        self.slots.get(cell).and_then(Option::as_ref)
    }

    /// Occupied cells in index order.
    pub fn stacks(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(cell, slot)| slot.as_ref().map(|stack| (cell, stack)))
    }

    pub fn count_of(&self, item_id: ItemId) -> Quantity {
        saturating_total(
            self.stacks()
                .filter(|(_, stack)| stack.item_id() == item_id)
                .map(|(_, stack)| stack.quantity),
        )
    }

    pub fn has_space_for(&self, item: &Item) -> bool {
        self.total_room(item) > 0
    }

    /// Pickup path: merge into existing stacks, then empty cells.
    ///
    /// Returns `false` and changes nothing if the grid cannot hold all of
    /// `quantity`.
    pub fn add_to_first_empty_slot(&mut self, item: &Item, quantity: Quantity) -> bool {
        if self.total_room(item) < quantity {
            return false;
        }
        self.fill(None, item, quantity);
        true
    }

    fn cell_cap(&self, item: &Item) -> Quantity {
        if item.stackable { self.stack_limit } else { 1 }
    }

    fn room_in(&self, cell: usize, item: &Item) -> Quantity {
        match self.slots.get(cell) {
            Some(None) => self.cell_cap(item),
            Some(Some(stack)) if item.stackable && stack.holds(item) => {
                self.stack_limit.saturating_sub(stack.quantity)
            }
            _ => 0,
        }
    }

    fn total_room(&self, item: &Item) -> Quantity {
        saturating_total((0..self.slots.len()).map(|cell| self.room_in(cell, item)))
    }

    /// Distribute `quantity` units: `first` (if any), then same-item stacks,
    /// then empty cells. Caller has checked the grid can hold them all.
    fn fill(&mut self, first: Option<usize>, item: &Item, mut quantity: Quantity) {
        let merging = (0..self.slots.len()).filter(|&cell| {
            Some(cell) != first && self.get(cell).is_some_and(|stack| stack.holds(item))
        });
        let empty = (0..self.slots.len()).filter(|&cell| Some(cell) != first && self.get(cell).is_none());
        let order: Vec<usize> = first.into_iter().chain(merging).chain(empty).collect();

        for cell in order {
            if quantity == 0 {
                break;
            }
            let put = self.room_in(cell, item).min(quantity);
            if put == 0 {
                continue;
            }
            let slot = &mut self.slots[cell];
            match slot {
                Some(stack) => stack.quantity += put,
                None => *slot = Some(ItemStack::new(item.clone(), put)),
            }
            quantity -= put;
        }
    }
}

impl Container for Inventory {
    type Slot = usize;

    fn content(&self, cell: usize) -> Option<ItemStack> {
        self.get(cell).cloned()
    }

    fn max_acceptable(&self, cell: usize, item: &Item) -> Quantity {
        if cell >= self.slots.len() {
            return 0;
        }
        self.total_room(item)
    }

    fn add_items(&mut self, cell: usize, item: &Item, quantity: Quantity) -> DomainResult<()> {
        ensure_capacity(self.max_acceptable(cell, item), quantity)?;
        if quantity > 0 {
            self.fill(Some(cell), item, quantity);
        }
        Ok(())
    }

    fn remove_items(&mut self, cell: usize, quantity: Quantity) -> DomainResult<()> {
        ensure_held(self.quantity(cell), quantity)?;
        if quantity == 0 {
            return Ok(());
        }
        if let Some(slot) = self.slots.get_mut(cell) {
            if let Some(stack) = slot {
                stack.quantity -= quantity;
                if stack.quantity == 0 {
                    *slot = None;
                }
            }
        }
        Ok(())
    }
}

impl Saveable for Inventory {
    fn state_key(&self) -> &'static str {
        "inventory"
    }

    fn capture_state(&self) -> PersistenceResult<JsonValue> {
        Ok(serde_json::to_value(SavedSlots::capture(&self.slots))?)
    }

    fn restore_state(&mut self, state: JsonValue, catalog: &ItemCatalog) -> PersistenceResult<()> {
        let saved: SavedSlots = decode_state(self.state_key(), state)?;
        let (slots, mut overflow) = saved.restore(self.slots.len(), catalog, self.state_key());

        // A save written under another stack limit (or before an item's
        // stackable flag changed) may hold more per cell than this grid allows.
        self.slots = vec![None; slots.len()];
        for (cell, slot) in slots.into_iter().enumerate() {
            let Some(mut stack) = slot else { continue };
            let cap = self.cell_cap(&stack.item);
            if stack.quantity > cap {
                overflow.push(stack.with_quantity(stack.quantity - cap));
                stack.quantity = cap;
            }
            self.slots[cell] = Some(stack);
        }

        for stack in overflow {
            let placed = self.total_room(&stack.item).min(stack.quantity);
            self.fill(None, &stack.item, placed);
            if placed < stack.quantity {
                tracing::warn!(
                    item = %stack.item.display_name,
                    saved = stack.quantity,
                    dropped = stack.quantity - placed,
                    "saved stack does not fit the grid, dropping the excess"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use satchel_catalog::ItemDescriptor;

    fn potion() -> Item {
        ItemDescriptor::new(ItemId::new(), "Potion").stackable(true).into_item()
    }

    fn sword() -> Item {
        ItemDescriptor::new(ItemId::new(), "Sword").into_item()
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(matches!(Inventory::new(0, 10), Err(DomainError::Validation(_))));
        assert!(matches!(Inventory::new(4, 0), Err(DomainError::Validation(_))));
    }

    #[test]
    fn capacity_is_room_across_the_grid() {
        let p = potion();
        let s = sword();
        let mut inv = Inventory::new(3, 10).unwrap();
        inv.add_items(0, &p, 4).unwrap();

        // 6 left in cell 0, 10 in each empty cell.
        assert_eq!(inv.max_acceptable(0, &p), 26);
        assert_eq!(inv.max_acceptable(2, &p), 26);
        // Non-stackable: one per empty cell.
        assert_eq!(inv.max_acceptable(1, &s), 2);
        assert_eq!(inv.max_acceptable(3, &p), 0);
    }

    #[test]
    fn addressed_cell_fills_first_then_overflows() {
        let p = potion();
        let mut inv = Inventory::new(3, 5).unwrap();
        inv.add_items(2, &p, 7).unwrap();

        assert_eq!(inv.quantity(2), 5);
        assert_eq!(inv.quantity(0), 2);
        assert_eq!(inv.quantity(1), 0);
        assert_eq!(inv.count_of(p.id), 7);
    }

    #[test]
    fn overflow_prefers_existing_stacks() {
        let p = potion();
        let s = sword();
        let mut inv = Inventory::new(3, 5).unwrap();
        inv.add_items(0, &s, 1).unwrap();
        inv.add_items(2, &p, 3).unwrap();

        // Cell 0 holds a sword; units merge into cell 2 before using cell 1.
        inv.add_items(0, &p, 3).unwrap();
        assert_eq!(inv.quantity(2), 5);
        assert_eq!(inv.quantity(1), 1);
        assert!(inv.get(0).unwrap().holds(&s));
    }

    #[test]
    fn non_stackable_items_take_a_cell_each() {
        let s = sword();
        let mut inv = Inventory::new(3, 99).unwrap();
        inv.add_items(1, &s, 2).unwrap();
        assert_eq!(inv.quantity(1), 1);
        assert_eq!(inv.quantity(0), 1);
        assert_eq!(inv.count_of(s.id), 2);
    }

    #[test]
    fn over_capacity_add_writes_nothing() {
        let p = potion();
        let mut inv = Inventory::new(2, 5).unwrap();
        let err = inv.add_items(0, &p, 11).unwrap_err();
        assert!(err.is_contract_violation());
        assert!(inv.is_empty());
    }

    #[test]
    fn remove_empties_cell_at_zero() {
        let p = potion();
        let mut inv = Inventory::new(2, 5).unwrap();
        inv.add_items(0, &p, 3).unwrap();
        inv.remove_items(0, 2).unwrap();
        assert_eq!(inv.quantity(0), 1);
        inv.remove_items(0, 1).unwrap();
        assert!(inv.content(0).is_none());

        assert!(inv.remove_items(0, 1).unwrap_err().is_contract_violation());
        assert!(inv.remove_items(9, 1).unwrap_err().is_contract_violation());
    }

    #[test]
    fn pickup_is_all_or_nothing() {
        let p = potion();
        let mut inv = Inventory::new(2, 5).unwrap();
        assert!(inv.has_space_for(&p));
        assert!(!inv.add_to_first_empty_slot(&p, 11));
        assert!(inv.is_empty());

        assert!(inv.add_to_first_empty_slot(&p, 7));
        assert_eq!(inv.quantity(0), 5);
        assert_eq!(inv.quantity(1), 2);

        assert!(inv.add_to_first_empty_slot(&p, 3));
        assert!(!inv.has_space_for(&p));
    }

    #[test]
    fn capture_and_restore_skip_unknown_items() {
        let p = potion();
        let ghost = ItemDescriptor::new(ItemId::new(), "Ghost").into_item();
        let mut inv = Inventory::new(3, 5).unwrap();
        inv.add_items(0, &p, 4).unwrap();
        inv.add_items(2, &ghost, 1).unwrap();

        let state = inv.capture_state().unwrap();
        let mut catalog = ItemCatalog::new();
        catalog.insert((*p).clone()).unwrap();

        let mut restored = Inventory::new(3, 5).unwrap();
        restored.restore_state(state, &catalog).unwrap();
        assert_eq!(restored.quantity(0), 4);
        assert!(restored.content(2).is_none());
    }

    #[test]
    fn restore_under_smaller_limit_respreads_overflow() {
        let p = potion();
        let s = sword();
        let mut wide = Inventory::new(2, 99).unwrap();
        wide.add_items(0, &p, 50).unwrap();
        wide.add_items(1, &s, 1).unwrap();
        let state = wide.capture_state().unwrap();

        let mut catalog = ItemCatalog::new();
        catalog.insert((*p).clone()).unwrap();
        catalog.insert((*s).clone()).unwrap();

        // Two cells of 10: cell 0 keeps 10, nothing else has room for potions.
        let mut narrow = Inventory::new(2, 10).unwrap();
        narrow.restore_state(state.clone(), &catalog).unwrap();
        assert_eq!(narrow.quantity(0), 10);
        assert_eq!(narrow.count_of(s.id), 1);
        assert_eq!(narrow.max_acceptable(0, &p), 0);

        let mut roomy = Inventory::new(6, 10).unwrap();
        roomy.restore_state(state, &catalog).unwrap();
        assert_eq!(roomy.count_of(p.id), 50);
        assert!(roomy.stacks().all(|(_, stack)| stack.quantity <= 10));
    }

    #[test]
    fn restore_splits_stacks_of_non_stackable_items() {
        let s = sword();
        let json = serde_json::json!({
            "slots": [{ "item_id": s.id, "quantity": 3 }, null, null, null]
        });
        let mut catalog = ItemCatalog::new();
        catalog.insert((*s).clone()).unwrap();

        let mut inv = Inventory::new(3, 99).unwrap();
        inv.restore_state(json, &catalog).unwrap();
        assert_eq!(inv.count_of(s.id), 3);
        assert!(inv.stacks().all(|(_, stack)| stack.quantity == 1));
    }

    #[test]
    fn restore_rehomes_cells_past_the_end() {
        let p = potion();
        let mut big = Inventory::new(4, 10).unwrap();
        big.add_items(0, &p, 2).unwrap();
        big.add_items(3, &p, 5).unwrap();
        assert_eq!(big.quantity(3), 5);
        let state = big.capture_state().unwrap();

        let mut catalog = ItemCatalog::new();
        catalog.insert((*p).clone()).unwrap();
        let mut small = Inventory::new(2, 10).unwrap();
        small.restore_state(state, &catalog).unwrap();
        assert_eq!(small.quantity(0), 7);
        assert_eq!(small.count_of(p.id), 7);
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

        #[test]
        fn capacity_query_is_honoured(size in 1usize..6, limit in 1u32..20, pre in 0u32..40, cell in 0usize..6) {
            let p = potion();
            let mut inv = Inventory::new(size, limit).unwrap();
            let pre = pre.min(inv.max_acceptable(0, &p));
            inv.add_items(0, &p, pre).unwrap();

            let room = inv.max_acceptable(cell, &p);
            prop_assert_eq!(room, inv.max_acceptable(cell, &p));
            if cell < size {
                inv.add_items(cell, &p, room).unwrap();
                prop_assert_eq!(inv.count_of(p.id), pre + room);
                prop_assert_eq!(inv.max_acceptable(cell, &p), 0);
            } else {
                prop_assert_eq!(room, 0);
            }
        }
    }
}

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use satchel_catalog::{EquipLocation, Item, ItemCatalog};
use satchel_core::{DomainResult, ItemId, Quantity};
use satchel_persistence::saveable::decode_state;
use satchel_persistence::{PersistenceResult, Saveable};
use satchel_transfer::{Container, ItemStack, ensure_capacity, ensure_held};

/// Worn items, one per body location.
#[derive(Debug, Clone, Default)]
pub struct Equipment {
    sockets: BTreeMap<EquipLocation, Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_at(&self, location: EquipLocation) -> Option<&Item> {
        self.sockets.get(&location)
    }

    /// Occupied locations in declaration order.
    pub fn equipped(&self) -> impl Iterator<Item = (EquipLocation, &Item)> {
        self.sockets.iter().map(|(location, item)| (*location, item))
    }

    pub fn count_of(&self, item_id: ItemId) -> Quantity {
        self.sockets.values().filter(|item| item.id == item_id).count() as Quantity
    }
}

impl Container for Equipment {
    type Slot = EquipLocation;

    fn content(&self, location: EquipLocation) -> Option<ItemStack> {
        self.item_at(location).map(|item| ItemStack::new(item.clone(), 1))
    }

    fn max_acceptable(&self, location: EquipLocation, item: &Item) -> Quantity {
        if item.fits(location) && !self.sockets.contains_key(&location) {
            1
        } else {
            0
        }
    }

    fn add_items(&mut self, location: EquipLocation, item: &Item, quantity: Quantity) -> DomainResult<()> {
        ensure_capacity(self.max_acceptable(location, item), quantity)?;
        if quantity > 0 {
            self.sockets.insert(location, item.clone());
            tracing::debug!(%location, item = %item.display_name, "equipped");
        }
        Ok(())
    }

    fn remove_items(&mut self, location: EquipLocation, quantity: Quantity) -> DomainResult<()> {
        ensure_held(self.quantity(location), quantity)?;
        if quantity > 0 {
            self.sockets.remove(&location);
        }
        Ok(())
    }
}

impl Saveable for Equipment {
    fn state_key(&self) -> &'static str {
        "equipment"
    }

    fn capture_state(&self) -> PersistenceResult<JsonValue> {
        let saved: BTreeMap<EquipLocation, ItemId> = self
            .sockets
            .iter()
            .map(|(location, item)| (*location, item.id))
            .collect();
        Ok(serde_json::to_value(saved)?)
    }

    fn restore_state(&mut self, state: JsonValue, catalog: &ItemCatalog) -> PersistenceResult<()> {
        let saved: BTreeMap<EquipLocation, ItemId> = decode_state(self.state_key(), state)?;
        let mut sockets = BTreeMap::new();
        for (location, item_id) in saved {
            match catalog.get(&item_id) {
                Some(item) if item.fits(location) => {
                    sockets.insert(location, item);
                }
                Some(item) => {
                    tracing::warn!(%location, item = %item.display_name, "saved item no longer fits, skipping");
                }
                None => {
                    tracing::warn!(%location, %item_id, "saved item is not in the catalog, skipping");
                }
            }
        }
        self.sockets = sockets;
        Ok(())
    }
}

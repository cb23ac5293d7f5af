use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use satchel_catalog::{Item, ItemCatalog};
use satchel_core::{DomainResult, ItemId, Quantity, saturating_total};
use satchel_persistence::saveable::decode_state;
use satchel_persistence::{PersistenceResult, Saveable};
use satchel_transfer::{Container, ItemStack, ensure_held};

/// Units dropped into the world, waiting for a pickup to be spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRecord {
    pub item_id: ItemId,
    pub quantity: Quantity,
}

/// Bottomless sink: accepts anything, never holds or gives anything back.
#[derive(Debug, Clone, Default)]
pub struct WorldDrop {
    drops: Vec<DropRecord>,
}

impl WorldDrop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drops(&self) -> &[DropRecord] {
        &self.drops
    }

    /// Hand pending drops to the pickup spawner.
    pub fn take_drops(&mut self) -> Vec<DropRecord> {
        std::mem::take(&mut self.drops)
    }

    pub fn count_of(&self, item_id: ItemId) -> Quantity {
        saturating_total(
            self.drops
                .iter()
                .filter(|record| record.item_id == item_id)
                .map(|record| record.quantity),
        )
    }
}

impl Container for WorldDrop {
    type Slot = ();

    fn content(&self, _: ()) -> Option<ItemStack> {
        None
    }

    fn max_acceptable(&self, _: (), _: &Item) -> Quantity {
        Quantity::MAX
    }

    fn add_items(&mut self, _: (), item: &Item, quantity: Quantity) -> DomainResult<()> {
        if quantity > 0 {
            self.drops.push(DropRecord {
                item_id: item.id,
                quantity,
            });
            tracing::info!(item = %item.display_name, quantity, "dropped into the world");
        }
        Ok(())
    }

    fn remove_items(&mut self, _: (), quantity: Quantity) -> DomainResult<()> {
        ensure_held(0, quantity)
    }
}

impl Saveable for WorldDrop {
    fn state_key(&self) -> &'static str {
        "world_drops"
    }

    fn capture_state(&self) -> PersistenceResult<JsonValue> {
        Ok(serde_json::to_value(&self.drops)?)
    }

    fn restore_state(&mut self, state: JsonValue, catalog: &ItemCatalog) -> PersistenceResult<()> {
        let saved: Vec<DropRecord> = decode_state(self.state_key(), state)?;
        self.drops = saved
            .into_iter()
            .filter(|record| {
                let known = catalog.get(&record.item_id).is_some();
                if !known {
                    tracing::warn!(item_id = %record.item_id, "dropped item is not in the catalog, skipping");
                }
                known && record.quantity > 0
            })
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_catalog::ItemDescriptor;

    #[test]
    fn accepts_everything_and_records_it() {
        let bone = ItemDescriptor::new(ItemId::new(), "Bone").into_item();
        let mut world = WorldDrop::new();

        assert_eq!(world.max_acceptable((), &bone), Quantity::MAX);
        world.add_items((), &bone, 3).unwrap();
        world.add_items((), &bone, 0).unwrap();
        assert!(world.content(()).is_none());
        assert_eq!(world.drops(), &[DropRecord { item_id: bone.id, quantity: 3 }]);
        assert_eq!(world.count_of(bone.id), 3);

        let taken = world.take_drops();
        assert_eq!(taken.len(), 1);
        assert!(world.drops().is_empty());
    }

    #[test]
    fn nothing_can_be_taken_back() {
        let mut world = WorldDrop::new();
        assert!(world.remove_items((), 0).is_ok());
        assert!(world.remove_items((), 1).unwrap_err().is_contract_violation());
    }
}

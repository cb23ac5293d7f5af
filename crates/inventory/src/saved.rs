use serde::{Deserialize, Serialize};

use satchel_catalog::ItemCatalog;
use satchel_core::{ItemId, Quantity};
use satchel_transfer::ItemStack;

/// Persisted form of one occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedStack {
    pub item_id: ItemId,
    pub quantity: Quantity,
}

impl From<&ItemStack> for SavedStack {
    fn from(stack: &ItemStack) -> Self {
        Self {
            item_id: stack.item_id(),
            quantity: stack.quantity,
        }
    }
}

impl SavedStack {
    /// Resolve against the catalog. Unknown ids and empty stacks are dropped.
    pub fn resolve(self, catalog: &ItemCatalog, component: &str) -> Option<ItemStack> {
        if self.quantity == 0 {
            return None;
        }
        match catalog.get(&self.item_id) {
            Some(item) => Some(ItemStack::new(item, self.quantity)),
            None => {
                tracing::warn!(
                    component,
                    item_id = %self.item_id,
                    "saved item is not in the catalog, skipping"
                );
                None
            }
        }
    }
}

/// Persisted form of a list of optional slots (inventory grid, action bar).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSlots {
    #[serde(default)]
    pub slots: Vec<Option<SavedStack>>,
}

impl SavedSlots {
    pub fn capture(slots: &[Option<ItemStack>]) -> Self {
        Self {
            slots: slots
                .iter()
                .map(|slot| slot.as_ref().map(SavedStack::from))
                .collect(),
        }
    }

    /// Rebuild `size` slots.
    ///
    /// Returns the slots and the stacks saved past `size`, which the caller
    /// may re-home or drop.
    pub fn restore(
        self,
        size: usize,
        catalog: &ItemCatalog,
        component: &str,
    ) -> (Vec<Option<ItemStack>>, Vec<ItemStack>) {
        let saved = self.slots.len();
        if saved > size {
            tracing::warn!(component, saved, size, "save has more slots than the container");
        }
        let mut resolved = self
            .slots
            .into_iter()
            .map(|slot| slot.and_then(|s| s.resolve(catalog, component)));
        let mut slots: Vec<Option<ItemStack>> = resolved.by_ref().take(size).collect();
        slots.resize(size, None);
        let spilled = resolved.flatten().collect();
        (slots, spilled)
    }
}

//! A character's full set of containers behind one slot address space.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use satchel_catalog::{EquipLocation, Item, ItemCatalog};
use satchel_core::{DomainError, DomainResult, Entity, EntityId, ItemId, Quantity, saturating_total};
use satchel_persistence::{EntityState, PersistenceResult, SaveableEntity};
use satchel_transfer::{Container, ItemStack};

use crate::action_bar::ActionBar;
use crate::equipment::Equipment;
use crate::grid::Inventory;
use crate::world_drop::WorldDrop;

/// Address of any slot a loadout owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRef {
    Inventory(usize),
    Equipment(EquipLocation),
    Action(usize),
    World,
}

impl core::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SlotRef::Inventory(cell) => write!(f, "inv:{cell}"),
            SlotRef::Equipment(location) => write!(f, "equip:{location}"),
            SlotRef::Action(slot) => write!(f, "action:{slot}"),
            SlotRef::World => f.write_str("world"),
        }
    }
}

impl FromStr for SlotRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("world") {
            return Ok(SlotRef::World);
        }

        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| DomainError::validation(format!("slot '{s}' must look like kind:index")))?;
        let index = |rest: &str| {
            rest.trim()
                .parse::<usize>()
                .map_err(|e| DomainError::validation(format!("slot '{s}': {e}")))
        };

        match kind.trim().to_ascii_lowercase().as_str() {
            "inv" => Ok(SlotRef::Inventory(index(rest)?)),
            "action" => Ok(SlotRef::Action(index(rest)?)),
            "equip" => Ok(SlotRef::Equipment(rest.parse()?)),
            other => Err(DomainError::validation(format!("unknown slot kind '{other}'"))),
        }
    }
}

/// Dimensions of a new loadout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadoutConfig {
    pub inventory_size: usize,
    pub inventory_stack_limit: Quantity,
    pub action_slots: usize,
    pub action_stack_limit: Quantity,
}

impl Default for LoadoutConfig {
    fn default() -> Self {
        Self {
            inventory_size: 16,
            inventory_stack_limit: 99,
            action_slots: 6,
            action_stack_limit: 99,
        }
    }
}

impl LoadoutConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.inventory_size == 0 {
            return Err(DomainError::validation("inventory_size must be > 0"));
        }
        if self.inventory_stack_limit == 0 {
            return Err(DomainError::validation("inventory_stack_limit must be > 0"));
        }
        if self.action_stack_limit == 0 {
            return Err(DomainError::validation("action_stack_limit must be > 0"));
        }
        Ok(())
    }
}

/// Inventory, equipment, action bar and world sink of one character.
#[derive(Debug, Clone)]
pub struct Loadout {
    id: EntityId,
    inventory: Inventory,
    equipment: Equipment,
    action_bar: ActionBar,
    world: WorldDrop,
}

impl Loadout {
    pub fn new(id: EntityId, config: &LoadoutConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            id,
            inventory: Inventory::new(config.inventory_size, config.inventory_stack_limit)?,
            equipment: Equipment::new(),
            action_bar: ActionBar::new(config.action_slots, config.action_stack_limit)?,
            world: WorldDrop::new(),
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn action_bar(&self) -> &ActionBar {
        &self.action_bar
    }

    pub fn action_bar_mut(&mut self) -> &mut ActionBar {
        &mut self.action_bar
    }

    pub fn world(&self) -> &WorldDrop {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldDrop {
        &mut self.world
    }

    /// Units of `item_id` held anywhere, pending world drops included.
    pub fn total_of(&self, item_id: ItemId) -> Quantity {
        saturating_total([
            self.inventory.count_of(item_id),
            self.equipment.count_of(item_id),
            self.action_bar.count_of(item_id),
            self.world.count_of(item_id),
        ])
    }
}

impl Container for Loadout {
    type Slot = SlotRef;

    fn content(&self, slot: SlotRef) -> Option<ItemStack> {
        match slot {
            SlotRef::Inventory(cell) => self.inventory.content(cell),
            SlotRef::Equipment(location) => self.equipment.content(location),
            SlotRef::Action(index) => self.action_bar.content(index),
            SlotRef::World => self.world.content(()),
        }
    }

    fn max_acceptable(&self, slot: SlotRef, item: &Item) -> Quantity {
        match slot {
            SlotRef::Inventory(cell) => self.inventory.max_acceptable(cell, item),
            SlotRef::Equipment(location) => self.equipment.max_acceptable(location, item),
            SlotRef::Action(index) => self.action_bar.max_acceptable(index, item),
            SlotRef::World => self.world.max_acceptable((), item),
        }
    }

    fn add_items(&mut self, slot: SlotRef, item: &Item, quantity: Quantity) -> DomainResult<()> {
        match slot {
            SlotRef::Inventory(cell) => self.inventory.add_items(cell, item, quantity),
            SlotRef::Equipment(location) => self.equipment.add_items(location, item, quantity),
            SlotRef::Action(index) => self.action_bar.add_items(index, item, quantity),
            SlotRef::World => self.world.add_items((), item, quantity),
        }
    }

    fn remove_items(&mut self, slot: SlotRef, quantity: Quantity) -> DomainResult<()> {
        match slot {
            SlotRef::Inventory(cell) => self.inventory.remove_items(cell, quantity),
            SlotRef::Equipment(location) => self.equipment.remove_items(location, quantity),
            SlotRef::Action(index) => self.action_bar.remove_items(index, quantity),
            SlotRef::World => self.world.remove_items((), quantity),
        }
    }
}

impl Entity for Loadout {
    type Id = EntityId;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl SaveableEntity for Loadout {
    fn capture(&self) -> PersistenceResult<EntityState> {
        EntityState::capture(&[&self.inventory, &self.equipment, &self.action_bar, &self.world])
    }

    fn restore(&mut self, state: &EntityState, catalog: &ItemCatalog) -> PersistenceResult<()> {
        let restored = state.restore(
            &mut [
                &mut self.inventory,
                &mut self.equipment,
                &mut self.action_bar,
                &mut self.world,
            ],
            catalog,
        )?;
        tracing::debug!(loadout = %self.id, components = restored, "loadout restored");
        Ok(())
    }
}

//! Container kinds that take part in transfers.
//!
//! Each kind implements [`Container`](satchel_transfer::Container) and
//! [`Saveable`](satchel_persistence::Saveable). [`Loadout`] bundles one of
//! each behind a single [`SlotRef`] address space so the transfer engine can
//! move items between any two of them.

pub mod action_bar;
pub mod equipment;
pub mod grid;
pub mod loadout;
mod saved;
pub mod world_drop;

pub use action_bar::ActionBar;
pub use equipment::Equipment;
pub use grid::Inventory;
pub use loadout::{Loadout, LoadoutConfig, SlotRef};
pub use saved::SavedStack;
pub use world_drop::{DropRecord, WorldDrop};

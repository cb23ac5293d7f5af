//! Item type definitions and the catalog that owns them.
//!
//! Descriptors are immutable and shared as [`Item`] (`Arc<ItemDescriptor>`);
//! containers hold those handles and compare them by [`ItemId`].

pub mod catalog;
pub mod descriptor;

pub use catalog::ItemCatalog;
pub use descriptor::{EquipLocation, Item, ItemDescriptor, ItemKind};

pub use satchel_core::ItemId;

//! Slotted-container transfer protocol.
//!
//! A gesture (drag and drop, a scripted move) names a source and a
//! destination slot; [`TransferEngine`] moves what it can from one to the
//! other, or exchanges their contents, without ever losing or duplicating a
//! unit. The engine only talks to slots through the [`Container`] capability
//! trait, so every slot kind (inventory cell, equipment socket, action slot,
//! world-drop sink) is handled by the same code path.

pub mod container;
pub mod engine;
pub mod event;
pub mod outcome;

pub use container::{Container, ItemStack, ensure_capacity, ensure_held};
pub use engine::{TransferEngine, TransferRequest};
pub use event::TransferEvent;
pub use outcome::{NoOpReason, TransferOutcome};

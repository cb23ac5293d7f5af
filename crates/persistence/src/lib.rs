//! Capture and restore of container state, keyed by stable entity id.
//!
//! Components (an inventory grid, an equipment board, ...) implement
//! [`Saveable`]; the owner composes them into an [`EntityState`] through
//! [`SaveableEntity`]. A [`SavingSystem`] merges every entity's state into a
//! named [`SaveFile`] held by a [`SaveStore`].

pub mod error;
pub mod saveable;
pub mod store;
pub mod system;

pub use error::{PersistenceError, PersistenceResult};
pub use saveable::{EntityState, SaveFile, Saveable, SaveableEntity};
pub use store::{InMemorySaveStore, JsonFileSaveStore, SaveStore};
pub use system::SavingSystem;

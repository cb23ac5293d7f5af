//! `satchel-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the container,
//! transfer and persistence crates (no IO, no logging setup).

pub mod entity;
pub mod error;
pub mod id;
pub mod quantity;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, ItemId};
pub use quantity::{Quantity, saturating_total};
pub use value_object::ValueObject;

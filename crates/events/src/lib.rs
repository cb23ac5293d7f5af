//! Change notifications for container owners.
//!
//! Transfers are pure; whoever drives them (a session, a UI) wraps each
//! outcome into an event and publishes it so views can redraw.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};

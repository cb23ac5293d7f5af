use chrono::{DateTime, Utc};

/// Something that happened to a container owner.
///
/// Published after the fact; subscribers only read it. `version` lets a
/// reader of persisted or forwarded events tell payload shapes apart.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "transfer.items_moved").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// Wall-clock time the change was made.
    fn occurred_at(&self) -> DateTime<Utc>;
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use satchel_core::{ItemId, Quantity};
use satchel_events::Event;

use crate::engine::TransferRequest;
use crate::outcome::{NoOpReason, TransferOutcome};

/// Event: ItemsMoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsMoved<S> {
    pub source: S,
    pub destination: S,
    pub item_id: ItemId,
    pub quantity: Quantity,
    pub left_behind: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SlotsSwapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotsSwapped<S> {
    pub source: S,
    pub destination: S,
    /// Item and amount that landed in the source slot.
    pub to_source: (ItemId, Quantity),
    /// Item and amount that landed in the destination slot.
    pub to_destination: (ItemId, Quantity),
    pub returned_to_source: Quantity,
    pub returned_to_destination: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TransferRejected (nothing changed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRejected<S> {
    pub source: S,
    pub destination: S,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

/// Change notification for one finished transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferEvent<S> {
    ItemsMoved(ItemsMoved<S>),
    SlotsSwapped(SlotsSwapped<S>),
    SwapRolledBack(TransferRejected<S>),
    Rejected(TransferRejected<S>),
}

impl<S: Copy> TransferEvent<S> {
    pub fn from_outcome(
        request: TransferRequest<S>,
        outcome: &TransferOutcome,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        let TransferRequest {
            source,
            destination,
        } = request;

        match outcome {
            TransferOutcome::Moved { moved, left_behind } => TransferEvent::ItemsMoved(ItemsMoved {
                source,
                destination,
                item_id: moved.item_id(),
                quantity: moved.quantity,
                left_behind: *left_behind,
                occurred_at,
            }),
            TransferOutcome::Swapped {
                to_source,
                to_destination,
                returned_to_source,
                returned_to_destination,
            } => TransferEvent::SlotsSwapped(SlotsSwapped {
                source,
                destination,
                to_source: (to_source.item_id(), to_source.quantity),
                to_destination: (to_destination.item_id(), to_destination.quantity),
                returned_to_source: *returned_to_source,
                returned_to_destination: *returned_to_destination,
                occurred_at,
            }),
            TransferOutcome::NoOp(reason) => {
                let rejected = TransferRejected {
                    source,
                    destination,
                    reason: reason.as_str().to_string(),
                    occurred_at,
                };
                if *reason == NoOpReason::SwapRolledBack {
                    TransferEvent::SwapRolledBack(rejected)
                } else {
                    TransferEvent::Rejected(rejected)
                }
            }
        }
    }

    /// Slots whose content may have changed; empty for rejections.
    pub fn touched(&self) -> Vec<S> {
        match self {
            TransferEvent::ItemsMoved(e) => vec![e.source, e.destination],
            TransferEvent::SlotsSwapped(e) => vec![e.source, e.destination],
            TransferEvent::SwapRolledBack(_) | TransferEvent::Rejected(_) => Vec::new(),
        }
    }
}

impl<S> Event for TransferEvent<S>
where
    S: Clone + core::fmt::Debug + Send + Sync + 'static,
{
    fn event_type(&self) -> &'static str {
        match self {
            TransferEvent::ItemsMoved(_) => "transfer.items_moved",
            TransferEvent::SlotsSwapped(_) => "transfer.slots_swapped",
            TransferEvent::SwapRolledBack(_) => "transfer.swap_rolled_back",
            TransferEvent::Rejected(_) => "transfer.rejected",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            TransferEvent::ItemsMoved(e) => e.occurred_at,
            TransferEvent::SlotsSwapped(e) => e.occurred_at,
            TransferEvent::SwapRolledBack(e) => e.occurred_at,
            TransferEvent::Rejected(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ItemStack;
    use satchel_catalog::ItemDescriptor;

    #[test]
    fn moved_outcome_becomes_items_moved() {
        let arrow = ItemDescriptor::new(ItemId::new(), "Arrow").stackable(true).into_item();
        let outcome = TransferOutcome::Moved {
            moved: ItemStack::new(arrow.clone(), 4),
            left_behind: 6,
        };
        let now = Utc::now();

        let event = TransferEvent::from_outcome(TransferRequest::new(0u8, 1u8), &outcome, now);
        assert_eq!(event.event_type(), "transfer.items_moved");
        assert_eq!(event.occurred_at(), now);
        assert_eq!(event.touched(), vec![0, 1]);
        match event {
            TransferEvent::ItemsMoved(e) => {
                assert_eq!(e.item_id, arrow.id);
                assert_eq!(e.quantity, 4);
                assert_eq!(e.left_behind, 6);
            }
            other => panic!("expected ItemsMoved, got {other:?}"),
        }
    }

    #[test]
    fn rollback_and_rejection_touch_nothing() {
        let now = Utc::now();
        let rolled = TransferEvent::from_outcome(
            TransferRequest::new(2u8, 3u8),
            &TransferOutcome::NoOp(NoOpReason::SwapRolledBack),
            now,
        );
        assert_eq!(rolled.event_type(), "transfer.swap_rolled_back");
        assert!(rolled.touched().is_empty());

        let rejected = TransferEvent::from_outcome(
            TransferRequest::new(2u8, 2u8),
            &TransferOutcome::NoOp(NoOpReason::SelfDrop),
            now,
        );
        match rejected {
            TransferEvent::Rejected(e) => assert_eq!(e.reason, "self_drop"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}

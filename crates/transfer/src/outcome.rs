use satchel_core::Quantity;

use crate::container::ItemStack;

/// Why a transfer left both slots untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// Source and destination are the same slot.
    SelfDrop,
    /// Nothing to move.
    EmptySource,
    /// The destination cannot take a single unit of the source's item.
    NothingAccepted,
    /// A swap could not fit both sides; everything was put back.
    SwapRolledBack,
}

impl NoOpReason {
    pub fn as_str(self) -> &'static str {
        match self {
            NoOpReason::SelfDrop => "self_drop",
            NoOpReason::EmptySource => "empty_source",
            NoOpReason::NothingAccepted => "nothing_accepted",
            NoOpReason::SwapRolledBack => "swap_rolled_back",
        }
    }
}

/// Result of one transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// One-directional move. `left_behind` is what stayed in the source.
    Moved {
        moved: ItemStack,
        left_behind: Quantity,
    },
    /// Two-directional exchange.
    ///
    /// `to_source` / `to_destination` are what crossed over; the `returned_*`
    /// amounts are takebacks that could not fit the other side and went back
    /// to where they came from.
    Swapped {
        to_source: ItemStack,
        to_destination: ItemStack,
        returned_to_source: Quantity,
        returned_to_destination: Quantity,
    },
    NoOp(NoOpReason),
}

impl TransferOutcome {
    /// Whether any unit changed slot. The gesture source reverts its visuals
    /// when this is false.
    pub fn moved(&self) -> bool {
        !matches!(self, TransferOutcome::NoOp(_))
    }

    pub fn no_op_reason(&self) -> Option<NoOpReason> {
        match self {
            TransferOutcome::NoOp(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_no_ops_report_not_moved() {
        assert!(!TransferOutcome::NoOp(NoOpReason::SelfDrop).moved());
        assert_eq!(
            TransferOutcome::NoOp(NoOpReason::SwapRolledBack).no_op_reason(),
            Some(NoOpReason::SwapRolledBack)
        );
    }
}

//! Transfer engine: simple transfers and all-or-nothing swaps.

use satchel_catalog::Item;
use satchel_core::{DomainResult, Quantity};

use crate::container::{Container, ItemStack};
use crate::outcome::{NoOpReason, TransferOutcome};

/// One completed gesture: move from `source` to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest<S> {
    pub source: S,
    pub destination: S,
}

impl<S> TransferRequest<S> {
    pub fn new(source: S, destination: S) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// Stateless transfer engine.
///
/// Routing:
/// - same slot, or empty source: nothing happens;
/// - destination empty, or holding the same item type: simple transfer,
///   truncated to what the destination accepts;
/// - destination holding a different item type: swap.
///
/// Every summed quantity per item type across the two slots is the same
/// before and after a call, whatever the outcome. An `Err` only ever comes
/// from a container breaking its own capacity contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransferEngine;

impl TransferEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn execute<C: Container>(
        &self,
        containers: &mut C,
        request: TransferRequest<C::Slot>,
    ) -> DomainResult<TransferOutcome> {
        let TransferRequest {
            source,
            destination,
        } = request;

        if source == destination {
            tracing::debug!(?source, "dropped onto its own slot");
            return Ok(TransferOutcome::NoOp(NoOpReason::SelfDrop));
        }

        let carried = match containers.content(source) {
            Some(stack) if stack.quantity > 0 => stack,
            _ => {
                tracing::debug!(?source, "nothing to move");
                return Ok(TransferOutcome::NoOp(NoOpReason::EmptySource));
            }
        };

        match containers.content(destination) {
            Some(occupant) if occupant.quantity > 0 && !occupant.holds(&carried.item) => {
                tracing::debug!(?source, ?destination, "destination occupied, swapping");
                self.swap(containers, source, destination, carried, occupant)
            }
            _ => self.simple_transfer(containers, source, destination, carried),
        }
    }

    fn simple_transfer<C: Container>(
        &self,
        containers: &mut C,
        source: C::Slot,
        destination: C::Slot,
        carried: ItemStack,
    ) -> DomainResult<TransferOutcome> {
        let accept = containers
            .max_acceptable(destination, &carried.item)
            .min(carried.quantity);

        if accept == 0 {
            tracing::debug!(?destination, item = %carried.item.display_name, "destination accepts none");
            return Ok(TransferOutcome::NoOp(NoOpReason::NothingAccepted));
        }

        containers.remove_items(source, accept)?;
        if let Err(err) = containers.add_items(destination, &carried.item, accept) {
            // Put the units back where they came from before reporting.
            if let Err(restore) = containers.add_items(source, &carried.item, accept) {
                tracing::error!(?source, %restore, "could not restore source after failed add");
            }
            return Err(err);
        }

        tracing::info!(
            ?source,
            ?destination,
            item = %carried.item.display_name,
            quantity = accept,
            "items moved"
        );

        Ok(TransferOutcome::Moved {
            moved: carried.with_quantity(accept),
            left_behind: carried.quantity - accept,
        })
    }

    /// Exchange two different occupants.
    ///
    /// Steps run in a fixed order: clear both, compute takebacks, return
    /// takebacks, check the remainders fit, then either commit both sides or
    /// restore both originals. Later steps read capacities that depend on the
    /// exact state the earlier ones left behind.
    ///
    /// If a container breaks its contract after the clear, every add made so
    /// far is undone and both originals go back before the error is returned.
    fn swap<C: Container>(
        &self,
        containers: &mut C,
        source: C::Slot,
        destination: C::Slot,
        carried: ItemStack,
        occupant: ItemStack,
    ) -> DomainResult<TransferOutcome> {
        containers.remove_items(source, carried.quantity)?;
        if let Err(err) = containers.remove_items(destination, occupant.quantity) {
            put_back(containers, source, &carried);
            return Err(err);
        }

        let mut applied = Vec::new();
        match settle_swap(containers, source, destination, &carried, &occupant, &mut applied) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                for (slot, quantity) in applied.into_iter().rev() {
                    if let Err(undo) = containers.remove_items(slot, quantity) {
                        tracing::error!(?slot, quantity, %undo, "could not undo swap step");
                    }
                }
                put_back(containers, destination, &occupant);
                put_back(containers, source, &carried);
                Err(err)
            }
        }
    }
}

/// Everything a swap does once both slots are cleared. Each successful add
/// is recorded in `applied`.
fn settle_swap<C: Container>(
    containers: &mut C,
    source: C::Slot,
    destination: C::Slot,
    carried: &ItemStack,
    occupant: &ItemStack,
    applied: &mut Vec<(C::Slot, Quantity)>,
) -> DomainResult<TransferOutcome> {
    let source_item = &carried.item;
    let destination_item = &occupant.item;
    let mut source_qty = carried.quantity;
    let mut destination_qty = occupant.quantity;

    let source_takeback = takeback(containers, source_item, source_qty, source, destination);
    let destination_takeback =
        takeback(containers, destination_item, destination_qty, destination, source);

    apply(containers, applied, source, source_item, source_takeback)?;
    source_qty -= source_takeback;
    apply(containers, applied, destination, destination_item, destination_takeback)?;
    destination_qty -= destination_takeback;

    let source_fits = containers.max_acceptable(source, destination_item) >= destination_qty;
    let destination_fits = containers.max_acceptable(destination, source_item) >= source_qty;

    if !(source_fits && destination_fits) {
        apply(containers, applied, destination, destination_item, destination_qty)?;
        apply(containers, applied, source, source_item, source_qty)?;
        tracing::debug!(
            ?source,
            ?destination,
            source_fits,
            destination_fits,
            "swap does not fit, rolled back"
        );
        return Ok(TransferOutcome::NoOp(NoOpReason::SwapRolledBack));
    }

    apply(containers, applied, source, destination_item, destination_qty)?;
    apply(containers, applied, destination, source_item, source_qty)?;

    tracing::info!(
        ?source,
        ?destination,
        to_source = destination_qty,
        to_destination = source_qty,
        source_takeback,
        destination_takeback,
        "slots swapped"
    );

    Ok(TransferOutcome::Swapped {
        to_source: ItemStack::new(destination_item.clone(), destination_qty),
        to_destination: ItemStack::new(source_item.clone(), source_qty),
        returned_to_source: source_takeback,
        returned_to_destination: destination_takeback,
    })
}

fn apply<C: Container>(
    containers: &mut C,
    applied: &mut Vec<(C::Slot, Quantity)>,
    slot: C::Slot,
    item: &Item,
    quantity: Quantity,
) -> DomainResult<()> {
    if quantity > 0 {
        containers.add_items(slot, item, quantity)?;
        applied.push((slot, quantity));
    }
    Ok(())
}

/// Return a cleared stack to its slot after a broken add.
fn put_back<C: Container>(containers: &mut C, slot: C::Slot, stack: &ItemStack) {
    if let Err(restore) = containers.add_items(slot, &stack.item, stack.quantity) {
        tracing::error!(?slot, quantity = stack.quantity, %restore, "could not restore slot after failed swap");
    }
}

/// Units of `item` that do not fit `away` and must go back `home`.
///
/// Returns `0` when `home` cannot re-absorb the whole shortfall either; the
/// swap's feasibility check then rejects the exchange.
fn takeback<C: Container>(
    containers: &C,
    item: &Item,
    quantity: Quantity,
    home: C::Slot,
    away: C::Slot,
) -> Quantity {
    let room_away = containers.max_acceptable(away, item);
    if room_away >= quantity {
        return 0;
    }

    let shortfall = quantity - room_away;
    if containers.max_acceptable(home, item) < shortfall {
        return 0;
    }
    shortfall
}

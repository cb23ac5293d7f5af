//! Item quantities.

/// Non-negative count of one item type held together in a slot.
///
/// `Quantity::MAX` doubles as "unbounded" for capacities (the world-drop sink
/// reports it), so capacity sums must saturate rather than overflow.
pub type Quantity = u32;

/// Sum capacities without wrapping past `Quantity::MAX`.
pub fn saturating_total<I>(parts: I) -> Quantity
where
    I: IntoIterator<Item = Quantity>,
{
    parts
        .into_iter()
        .fold(0, |acc: Quantity, part| acc.saturating_add(part))
}

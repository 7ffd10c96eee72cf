use crate::domain::board::{Board, CardId, ColumnId};
use crate::engine::geometry::Rect;

/// Where a relocated card lands inside its target column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardSlot {
    /// Empty-column sentinel: append at the end of the card list.
    End,
    /// At the hovered card's index, bumped one past it when the dragged
    /// rectangle sits below it.
    Near { card: CardId, below: bool },
}

/// Above/below tie-break for a drop onto an occupied slot: the dragged
/// rectangle counts as "below" once its top edge passes the hovered card's
/// bottom edge.
///
/// This is a heuristic, not exact geometry. It lives in one place so hosts
/// that want a different pixel rule change a single comparison; the boundary
/// behavior is pinned by the tests here rather than by parity with any
/// particular UI toolkit.
pub fn is_below(dragged: &Rect, target: &Rect) -> bool {
    dragged.top() > target.bottom()
}

/// Moves a card between columns in one atomic step: splice out of `from`,
/// splice into `to` at the slot's index, and rewrite the card's back-reference
/// to `to` — the intermediate state is never observable.
///
/// Returns whether the board changed. Same-column slots, unknown columns, and
/// unknown cards all degrade to no-ops; a gesture never fails mid-flight.
pub fn relocate_card(
    board: &mut Board,
    card_id: CardId,
    from: ColumnId,
    to: ColumnId,
    slot: CardSlot,
) -> bool {
    if from == to {
        return false;
    }

    let index = match board.column(to) {
        None => return false,
        Some(to_col) => match slot {
            CardSlot::End => to_col.cards.len(),
            CardSlot::Near { card, below } => to_col
                .card_order
                .iter()
                .position(|id| *id == card)
                .map(|i| i + usize::from(below))
                .unwrap_or(to_col.cards.len()),
        },
    };

    let origin_index = match board.column(from) {
        None => return false,
        Some(col) => match col.card_order.iter().position(|id| *id == card_id) {
            None => return false,
            Some(i) => i,
        },
    };

    let mut card = match board.column_mut(from).and_then(|col| col.remove_card(card_id)) {
        None => return false,
        Some(card) => card,
    };
    card.column_id = to;

    match board.column_mut(to) {
        Some(to_col) => {
            to_col.insert_card(card, index);
            true
        }
        None => {
            // target column vanished between lookups: put the card back
            card.column_id = from;
            if let Some(from_col) = board.column_mut(from) {
                from_col.insert_card(card, origin_index);
            }
            false
        }
    }
}

use crate::domain::board::{Board, BoardId, CardId, ColumnId};
use crate::engine::collision::{DropTarget, TargetId};
use crate::engine::geometry::Rect;
use crate::engine::reorder::{self, CardSlot};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Distance in pixels a pointer must travel before a press becomes a drag.
///
/// Activation is host input plumbing: the host watches raw pointer/touch
/// events against these thresholds and calls [`DragSession::start`] once a
/// gesture qualifies. The engine treats `start` as authoritative.
pub const POINTER_ACTIVATION_DISTANCE: f64 = 10.0;
/// Hold duration before a touch press becomes a drag rather than a scroll.
pub const TOUCH_ACTIVATION_DELAY_MS: u64 = 250;
/// Touch jitter tolerated during the activation delay.
pub const TOUCH_ACTIVATION_TOLERANCE: f64 = 5.0;

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragKind {
    Column,
    Card,
}

/// Pointer movement since drag start, in the same pixel space as the rects.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerDelta {
    pub x: f64,
    pub y: f64,
}

/// One drag lifecycle event as reported by the host.
///
/// `active_rect` is the dragged item's rect at drag start; its current
/// position is `active_rect` translated by `pointer_delta`. `over` carries
/// the collision-resolved target, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragEvent {
    pub active: TargetId,
    pub active_rect: Rect,
    pub over: Option<DropTarget>,
    pub pointer_delta: PointerDelta,
}

/// A committed column reordering, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOrderChange {
    pub board_id: BoardId,
    pub column_order: Vec<ColumnId>,
}

/// One column's final card order within a [`CardOrderChange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCards {
    pub column_id: ColumnId,
    pub card_order: Vec<CardId>,
}

/// A committed card move. For an intra-column reorder `source` and
/// `destination` name the same column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardOrderChange {
    pub board_id: BoardId,
    pub moved_card: CardId,
    pub new_column: ColumnId,
    pub source: ColumnCards,
    pub destination: ColumnCards,
}

/// The minimal diff handed to the persistence boundary after a drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderChange {
    Columns(ColumnOrderChange),
    Cards(CardOrderChange),
}

/// Result of ending a drag: the committed board for local render plus the
/// order diff to persist and broadcast. `change` is `None` when the gesture
/// turned out to be a no-op and there is nothing to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome {
    pub board: Board,
    pub change: Option<OrderChange>,
}

impl DropOutcome {
    fn unchanged(board: Board) -> Self {
        Self {
            board,
            change: None,
        }
    }
}

/// The active drag, if any. Only one gesture can be in flight at a time;
/// `start` is reachable only from `Idle`, which is the whole concurrency
/// story for this engine.
///
/// While dragging, `baseline` is the board frozen at drag start and `live`
/// is the speculative snapshot that cross-column moves mutate for preview.
/// Same-column reordering waits for the drop and is computed against the
/// baseline, so intermediate splices never compound.
#[derive(Debug, Clone, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging {
        active: TargetId,
        origin_column: Option<ColumnId>,
        baseline: Board,
        live: Board,
    },
}

impl DragSession {
    pub fn new() -> Self {
        Self::Idle
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn kind(&self) -> Option<DragKind> {
        match self {
            Self::Idle => None,
            Self::Dragging { active, .. } => Some(match active {
                TargetId::Column(_) => DragKind::Column,
                TargetId::Card(_) => DragKind::Card,
            }),
        }
    }

    /// The column the dragged card started in, frozen for the whole gesture.
    pub fn origin_column(&self) -> Option<ColumnId> {
        match self {
            Self::Idle => None,
            Self::Dragging { origin_column, .. } => *origin_column,
        }
    }

    /// The speculative board the host should currently be rendering.
    pub fn live_board(&self) -> Option<&Board> {
        match self {
            Self::Idle => None,
            Self::Dragging { live, .. } => Some(live),
        }
    }

    /// Begins a gesture, taking the pre-drag board as the frozen baseline.
    ///
    /// The dragged entity must exist on the board; for cards the owning
    /// column is captured here and stays authoritative even as the live
    /// preview moves the card across columns.
    pub fn start(&mut self, board: Board, active: TargetId) -> Result<()> {
        if self.is_dragging() {
            return Err(EngineError::DragInProgress);
        }

        let origin_column = match active {
            TargetId::Card(card_id) => Some(
                board
                    .column_of_card(card_id)
                    .ok_or_else(|| EngineError::UnknownCard(card_id.to_string()))?,
            ),
            TargetId::Column(column_id) => {
                if board.column(column_id).is_none() {
                    return Err(EngineError::UnknownColumn(column_id.to_string()));
                }
                None
            }
        };

        *self = Self::Dragging {
            active,
            origin_column,
            live: board.clone(),
            baseline: board,
        };
        Ok(())
    }

    /// Handles a drag-over event.
    ///
    /// Column drags settle only at drop, so this is a no-op for them. For a
    /// card hovering a different column than the one currently holding it,
    /// the card is relocated speculatively and the new live snapshot is
    /// returned for immediate re-render. Hovering within the current column
    /// returns `None` without mutating anything.
    pub fn over(&mut self, event: &DragEvent) -> Result<Option<Board>> {
        let Self::Dragging { active, live, .. } = self else {
            return Err(EngineError::NoActiveDrag);
        };
        let TargetId::Card(card_id) = *active else {
            return Ok(None);
        };
        let Some(over) = &event.over else {
            return Ok(None);
        };
        let Some(current) = live.column_of_card(card_id) else {
            return Ok(None);
        };

        let (target_column, slot) = match over.id {
            TargetId::Column(column_id) => (column_id, CardSlot::End),
            TargetId::Card(over_card) => {
                let Some(column_id) = live.column_of_card(over_card) else {
                    return Ok(None);
                };
                let dragged = event
                    .active_rect
                    .translated(event.pointer_delta.x, event.pointer_delta.y);
                (
                    column_id,
                    CardSlot::Near {
                        card: over_card,
                        below: reorder::is_below(&dragged, &over.rect),
                    },
                )
            }
        };

        if target_column == current {
            return Ok(None);
        }
        if reorder::relocate_card(live, card_id, current, target_column, slot) {
            Ok(Some(live.clone()))
        } else {
            Ok(None)
        }
    }

    /// Ends the gesture: resolves the final target, computes the committed
    /// board, and returns to `Idle`.
    ///
    /// Column drops array-move over the pre-drag column order. Card drops
    /// that already relocated cross-column during Over commit the live
    /// snapshot as-is; card drops ending back in their origin column
    /// recompute the intra-column move from the baseline card order.
    pub fn end(&mut self, event: &DragEvent) -> Result<DropOutcome> {
        let state = std::mem::take(self);
        let Self::Dragging {
            active,
            origin_column,
            baseline,
            live,
        } = state
        else {
            return Err(EngineError::NoActiveDrag);
        };

        match active {
            TargetId::Column(column_id) => Ok(commit_column_drop(baseline, column_id, event)),
            TargetId::Card(card_id) => {
                Ok(commit_card_drop(baseline, live, card_id, origin_column, event))
            }
        }
    }

    /// Abandons the gesture, returning the untouched pre-drag board for the
    /// host to restore. Nothing is persisted.
    pub fn cancel(&mut self) -> Option<Board> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Dragging { baseline, .. } => Some(baseline),
        }
    }
}

fn commit_column_drop(baseline: Board, active: ColumnId, event: &DragEvent) -> DropOutcome {
    let target = match event.over {
        Some(DropTarget {
            id: TargetId::Column(target),
            ..
        }) if target != active => target,
        _ => return DropOutcome::unchanged(baseline),
    };
    let Some(index) = baseline.column_order.iter().position(|id| *id == target) else {
        return DropOutcome::unchanged(baseline);
    };

    let mut board = baseline;
    if !board.move_column(active, index) {
        return DropOutcome::unchanged(board);
    }
    let change = OrderChange::Columns(ColumnOrderChange {
        board_id: board.id,
        column_order: board.column_order.clone(),
    });
    DropOutcome {
        board,
        change: Some(change),
    }
}

fn commit_card_drop(
    baseline: Board,
    live: Board,
    card_id: CardId,
    origin_column: Option<ColumnId>,
    event: &DragEvent,
) -> DropOutcome {
    let Some(origin) = origin_column else {
        return DropOutcome::unchanged(live);
    };

    // A live column differing from the origin means the cross-column move
    // already happened during Over; the snapshot is the committed state.
    if let Some(current) = live.column_of_card(card_id) {
        if current != origin {
            let change = OrderChange::Cards(CardOrderChange {
                board_id: live.id,
                moved_card: card_id,
                new_column: current,
                source: column_cards(&live, origin),
                destination: column_cards(&live, current),
            });
            return DropOutcome {
                board: live,
                change: Some(change),
            };
        }
    }

    // Back in the origin column: one array-move over the pre-drag order,
    // indexed by the final target's position in that same order.
    let target = match event.over {
        Some(DropTarget {
            id: TargetId::Card(target),
            ..
        }) if target != card_id => target,
        _ => return DropOutcome::unchanged(baseline),
    };

    let mut board = baseline;
    let moved = match board.column_mut(origin) {
        None => false,
        Some(column) => match column.card_order.iter().position(|id| *id == target) {
            None => false,
            Some(index) => column.move_card(card_id, index),
        },
    };
    if !moved {
        return DropOutcome::unchanged(board);
    }

    let orders = column_cards(&board, origin);
    let change = OrderChange::Cards(CardOrderChange {
        board_id: board.id,
        moved_card: card_id,
        new_column: origin,
        source: orders.clone(),
        destination: orders,
    });
    DropOutcome {
        board,
        change: Some(change),
    }
}

fn column_cards(board: &Board, column_id: ColumnId) -> ColumnCards {
    ColumnCards {
        column_id,
        card_order: board
            .column(column_id)
            .map(|col| col.card_order.clone())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::{Card, Column};

    fn seeded_column(title: &str, cards: usize) -> Column {
        let col = Column::new(title);
        let cards = (0..cards)
            .map(|i| Card::new(col.id, format!("{}{}", title, i + 1)))
            .collect();
        col.with_cards(cards)
    }

    /// A(3 cards), B(2 cards), D(empty)
    fn seeded_board() -> Board {
        Board::new().with_columns(vec![
            seeded_column("A", 3),
            seeded_column("B", 2),
            Column::new("D"),
        ])
    }

    fn card_event(active: CardId, over: Option<DropTarget>, dy: f64) -> DragEvent {
        DragEvent {
            active: TargetId::Card(active),
            active_rect: Rect::new(0.0, 0.0, 100.0, 40.0),
            over,
            pointer_delta: PointerDelta { x: 0.0, y: dy },
        }
    }

    fn over_card(card: CardId, rect: Rect) -> Option<DropTarget> {
        Some(DropTarget::new(TargetId::Card(card), rect))
    }

    #[test]
    fn test_cross_column_drop_below_target() {
        let board = seeded_board();
        let (a_id, b_id) = (board.columns[0].id, board.columns[1].id);
        let a_cards = board.columns[0].card_order.clone();
        let b_cards = board.columns[1].card_order.clone();
        let dragged = a_cards[1];

        let mut session = DragSession::new();
        session.start(board, TargetId::Card(dragged)).unwrap();

        // hover B's second card with the dragged rect fully below it
        let target_rect = Rect::new(200.0, 50.0, 100.0, 40.0);
        let event = card_event(dragged, over_card(b_cards[1], target_rect), 120.0);
        let snapshot = session.over(&event).unwrap().unwrap();
        assert_eq!(
            snapshot.column(b_id).unwrap().card_order,
            vec![b_cards[0], b_cards[1], dragged]
        );

        let outcome = session.end(&event).unwrap();
        assert_eq!(
            outcome.board.column(a_id).unwrap().card_order,
            vec![a_cards[0], a_cards[2]]
        );
        assert_eq!(
            outcome.board.column(b_id).unwrap().card_order,
            vec![b_cards[0], b_cards[1], dragged]
        );
        assert_eq!(outcome.board.card(dragged).unwrap().column_id, b_id);
        assert!(outcome.board.order_is_consistent());

        match outcome.change {
            Some(OrderChange::Cards(change)) => {
                assert_eq!(change.moved_card, dragged);
                assert_eq!(change.new_column, b_id);
                assert_eq!(change.source.column_id, a_id);
                assert_eq!(change.source.card_order, vec![a_cards[0], a_cards[2]]);
                assert_eq!(change.destination.card_order, vec![b_cards[0], b_cards[1], dragged]);
            }
            other => panic!("expected a card change, got {:?}", other),
        }
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_column_drop_reorders_at_drop_only() {
        let a = Column::new("A");
        let b = Column::new("B");
        let c = Column::new("C");
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        let board = Board::new().with_columns(vec![a, b, c]);

        let mut session = DragSession::new();
        session.start(board, TargetId::Column(c_id)).unwrap();
        assert_eq!(session.kind(), Some(DragKind::Column));

        // Over is a no-op for column drags
        let over_event = DragEvent {
            active: TargetId::Column(c_id),
            active_rect: Rect::new(400.0, 0.0, 150.0, 600.0),
            over: Some(DropTarget::new(
                TargetId::Column(a_id),
                Rect::new(0.0, 0.0, 150.0, 600.0),
            )),
            pointer_delta: PointerDelta { x: -380.0, y: 0.0 },
        };
        assert_eq!(session.over(&over_event).unwrap(), None);

        let outcome = session.end(&over_event).unwrap();
        assert_eq!(outcome.board.column_order, vec![c_id, a_id, b_id]);
        match outcome.change {
            Some(OrderChange::Columns(change)) => {
                assert_eq!(change.column_order, vec![c_id, a_id, b_id]);
            }
            other => panic!("expected a column change, got {:?}", other),
        }
    }

    #[test]
    fn test_drop_into_empty_column_via_sentinel() {
        let board = seeded_board();
        let d_id = board.columns[2].id;
        let dragged = board.columns[0].card_order[1];

        let mut session = DragSession::new();
        session.start(board, TargetId::Card(dragged)).unwrap();

        let event = card_event(
            dragged,
            Some(DropTarget::new(
                TargetId::Column(d_id),
                Rect::new(400.0, 0.0, 150.0, 600.0),
            )),
            10.0,
        );
        let snapshot = session.over(&event).unwrap().unwrap();
        assert_eq!(snapshot.column(d_id).unwrap().card_order, vec![dragged]);

        let outcome = session.end(&event).unwrap();
        assert_eq!(outcome.board.column(d_id).unwrap().card_order, vec![dragged]);
        assert_eq!(outcome.board.card(dragged).unwrap().column_id, d_id);
    }

    #[test]
    fn test_same_column_reorder_commits_from_baseline() {
        let board = seeded_board();
        let a_id = board.columns[0].id;
        let a_cards = board.columns[0].card_order.clone();

        let mut session = DragSession::new();
        session.start(board, TargetId::Card(a_cards[0])).unwrap();

        // hovering within the same column never mutates the live snapshot
        let hover = card_event(
            a_cards[0],
            over_card(a_cards[2], Rect::new(0.0, 100.0, 100.0, 40.0)),
            80.0,
        );
        assert_eq!(session.over(&hover).unwrap(), None);

        let outcome = session.end(&hover).unwrap();
        assert_eq!(
            outcome.board.column(a_id).unwrap().card_order,
            vec![a_cards[1], a_cards[2], a_cards[0]]
        );
        match outcome.change {
            Some(OrderChange::Cards(change)) => {
                assert_eq!(change.source, change.destination);
                assert_eq!(change.new_column, a_id);
            }
            other => panic!("expected a card change, got {:?}", other),
        }
    }

    #[test]
    fn test_noop_drop_returns_board_unchanged() {
        let board = seeded_board();
        let dragged = board.columns[0].card_order[1];
        let before = board.clone();

        let mut session = DragSession::new();
        session.start(board, TargetId::Card(dragged)).unwrap();

        // dropped straight back onto itself
        let event = card_event(dragged, over_card(dragged, Rect::new(0.0, 40.0, 100.0, 40.0)), 0.0);
        let outcome = session.end(&event).unwrap();

        assert_eq!(outcome.board, before);
        assert_eq!(outcome.change, None);
    }

    #[test]
    fn test_moved_away_and_back_commits_from_original_order() {
        let board = seeded_board();
        let (a_id, b_id) = (board.columns[0].id, board.columns[1].id);
        let a_cards = board.columns[0].card_order.clone();
        let b_cards = board.columns[1].card_order.clone();
        let dragged = a_cards[1];

        let mut session = DragSession::new();
        session.start(board, TargetId::Card(dragged)).unwrap();

        // out to B, then back over A's first card
        let out = card_event(
            dragged,
            over_card(b_cards[0], Rect::new(200.0, 0.0, 100.0, 40.0)),
            10.0,
        );
        assert!(session.over(&out).unwrap().is_some());

        let back = card_event(
            dragged,
            over_card(a_cards[0], Rect::new(0.0, 0.0, 100.0, 40.0)),
            -10.0,
        );
        assert!(session.over(&back).unwrap().is_some());
        assert_eq!(session.live_board().unwrap().column_of_card(dragged), Some(a_id));

        let outcome = session.end(&back).unwrap();
        // committed from the pre-drag order, not the spliced live order
        assert_eq!(
            outcome.board.column(a_id).unwrap().card_order,
            vec![dragged, a_cards[0], a_cards[2]]
        );
        assert_eq!(outcome.board.column(b_id).unwrap().card_order, b_cards);
        assert!(outcome.board.order_is_consistent());
    }

    #[test]
    fn test_cancel_restores_pre_drag_board() {
        let board = seeded_board();
        let before = board.clone();
        let b_cards = board.columns[1].card_order.clone();
        let dragged = board.columns[0].card_order[0];

        let mut session = DragSession::new();
        session.start(board, TargetId::Card(dragged)).unwrap();
        let out = card_event(
            dragged,
            over_card(b_cards[0], Rect::new(200.0, 0.0, 100.0, 40.0)),
            10.0,
        );
        session.over(&out).unwrap();

        let restored = session.cancel().unwrap();
        assert_eq!(restored, before);
        assert!(!session.is_dragging());
        assert_eq!(session.cancel(), None);
    }

    #[test]
    fn test_start_rejects_second_drag_and_unknown_ids() {
        let board = seeded_board();
        let dragged = board.columns[0].card_order[0];

        let mut session = DragSession::new();
        session.start(board.clone(), TargetId::Card(dragged)).unwrap();
        assert!(matches!(
            session.start(board.clone(), TargetId::Card(dragged)),
            Err(EngineError::DragInProgress)
        ));

        let mut idle = DragSession::new();
        assert!(matches!(
            idle.start(board.clone(), TargetId::Card(CardId::new())),
            Err(EngineError::UnknownCard(_))
        ));
        assert!(matches!(
            idle.start(board, TargetId::Column(ColumnId::new())),
            Err(EngineError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_events_outside_a_drag_are_rejected() {
        let mut session = DragSession::new();
        let event = card_event(CardId::new(), None, 0.0);
        assert!(matches!(session.over(&event), Err(EngineError::NoActiveDrag)));
        assert!(matches!(session.end(&event), Err(EngineError::NoActiveDrag)));
    }

    #[test]
    fn test_invariants_hold_across_a_gesture() {
        let board = seeded_board();
        let total = board.card_count();
        let b_cards = board.columns[1].card_order.clone();
        let d_id = board.columns[2].id;
        let dragged = board.columns[0].card_order[2];

        let mut session = DragSession::new();
        session.start(board, TargetId::Card(dragged)).unwrap();

        let events = [
            card_event(
                dragged,
                over_card(b_cards[1], Rect::new(200.0, 50.0, 100.0, 40.0)),
                60.0,
            ),
            card_event(
                dragged,
                Some(DropTarget::new(
                    TargetId::Column(d_id),
                    Rect::new(400.0, 0.0, 150.0, 600.0),
                )),
                60.0,
            ),
        ];
        for event in &events {
            session.over(event).unwrap();
            let live = session.live_board().unwrap();
            assert!(live.order_is_consistent());
            assert_eq!(live.card_count(), total);
        }

        let outcome = session.end(&events[1]).unwrap();
        assert!(outcome.board.order_is_consistent());
        assert_eq!(outcome.board.card_count(), total);
    }
}

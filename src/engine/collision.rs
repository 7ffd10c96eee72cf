use crate::domain::board::{CardId, ColumnId};
use crate::engine::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Identifies a drop target: a column (when dragging columns, or as the
/// empty-column sentinel when dragging cards) or a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetId {
    Column(ColumnId),
    Card(CardId),
}

/// A candidate drop target with its on-screen bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropTarget {
    pub id: TargetId,
    pub rect: Rect,
}

impl DropTarget {
    pub fn new(id: TargetId, rect: Rect) -> Self {
        Self { id, rect }
    }
}

/// Picks the candidate whose bounds are closest to the dragged rectangle by
/// the closest-corners metric. Ties go to the candidate earliest in the
/// slice, matching document order. `None` only when `candidates` is empty.
pub fn closest_target(active: &Rect, candidates: &[DropTarget]) -> Option<TargetId> {
    let mut best: Option<(f64, TargetId)> = None;
    for candidate in candidates {
        let distance = active.corner_distance(&candidate.rect);
        // strict comparison keeps the earliest candidate on exact ties
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, candidate.id));
        }
    }
    best.map(|(_, id)| id)
}

/// Resolves a card drag's target within a hovered column.
///
/// With no card candidates (the column body is empty) the column id itself
/// comes back as the sentinel "drop into this empty column" target, which
/// the reorder step treats as insert-at-end.
pub fn resolve_card_target(
    active: &Rect,
    candidates: &[DropTarget],
    container: ColumnId,
) -> TargetId {
    closest_target(active, candidates).unwrap_or(TargetId::Column(container))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_target(rect: Rect) -> DropTarget {
        DropTarget::new(TargetId::Card(CardId::new()), rect)
    }

    #[test]
    fn test_closest_target_picks_nearest() {
        let active = Rect::new(0.0, 0.0, 10.0, 10.0);
        let far = card_target(Rect::new(100.0, 100.0, 10.0, 10.0));
        let near = card_target(Rect::new(2.0, 2.0, 10.0, 10.0));

        assert_eq!(closest_target(&active, &[far, near]), Some(near.id));
    }

    #[test]
    fn test_ties_break_to_earliest_candidate() {
        let active = Rect::new(0.0, 0.0, 10.0, 10.0);
        // equidistant: one above, one below by the same offset
        let above = card_target(Rect::new(0.0, -20.0, 10.0, 10.0));
        let below = card_target(Rect::new(0.0, 20.0, 10.0, 10.0));

        assert_eq!(closest_target(&active, &[above, below]), Some(above.id));
        assert_eq!(closest_target(&active, &[below, above]), Some(below.id));
    }

    #[test]
    fn test_no_candidates_yields_none() {
        let active = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(closest_target(&active, &[]), None);
    }

    #[test]
    fn test_empty_column_resolves_to_sentinel() {
        let active = Rect::new(0.0, 0.0, 10.0, 10.0);
        let container = ColumnId::new();
        assert_eq!(
            resolve_card_target(&active, &[], container),
            TargetId::Column(container)
        );
    }

    #[test]
    fn test_card_candidates_win_over_sentinel() {
        let active = Rect::new(0.0, 0.0, 10.0, 10.0);
        let container = ColumnId::new();
        let card = card_target(Rect::new(0.0, 5.0, 10.0, 10.0));
        assert_eq!(resolve_card_target(&active, &[card], container), card.id);
    }
}

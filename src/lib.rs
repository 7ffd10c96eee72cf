//! # Tabulo Core
//!
//! Board drag-and-drop reordering engine for Tabulo kanban boards.
//!
//! This crate owns the ordering logic only: given a board's column/card
//! order and a stream of drag lifecycle events, it computes live preview
//! snapshots while the gesture is in flight and the committed order at drop
//! time. Rendering, transport, and authentication live in the host; the
//! committed result is handed to an [`OrderingStore`] for persistence and
//! broadcast.

pub mod domain;
pub mod engine;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardId, Card, CardId, Column, ColumnId},
    collection::{Keyed, OrderedCollection},
};
pub use engine::{
    collision::{closest_target, resolve_card_target, DropTarget, TargetId},
    geometry::Rect,
    session::{
        CardOrderChange, ColumnOrderChange, DragEvent, DragKind, DragSession, DropOutcome,
        OrderChange, PointerDelta,
    },
};
pub use error::{EngineError, Result};
pub use storage::OrderingStore;

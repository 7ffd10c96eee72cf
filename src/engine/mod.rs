pub mod collision;
pub mod geometry;
pub mod reorder;
pub mod session;

pub use collision::{closest_target, resolve_card_target, DropTarget, TargetId};
pub use geometry::Rect;
pub use session::{
    CardOrderChange, ColumnOrderChange, DragEvent, DragKind, DragSession, DropOutcome,
    OrderChange, PointerDelta,
};

pub mod board;
pub mod collection;

pub use board::{Board, BoardId, Card, CardId, Column, ColumnId};
pub use collection::{Keyed, OrderedCollection};

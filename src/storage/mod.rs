use crate::{
    domain::board::{Board, BoardId},
    engine::session::{CardOrderChange, ColumnOrderChange},
    error::Result,
};
use async_trait::async_trait;

pub mod file_store;

/// Persistence boundary for committed board orders.
///
/// The drag engine hands a [`DropOutcome`](crate::engine::session::DropOutcome)'s
/// change payload to one of the `persist_*` methods after a drop. By then the
/// optimistic local state is already committed and the session is idle, so a
/// failure here is the store's problem: retry, roll back to the last known
/// server state, or re-fetch. The engine never re-enters a finished gesture.
#[async_trait]
pub trait OrderingStore: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves a full board snapshot
    async fn save_board(&self, board: &Board) -> Result<()>;

    /// Loads a board by id
    async fn load_board(&self, id: BoardId) -> Result<Board>;

    /// Persists a committed column reordering
    async fn persist_column_order(&self, change: &ColumnOrderChange) -> Result<()>;

    /// Persists a committed card move or reordering
    async fn persist_card_order(&self, change: &CardOrderChange) -> Result<()>;
}

use crate::{
    domain::board::{Board, BoardId},
    domain::collection::OrderedCollection,
    engine::reorder::{self, CardSlot},
    engine::session::{CardOrderChange, ColumnCards, ColumnOrderChange},
    error::{EngineError, Result},
    storage::OrderingStore,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based store keeping one JSON snapshot per board.
///
/// Reference implementation for hosts that persist locally; server-backed
/// hosts implement [`OrderingStore`] against their own transport instead.
pub struct FileOrderingStore {
    root_path: PathBuf,
}

impl FileOrderingStore {
    const TABULO_DIR: &'static str = ".tabulo";
    const BOARDS_DIR: &'static str = "boards";

    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::TABULO_DIR),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.root_path.join(Self::BOARDS_DIR)
    }

    fn board_file(&self, id: BoardId) -> PathBuf {
        self.boards_dir().join(format!("{}.json", id))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl OrderingStore for FileOrderingStore {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.boards_dir()).await?;
        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.boards_dir()).await?;
        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(board.id), json).await?;
        Ok(())
    }

    async fn load_board(&self, id: BoardId) -> Result<Board> {
        let path = self.board_file(id);
        if !path.exists() {
            return Err(EngineError::BoardNotFound(id.to_string()));
        }
        let json = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&json)?)
    }

    async fn persist_column_order(&self, change: &ColumnOrderChange) -> Result<()> {
        let mut board = self.load_board(change.board_id).await?;
        let columns =
            OrderedCollection::reindex(std::mem::take(&mut board.columns), &change.column_order);
        board.column_order = columns.iter().map(|c| c.id).collect();
        board.columns = columns;
        self.save_board(&board).await
    }

    async fn persist_card_order(&self, change: &CardOrderChange) -> Result<()> {
        let mut board = self.load_board(change.board_id).await?;

        // move the card entity first when the change crosses columns, then
        // settle both columns onto their final orders
        if let Some(current) = board.column_of_card(change.moved_card) {
            if current != change.new_column {
                reorder::relocate_card(
                    &mut board,
                    change.moved_card,
                    current,
                    change.new_column,
                    CardSlot::End,
                );
            }
        }
        apply_column_cards(&mut board, &change.source);
        apply_column_cards(&mut board, &change.destination);

        self.save_board(&board).await
    }
}

fn apply_column_cards(board: &mut Board, orders: &ColumnCards) {
    if let Some(column) = board.column_mut(orders.column_id) {
        let cards = OrderedCollection::reindex(std::mem::take(&mut column.cards), &orders.card_order);
        column.card_order = cards.iter().map(|c| c.id).collect();
        column.cards = cards;
    }
}

use crate::domain::collection::{Keyed, OrderedCollection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = crate::error::EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| crate::error::EngineError::InvalidId(s.to_string()))
            }
        }
    };
}

id_type! {
    /// Unique identifier for a board
    BoardId
}
id_type! {
    /// Unique identifier for a column
    ColumnId
}
id_type! {
    /// Unique identifier for a card
    CardId
}

/// The leaf work-item entity, owned by exactly one column at a time.
///
/// `column_id` is a denormalized back-reference to the owning column, kept
/// consistent by the reorder engine whenever the card changes columns. The
/// remaining fields are display metadata the engine never touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub column_id: ColumnId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn new(column_id: ColumnId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CardId::new(),
            column_id,
            title: title.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Keyed for Card {
    type Id = CardId;

    fn key(&self) -> CardId {
        self.id
    }
}

/// An ordered container of cards within a board (a kanban list).
///
/// `cards` and `card_order` are kept as parallel arrays so the wire shape
/// mirrors what hosts render and broadcast; all mutation goes through the
/// [`OrderedCollection`] operations, which keep the two in lockstep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub cards: Vec<Card>,
    pub card_order: Vec<CardId>,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            cards: Vec::new(),
            card_order: Vec::new(),
        }
    }

    /// Seeds the column with cards in the given display order, claiming each
    /// card's back-reference.
    pub fn with_cards(mut self, mut cards: Vec<Card>) -> Self {
        for card in &mut cards {
            card.column_id = self.id;
        }
        self.card_order = cards.iter().map(|c| c.id).collect();
        self.cards = cards;
        self
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn contains_card(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    /// Removes a card from both arrays; `None` when the id is absent.
    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        self.with_collection(|cards| cards.remove(id))
    }

    /// Splices a card in at `index` (clamped), recomputing the order array.
    pub fn insert_card(&mut self, card: Card, index: usize) {
        self.with_collection(|cards| cards.insert_at(card, index));
    }

    /// Array-moves an existing card to `index`; no-op when absent.
    pub fn move_card(&mut self, id: CardId, index: usize) -> bool {
        self.with_collection(|cards| cards.move_to(id, index))
    }

    /// `cards` and `card_order` are permutations of each other, in lockstep,
    /// and every card's back-reference points here.
    pub fn order_is_consistent(&self) -> bool {
        self.cards.len() == self.card_order.len()
            && self
                .cards
                .iter()
                .zip(&self.card_order)
                .all(|(card, id)| card.id == *id && card.column_id == self.id)
    }

    fn with_collection<R>(&mut self, f: impl FnOnce(&mut OrderedCollection<Card>) -> R) -> R {
        let mut cards = OrderedCollection::from_parts(
            std::mem::take(&mut self.cards),
            std::mem::take(&mut self.card_order),
        );
        let out = f(&mut cards);
        let (items, order) = cards.into_parts();
        self.cards = items;
        self.card_order = order;
        out
    }
}

impl Keyed for Column {
    type Id = ColumnId;

    fn key(&self) -> ColumnId {
        self.id
    }
}

/// The root aggregate: columns plus their display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub columns: Vec<Column>,
    pub column_order: Vec<ColumnId>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            id: BoardId::new(),
            columns: Vec::new(),
            column_order: Vec::new(),
        }
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.column_order = columns.iter().map(|c| c.id).collect();
        self.columns = columns;
        self
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.columns.iter().find_map(|col| col.card(id))
    }

    /// The column currently holding the card, per the live card arrays (not
    /// the card's own back-reference).
    pub fn column_of_card(&self, id: CardId) -> Option<ColumnId> {
        self.columns
            .iter()
            .find(|col| col.contains_card(id))
            .map(|col| col.id)
    }

    /// Array-moves a column to `index` in both arrays; no-op when absent.
    pub fn move_column(&mut self, id: ColumnId, index: usize) -> bool {
        let mut columns = OrderedCollection::from_parts(
            std::mem::take(&mut self.columns),
            std::mem::take(&mut self.column_order),
        );
        let moved = columns.move_to(id, index);
        let (items, order) = columns.into_parts();
        self.columns = items;
        self.column_order = order;
        moved
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|col| col.cards.len()).sum()
    }

    /// Permutation invariant at both levels: `column_order` matches `columns`
    /// and every column's card arrays are consistent.
    pub fn order_is_consistent(&self) -> bool {
        self.columns.len() == self.column_order.len()
            && self
                .columns
                .iter()
                .zip(&self.column_order)
                .all(|(col, id)| col.id == *id)
            && self.columns.iter().all(Column::order_is_consistent)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

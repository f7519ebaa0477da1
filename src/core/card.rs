//! Cards: identity, face state, and match status.
//!
//! Every card dealt into a game has a `CardId` equal to its position in the
//! deal (`0..n`). Ids are stable for the lifetime of a game and are reused
//! by the next deal after a restart.
//!
//! ```
//! use memory_match::core::{Card, CardId, FaceState};
//!
//! let card = Card::new(CardId::new(3), "🐸");
//! assert_eq!(card.face, FaceState::Down);
//! assert_eq!(card.visible_symbol(), None);
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a card within a single deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position of this card in the dealt sequence.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Which side of the card is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceState {
    /// Symbol visible.
    Up,
    /// Card back visible.
    #[default]
    Down,
}

impl FaceState {
    /// The opposite face.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            FaceState::Up => FaceState::Down,
            FaceState::Down => FaceState::Up,
        }
    }
}

/// A card on the table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Position-derived identifier.
    pub id: CardId,

    /// Hidden symbol. Exactly one other card in the deal shares it.
    pub symbol: String,

    /// Current face.
    pub face: FaceState,

    /// Has this card been paired with its twin?
    pub matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, symbol: impl Into<String>) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            face: FaceState::Down,
            matched: false,
        }
    }

    /// Is the symbol showing?
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face == FaceState::Up
    }

    /// Is the card hidden?
    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.face == FaceState::Down
    }

    /// The symbol, if a renderer should show it.
    #[must_use]
    pub fn visible_symbol(&self) -> Option<&str> {
        self.is_face_up().then_some(self.symbol.as_str())
    }

    /// Same card with the given face.
    #[must_use]
    pub fn with_face(mut self, face: FaceState) -> Self {
        self.face = face;
        self
    }

    /// Same card marked as matched.
    #[must_use]
    pub fn into_matched(mut self) -> Self {
        self.matched = true;
        self
    }
}

//! Game state snapshots.
//!
//! ## GameState
//!
//! An immutable view of one moment of a game:
//! - The dealt cards, in table order
//! - The lifecycle phase
//! - The pending card of an in-progress pairing attempt
//! - Start/finish timestamps and the elapsed-time accumulator
//!
//! Snapshots are produced by the functions in
//! [`transitions`](super::transitions) and never modified after. Cards live
//! in an `im::Vector`, so cloning a snapshot to hand it to a renderer is
//! O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Card, CardId};

/// Lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Every card is face-up so the player can memorize the table.
    #[default]
    Previewing,
    /// Clicks are accepted and the clock is running.
    Playing,
    /// Every pair is matched; elapsed time is frozen.
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Previewing => "previewing",
            Phase::Playing => "playing",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Snapshot of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) cards: Vector<Card>,
    pub(crate) phase: Phase,
    pub(crate) started_at: Option<u64>,
    pub(crate) finished_at: Option<u64>,
    pub(crate) elapsed_ms: u64,
    pub(crate) pending: Option<CardId>,
}

impl GameState {
    /// Snapshot of a fresh deal in the preview phase.
    ///
    /// Cards keep whatever face they were dealt with; use
    /// [`transitions::deal`](super::transitions::deal) to get the
    /// all-face-up preview table.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            phase: Phase::Previewing,
            started_at: None,
            finished_at: None,
            elapsed_ms: 0,
            pending: None,
        }
    }

    /// Cards in table order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index()).filter(|card| card.id == id)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// First card of the in-progress pairing attempt.
    #[must_use]
    pub fn pending(&self) -> Option<CardId> {
        self.pending
    }

    /// Is `id` the card awaiting its partner?
    #[must_use]
    pub fn is_pending(&self, id: CardId) -> bool {
        self.pending == Some(id)
    }

    /// Clock reading when play began.
    #[must_use]
    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    /// Clock reading when the last pair was matched.
    #[must_use]
    pub fn finished_at(&self) -> Option<u64> {
        self.finished_at
    }

    /// Elapsed play time as of the last transition.
    ///
    /// Frozen once the game is finished. For a live reading while playing,
    /// ask the engine.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Total play time, once finished.
    #[must_use]
    pub fn total_time_ms(&self) -> Option<u64> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        }
    }

    /// Pairs in the deal.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    /// Pairs matched so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|card| card.matched).count() / 2
    }

    /// Pairs not yet matched.
    #[must_use]
    pub fn remaining_pairs(&self) -> usize {
        self.total_pairs() - self.matched_pairs()
    }

    /// Has every card been matched?
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|card| card.matched)
    }

    /// Face-up cards that are not yet matched.
    pub fn revealed_unmatched(&self) -> impl Iterator<Item = &Card> {
        self.cards
            .iter()
            .filter(|card| card.is_face_up() && !card.matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FaceState;

    fn sample_cards() -> Vec<Card> {
        ["A", "B", "A", "B"]
            .iter()
            .enumerate()
            .map(|(i, s)| Card::new(CardId::new(i as u32), *s))
            .collect()
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(sample_cards());

        assert_eq!(state.phase(), Phase::Previewing);
        assert_eq!(state.cards().len(), 4);
        assert_eq!(state.pending(), None);
        assert_eq!(state.started_at(), None);
        assert_eq!(state.finished_at(), None);
        assert_eq!(state.elapsed_ms(), 0);
        assert_eq!(state.total_time_ms(), None);
    }

    #[test]
    fn test_card_lookup() {
        let state = GameState::new(sample_cards());

        assert_eq!(state.card(CardId::new(2)).map(|c| c.symbol.as_str()), Some("A"));
        assert!(state.card(CardId::new(99)).is_none());
    }

    #[test]
    fn test_pair_counts() {
        let mut state = GameState::new(sample_cards());
        assert_eq!(state.total_pairs(), 2);
        assert_eq!(state.matched_pairs(), 0);
        assert_eq!(state.remaining_pairs(), 2);
        assert!(!state.all_matched());

        for i in [0, 2] {
            let card = state.cards[i].clone().into_matched();
            state.cards.set(i, card);
        }

        assert_eq!(state.matched_pairs(), 1);
        assert_eq!(state.remaining_pairs(), 1);
    }

    #[test]
    fn test_revealed_unmatched() {
        let mut state = GameState::new(sample_cards());
        let up = state.cards[1].clone().with_face(FaceState::Up);
        state.cards.set(1, up);

        let revealed: Vec<_> = state.revealed_unmatched().map(|c| c.id).collect();
        assert_eq!(revealed, vec![CardId::new(1)]);
    }

    #[test]
    fn test_total_time() {
        let mut state = GameState::new(sample_cards());
        state.started_at = Some(1_000);
        state.finished_at = Some(4_500);

        assert_eq!(state.total_time_ms(), Some(3_500));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Previewing.to_string(), "previewing");
        assert_eq!(Phase::Playing.to_string(), "playing");
        assert_eq!(Phase::Finished.to_string(), "finished");
    }

    #[test]
    fn test_state_serde() {
        let state = GameState::new(sample_cards());
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}

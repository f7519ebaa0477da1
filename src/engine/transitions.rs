//! State transitions.
//!
//! Each function takes the current snapshot and returns the next one. None
//! of them look at a clock or schedule anything: the caller passes `now`
//! in and acts on the returned [`ClickOutcome`]. That keeps every rule of
//! the game testable without timers.

use serde::{Deserialize, Serialize};

use super::state::{GameState, Phase};
use crate::core::{Card, CardId, FaceState};

/// What a click did.
///
/// Informational only: the returned snapshot already reflects the change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Wrong phase, unknown card, or card already matched.
    Ignored,
    /// Card flipped up and is now the pending card.
    Picked(CardId),
    /// Pending card clicked again; it flipped back down.
    Cancelled(CardId),
    /// Second pick matched the pending card.
    Matched { first: CardId, second: CardId },
    /// Second pick differed; both stay up until the review delay passes.
    Mismatched { first: CardId, second: CardId },
    /// Final pair matched; the game is over.
    Finished {
        first: CardId,
        second: CardId,
        total_ms: u64,
    },
}

impl ClickOutcome {
    /// Did the click change the table?
    #[must_use]
    pub fn changed_state(&self) -> bool {
        !matches!(self, ClickOutcome::Ignored)
    }
}

/// Preview table for a fresh deal: every card face-up.
#[must_use]
pub fn deal(cards: impl IntoIterator<Item = Card>) -> GameState {
    GameState::new(cards.into_iter().map(|card| card.with_face(FaceState::Up)))
}

/// Leave the preview: hide everything and start the clock at `now`.
///
/// Only valid from `Previewing`; other phases are returned unchanged.
#[must_use]
pub fn begin_play(state: &GameState, now: u64) -> GameState {
    if state.phase != Phase::Previewing {
        return state.clone();
    }

    GameState {
        cards: state
            .cards
            .iter()
            .cloned()
            .map(|card| card.with_face(FaceState::Down))
            .collect(),
        phase: Phase::Playing,
        started_at: Some(now),
        finished_at: None,
        elapsed_ms: 0,
        pending: None,
    }
}

/// Apply a card click at time `now`.
#[must_use]
pub fn click(state: &GameState, id: CardId, now: u64) -> (GameState, ClickOutcome) {
    if state.phase != Phase::Playing {
        return (state.clone(), ClickOutcome::Ignored);
    }
    let Some(clicked) = state.card(id) else {
        return (state.clone(), ClickOutcome::Ignored);
    };
    if clicked.matched {
        return (state.clone(), ClickOutcome::Ignored);
    }

    let mut next = state.clone();
    next.elapsed_ms = elapsed_since_start(state, now);

    match state.pending {
        // Re-click of the pending card cancels the attempt
        Some(pending) if pending == id => {
            set_face(&mut next, id, FaceState::Down);
            next.pending = None;
            (next, ClickOutcome::Cancelled(id))
        }

        None => {
            set_face(&mut next, id, FaceState::Up);
            next.pending = Some(id);
            (next, ClickOutcome::Picked(id))
        }

        Some(pending) => {
            set_face(&mut next, id, FaceState::Up);
            next.pending = None;

            let pending_symbol = state.card(pending).map(|card| card.symbol.as_str());
            if pending_symbol != Some(clicked.symbol.as_str()) {
                return (
                    next,
                    ClickOutcome::Mismatched {
                        first: pending,
                        second: id,
                    },
                );
            }

            set_matched(&mut next, pending);
            set_matched(&mut next, id);

            if !next.all_matched() {
                return (
                    next,
                    ClickOutcome::Matched {
                        first: pending,
                        second: id,
                    },
                );
            }

            next.phase = Phase::Finished;
            next.finished_at = Some(now);
            let total_ms = next.total_time_ms().unwrap_or(0);
            next.elapsed_ms = total_ms;
            (
                next,
                ClickOutcome::Finished {
                    first: pending,
                    second: id,
                    total_ms,
                },
            )
        }
    }
}

/// End a mismatch review: flip the captured cards back down.
///
/// Cards that were matched or became the pending card since the review
/// started are left alone. Outside `Playing` nothing changes.
#[must_use]
pub fn conceal(state: &GameState, ids: &[CardId]) -> GameState {
    if state.phase != Phase::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    for &id in ids {
        let hide = state
            .card(id)
            .is_some_and(|card| !card.matched && !state.is_pending(id));
        if hide {
            set_face(&mut next, id, FaceState::Down);
        }
    }
    next
}

fn elapsed_since_start(state: &GameState, now: u64) -> u64 {
    state
        .started_at
        .map_or(0, |start| now.saturating_sub(start))
        .max(state.elapsed_ms)
}

fn set_face(state: &mut GameState, id: CardId, face: FaceState) {
    if let Some(card) = state.cards.get_mut(id.index()) {
        card.face = face;
    }
}

fn set_matched(state: &mut GameState, id: CardId) {
    if let Some(card) = state.cards.get_mut(id.index()) {
        card.matched = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A B A B table, already playing since t=1000.
    fn playing_state() -> GameState {
        let cards = ["A", "B", "A", "B"]
            .iter()
            .enumerate()
            .map(|(i, s)| Card::new(CardId::new(i as u32), *s));
        begin_play(&deal(cards), 1_000)
    }

    fn face(state: &GameState, id: u32) -> FaceState {
        state.card(CardId::new(id)).map(|c| c.face).unwrap()
    }

    #[test]
    fn test_deal_shows_every_card() {
        let state = deal(vec![Card::new(CardId::new(0), "A"), Card::new(CardId::new(1), "A")]);

        assert_eq!(state.phase(), Phase::Previewing);
        assert!(state.cards().iter().all(Card::is_face_up));
    }

    #[test]
    fn test_begin_play_hides_and_starts_clock() {
        let state = playing_state();

        assert_eq!(state.phase(), Phase::Playing);
        assert!(state.cards().iter().all(Card::is_face_down));
        assert_eq!(state.started_at(), Some(1_000));
        assert_eq!(state.finished_at(), None);
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_begin_play_only_from_preview() {
        let state = playing_state();
        let again = begin_play(&state, 5_000);

        assert_eq!(again.started_at(), Some(1_000));
    }

    #[test]
    fn test_click_ignored_while_previewing() {
        let state = deal(vec![Card::new(CardId::new(0), "A"), Card::new(CardId::new(1), "A")]);
        let (next, outcome) = click(&state, CardId::new(0), 0);

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(!outcome.changed_state());
        assert_eq!(next, state);
    }

    #[test]
    fn test_click_unknown_card_ignored() {
        let state = playing_state();
        let (next, outcome) = click(&state, CardId::new(42), 1_100);

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(next, state);
    }

    #[test]
    fn test_first_pick() {
        let state = playing_state();
        let (next, outcome) = click(&state, CardId::new(1), 1_200);

        assert_eq!(outcome, ClickOutcome::Picked(CardId::new(1)));
        assert_eq!(next.pending(), Some(CardId::new(1)));
        assert_eq!(face(&next, 1), FaceState::Up);
        assert_eq!(next.elapsed_ms(), 200);
        // Original snapshot untouched
        assert_eq!(face(&state, 1), FaceState::Down);
    }

    #[test]
    fn test_reclick_cancels() {
        let state = playing_state();
        let (picked, _) = click(&state, CardId::new(0), 1_100);
        let (next, outcome) = click(&picked, CardId::new(0), 1_200);

        assert_eq!(outcome, ClickOutcome::Cancelled(CardId::new(0)));
        assert_eq!(next.pending(), None);
        assert_eq!(face(&next, 0), FaceState::Down);
        assert_eq!(next.matched_pairs(), 0);
    }

    #[test]
    fn test_matching_pair() {
        let state = playing_state();
        let (picked, _) = click(&state, CardId::new(0), 1_100);
        let (next, outcome) = click(&picked, CardId::new(2), 1_200);

        assert_eq!(
            outcome,
            ClickOutcome::Matched {
                first: CardId::new(0),
                second: CardId::new(2)
            }
        );
        assert_eq!(next.pending(), None);
        assert!(next.card(CardId::new(0)).unwrap().matched);
        assert!(next.card(CardId::new(2)).unwrap().matched);
        assert_eq!(next.phase(), Phase::Playing);
    }

    #[test]
    fn test_mismatched_pair_stays_up() {
        let state = playing_state();
        let (picked, _) = click(&state, CardId::new(0), 1_100);
        let (next, outcome) = click(&picked, CardId::new(1), 1_200);

        assert_eq!(
            outcome,
            ClickOutcome::Mismatched {
                first: CardId::new(0),
                second: CardId::new(1)
            }
        );
        assert_eq!(next.pending(), None);
        assert_eq!(face(&next, 0), FaceState::Up);
        assert_eq!(face(&next, 1), FaceState::Up);
        assert_eq!(next.matched_pairs(), 0);
    }

    #[test]
    fn test_conceal_after_mismatch() {
        let state = playing_state();
        let (picked, _) = click(&state, CardId::new(0), 1_100);
        let (reviewing, _) = click(&picked, CardId::new(1), 1_200);

        let next = conceal(&reviewing, &[CardId::new(0), CardId::new(1)]);

        assert_eq!(face(&next, 0), FaceState::Down);
        assert_eq!(face(&next, 1), FaceState::Down);
    }

    #[test]
    fn test_conceal_skips_matched_and_pending() {
        let state = playing_state();
        let (s, _) = click(&state, CardId::new(0), 1_100);
        let (s, _) = click(&s, CardId::new(1), 1_200); // mismatch 0/1
        let (s, _) = click(&s, CardId::new(2), 1_300); // pick 2
        let (s, _) = click(&s, CardId::new(0), 1_400); // match 2/0 while 0 under review
        let (s, _) = click(&s, CardId::new(1), 1_500); // re-pick 1 while under review

        let next = conceal(&s, &[CardId::new(0), CardId::new(1)]);

        assert!(next.card(CardId::new(0)).unwrap().matched);
        assert_eq!(face(&next, 0), FaceState::Up);
        assert_eq!(next.pending(), Some(CardId::new(1)));
        assert_eq!(face(&next, 1), FaceState::Up);
    }

    #[test]
    fn test_click_matched_card_ignored() {
        let state = playing_state();
        let (s, _) = click(&state, CardId::new(0), 1_100);
        let (s, _) = click(&s, CardId::new(2), 1_200);

        let (next, outcome) = click(&s, CardId::new(0), 1_300);
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(next, s);
    }

    #[test]
    fn test_finishing_freezes_time() {
        let state = playing_state();
        let (s, _) = click(&state, CardId::new(0), 1_100);
        let (s, _) = click(&s, CardId::new(2), 1_200);
        let (s, _) = click(&s, CardId::new(1), 2_000);
        let (s, outcome) = click(&s, CardId::new(3), 3_250);

        assert_eq!(
            outcome,
            ClickOutcome::Finished {
                first: CardId::new(1),
                second: CardId::new(3),
                total_ms: 2_250
            }
        );
        assert_eq!(s.phase(), Phase::Finished);
        assert_eq!(s.finished_at(), Some(3_250));
        assert_eq!(s.total_time_ms(), Some(2_250));
        assert_eq!(s.elapsed_ms(), 2_250);
        assert_eq!(s.pending(), None);
        assert!(s.all_matched());

        // Finished games ignore further clicks and reviews
        let (after, outcome) = click(&s, CardId::new(0), 9_999);
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(conceal(&after, &[CardId::new(0)]), s);
    }
}

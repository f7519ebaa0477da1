//! The game engine: owns the state, the deal RNG, and the timers.
//!
//! ## Lifecycle
//!
//! ```text
//! new ──► Previewing ──(preview_ms)──► Playing ──(last pair)──► Finished
//!              ▲                          │                        │
//!              └────────── restart ───────┴────────────────────────┘
//! ```
//!
//! ## Driving the engine
//!
//! The engine is single-threaded and event-driven. A host feeds it three
//! kinds of events: clicks ([`handle_card_click`](MemoryGame::handle_card_click)),
//! restarts ([`restart`](MemoryGame::restart)), and timer pumps
//! ([`run_due_timers`](MemoryGame::run_due_timers)). Between events the
//! state is quiescent and every query is read-only.
//!
//! ```
//! use memory_match::core::{GameConfig, ManualClock};
//! use memory_match::engine::{MemoryGame, Phase};
//!
//! let clock = ManualClock::new();
//! let config = GameConfig::new(["A", "A", "B", "B"]).with_preview_ms(1_000).with_seed(1);
//! let mut game = MemoryGame::new(config, clock.clone()).unwrap();
//! assert_eq!(game.phase(), Phase::Previewing);
//!
//! clock.advance(1_000);
//! game.run_due_timers();
//! assert_eq!(game.phase(), Phase::Playing);
//! ```

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::state::{GameState, Phase};
use super::timers::{TimerEvent, TimerHandle, TimerQueue};
use super::transitions::{self, ClickOutcome};
use crate::core::{Card, CardId, Clock, GameConfig, GameRng, GameRngState, Result, SystemClock};
use crate::deck;

/// A memory-matching game bound to a clock.
#[derive(Debug)]
pub struct MemoryGame<C: Clock = SystemClock> {
    config: GameConfig,
    clock: C,
    rng: GameRng,
    state: GameState,
    timers: TimerQueue,
    /// The one outstanding preview timer, if any.
    preview_timer: Option<TimerHandle>,
    /// Bumped on every restart; timers from older generations are stale.
    generation: u64,
    /// Latest mismatch review that showed each card.
    review_owner: FxHashMap<CardId, u64>,
    /// Numbering restarts with every deal.
    next_review: u64,
}

impl MemoryGame<SystemClock> {
    /// Start a game on the real clock.
    pub fn with_system_clock(config: GameConfig) -> Result<Self> {
        Self::new(config, SystemClock::new())
    }
}

impl<C: Clock> MemoryGame<C> {
    /// Validate `config`, deal, and enter the preview.
    ///
    /// With `preview_ms == 0` the game is already playing on return.
    pub fn new(config: GameConfig, clock: C) -> Result<Self> {
        config.validate()?;

        let mut game = Self {
            rng: GameRng::from_seed_or_entropy(config.seed),
            config,
            clock,
            state: GameState::new(Vec::new()),
            timers: TimerQueue::new(),
            preview_timer: None,
            generation: 0,
            review_owner: FxHashMap::default(),
            next_review: 0,
        };

        info!(
            pairs = game.config.pair_count(),
            preview_ms = game.config.preview_ms,
            seed = game.rng.seed(),
            "starting memory game"
        );
        game.start_preview();
        Ok(game)
    }

    /// Throw away the current table and deal a new one.
    ///
    /// Safe in any phase and when called repeatedly: the outstanding
    /// preview timer is cancelled and any in-flight mismatch reviews
    /// become no-ops.
    pub fn restart(&mut self) {
        if let Some(handle) = self.preview_timer.take() {
            self.timers.cancel(handle);
        }
        self.generation += 1;
        self.review_owner.clear();
        self.next_review = 0;

        info!(
            generation = self.generation,
            previous_phase = %self.state.phase(),
            "restarting game"
        );
        self.start_preview();
    }

    /// Handle a click on `id`.
    ///
    /// Clicks that make no sense right now are ignored.
    pub fn handle_card_click(&mut self, id: CardId) -> ClickOutcome {
        let now = self.clock.now_ms();
        let (next, outcome) = transitions::click(&self.state, id, now);
        self.state = next;

        match outcome {
            ClickOutcome::Ignored => {
                trace!(card = %id, phase = %self.state.phase(), "click ignored");
            }
            ClickOutcome::Picked(_) | ClickOutcome::Cancelled(_) => {
                debug!(card = %id, ?outcome, "pairing attempt updated");
            }
            ClickOutcome::Matched { first, second } => {
                self.review_owner.remove(&first);
                self.review_owner.remove(&second);
                debug!(%first, %second, remaining = self.state.remaining_pairs(), "pair matched");
            }
            ClickOutcome::Mismatched { first, second } => {
                let review = self.next_review;
                self.next_review += 1;
                self.review_owner.insert(first, review);
                self.review_owner.insert(second, review);

                let event = TimerEvent::MismatchReview {
                    generation: self.generation,
                    review,
                    cards: [first, second],
                };
                let handle = self.timers.schedule(now, self.config.mismatch_delay_ms, event);
                debug!(%first, %second, timer = %handle, "mismatch, reviewing");
            }
            ClickOutcome::Finished { total_ms, .. } => {
                self.review_owner.clear();
                info!(total_ms, generation = self.generation, "game finished");
            }
        }

        outcome
    }

    /// Fire every timer that is due on the engine clock.
    ///
    /// Returns how many timers fired, stale ones included.
    pub fn run_due_timers(&mut self) -> usize {
        let now = self.clock.now_ms();
        let due = self.timers.drain_due(now);
        let fired = due.len();

        for event in due {
            self.apply_timer(event, now);
        }
        fired
    }

    fn apply_timer(&mut self, event: TimerEvent, now: u64) {
        if event.generation() != self.generation {
            trace!(?event, generation = self.generation, "stale timer dropped");
            return;
        }

        match event {
            TimerEvent::PreviewElapsed { .. } => {
                self.preview_timer = None;
                self.state = transitions::begin_play(&self.state, now);
                debug!(started_at = now, "preview over, playing");
            }
            TimerEvent::MismatchReview { review, cards, .. } => {
                // A card shown again by a later mismatch waits for that review
                let owned: SmallVec<[CardId; 2]> = cards
                    .into_iter()
                    .filter(|id| self.review_owner.get(id) == Some(&review))
                    .collect();
                for id in &owned {
                    self.review_owner.remove(id);
                }

                self.state = transitions::conceal(&self.state, &owned);
                debug!(review, hidden = owned.len(), "mismatch review over");
            }
        }
    }

    fn start_preview(&mut self) {
        // Symbols were validated in `new` and never change afterwards
        let cards = deck::deal(self.config.symbols.as_slice(), &mut self.rng);
        self.state = transitions::deal(cards);

        if self.config.preview_ms == 0 {
            self.state = transitions::begin_play(&self.state, self.clock.now_ms());
            debug!("no preview, playing immediately");
            return;
        }

        let event = TimerEvent::PreviewElapsed {
            generation: self.generation,
        };
        let handle = self
            .timers
            .schedule(self.clock.now_ms(), self.config.preview_ms, event);
        self.preview_timer = Some(handle);
        debug!(timer = %handle, preview_ms = self.config.preview_ms, "preview started");
    }

    // === Queries ===

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current snapshot (O(1)).
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Cards in table order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.state.cards().iter()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Has the last pair been matched?
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.phase() == Phase::Finished
    }

    /// Elapsed play time.
    ///
    /// 0 during the preview, live while playing, frozen once finished.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        match self.state.phase() {
            Phase::Previewing => 0,
            Phase::Playing => {
                let live = self
                    .state
                    .started_at()
                    .map_or(0, |start| self.clock.now_ms().saturating_sub(start));
                live.max(self.state.elapsed_ms())
            }
            Phase::Finished => self.state.elapsed_ms(),
        }
    }

    /// Total play time, once finished.
    #[must_use]
    pub fn total_time_ms(&self) -> Option<u64> {
        self.state.total_time_ms()
    }

    /// When the next timer is due on the engine clock.
    #[must_use]
    pub fn next_timer_due_ms(&self) -> Option<u64> {
        self.timers.next_due_ms()
    }

    /// Timers still queued, stale ones included.
    #[must_use]
    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Is a preview timer outstanding?
    #[must_use]
    pub fn preview_pending(&self) -> bool {
        self.preview_timer.is_some()
    }

    /// Number of restarts so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Seed of the deal RNG, for replaying a session.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Position of the deal RNG; the next restart deals from here.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Configuration the game was started with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The engine clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

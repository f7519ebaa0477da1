//! # memory-match
//!
//! A deterministic engine for the memory-matching ("concentration") card
//! game: a table of face-down cards, every symbol on exactly two of them,
//! revealed two at a time until every pair is found.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: No rendering, input wiring, or animation.
//!    A host reads snapshots and forwards clicks.
//!
//! 2. **Deterministic**: Deals come from a seedable ChaCha8 stream and time
//!    comes from an injected `Clock`, so a seed plus a click log replays a
//!    session exactly.
//!
//! 3. **Snapshots, not mutation**: Every transition produces a new
//!    `GameState`. Snapshots use `im-rs` vectors and clone in O(1).
//!
//! ## Architecture
//!
//! - **Single-threaded, event-driven**: state changes only on a click, a
//!   restart, or a timer pump. Delayed effects (end of preview, end of a
//!   mismatch review) sit in a `TimerQueue` tagged with the game
//!   generation, so a restart silently invalidates them.
//!
//! ## Modules
//!
//! - `core`: Cards, RNG, clocks, configuration, errors
//! - `deck`: Pair validation and the Fisher–Yates deal
//! - `engine`: Snapshots, transitions, timers, and `MemoryGame`

pub mod core;
pub mod deck;
pub mod engine;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, FaceState,
    Clock, ManualClock, SystemClock,
    GameConfig, GameRng, GameRngState,
    MatchError, Result,
};

pub use crate::deck::{duplicate_symbols, shuffle, validate_pairs, DEFAULT_SYMBOLS};

pub use crate::engine::{
    ClickOutcome, GameState, MemoryGame, Phase,
    TimerEvent, TimerHandle, TimerQueue,
};

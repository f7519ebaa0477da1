//! Core types: cards, RNG, clocks, configuration, errors.
//!
//! Everything here is independent of the game rules. The engine and the
//! deck generator are built on top of these.

pub mod card;
pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use card::{Card, CardId, FaceState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GameConfig, DEFAULT_MISMATCH_DELAY_MS, DEFAULT_PREVIEW_MS};
pub use error::{MatchError, Result};
pub use rng::{GameRng, GameRngState};

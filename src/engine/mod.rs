//! Game engine: state snapshots, transitions, timers, and the driver.
//!
//! - `state`: the immutable `GameState` snapshot and `Phase`
//! - `transitions`: pure functions from one snapshot to the next
//! - `timers`: the delayed-event queue behind previews and mismatch reviews
//! - `game`: `MemoryGame`, which ties the above to a clock and an RNG

pub mod game;
pub mod state;
pub mod timers;
pub mod transitions;

pub use game::MemoryGame;
pub use state::{GameState, Phase};
pub use timers::{TimerEvent, TimerHandle, TimerQueue};
pub use transitions::ClickOutcome;

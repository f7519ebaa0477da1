//! Deck generation.
//!
//! Turns a paired symbol list into a randomly ordered sequence of face-down
//! cards. The deal is a Fisher–Yates shuffle over [`GameRng`], so a fixed
//! seed always deals the same table.
//!
//! [`GameRng`]: crate::core::GameRng

pub mod generator;

pub(crate) use generator::deal;
pub use generator::{duplicate_symbols, shuffle, validate_pairs, DEFAULT_SYMBOLS};

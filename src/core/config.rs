//! Game configuration.
//!
//! Hosts build a `GameConfig` at startup and hand it to
//! [`MemoryGame::new`](crate::engine::MemoryGame::new). The symbol list is
//! the *paired* multiset: every symbol appears exactly twice. Use
//! [`GameConfig::from_base_symbols`] to pair up a list of unique symbols.

use serde::{Deserialize, Serialize};

use super::error::{MatchError, Result};
use crate::deck::{self, DEFAULT_SYMBOLS};

/// How long the whole deck is shown face-up before play starts.
pub const DEFAULT_PREVIEW_MS: u64 = 5_000;

/// How long a mismatched pair stays face-up before flipping back.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 500;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Paired symbol multiset. Each value appears exactly twice.
    pub symbols: Vec<String>,

    /// Preview duration in milliseconds (0 = start playing immediately).
    pub preview_ms: u64,

    /// Mismatch-review delay in milliseconds. Must be positive.
    pub mismatch_delay_ms: u64,

    /// Deal seed. `None` seeds from entropy; the chosen seed is still
    /// reported by [`MemoryGame::seed`](crate::engine::MemoryGame::seed).
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let base: Vec<String> = DEFAULT_SYMBOLS.iter().map(|s| (*s).to_string()).collect();
        let mut symbols = base.clone();
        symbols.extend(base);

        Self {
            symbols,
            preview_ms: DEFAULT_PREVIEW_MS,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a config from an already paired symbol list.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Create a config from unique base symbols, pairing each one.
    pub fn from_base_symbols<I, S>(base: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base: Vec<String> = base.into_iter().map(Into::into).collect();
        Ok(Self {
            symbols: deck::duplicate_symbols(&base)?,
            ..Self::default()
        })
    }

    /// Set the preview duration.
    #[must_use]
    pub fn with_preview_ms(mut self, preview_ms: u64) -> Self {
        self.preview_ms = preview_ms;
        self
    }

    /// Set the mismatch-review delay.
    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, delay_ms: u64) -> Self {
        self.mismatch_delay_ms = delay_ms;
        self
    }

    /// Fix the deal seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of pairs this config deals.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len() / 2
    }

    /// Check that this config can drive a game.
    pub fn validate(&self) -> Result<()> {
        deck::validate_pairs(&self.symbols)?;

        if self.mismatch_delay_ms == 0 {
            return Err(MatchError::InvalidConfig(
                "mismatch delay must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

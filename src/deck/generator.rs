//! Deck generation: validation, pairing, and the Fisher–Yates deal.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{Card, CardId, GameRng, MatchError, Result};

/// The stock symbol library.
pub const DEFAULT_SYMBOLS: [&str; 10] = [
    "🍓", "🍉", "🫐", "⏰", "🔑", "🌽", "🐸", "🦆", "🐢", "🐠",
];

/// Check that `symbols` is a non-empty paired multiset.
///
/// Every distinct value must appear exactly twice.
pub fn validate_pairs<S: AsRef<str>>(symbols: &[S]) -> Result<()> {
    if symbols.is_empty() {
        return Err(MatchError::InvalidInput("symbol list is empty".to_string()));
    }
    if symbols.len() % 2 != 0 {
        return Err(MatchError::InvalidInput(format!(
            "symbol list has odd length {}",
            symbols.len()
        )));
    }

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for symbol in symbols {
        *counts.entry(symbol.as_ref()).or_insert(0) += 1;
    }

    // Report the first offender in input order so messages are stable
    for symbol in symbols {
        let count = counts[symbol.as_ref()];
        if count != 2 {
            return Err(MatchError::InvalidInput(format!(
                "symbol {:?} appears {} times, expected 2",
                symbol.as_ref(),
                count
            )));
        }
    }

    Ok(())
}

/// Pair up a list of unique symbols: `[a, b]` becomes `[a, b, a, b]`.
pub fn duplicate_symbols<S: AsRef<str>>(base: &[S]) -> Result<Vec<String>> {
    if base.is_empty() {
        return Err(MatchError::InvalidInput("base symbol list is empty".to_string()));
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for symbol in base {
        if !seen.insert(symbol.as_ref()) {
            return Err(MatchError::InvalidInput(format!(
                "base symbol {:?} is listed more than once",
                symbol.as_ref()
            )));
        }
    }

    Ok(base
        .iter()
        .chain(base.iter())
        .map(|s| s.as_ref().to_string())
        .collect())
}

/// Deal a shuffled deck from a paired symbol list.
///
/// Card ids follow position (`0..n`); symbols follow a uniformly random
/// permutation of the input. All cards start face down and unmatched.
///
/// ```
/// use memory_match::core::GameRng;
/// use memory_match::deck::shuffle;
///
/// let mut rng = GameRng::new(42);
/// let cards = shuffle(&["A", "A", "B", "B"], &mut rng).unwrap();
///
/// assert_eq!(cards.len(), 4);
/// assert!(cards.iter().enumerate().all(|(i, c)| c.id.index() == i));
/// ```
pub fn shuffle<S: AsRef<str>>(symbols: &[S], rng: &mut GameRng) -> Result<Vec<Card>> {
    validate_pairs(symbols)?;
    Ok(deal(symbols, rng))
}

/// Shuffle without validating. Callers must have run [`validate_pairs`].
pub(crate) fn deal<S: AsRef<str>>(symbols: &[S], rng: &mut GameRng) -> Vec<Card> {
    let mut order: Vec<&str> = symbols.iter().map(|s| s.as_ref()).collect();
    let len = order.len();

    // Position i takes a uniform pick from the unshuffled suffix i..len
    for i in 0..len.saturating_sub(1) {
        let j = rng.gen_range_usize(i..len);
        order.swap(i, j);
    }

    order
        .into_iter()
        .enumerate()
        .map(|(i, symbol)| Card::new(CardId::new(i as u32), symbol))
        .collect()
}

//! Engine bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{CardId, GameConfig, MatchError, SystemClock};
use crate::engine::{ClickOutcome, MemoryGame};

fn to_py_err(err: MatchError) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

/// Python wrapper for MemoryGame on the system clock.
#[pyclass(name = "MemoryGame")]
pub struct PyMemoryGame {
    game: MemoryGame<SystemClock>,
}

#[pymethods]
impl PyMemoryGame {
    /// Create a new game.
    ///
    /// # Arguments
    /// - symbols: Unique base symbols; each is dealt twice
    /// - preview_ms: How long the table is shown before play starts
    /// - mismatch_delay_ms: How long a wrong pair stays face-up
    /// - seed: RNG seed for a reproducible deal (random if omitted)
    #[new]
    #[pyo3(signature = (
        symbols,
        preview_ms = 5_000,
        mismatch_delay_ms = 500,
        seed = None
    ))]
    fn new(
        symbols: Vec<String>,
        preview_ms: u64,
        mismatch_delay_ms: u64,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let mut config = GameConfig::from_base_symbols(symbols)
            .map_err(to_py_err)?
            .with_preview_ms(preview_ms)
            .with_mismatch_delay_ms(mismatch_delay_ms);
        config.seed = seed;

        let game = MemoryGame::with_system_clock(config).map_err(to_py_err)?;
        Ok(Self { game })
    }

    /// Click a card. Returns the outcome name ("ignored", "picked", ...).
    fn click(&mut self, card_id: u32) -> &'static str {
        match self.game.handle_card_click(CardId::new(card_id)) {
            ClickOutcome::Ignored => "ignored",
            ClickOutcome::Picked(_) => "picked",
            ClickOutcome::Cancelled(_) => "cancelled",
            ClickOutcome::Matched { .. } => "matched",
            ClickOutcome::Mismatched { .. } => "mismatched",
            ClickOutcome::Finished { .. } => "finished",
        }
    }

    /// Deal a new table and restart the preview.
    fn restart(&mut self) {
        self.game.restart();
    }

    /// Fire due timers. Returns how many fired.
    fn tick(&mut self) -> usize {
        self.game.run_due_timers()
    }

    /// Cards in table order as dicts.
    ///
    /// `symbol` is None while the card is face down.
    fn cards<'py>(&self, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let state = self.game.state();
        state
            .cards()
            .iter()
            .map(|card| {
                let dict = PyDict::new_bound(py);
                dict.set_item("id", card.id.raw())?;
                dict.set_item("symbol", card.visible_symbol())?;
                dict.set_item("face_up", card.is_face_up())?;
                dict.set_item("matched", card.matched)?;
                dict.set_item("pending", state.is_pending(card.id))?;
                Ok(dict)
            })
            .collect()
    }

    /// Current phase: "previewing", "playing" or "finished".
    #[getter]
    fn phase(&self) -> String {
        self.game.phase().to_string()
    }

    #[getter]
    fn elapsed_ms(&self) -> u64 {
        self.game.elapsed_ms()
    }

    #[getter]
    fn total_time_ms(&self) -> Option<u64> {
        self.game.total_time_ms()
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.game.seed()
    }

    fn __repr__(&self) -> String {
        let state = self.game.state();
        format!(
            "MemoryGame(phase={}, matched={}/{}, elapsed_ms={})",
            state.phase(),
            state.matched_pairs(),
            state.total_pairs(),
            self.game.elapsed_ms()
        )
    }
}

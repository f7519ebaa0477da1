//! Python bindings for the memory-match engine.
//!
//! Lets a Python presentation layer (pygame, a web backend, a notebook)
//! drive the engine on the real clock.
//!
//! # Quick Start
//!
//! ```python
//! import memory_match as mm
//!
//! game = mm.MemoryGame(["A", "B", "C"], preview_ms=3000, seed=42)
//!
//! # Call from the host's frame loop
//! game.tick()
//!
//! for card in game.cards():
//!     print(card["id"], card["symbol"] or "?")
//!
//! game.click(0)
//! ```

use pyo3::prelude::*;

mod py_engine;

pub use py_engine::*;

/// memory_match: a memory-matching card game engine.
#[pymodule]
fn memory_match(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMemoryGame>()?;
    Ok(())
}

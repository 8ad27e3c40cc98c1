//! Shared helpers for the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use std::cell::Cell;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Print the engine's trace events as an indented tree when `RUST_LOG` is
/// set, e.g. `RUST_LOG=oneof=trace cargo test -p oneof`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        }
    });
}

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static CLONES: Cell<usize> = const { Cell::new(0) };
    static ASSIGNS: Cell<usize> = const { Cell::new(0) };
}

/// Objects of [`Tracked`] currently alive on this thread.
pub fn live() -> isize {
    LIVE.with(Cell::get)
}

/// Fresh clones of [`Tracked`] made on this thread.
pub fn clones() -> usize {
    CLONES.with(Cell::get)
}

/// In-place clone assignments of [`Tracked`] made on this thread.
pub fn assigns() -> usize {
    ASSIGNS.with(Cell::get)
}

/// A value that counts its own lifecycle.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tracked {
    pub value: i64,
}

impl Tracked {
    pub fn new(value: i64) -> Self {
        LIVE.with(|l| l.set(l.get() + 1));
        Tracked { value }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        CLONES.with(|c| c.set(c.get() + 1));
        Tracked::new(self.value)
    }

    fn clone_from(&mut self, source: &Self) {
        ASSIGNS.with(|a| a.set(a.get() + 1));
        self.value = source.value;
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|l| l.set(l.get() - 1));
    }
}

/// Panics on clone when `fail` is set, and on drop when `explode` is set.
#[derive(Debug)]
pub struct Hazard {
    pub fail: bool,
    pub explode: bool,
}

impl Hazard {
    pub fn calm() -> Self {
        Hazard {
            fail: false,
            explode: false,
        }
    }
}

impl Clone for Hazard {
    fn clone(&self) -> Self {
        assert!(!self.fail, "hazard clone failed");
        Hazard {
            fail: self.fail,
            explode: self.explode,
        }
    }
}

impl Drop for Hazard {
    fn drop(&mut self) {
        if self.explode && !std::thread::panicking() {
            panic!("hazard destructor failed");
        }
    }
}

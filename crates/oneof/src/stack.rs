//! Stack headroom for recursive variant trees.
//!
//! Cloning, comparing and dropping a tree built from [`Indirect`] nodes
//! recurses once per level. On native targets with the `grow-stack` feature
//! the recursion runs on a freshly allocated segment whenever the current
//! one runs low. Elsewhere the guard is a plain call.
//!
//! [`Indirect`]: crate::Indirect

/// Headroom that must remain before a recursive step runs.
#[cfg(all(feature = "grow-stack", not(target_arch = "wasm32")))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated segment.
#[cfg(all(feature = "grow-stack", not(target_arch = "wasm32")))]
const SEGMENT: usize = 1024 * 1024;

/// Run `f`, first moving to a new stack segment if less than the red zone
/// remains.
///
/// Call this around any user-level recursion over nested variants, such as
/// a visitor that walks an expression tree.
#[cfg(all(feature = "grow-stack", not(target_arch = "wasm32")))]
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

/// Run `f` directly; stack growth is unavailable in this build.
#[cfg(not(all(feature = "grow-stack", not(target_arch = "wasm32"))))]
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

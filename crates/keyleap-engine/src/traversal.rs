#![forbid(unsafe_code)]

//! The traversal policy: next index from anchor, direction, and boundary
//! policy.
//!
//! # Invariants
//!
//! 1. `Wrap` always returns an in-range index for a non-empty sequence, and
//!    a *different* index than an in-range anchor whenever `len > 1`.
//! 2. `Clamp` never steps outside `[0, len)`; a step that would not move
//!    reports `None` so the caller can drop the command without side
//!    effects.
//! 3. Synthetic anchors of `-1` and `len` (produced by the position
//!    resolver's directional pre-adjustment) are valid inputs under both
//!    policies.
//!
//! # Example
//!
//! ```
//! use keyleap_core::category::BoundaryPolicy;
//! use keyleap_engine::traversal::{next_index, Direction};
//!
//! // Wrapping off the end cycles back to the start.
//! assert_eq!(next_index(2, Direction::Forward, 3, BoundaryPolicy::Wrap), Some(0));
//! // Clamping at the end is a no-op.
//! assert_eq!(next_index(2, Direction::Forward, 3, BoundaryPolicy::Clamp), None);
//! ```

use keyleap_core::category::BoundaryPolicy;

/// Traversal direction selected by the first chord key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward later document order (`]`).
    Forward,

    /// Toward earlier document order (`[`).
    Backward,
}

impl Direction {
    /// The signed index step for this direction.
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Compute the next index from `anchor` in `direction` over a sequence of
/// `len` elements.
///
/// `anchor` may be a real member index in `[0, len)` or a synthetic
/// pre-adjusted anchor of `-1`/`len`. Returns `None` when the sequence is
/// empty or when a clamped step would not move.
#[must_use]
pub fn next_index(
    anchor: isize,
    direction: Direction,
    len: usize,
    policy: BoundaryPolicy,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let stepped = anchor + direction.delta();
    match policy {
        BoundaryPolicy::Wrap => Some(stepped.rem_euclid(len as isize) as usize),
        BoundaryPolicy::Clamp => {
            let clamped = stepped.clamp(0, len as isize - 1);
            if clamped == anchor {
                None
            } else {
                Some(clamped as usize)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

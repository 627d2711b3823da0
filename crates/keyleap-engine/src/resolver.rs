#![forbid(unsafe_code)]

//! The position resolver: where traversal starts from.
//!
//! # Algorithm
//!
//! 1. The reference element is the focused element; when focus rests on the
//!    neutral root, the caller's reference hint (the staged element, or
//!    failing that the last ping target) stands in.
//! 2. A reference that is a member of the eligible sequence anchors
//!    traversal at its own index.
//! 3. Otherwise the element whose vertical midpoint lies nearest the
//!    viewport's center becomes a synthetic anchor, pre-adjusted one step
//!    *against* the requested direction (+1 backward, -1 forward) so the
//!    traversal policy's step lands on the nearest element itself rather
//!    than skipping past it.
//!
//! The synthetic anchor may therefore be `-1` or `len`; the traversal
//! policy normalizes both.

use keyleap_core::page::{NodeId, Page};

use crate::traversal::Direction;

/// Resolve the anchor index for a traversal over `sequence`.
///
/// Returns `None` only when `sequence` is empty. A real member index is in
/// `[0, len)`; a synthetic anchor may sit one step outside that range.
#[must_use]
pub fn resolve_anchor(
    page: &dyn Page,
    reference_hint: Option<NodeId>,
    sequence: &[NodeId],
    direction: Direction,
) -> Option<isize> {
    if sequence.is_empty() {
        return None;
    }

    let reference = page.focused().or(reference_hint);
    if let Some(node) = reference
        && let Some(index) = sequence.iter().position(|&n| n == node)
    {
        return Some(index as isize);
    }

    let center = page.viewport().center_y();
    let mut best_index = 0usize;
    let mut best_distance = f64::INFINITY;
    for (index, &node) in sequence.iter().enumerate() {
        let Some(bb) = page.layout_box(node) else {
            continue;
        };
        let distance = bb.vertical_distance_to(center);
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }

    let anchor = best_index as isize;
    Some(match direction {
        Direction::Forward => anchor - 1,
        Direction::Backward => anchor + 1,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

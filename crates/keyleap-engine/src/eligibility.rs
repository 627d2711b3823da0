#![forbid(unsafe_code)]

//! The eligibility filter: which elements a category currently offers.
//!
//! An element qualifies when the host reports a match for the category's
//! selector AND it has a layout box (actually rendered) AND its resolved
//! visibility is not hidden. The result is ordered by document traversal
//! order regardless of the order the host's matcher discovered elements.
//!
//! Sequences are recomputed on every navigation command and never cached:
//! the page may have changed between any two commands.

use keyleap_core::category::Category;
use keyleap_core::page::{NodeId, Page};

/// The ordered sequence of currently-eligible elements for `category`.
///
/// An empty result is the normal "nothing to navigate" answer; callers
/// no-op on it.
#[must_use]
pub fn eligible(page: &dyn Page, category: &Category) -> Vec<NodeId> {
    let mut nodes: Vec<NodeId> = page
        .query(category)
        .into_iter()
        .filter(|&n| page.layout_box(n).is_some() && page.is_visible(n))
        .collect();
    nodes.sort_by_key(|&n| page.dom_rank(n));
    nodes.dedup();
    nodes
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#![forbid(unsafe_code)]

//! The page capability: everything the engine is allowed to ask of, or do
//! to, the host document.
//!
//! The engine never touches a real DOM. A browser host implements [`Page`]
//! over live elements; tests implement it over an in-memory model. The
//! trait is deliberately narrow — selector matching and visibility
//! resolution stay on the host side, index arithmetic and state ownership
//! stay on the engine side.
//!
//! # Invariants the engine relies on
//!
//! 1. [`Page::query`] returns every current match for the category; the
//!    engine does not trust its order and re-sorts by [`Page::dom_rank`].
//! 2. [`Page::layout_box`] is `None` exactly when the element is not
//!    rendered (detached or `display: none`).
//! 3. [`Page::focused`] is `None` when focus rests on the neutral root
//!    (the body), not on any meaningful element.
//! 4. `NodeId`s are stable for the lifetime of the element they name.

use crate::category::Category;
use crate::geometry::{ElementBox, Viewport};

/// Opaque handle to a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a node id from a raw host value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw host value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The two CSS marker classes the engine manages.
///
/// At any instant at most one element carries each marker. The styling
/// layer owns their appearance; the engine only adds and removes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Persistent highlight on the staged (pending-focus) element.
    Stage,

    /// Self-expiring flash on the current ping target.
    Ping,
}

impl Marker {
    /// The CSS class name for this marker.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Stage => "keyleap-stage",
            Self::Ping => "keyleap-ping",
        }
    }
}

/// Host-provided document capability.
pub trait Page {
    /// Elements currently matching `category`'s selector, in any order.
    fn query(&self, category: &Category) -> Vec<NodeId>;

    /// Layout box in document coordinates, or `None` when not rendered.
    fn layout_box(&self, node: NodeId) -> Option<ElementBox>;

    /// Whether the element's resolved visibility is not `hidden`.
    fn is_visible(&self, node: NodeId) -> bool;

    /// Rank of the element in depth-first document order.
    fn dom_rank(&self, node: NodeId) -> u64;

    /// The element holding input focus, or `None` when focus rests on the
    /// neutral root.
    fn focused(&self) -> Option<NodeId>;

    /// Whether the element is an editable text surface (text input, text
    /// area, select, or content-editable region).
    fn is_editable(&self, node: NodeId) -> bool;

    /// The current viewport.
    fn viewport(&self) -> Viewport;

    /// Move input focus to the element.
    fn focus(&mut self, node: NodeId);

    /// Add a marker class to the element.
    fn add_marker(&mut self, node: NodeId, marker: Marker);

    /// Remove a marker class from the element.
    fn remove_marker(&mut self, node: NodeId, marker: Marker);

    /// Smoothly scroll the element into view, centered.
    fn scroll_into_view(&mut self, node: NodeId);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

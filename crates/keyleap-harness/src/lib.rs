#![forbid(unsafe_code)]

//! Deterministic test harness: an in-memory page model for driving the
//! engine without a rendering engine, plus the cross-crate test suites in
//! `tests/`.
//!
//! # Design
//!
//! [`ScriptedPage`] implements the full [`Page`] capability over scripted
//! nodes. Determinism rules:
//!
//! 1. `query` answers in *reverse* document order, so any engine code that
//!    leaned on discovery order instead of re-sorting by document rank
//!    would fail loudly in every test.
//! 2. `scroll_into_view` completes instantly: the viewport jumps so the
//!    target is centered (clamped at the document top), and the scroll is
//!    appended to a log tests can assert on.
//! 3. Nodes without an explicit box stack vertically 100px apart with a
//!    40px height, so simple tests need no geometry at all.
//!
//! Time never advances on its own; tests pass explicit `Instant`s to the
//! engine and advance them by hand.

use keyleap_core::category::Category;
use keyleap_core::debug;
use keyleap_core::geometry::{ElementBox, Viewport};
use keyleap_core::page::{Marker, NodeId, Page};

// ---------------------------------------------------------------------------
// NodeSpec
// ---------------------------------------------------------------------------

/// Specification for one scripted node.
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    categories: Vec<char>,
    bb: Option<ElementBox>,
    explicit_box: bool,
    hidden: bool,
    unrendered: bool,
    editable: bool,
}

impl NodeSpec {
    /// An element in no category at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A button (`b`).
    #[must_use]
    pub fn button() -> Self {
        Self::new().category('b')
    }

    /// A link (`l`).
    #[must_use]
    pub fn link() -> Self {
        Self::new().category('l')
    }

    /// A heading (`h`).
    #[must_use]
    pub fn heading() -> Self {
        Self::new().category('h')
    }

    /// A text input (`i`, editable).
    #[must_use]
    pub fn text_input() -> Self {
        Self::new().category('i').editable()
    }

    /// A checkbox (`c`).
    #[must_use]
    pub fn checkbox() -> Self {
        Self::new().category('c')
    }

    /// Add the element to the category bound to `key`.
    #[must_use]
    pub fn category(mut self, key: char) -> Self {
        self.categories.push(key);
        self
    }

    /// Place the element at document offset `y` with the given height.
    #[must_use]
    pub fn at(mut self, y: f64, height: f64) -> Self {
        self.bb = Some(ElementBox::new(0.0, y, 800.0, height));
        self.explicit_box = true;
        self
    }

    /// Mark the element `visibility: hidden`.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mark the element unrendered (`display: none` or detached).
    #[must_use]
    pub fn unrendered(mut self) -> Self {
        self.unrendered = true;
        self
    }

    /// Mark the element as an editable text surface.
    #[must_use]
    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }
}

// ---------------------------------------------------------------------------
// ScriptedPage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct ScriptedNode {
    spec: NodeSpec,
    markers: Vec<Marker>,
}

/// A scripted in-memory page.
#[derive(Debug, Clone)]
pub struct ScriptedPage {
    nodes: Vec<ScriptedNode>,
    focused: Option<NodeId>,
    viewport: Viewport,
    scrolls: Vec<NodeId>,
}

impl Default for ScriptedPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedPage {
    /// An empty page with an 800px viewport at the document top.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            focused: None,
            viewport: Viewport::new(0.0, 800.0),
            scrolls: Vec::new(),
        }
    }

    /// An empty page with the given viewport.
    #[must_use]
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::new()
        }
    }

    /// Append a node; document order is insertion order.
    pub fn insert(&mut self, mut spec: NodeSpec) -> NodeId {
        let rank = self.nodes.len();
        if !spec.explicit_box {
            spec.bb = Some(ElementBox::new(0.0, 100.0 * rank as f64, 800.0, 40.0));
        }
        self.nodes.push(ScriptedNode {
            spec,
            markers: Vec::new(),
        });
        NodeId::new(rank as u64)
    }

    /// Simulate the user focusing an element directly (e.g. a click).
    pub fn click(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    /// Simulate focus returning to the neutral root.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Whether `node` currently carries `marker`.
    #[must_use]
    pub fn has_marker(&self, node: NodeId, marker: Marker) -> bool {
        self.node(node).markers.contains(&marker)
    }

    /// Every node currently carrying `marker`, in document order.
    #[must_use]
    pub fn marked(&self, marker: Marker) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.markers.contains(&marker))
            .map(|(i, _)| NodeId::new(i as u64))
            .collect()
    }

    /// The scroll log, oldest first.
    #[must_use]
    pub fn scrolls(&self) -> &[NodeId] {
        &self.scrolls
    }

    /// The current viewport.
    #[must_use]
    pub fn current_viewport(&self) -> Viewport {
        self.viewport
    }

    fn node(&self, node: NodeId) -> &ScriptedNode {
        &self.nodes[node.get() as usize]
    }

    fn node_mut(&mut self, node: NodeId) -> &mut ScriptedNode {
        &mut self.nodes[node.get() as usize]
    }
}

impl Page for ScriptedPage {
    fn query(&self, category: &Category) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, n)| n.spec.categories.contains(&category.key()))
            .map(|(i, _)| NodeId::new(i as u64))
            .collect()
    }

    fn layout_box(&self, node: NodeId) -> Option<ElementBox> {
        let n = self.node(node);
        if n.spec.unrendered { None } else { n.spec.bb }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        !self.node(node).spec.hidden
    }

    fn dom_rank(&self, node: NodeId) -> u64 {
        node.get()
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    fn is_editable(&self, node: NodeId) -> bool {
        self.node(node).spec.editable
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn focus(&mut self, node: NodeId) {
        debug!(node = node.get(), "scripted page: focus");
        self.focused = Some(node);
    }

    fn add_marker(&mut self, node: NodeId, marker: Marker) {
        debug!(node = node.get(), class = marker.class_name(), "scripted page: add marker");
        let markers = &mut self.node_mut(node).markers;
        if !markers.contains(&marker) {
            markers.push(marker);
        }
    }

    fn remove_marker(&mut self, node: NodeId, marker: Marker) {
        debug!(node = node.get(), class = marker.class_name(), "scripted page: remove marker");
        self.node_mut(node).markers.retain(|m| *m != marker);
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        self.scrolls.push(node);
        if let Some(bb) = self.layout_box(node) {
            let target = bb.mid_y() - self.viewport.height / 2.0;
            self.viewport.scroll_y = target.max(0.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_stack_vertically_by_default() {
        let mut page = ScriptedPage::new();
        let a = page.insert(NodeSpec::heading());
        let b = page.insert(NodeSpec::heading());

        assert_eq!(page.layout_box(a).unwrap().top(), 0.0);
        assert_eq!(page.layout_box(b).unwrap().top(), 100.0);
    }

    #[test]
    fn explicit_box_is_preserved() {
        let mut page = ScriptedPage::new();
        let a = page.insert(NodeSpec::heading().at(555.0, 30.0));
        assert_eq!(page.layout_box(a).unwrap().top(), 555.0);
        assert_eq!(page.layout_box(a).unwrap().height, 30.0);
    }

    #[test]
    fn query_answers_in_reverse_document_order() {
        let mut page = ScriptedPage::new();
        let a = page.insert(NodeSpec::heading());
        page.insert(NodeSpec::button());
        let c = page.insert(NodeSpec::heading());

        let headings = Category::lookup('h').unwrap();
        assert_eq!(page.query(headings), vec![c, a]);
    }

    #[test]
    fn unrendered_nodes_have_no_layout_box() {
        let mut page = ScriptedPage::new();
        let a = page.insert(NodeSpec::heading().unrendered());
        assert!(page.layout_box(a).is_none());
    }

    #[test]
    fn scrolling_centers_the_target() {
        let mut page = ScriptedPage::new();
        let a = page.insert(NodeSpec::heading().at(1000.0, 40.0));

        page.scroll_into_view(a);
        assert_eq!(page.scrolls(), &[a]);
        // mid 1020, viewport height 800 -> scroll_y 620, center 1020.
        assert_eq!(page.current_viewport().scroll_y, 620.0);
        assert_eq!(page.current_viewport().center_y(), 1020.0);
    }

    #[test]
    fn scrolling_clamps_at_document_top() {
        let mut page = ScriptedPage::new();
        let a = page.insert(NodeSpec::heading().at(0.0, 40.0));

        page.scroll_into_view(a);
        assert_eq!(page.current_viewport().scroll_y, 0.0);
    }

    #[test]
    fn markers_are_set_deduplicated_and_removed() {
        let mut page = ScriptedPage::new();
        let a = page.insert(NodeSpec::text_input());

        page.add_marker(a, Marker::Stage);
        page.add_marker(a, Marker::Stage);
        assert_eq!(page.marked(Marker::Stage), vec![a]);

        page.remove_marker(a, Marker::Stage);
        assert!(!page.has_marker(a, Marker::Stage));
    }

    #[test]
    fn click_and_blur_drive_focus() {
        let mut page = ScriptedPage::new();
        let a = page.insert(NodeSpec::button());

        page.click(a);
        assert_eq!(page.focused(), Some(a));
        page.blur();
        assert_eq!(page.focused(), None);
    }
}

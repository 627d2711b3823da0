#![forbid(unsafe_code)]

//! Minimal in-memory [`Page`] used by the engine's own unit tests.
//!
//! The full-featured scripted page for integration tests lives in the
//! harness crate; this one only knows what the engine modules need.

use keyleap_core::category::Category;
use keyleap_core::geometry::{ElementBox, Viewport};
use keyleap_core::page::{Marker, NodeId, Page};

#[derive(Debug, Clone)]
struct FakeNode {
    categories: &'static str,
    bb: Option<ElementBox>,
    visible: bool,
    editable: bool,
    markers: Vec<Marker>,
}

#[derive(Debug, Clone)]
pub(crate) struct FakePage {
    nodes: Vec<FakeNode>,
    focused: Option<NodeId>,
    viewport: Viewport,
    scrolled: Vec<NodeId>,
}

impl FakePage {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            focused: None,
            viewport: Viewport::new(0.0, 800.0),
            scrolled: Vec::new(),
        }
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Append a visible node; boxes stack vertically 100px apart.
    pub(crate) fn push(&mut self, categories: &'static str) -> NodeId {
        let y = 100.0 * self.nodes.len() as f64;
        self.push_node(categories, Some(ElementBox::new(0.0, y, 800.0, 40.0)), true, false)
    }

    pub(crate) fn push_at(&mut self, categories: &'static str, y: f64) -> NodeId {
        self.push_node(categories, Some(ElementBox::new(0.0, y, 800.0, 40.0)), true, false)
    }

    pub(crate) fn push_hidden(&mut self, categories: &'static str) -> NodeId {
        let y = 100.0 * self.nodes.len() as f64;
        self.push_node(categories, Some(ElementBox::new(0.0, y, 800.0, 40.0)), false, false)
    }

    pub(crate) fn push_unrendered(&mut self, categories: &'static str) -> NodeId {
        self.push_node(categories, None, true, false)
    }

    pub(crate) fn push_editable(&mut self, categories: &'static str) -> NodeId {
        let y = 100.0 * self.nodes.len() as f64;
        self.push_node(categories, Some(ElementBox::new(0.0, y, 800.0, 40.0)), true, true)
    }

    pub(crate) fn set_focus(&mut self, node: Option<NodeId>) {
        self.focused = node;
    }

    pub(crate) fn set_editable(&mut self, node: NodeId) {
        self.nodes[node.get() as usize].editable = true;
    }

    pub(crate) fn has_marker(&self, node: NodeId, marker: Marker) -> bool {
        self.nodes[node.get() as usize].markers.contains(&marker)
    }

    pub(crate) fn marked(&self, marker: Marker) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.markers.contains(&marker))
            .map(|(i, _)| NodeId::new(i as u64))
            .collect()
    }

    pub(crate) fn scrolled(&self) -> &[NodeId] {
        &self.scrolled
    }

    fn push_node(
        &mut self,
        categories: &'static str,
        bb: Option<ElementBox>,
        visible: bool,
        editable: bool,
    ) -> NodeId {
        self.nodes.push(FakeNode {
            categories,
            bb,
            visible,
            editable,
            markers: Vec::new(),
        });
        NodeId::new(self.nodes.len() as u64 - 1)
    }
}

impl Page for FakePage {
    fn query(&self, category: &Category) -> Vec<NodeId> {
        // Reverse order on purpose: the engine must not trust query order.
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, n)| n.categories.contains(category.key()))
            .map(|(i, _)| NodeId::new(i as u64))
            .collect()
    }

    fn layout_box(&self, node: NodeId) -> Option<ElementBox> {
        self.nodes[node.get() as usize].bb
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.nodes[node.get() as usize].visible
    }

    fn dom_rank(&self, node: NodeId) -> u64 {
        node.get()
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    fn is_editable(&self, node: NodeId) -> bool {
        self.nodes[node.get() as usize].editable
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    fn add_marker(&mut self, node: NodeId, marker: Marker) {
        let markers = &mut self.nodes[node.get() as usize].markers;
        if !markers.contains(&marker) {
            markers.push(marker);
        }
    }

    fn remove_marker(&mut self, node: NodeId, marker: Marker) {
        self.nodes[node.get() as usize]
            .markers
            .retain(|m| *m != marker);
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        self.scrolled.push(node);
    }
}

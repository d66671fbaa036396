use serde::{Deserialize, Serialize};

use crate::core::Extent;
use crate::surface::{Color, NodeId, Surface};

/// Character metrics used to estimate text extents without a layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryMetrics {
    pub char_width_px: f64,
    pub line_height_px: f64,
}

impl Default for MemoryMetrics {
    fn default() -> Self {
        Self {
            char_width_px: 7.0,
            line_height_px: 14.0,
        }
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    text: String,
    position: Option<(f64, f64)>,
    rotation_deg: f64,
    max_width_px: Option<f64>,
    size: Option<Extent>,
    background: Option<Color>,
    editable: bool,
    visible: bool,
    removed: bool,
}

impl MemoryNode {
    fn new(parent: Option<NodeId>, classes: &str) -> Self {
        Self {
            parent,
            children: Vec::new(),
            classes: classes.split_whitespace().map(str::to_owned).collect(),
            text: String::new(),
            position: None,
            rotation_deg: 0.0,
            max_width_px: None,
            size: None,
            background: None,
            editable: false,
            visible: true,
            removed: false,
        }
    }
}

/// Headless retained-node surface used by tests and headless hosts.
///
/// Plays the role a null renderer plays for a chart engine: every mutation is
/// recorded so behavior suites can inspect the resulting visual state, and
/// measurement queries are answered from a deterministic character metric.
/// Operations addressing removed nodes are no-ops.
#[derive(Debug)]
pub struct MemorySurface {
    nodes: Vec<MemoryNode>,
    metrics: MemoryMetrics,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(MemoryMetrics::default())
    }

    #[must_use]
    pub fn with_metrics(metrics: MemoryMetrics) -> Self {
        Self {
            nodes: vec![MemoryNode::new(None, "surface-root")],
            metrics,
        }
    }

    #[must_use]
    pub fn metrics(&self) -> MemoryMetrics {
        self.metrics
    }

    fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(id.raw()).filter(|node| !node.removed)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(id.raw()).filter(|node| !node.removed)
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(id.raw()) {
            Some(node) if !node.removed => {
                node.removed = true;
                std::mem::take(&mut node.children)
            }
            _ => return,
        };
        for child in children {
            self.remove_subtree(child);
        }
    }

    #[must_use]
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.node(node).map(|n| n.classes.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn position(&self, node: NodeId) -> Option<(f64, f64)> {
        self.node(node).and_then(|n| n.position)
    }

    #[must_use]
    pub fn rotation_deg(&self, node: NodeId) -> f64 {
        self.node(node).map_or(0.0, |n| n.rotation_deg)
    }

    #[must_use]
    pub fn max_width_px(&self, node: NodeId) -> Option<f64> {
        self.node(node).and_then(|n| n.max_width_px)
    }

    #[must_use]
    pub fn background(&self, node: NodeId) -> Option<Color> {
        self.node(node).and_then(|n| n.background)
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_editable(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.editable)
    }

    #[must_use]
    pub fn is_visible(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.visible)
    }

    #[must_use]
    pub fn is_removed(&self, node: NodeId) -> bool {
        self.nodes.get(node.raw()).is_none_or(|n| n.removed)
    }

    /// Number of nodes still attached to the surface.
    #[must_use]
    pub fn live_node_count(&self) -> usize {
        self.nodes.iter().filter(|node| !node.removed).count()
    }

    /// Live nodes carrying the given class, in creation order.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.removed && node.classes.iter().any(|c| c == class))
            .map(|(index, _)| NodeId::new(index))
            .collect()
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MemorySurface {
    fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    fn append_child(&mut self, parent: NodeId, classes: &str) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(MemoryNode::new(Some(parent), classes));
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(id);
        }
        id
    }

    fn remove(&mut self, node: NodeId) {
        let parent = self.node(node).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.retain(|child| *child != node);
            }
        }
        self.remove_subtree(node);
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(node) = self.node_mut(node) {
            text.clone_into(&mut node.text);
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.node(node).map(|n| n.text.clone()).unwrap_or_default()
    }

    fn set_classed(&mut self, node: NodeId, class: &str, on: bool) {
        if let Some(node) = self.node_mut(node) {
            let present = node.classes.iter().any(|c| c == class);
            if on && !present {
                node.classes.push(class.to_owned());
            } else if !on && present {
                node.classes.retain(|c| c != class);
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn set_position(&mut self, node: NodeId, left_px: f64, top_px: f64) {
        if let Some(node) = self.node_mut(node) {
            node.position = Some((left_px, top_px));
        }
    }

    fn set_rotation_deg(&mut self, node: NodeId, degrees: f64) {
        if let Some(node) = self.node_mut(node) {
            node.rotation_deg = degrees;
        }
    }

    fn set_max_width(&mut self, node: NodeId, width_px: f64) {
        if let Some(node) = self.node_mut(node) {
            node.max_width_px = Some(width_px);
        }
    }

    fn set_size(&mut self, node: NodeId, size: Extent) {
        if let Some(node) = self.node_mut(node) {
            node.size = Some(size);
        }
    }

    fn set_background(&mut self, node: NodeId, color: Color) {
        if let Some(node) = self.node_mut(node) {
            node.background = Some(color);
        }
    }

    fn set_editable(&mut self, node: NodeId, editable: bool) {
        if let Some(node) = self.node_mut(node) {
            node.editable = editable;
        }
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(node) = self.node_mut(node) {
            node.visible = visible;
        }
    }

    fn extent_of(&self, node: NodeId) -> Extent {
        let Some(node) = self.node(node) else {
            return Extent::ZERO;
        };
        if let Some(size) = node.size {
            return size;
        }
        if node.text.is_empty() {
            return Extent::ZERO;
        }
        let mut width = node.text.chars().count() as f64 * self.metrics.char_width_px;
        if let Some(max_width) = node.max_width_px {
            width = width.min(max_width);
        }
        Extent::new(width, self.metrics.line_height_px)
    }
}

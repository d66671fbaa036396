mod color;
mod memory;

pub use color::Color;
pub use memory::{MemoryMetrics, MemorySurface};

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::Extent;

/// Opaque handle to one retained node on a drawing surface.
///
/// Handles are minted by the surface that owns the node and are never reused
/// within one surface instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

/// Single-threaded shared handle to a drawing surface.
pub type SharedSurface<S> = Rc<RefCell<S>>;

/// Wraps a surface for sharing between a host chart and its overlay widgets.
#[must_use]
pub fn shared<S: Surface>(surface: S) -> SharedSurface<S> {
    Rc::new(RefCell::new(surface))
}

/// Retained-node drawing capability a host must provide to overlay widgets.
///
/// Widgets create their visual elements at most once and thereafter only
/// mutate them. Operations addressing a node that no longer exists degrade to
/// no-ops rather than fail; `extent_of` answers the post-layout measured
/// geometry query that label and tooltip placement depend on.
pub trait Surface {
    /// Top-level container node of this surface.
    fn root(&self) -> NodeId;

    /// Creates a child element carrying the given space-separated classes.
    fn append_child(&mut self, parent: NodeId, classes: &str) -> NodeId;

    /// Removes a node together with its subtree.
    fn remove(&mut self, node: NodeId);

    fn set_text(&mut self, node: NodeId, text: &str);
    fn text(&self, node: NodeId) -> String;

    fn set_classed(&mut self, node: NodeId, class: &str, on: bool);
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Positions a node in surface pixel coordinates.
    fn set_position(&mut self, node: NodeId, left_px: f64, top_px: f64);
    fn set_rotation_deg(&mut self, node: NodeId, degrees: f64);
    fn set_max_width(&mut self, node: NodeId, width_px: f64);
    fn set_size(&mut self, node: NodeId, size: Extent);
    fn set_background(&mut self, node: NodeId, color: Color);
    fn set_editable(&mut self, node: NodeId, editable: bool);
    fn set_visible(&mut self, node: NodeId, visible: bool);

    /// Post-layout measured size of `node`.
    fn extent_of(&self, node: NodeId) -> Extent;
}

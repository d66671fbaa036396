//! Overlay widgets sharing one build-once lifecycle core.
//!
//! Every widget is constructed bound to one container node, builds its visual
//! subtree lazily on the first draw, re-renders from its configuration and
//! cached state on every later draw, and reports user-originated changes
//! through its private dispatcher.

pub mod binning;
pub mod label;
pub mod range_editor;
pub mod tooltip;

pub use binning::{Binning, BinningConfig, BinningConfigPatch, BinningEvent, BinningSnapshot};
pub use label::{AxisSlot, Label, LabelConfig, LabelConfigPatch, LabelEvent};
pub use range_editor::{
    BrushRangeEditor, RangeBound, RangeEditorConfig, RangeEditorConfigPatch, RangeEvent,
};
pub use tooltip::{
    ColorScale, DateFormatter, Tooltip, TooltipConfig, TooltipConfigPatch, TooltipSnapshot,
    ValueFormatter,
};

use std::cell::{Ref, RefMut};

use crate::surface::{NodeId, SharedSurface, Surface};

/// Build-once lifecycle core composed by every overlay widget.
///
/// Holds the shared surface handle, the container the widget is bound to and
/// the lazily created subtree root. The subtree is created at most once per
/// widget instance; `teardown` removes it and returns the base to the
/// pre-build state so a later draw starts a fresh subtree.
#[derive(Debug)]
pub struct WidgetBase<S: Surface> {
    surface: SharedSurface<S>,
    container: NodeId,
    root: Option<NodeId>,
}

impl<S: Surface> WidgetBase<S> {
    #[must_use]
    pub fn new(surface: SharedSurface<S>, container: NodeId) -> Self {
        Self {
            surface,
            container,
            root: None,
        }
    }

    #[must_use]
    pub fn container(&self) -> NodeId {
        self.container
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[must_use]
    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }

    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    pub fn surface_mut(&self) -> RefMut<'_, S> {
        self.surface.borrow_mut()
    }

    /// Creates the subtree root on the first call; later calls return it
    /// untouched.
    pub fn ensure_root(&mut self, classes: &str) -> NodeId {
        if let Some(root) = self.root {
            return root;
        }
        let root = self.surface.borrow_mut().append_child(self.container, classes);
        self.root = Some(root);
        root
    }

    /// Removes the subtree and forgets it. Terminal for the old subtree.
    pub fn teardown(&mut self) {
        if let Some(root) = self.root.take() {
            self.surface.borrow_mut().remove(root);
        }
    }
}

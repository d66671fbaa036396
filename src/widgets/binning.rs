use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ConfigOverride, FrameConfig, Margin};
use crate::error::OverlayResult;
use crate::events::{Dispatcher, NamedEvent};
use crate::interaction::{self, DIMMED_CLASS, SELECTED_CLASS};
use crate::surface::{NodeId, SharedSurface, Surface};
use crate::widgets::WidgetBase;

/// Event name emitted when the user changes the bin selection.
pub const CHANGE: &str = "change";

/// Vertical offset lifting the toggle row above the plot's top margin.
const LINE_HEIGHT: f64 = 20.0;

/// Configuration for the binning selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinningConfig {
    pub margin: Margin,
    pub width: f64,
    pub height: f64,
    pub auto_label: String,
    /// Ordered, mutually exclusive bin labels.
    pub exclusive_toggle: Vec<String>,
    pub label: String,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            margin: Margin::new(60.0, 30.0, 40.0, 70.0),
            width: 800.0,
            height: 500.0,
            auto_label: "auto".to_owned(),
            exclusive_toggle: ["1y", "1q", "1mo", "1w"].map(str::to_owned).to_vec(),
            label: "BIN:".to_owned(),
        }
    }
}

impl FrameConfig for BinningConfig {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn margin(&self) -> Margin {
        self.margin
    }
}

/// Partial override for `BinningConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinningConfigPatch {
    pub margin: Option<Margin>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub auto_label: Option<String>,
    pub exclusive_toggle: Option<Vec<String>>,
    pub label: Option<String>,
}

impl ConfigOverride for BinningConfig {
    type Patch = BinningConfigPatch;

    fn override_with(mut self, patch: Self::Patch) -> Self {
        if let Some(margin) = patch.margin {
            self.margin = margin;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(auto_label) = patch.auto_label {
            self.auto_label = auto_label;
        }
        if let Some(exclusive_toggle) = patch.exclusive_toggle {
            self.exclusive_toggle = exclusive_toggle;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        self
    }
}

/// Event emitted by the binning selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinningEvent {
    /// Fired on every user click; `is_selected` reflects whether the clicked
    /// item is active after the click.
    Change { is_selected: bool },
}

impl NamedEvent for BinningEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Change { .. } => CHANGE,
        }
    }
}

/// Serializable snapshot of the selector's logical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinningSnapshot {
    pub is_auto: bool,
    pub selected_bin: Option<String>,
}

/// Exclusive-or-auto toggle group representing a time-bucket size.
///
/// Exactly one bin of the exclusive set can be selected at a time; the
/// distinguished auto item toggles independently and dims the exclusive
/// group while active (the group stays interactive).
pub struct Binning<S: Surface> {
    base: WidgetBase<S>,
    config: BinningConfig,
    dispatcher: Dispatcher<BinningEvent>,
    auto_item: Option<NodeId>,
    bin_items: Vec<(String, NodeId)>,
    selected_bin: Option<String>,
    is_auto: bool,
}

impl<S: Surface> Binning<S> {
    #[must_use]
    pub fn new(surface: SharedSurface<S>, container: NodeId) -> Self {
        Self {
            base: WidgetBase::new(surface, container),
            config: BinningConfig::default(),
            dispatcher: Dispatcher::new(),
            auto_item: None,
            bin_items: Vec::new(),
            selected_bin: None,
            is_auto: true,
        }
    }

    /// Registers a listener on this widget's private dispatcher.
    pub fn on(
        &mut self,
        event: &'static str,
        namespace: impl Into<String>,
        handler: impl FnMut(NodeId, &BinningEvent) + 'static,
    ) -> &mut Self {
        self.dispatcher.on(event, namespace, handler);
        self
    }

    pub fn set_config(&mut self, patch: BinningConfigPatch) -> &mut Self {
        self.config = self.config.clone().override_with(patch);
        self
    }

    #[must_use]
    pub fn config(&self) -> &BinningConfig {
        &self.config
    }

    /// Stores the selected bin without rendering.
    pub fn set_binning(&mut self, bin: impl Into<String>) -> &mut Self {
        self.selected_bin = Some(bin.into());
        self
    }

    /// Stores the auto flag without rendering.
    pub fn set_auto(&mut self, is_auto: bool) -> &mut Self {
        self.is_auto = is_auto;
        self
    }

    #[must_use]
    pub fn snapshot(&self) -> BinningSnapshot {
        BinningSnapshot {
            is_auto: self.is_auto,
            selected_bin: self.selected_bin.clone(),
        }
    }

    /// Builds the toggle group on the first call, then re-applies position,
    /// the exclusive selection and the auto visual state.
    pub fn draw_binning(&mut self) -> OverlayResult<&mut Self> {
        self.config.validate_frame()?;
        self.build();
        self.apply_state();
        Ok(self)
    }

    /// User click on one exclusive bin item.
    pub fn click_bin(&mut self, name: &str) -> OverlayResult<&mut Self> {
        self.draw_binning()?;
        let Some(item) = self.bin_node(name) else {
            warn!(bin = name, "ignoring click on unknown bin item");
            return Ok(self);
        };
        self.set_binning(name);
        self.draw_binning()?;
        let is_selected = self.base.surface().has_class(item, SELECTED_CLASS);
        trace!(bin = name, is_selected, "bin item clicked");
        self.dispatcher
            .emit(item, &BinningEvent::Change { is_selected });
        Ok(self)
    }

    /// User click on the auto item; toggles auto mode.
    pub fn click_auto(&mut self) -> OverlayResult<&mut Self> {
        self.draw_binning()?;
        let Some(auto) = self.auto_item else {
            return Ok(self);
        };
        let was_selected = self.base.surface().has_class(auto, SELECTED_CLASS);
        let toggled = !was_selected;
        self.set_auto(toggled);
        self.draw_binning()?;
        trace!(is_auto = toggled, "auto binning toggled");
        self.dispatcher.emit(
            auto,
            &BinningEvent::Change {
                is_selected: toggled,
            },
        );
        Ok(self)
    }

    /// Removes the subtree. A later draw builds a fresh one.
    pub fn destroy(&mut self) {
        debug!("destroy binning group");
        self.base.teardown();
        self.auto_item = None;
        self.bin_items.clear();
    }

    fn bin_node(&self, name: &str) -> Option<NodeId> {
        self.bin_items
            .iter()
            .find(|(item_name, _)| item_name == name)
            .map(|(_, node)| *node)
    }

    fn build(&mut self) {
        if self.base.is_built() {
            return;
        }
        debug!(bins = self.config.exclusive_toggle.len(), "build binning group");
        let root = self.base.ensure_root("binning-group");
        let mut surface = self.base.surface_mut();

        let label = surface.append_child(root, "label");
        surface.set_text(label, &self.config.label);

        let auto = surface.append_child(root, "item item-auto toggleOnOff");
        surface.set_text(auto, &self.config.auto_label);

        for name in &self.config.exclusive_toggle {
            let item = surface.append_child(root, &format!("item item-{name} toggleExclusive"));
            surface.set_text(item, name);
            self.bin_items.push((name.clone(), item));
        }
        drop(surface);
        self.auto_item = Some(auto);
    }

    fn apply_state(&mut self) {
        let Some(root) = self.base.root() else {
            return;
        };
        let margin = self.config.margin;
        let mut surface = self.base.surface_mut();
        surface.set_position(root, margin.left, margin.top - LINE_HEIGHT);

        if let Some(selected) = self.selected_bin.clone() {
            let items: Vec<NodeId> = self.bin_items.iter().map(|(_, node)| *node).collect();
            interaction::exclusive_toggle(&mut *surface, &items, &format!("item-{selected}"));
        }
        // auto dims the exclusive group but leaves it clickable
        for &(_, item) in &self.bin_items {
            surface.set_classed(item, DIMMED_CLASS, self.is_auto);
        }
        if let Some(auto) = self.auto_item {
            surface.set_classed(auto, SELECTED_CLASS, self.is_auto);
            surface.set_classed(auto, DIMMED_CLASS, !self.is_auto);
        }
    }
}

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ConfigOverride, FrameConfig, Margin};
use crate::error::OverlayResult;
use crate::events::{Dispatcher, NamedEvent};
use crate::surface::{NodeId, SharedSurface, Surface};
use crate::widgets::WidgetBase;

/// Event name emitted when the user commits an edited axis label.
pub const AXIS_LABEL_CHANGE: &str = "axisLabelChange";

/// Bottom padding under the x label; doubles as the height fallback when
/// measurement reports zero.
const X_LABEL_PADDING: f64 = 18.0;
/// Gap between a rotated y label and its chart edge.
const Y_LABEL_PADDING: f64 = 4.0;

/// Which axis a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSlot {
    X,
    Y,
    Y2,
}

impl AxisSlot {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Y2 => "y2",
        }
    }
}

/// Event emitted by the axis label editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LabelEvent {
    /// Carries the edited text verbatim; the configuration is not written
    /// back — persisting the change is the host's decision.
    AxisLabelChange { value: String, axis: AxisSlot },
}

impl NamedEvent for LabelEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::AxisLabelChange { .. } => AXIS_LABEL_CHANGE,
        }
    }
}

/// Configuration for the axis label editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub margin: Margin,
    pub width: f64,
    pub height: f64,
    pub x_label: String,
    pub y_label: String,
    pub y2_label: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            margin: Margin::new(60.0, 30.0, 40.0, 70.0),
            width: 800.0,
            height: 500.0,
            x_label: String::new(),
            y_label: String::new(),
            y2_label: String::new(),
        }
    }
}

impl FrameConfig for LabelConfig {
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

/// Partial override for `LabelConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfigPatch {
    pub margin: Option<Margin>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub y2_label: Option<String>,
}

impl ConfigOverride for LabelConfig {
    type Patch = LabelConfigPatch;

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
        if let Some(x_label) = patch.x_label {
            self.x_label = x_label;
        }
        if let Some(y_label) = patch.y_label {
            self.y_label = y_label;
        }
        if let Some(y2_label) = patch.y2_label {
            self.y2_label = y2_label;
        }
        self
    }
}

/// Three independently editable axis labels placed from measured geometry.
pub struct Label<S: Surface> {
    base: WidgetBase<S>,
    config: LabelConfig,
    dispatcher: Dispatcher<LabelEvent>,
    x_item: Option<NodeId>,
    y_item: Option<NodeId>,
    y2_item: Option<NodeId>,
}

impl<S: Surface> Label<S> {
    #[must_use]
    pub fn new(surface: SharedSurface<S>, container: NodeId) -> Self {
        Self {
            base: WidgetBase::new(surface, container),
            config: LabelConfig::default(),
            dispatcher: Dispatcher::new(),
            x_item: None,
            y_item: None,
            y2_item: None,
        }
    }

    /// Registers a listener on this widget's private dispatcher.
    pub fn on(
        &mut self,
        event: &'static str,
        namespace: impl Into<String>,
        handler: impl FnMut(NodeId, &LabelEvent) + 'static,
    ) -> &mut Self {
        self.dispatcher.on(event, namespace, handler);
        self
    }

    pub fn set_config(&mut self, patch: LabelConfigPatch) -> &mut Self {
        self.config = self.config.clone().override_with(patch);
        self
    }

    #[must_use]
    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Builds the three editable labels on the first call, then repositions
    /// every label from its measured rendered geometry.
    pub fn render(&mut self) -> OverlayResult<&mut Self> {
        self.config.validate_frame()?;
        self.build();
        self.place_labels();
        Ok(self)
    }

    /// Blur-commit path for one label field; Enter-to-commit lands here too.
    /// A no-op before the labels exist.
    pub fn commit_label(&mut self, axis: AxisSlot) -> &mut Self {
        let node = match axis {
            AxisSlot::X => self.x_item,
            AxisSlot::Y => self.y_item,
            AxisSlot::Y2 => self.y2_item,
        };
        let Some(node) = node else {
            return self;
        };
        let value = self.base.surface().text(node);
        trace!(axis = axis.as_str(), value = %value, "axis label committed");
        self.dispatcher
            .emit(node, &LabelEvent::AxisLabelChange { value, axis });
        self
    }

    /// Removes all three elements and nulls the internal references.
    /// Terminal for the old subtree; a later render creates a fresh one.
    pub fn destroy(&mut self) {
        debug!("destroy axis label group");
        self.base.teardown();
        self.x_item = None;
        self.y_item = None;
        self.y2_item = None;
    }

    fn build(&mut self) {
        if self.base.is_built() {
            return;
        }
        debug!("build axis label group");
        let root = self.base.ensure_root("label-group");
        let mut surface = self.base.surface_mut();
        surface.set_position(root, 0.0, 0.0);

        let x = surface.append_child(root, "axis-label x");
        surface.set_editable(x, true);

        let y = surface.append_child(root, "axis-label y");
        surface.set_editable(y, true);
        surface.set_rotation_deg(y, -90.0);

        let y2 = surface.append_child(root, "axis-label y2");
        surface.set_editable(y2, true);
        surface.set_rotation_deg(y2, 90.0);
        drop(surface);

        self.x_item = Some(x);
        self.y_item = Some(y);
        self.y2_item = Some(y2);
    }

    fn place_labels(&mut self) {
        let margin = self.config.margin;
        let (width, height) = (self.config.width, self.config.height);
        let plot_width = self.config.plot_width();
        let plot_height = self.config.plot_height();
        let mut surface = self.base.surface_mut();

        if let Some(x) = self.x_item {
            surface.set_text(x, &self.config.x_label);
            surface.set_max_width(x, plot_width);
            // self-correcting under different text lengths
            let mut text_height = surface.extent_of(x).height;
            if text_height == 0.0 {
                text_height = X_LABEL_PADDING;
            }
            surface.set_position(
                x,
                margin.left + plot_width / 2.0,
                height - text_height - X_LABEL_PADDING,
            );
        }

        if let Some(y) = self.y_item {
            surface.set_text(y, &self.config.y_label);
            surface.set_max_width(y, plot_height);
            let text_width = surface.extent_of(y).width;
            surface.set_position(
                y,
                text_width / 2.0 + Y_LABEL_PADDING,
                margin.top + plot_height / 2.0,
            );
        }

        if let Some(y2) = self.y2_item {
            surface.set_text(y2, &self.config.y2_label);
            surface.set_max_width(y2, plot_height);
            let text_width = surface.extent_of(y2).width;
            surface.set_position(
                y2,
                width - text_width / 2.0 - Y_LABEL_PADDING,
                margin.top + plot_height / 2.0,
            );
        }
    }
}

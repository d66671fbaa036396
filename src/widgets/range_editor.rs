use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ConfigOverride, FrameConfig, Margin};
use crate::error::OverlayResult;
use crate::events::{Dispatcher, NamedEvent};
use crate::surface::{NodeId, SharedSurface, Surface};
use crate::widgets::WidgetBase;

/// Event name emitted when the user commits one range endpoint.
pub const RANGE_CHANGED: &str = "rangeChanged";

/// Which endpoint of the brushed range a commit refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeBound {
    Min,
    Max,
}

/// Event emitted by the range editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RangeEvent {
    /// Carries the committed field text verbatim. Values are raw strings;
    /// parsing and validation belong to the listening host.
    RangeChanged { value: String, bound: RangeBound },
}

impl NamedEvent for RangeEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::RangeChanged { .. } => RANGE_CHANGED,
        }
    }
}

/// Configuration for the brush range editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeEditorConfig {
    pub margin: Margin,
    pub width: f64,
    pub height: f64,
}

impl Default for RangeEditorConfig {
    fn default() -> Self {
        Self {
            margin: Margin::new(60.0, 30.0, 40.0, 70.0),
            width: 800.0,
            height: 500.0,
        }
    }
}

impl FrameConfig for RangeEditorConfig {
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

/// Partial override for `RangeEditorConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeEditorConfigPatch {
    pub margin: Option<Margin>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ConfigOverride for RangeEditorConfig {
    type Patch = RangeEditorConfigPatch;

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
        self
    }
}

/// Two independently editable range endpoints with commit-on-blur semantics.
pub struct BrushRangeEditor<S: Surface> {
    base: WidgetBase<S>,
    config: RangeEditorConfig,
    dispatcher: Dispatcher<RangeEvent>,
    input_min: Option<NodeId>,
    input_max: Option<NodeId>,
    range_min: Option<String>,
    range_max: Option<String>,
}

impl<S: Surface> BrushRangeEditor<S> {
    #[must_use]
    pub fn new(surface: SharedSurface<S>, container: NodeId) -> Self {
        Self {
            base: WidgetBase::new(surface, container),
            config: RangeEditorConfig::default(),
            dispatcher: Dispatcher::new(),
            input_min: None,
            input_max: None,
            range_min: None,
            range_max: None,
        }
    }

    /// Registers a listener on this widget's private dispatcher.
    pub fn on(
        &mut self,
        event: &'static str,
        namespace: impl Into<String>,
        handler: impl FnMut(NodeId, &RangeEvent) + 'static,
    ) -> &mut Self {
        self.dispatcher.on(event, namespace, handler);
        self
    }

    pub fn set_config(&mut self, patch: RangeEditorConfigPatch) -> &mut Self {
        self.config = self.config.clone().override_with(patch);
        self
    }

    #[must_use]
    pub fn config(&self) -> &RangeEditorConfig {
        &self.config
    }

    /// Stores the min endpoint text without rendering.
    pub fn set_range_min(&mut self, value: impl Into<String>) -> &mut Self {
        self.range_min = Some(value.into());
        self
    }

    /// Stores the max endpoint text without rendering.
    pub fn set_range_max(&mut self, value: impl Into<String>) -> &mut Self {
        self.range_max = Some(value.into());
        self
    }

    #[must_use]
    pub fn range_min(&self) -> Option<&str> {
        self.range_min.as_deref()
    }

    #[must_use]
    pub fn range_max(&self) -> Option<&str> {
        self.range_max.as_deref()
    }

    /// Builds the two editable fields on the first call, then repopulates
    /// them from the cached endpoints (empty string when unset).
    pub fn draw_range_editor(&mut self) -> OverlayResult<&mut Self> {
        self.config.validate_frame()?;
        self.build();
        let mut surface = self.base.surface_mut();
        if let Some(input) = self.input_min {
            surface.set_text(input, self.range_min.as_deref().unwrap_or(""));
        }
        if let Some(input) = self.input_max {
            surface.set_text(input, self.range_max.as_deref().unwrap_or(""));
        }
        drop(surface);
        Ok(self)
    }

    /// Blur-commit path for the min field; Enter-to-commit lands here too.
    ///
    /// Reads the field's current text, caches it and emits `rangeChanged`.
    /// A no-op before the fields exist.
    pub fn commit_min(&mut self) -> &mut Self {
        let Some(input) = self.input_min else {
            return self;
        };
        let value = self.base.surface().text(input);
        self.range_min = Some(value.clone());
        trace!(value = %value, "range min committed");
        self.dispatcher.emit(
            input,
            &RangeEvent::RangeChanged {
                value,
                bound: RangeBound::Min,
            },
        );
        self
    }

    /// Blur-commit path for the max field; Enter-to-commit lands here too.
    pub fn commit_max(&mut self) -> &mut Self {
        let Some(input) = self.input_max else {
            return self;
        };
        let value = self.base.surface().text(input);
        self.range_max = Some(value.clone());
        trace!(value = %value, "range max committed");
        self.dispatcher.emit(
            input,
            &RangeEvent::RangeChanged {
                value,
                bound: RangeBound::Max,
            },
        );
        self
    }

    fn build(&mut self) {
        if self.base.is_built() {
            return;
        }
        debug!("build brush range editor");
        let root = self.base.ensure_root("brush-range-input-group");
        let mut surface = self.base.surface_mut();
        surface.set_position(root, 0.0, 0.0);

        // right-floated row in the original: max, separator, min
        let max = surface.append_child(root, "brush-range-input max");
        surface.set_editable(max, true);

        let separator = surface.append_child(root, "separator");
        surface.set_text(separator, "-");

        let min = surface.append_child(root, "brush-range-input min");
        surface.set_editable(min, true);
        drop(surface);

        self.input_min = Some(min);
        self.input_max = Some(max);
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{
    ConfigOverride, DomainValue, Extent, FrameConfig, HoverPoint, KeyType, Margin, SeriesRow,
};
use crate::error::{OverlayError, OverlayResult};
use crate::events::panel::{MOUSE_MOVE_PANEL, MOUSE_OUT_PANEL, MOUSE_OVER_PANEL};
use crate::events::{Dispatcher, PanelEvent};
use crate::surface::{Color, NodeId, SharedSurface, Surface};
use crate::widgets::WidgetBase;

/// Horizontal gap between the pointer and the near tooltip edge.
const POINTER_OFFSET: f64 = 4.0;

/// Swatch color used until a color scale is injected.
const FALLBACK_SWATCH: Color = Color::rgb(0.5, 0.5, 0.5);

/// Looks up the display color for a series identifier.
pub type ColorScale = Box<dyn Fn(&str) -> Color>;
/// Formats a data value for display.
pub type ValueFormatter = Box<dyn Fn(f64) -> String>;
/// Formats a time-keyed title for display.
pub type DateFormatter = Box<dyn Fn(DateTime<Utc>) -> String>;

/// Configuration for the tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    pub margin: Margin,
    pub width: f64,
    pub height: f64,
    pub title_height: f64,
    pub element_height: f64,
    pub padding: f64,
    pub dot_radius: f64,
    pub tooltip_width: f64,
    pub tooltip_height: f64,
    /// `chrono` pattern used by the default date formatter.
    pub date_format: String,
    /// Exact display order by series id; rows with unlisted ids are dropped.
    /// Empty means "not configured".
    pub series_order: Vec<String>,
    pub key_type: KeyType,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            margin: Margin::new(2.0, 2.0, 2.0, 2.0),
            width: 250.0,
            height: 45.0,
            title_height: 32.0,
            element_height: 24.0,
            padding: 8.0,
            dot_radius: 4.0,
            tooltip_width: 160.0,
            tooltip_height: 48.0,
            date_format: "%b %d, %Y".to_owned(),
            series_order: Vec::new(),
            key_type: KeyType::Time,
        }
    }
}

impl FrameConfig for TooltipConfig {
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

/// Partial override for `TooltipConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfigPatch {
    pub margin: Option<Margin>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub title_height: Option<f64>,
    pub element_height: Option<f64>,
    pub padding: Option<f64>,
    pub dot_radius: Option<f64>,
    pub tooltip_width: Option<f64>,
    pub tooltip_height: Option<f64>,
    pub date_format: Option<String>,
    pub series_order: Option<Vec<String>>,
    pub key_type: Option<KeyType>,
}

impl ConfigOverride for TooltipConfig {
    type Patch = TooltipConfigPatch;

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
        if let Some(title_height) = patch.title_height {
            self.title_height = title_height;
        }
        if let Some(element_height) = patch.element_height {
            self.element_height = element_height;
        }
        if let Some(padding) = patch.padding {
            self.padding = padding;
        }
        if let Some(dot_radius) = patch.dot_radius {
            self.dot_radius = dot_radius;
        }
        if let Some(tooltip_width) = patch.tooltip_width {
            self.tooltip_width = tooltip_width;
        }
        if let Some(tooltip_height) = patch.tooltip_height {
            self.tooltip_height = tooltip_height;
        }
        if let Some(date_format) = patch.date_format {
            self.date_format = date_format;
        }
        if let Some(series_order) = patch.series_order {
            self.series_order = series_order;
        }
        if let Some(key_type) = patch.key_type {
            self.key_type = key_type;
        }
        self
    }
}

/// Serializable snapshot of the tooltip's logical state, useful for
/// regression tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipSnapshot {
    pub x_position: Option<f64>,
    pub y_position: Option<f64>,
    pub title: Option<DomainValue>,
    pub content: Vec<SeriesRow>,
}

/// Pointer-chasing data tooltip with one-axis edge avoidance.
///
/// State machine: hidden until the host's enter event, positioned and
/// populated on every move event, hidden again on the leave event. The
/// widget emits no events of its own; it only consumes the host's panel
/// event stream via [`Tooltip::bind_events`].
pub struct Tooltip<S: Surface> {
    base: WidgetBase<S>,
    config: TooltipConfig,
    color_scale: Option<ColorScale>,
    value_formatter: Option<ValueFormatter>,
    date_formatter: Option<DateFormatter>,
    title_item: Option<NodeId>,
    body_item: Option<NodeId>,
    row_items: Vec<NodeId>,
    x_position: Option<f64>,
    y_position: Option<f64>,
    title: Option<DomainValue>,
    content: Vec<SeriesRow>,
}

impl<S: Surface> Tooltip<S> {
    #[must_use]
    pub fn new(surface: SharedSurface<S>, container: NodeId) -> Self {
        Self {
            base: WidgetBase::new(surface, container),
            config: TooltipConfig::default(),
            color_scale: None,
            value_formatter: None,
            date_formatter: None,
            title_item: None,
            body_item: None,
            row_items: Vec::new(),
            x_position: None,
            y_position: None,
            title: None,
            content: Vec::new(),
        }
    }

    pub fn set_config(&mut self, patch: TooltipConfigPatch) -> &mut Self {
        self.config = self.config.clone().override_with(patch);
        self
    }

    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// Injects the color lookup used for row swatches.
    pub fn set_color_scale(&mut self, scale: impl Fn(&str) -> Color + 'static) -> &mut Self {
        self.color_scale = Some(Box::new(scale));
        self
    }

    /// Injects the value formatter; the default renders two decimals.
    pub fn set_value_formatter(&mut self, format: impl Fn(f64) -> String + 'static) -> &mut Self {
        self.value_formatter = Some(Box::new(format));
        self
    }

    /// Injects the date formatter; the default uses `chrono` with the
    /// configured `date_format` pattern.
    pub fn set_date_formatter(
        &mut self,
        format: impl Fn(DateTime<Utc>) -> String + 'static,
    ) -> &mut Self {
        self.date_formatter = Some(Box::new(format));
        self
    }

    pub fn set_title(&mut self, title: DomainValue) -> &mut Self {
        self.title = Some(title);
        self
    }

    pub fn set_x_position(&mut self, x: f64) -> &mut Self {
        self.x_position = Some(x);
        self
    }

    pub fn set_y_position(&mut self, y: f64) -> &mut Self {
        self.y_position = Some(y);
        self
    }

    pub fn set_content(&mut self, content: Vec<SeriesRow>) -> &mut Self {
        self.content = content;
        self
    }

    #[must_use]
    pub fn snapshot(&self) -> TooltipSnapshot {
        TooltipSnapshot {
            x_position: self.x_position,
            y_position: self.y_position,
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based checks.
    pub fn snapshot_json_pretty(&self) -> OverlayResult<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(|e| {
            OverlayError::InvalidData(format!("failed to serialize tooltip snapshot: {e}"))
        })
    }

    /// Makes the tooltip visible. Returns `None` while no subtree exists.
    pub fn show(&mut self) -> Option<&mut Self> {
        let root = self.base.root()?;
        self.base.surface_mut().set_visible(root, true);
        Some(self)
    }

    /// Hides the tooltip. Returns `None` while no subtree exists.
    pub fn hide(&mut self) -> Option<&mut Self> {
        let root = self.base.root()?;
        self.base.surface_mut().set_visible(root, false);
        Some(self)
    }

    /// Composite update path: builds the subtree if absent, computes the
    /// pointer-relative position, stores title and ordered content, and
    /// re-renders.
    pub fn setup_tooltip(
        &mut self,
        point: &HoverPoint,
        mouse_x: f64,
        mouse_y: f64,
    ) -> OverlayResult<&mut Self> {
        if !mouse_x.is_finite() || !mouse_y.is_finite() {
            return Err(OverlayError::InvalidData(
                "pointer coordinates must be finite".to_owned(),
            ));
        }
        self.config.validate_frame()?;
        self.build();

        let (tooltip_x, tooltip_y) = self.tooltip_position(mouse_x, mouse_y);
        self.x_position = Some(tooltip_x);
        self.y_position = Some(tooltip_y);
        self.title = Some(point.key.clone());
        self.content = self.ordered_series(&point.series);
        self.draw_tooltip()
    }

    /// Re-renders title, content and position from the cached state.
    pub fn draw_tooltip(&mut self) -> OverlayResult<&mut Self> {
        self.config.validate_frame()?;
        self.build();
        self.draw_title();
        self.draw_content();
        self.resize_root();
        self.move_to_position();
        Ok(self)
    }

    /// Wires this tooltip's show/update/hide transitions into the host's
    /// panel event stream, namespaced so rebinding replaces rather than
    /// duplicates handlers.
    pub fn bind_events(tooltip: &Rc<RefCell<Self>>, host: &mut Dispatcher<PanelEvent>)
    where
        S: 'static,
    {
        let handle = Rc::clone(tooltip);
        host.on(MOUSE_OVER_PANEL, "tooltip", move |_, _| {
            let _ = handle.borrow_mut().show();
        });
        let handle = Rc::clone(tooltip);
        host.on(MOUSE_MOVE_PANEL, "tooltip", move |_, event| {
            if let PanelEvent::MouseMovePanel { point, x, y } = event {
                if let Err(err) = handle.borrow_mut().setup_tooltip(point, *x, *y) {
                    warn!(error = %err, "skipping tooltip update for unusable pointer event");
                }
            }
        });
        let handle = Rc::clone(tooltip);
        host.on(MOUSE_OUT_PANEL, "tooltip", move |_, _| {
            let _ = handle.borrow_mut().hide();
        });
    }

    /// One-axis edge avoidance: the tooltip sits right of the pointer until
    /// the pointer crosses the plot midpoint, then flips to the left.
    ///
    /// The measured extent is queried before the redraw, so it reflects the
    /// previous contents.
    fn tooltip_position(&self, mouse_x: f64, mouse_y: f64) -> (f64, f64) {
        let size = self
            .base
            .root()
            .map_or(Extent::ZERO, |root| self.base.surface().extent_of(root));
        let tooltip_y = mouse_y + self.config.margin.top - size.height / 2.0;
        let avoidance = if mouse_x > self.config.plot_width() / 2.0 {
            -size.width - POINTER_OFFSET
        } else {
            POINTER_OFFSET
        };
        (mouse_x + avoidance, tooltip_y)
    }

    /// Applies the configured topic order (unlisted rows are dropped), else
    /// sorts alphabetically by label when labels are present, else keeps
    /// insertion order.
    fn ordered_series(&self, series: &[SeriesRow]) -> Vec<SeriesRow> {
        if !self.config.series_order.is_empty() {
            let ordered: Vec<SeriesRow> = self
                .config
                .series_order
                .iter()
                .filter_map(|name| series.iter().find(|row| &row.id == name).cloned())
                .collect();
            let dropped = series.len().saturating_sub(ordered.len());
            if dropped > 0 {
                warn!(dropped, "tooltip rows absent from the configured series order");
            }
            ordered
        } else if series.first().is_some_and(|row| !row.label.is_empty()) {
            let mut sorted = series.to_vec();
            // case-insensitive, non-numeric ordering
            sorted.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
            sorted
        } else {
            series.to_vec()
        }
    }

    fn build(&mut self) {
        if self.base.is_built() {
            return;
        }
        debug!("build tooltip group");
        let root = self.base.ensure_root("tooltip-group");
        let title_height = self.config.title_height;
        let tooltip_width = self.config.tooltip_width;
        let mut surface = self.base.surface_mut();
        let title = surface.append_child(root, "tooltip-title");
        surface.set_size(title, Extent::new(tooltip_width, title_height));
        let body = surface.append_child(root, "tooltip-body");
        drop(surface);
        self.title_item = Some(title);
        self.body_item = Some(body);
    }

    fn draw_title(&mut self) {
        let Some(title_item) = self.title_item else {
            return;
        };
        let text = match (&self.title, self.config.key_type) {
            (Some(DomainValue::Time(time)), KeyType::Time) => self.format_date(*time),
            (Some(value), _) => value.to_string(),
            (None, _) => String::new(),
        };
        self.base.surface_mut().set_text(title_item, &text);
    }

    fn draw_content(&mut self) {
        let Some(body) = self.body_item else {
            return;
        };

        // swatch, label and (when a value is present) formatted value
        type Sections = SmallVec<[(&'static str, Option<Color>, String); 3]>;
        let rows: Vec<Sections> = self
            .content
            .iter()
            .map(|row| {
                let mut sections = Sections::new();
                sections.push(("section color", Some(self.swatch_color(&row.id)), String::new()));
                // label text passes through as-is: the caller controls it
                sections.push(("section label", None, row.label.clone()));
                if let Some(value) = row.value {
                    sections.push(("section value", None, self.format_value(value)));
                }
                sections
            })
            .collect();

        let element_height = self.config.element_height;
        let tooltip_width = self.config.tooltip_width;
        let dot = 2.0 * self.config.dot_radius;
        let mut surface = self.base.surface_mut();
        for item in self.row_items.drain(..) {
            surface.remove(item);
        }
        for sections in rows {
            let item = surface.append_child(body, "tooltip-item");
            surface.set_size(item, Extent::new(tooltip_width, element_height));
            for (classes, swatch, text) in sections {
                let section = surface.append_child(item, classes);
                if let Some(color) = swatch {
                    surface.set_background(section, color);
                    surface.set_size(section, Extent::new(dot, dot));
                } else {
                    surface.set_text(section, &text);
                }
            }
            self.row_items.push(item);
        }
    }

    fn resize_root(&mut self) {
        let Some(root) = self.base.root() else {
            return;
        };
        let height = self.config.title_height
            + self.content.len() as f64 * self.config.element_height
            + 2.0 * self.config.padding;
        let size = Extent::new(self.config.tooltip_width, height);
        self.base.surface_mut().set_size(root, size);
    }

    fn move_to_position(&mut self) {
        let Some(root) = self.base.root() else {
            return;
        };
        let (Some(x), Some(y)) = (self.x_position, self.y_position) else {
            return;
        };
        let left = x + self.config.margin.left;
        self.base.surface_mut().set_position(root, left, y);
    }

    fn format_date(&self, time: DateTime<Utc>) -> String {
        match &self.date_formatter {
            Some(format) => format(time),
            None => time.format(&self.config.date_format).to_string(),
        }
    }

    fn format_value(&self, value: f64) -> String {
        match &self.value_formatter {
            Some(format) => format(value),
            None => format!("{value:.2}"),
        }
    }

    fn swatch_color(&self, id: &str) -> Color {
        match &self.color_scale {
            Some(scale) => scale(id),
            None => FALLBACK_SWATCH,
        }
    }
}

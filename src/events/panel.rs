use serde::{Deserialize, Serialize};

use crate::core::HoverPoint;
use crate::events::NamedEvent;

/// Pointer entered the plotting panel.
pub const MOUSE_OVER_PANEL: &str = "mouseOverPanel";
/// Pointer moved inside the plotting panel.
pub const MOUSE_MOVE_PANEL: &str = "mouseMovePanel";
/// Pointer left the plotting panel.
pub const MOUSE_OUT_PANEL: &str = "mouseOutPanel";

/// Pointer events the host chart's interaction layer publishes for overlays.
///
/// The host owns this dispatcher and emits in interaction order; overlays
/// such as the tooltip only consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PanelEvent {
    MouseOverPanel,
    MouseMovePanel { point: HoverPoint, x: f64, y: f64 },
    MouseOutPanel,
}

impl NamedEvent for PanelEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::MouseOverPanel => MOUSE_OVER_PANEL,
            Self::MouseMovePanel { .. } => MOUSE_MOVE_PANEL,
            Self::MouseOutPanel => MOUSE_OUT_PANEL,
        }
    }
}

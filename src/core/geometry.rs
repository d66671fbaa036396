use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// Pixel margins between the outer frame and the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.left.is_finite()
    }
}

/// Measured size of a rendered element in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Outer frame every overlay configuration carries: total size plus margins.
///
/// Implementors get the derived plotting-area size and the shared validation
/// used by the draw entry points.
pub trait FrameConfig {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn margin(&self) -> Margin;

    /// Plotting-area width inside the horizontal margins.
    #[must_use]
    fn plot_width(&self) -> f64 {
        let margin = self.margin();
        self.width() - margin.left - margin.right
    }

    /// Plotting-area height inside the vertical margins.
    #[must_use]
    fn plot_height(&self) -> f64 {
        let margin = self.margin();
        self.height() - margin.top - margin.bottom
    }

    fn validate_frame(&self) -> OverlayResult<()> {
        let (width, height) = (self.width(), self.height());
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(OverlayError::InvalidFrame { width, height });
        }
        if !self.margin().is_finite() {
            return Err(OverlayError::InvalidData(
                "frame margins must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

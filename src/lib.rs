//! chart-overlays: interactive overlay widgets for chart hosts.
//!
//! Each widget follows one lifecycle contract: build its visual elements once
//! on a host-provided drawing surface, re-render from a mutable configuration
//! and cache on every update, and notify external listeners through a private
//! named-event dispatcher when the user changes something. The host chart
//! owns scales, axes and data; widgets only consume injected capabilities
//! (color lookup, formatters, measured geometry).

pub mod core;
pub mod error;
pub mod events;
pub mod interaction;
pub mod surface;
pub mod telemetry;
pub mod widgets;

pub use error::{OverlayError, OverlayResult};
pub use widgets::{Binning, BrushRangeEditor, Label, Tooltip};

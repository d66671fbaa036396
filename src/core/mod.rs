pub mod config;
pub mod geometry;
pub mod types;

pub use config::ConfigOverride;
pub use geometry::{Extent, FrameConfig, Margin};
pub use types::{DomainValue, HoverPoint, KeyType, SeriesRow};

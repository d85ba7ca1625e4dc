pub mod config;
pub mod dataset;
pub mod error;
pub mod hierarchy;
pub mod id;
pub mod layout;
pub mod legend;
pub mod model;
pub mod palette;

pub use config::TreemapConfig;
pub use dataset::{Dataset, DatasetKey};
pub use error::{Result, TreemapError};
pub use hierarchy::{build_hierarchy, parse_dataset};
pub use id::{Category, NodeId};
pub use layout::{Binary, Squarify, Tiling, Viewport, resolve_layout};
pub use legend::{LegendGrid, LegendItem, distinct_categories};
pub use model::*;
pub use palette::CategoryColors;

// Re-export so downstream crates share the same geometry and graph types.
pub use kurbo::Rect;
pub use petgraph::graph::NodeIndex;

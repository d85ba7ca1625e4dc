//! Rendering and behavior configuration.
//!
//! Every field has a default matching the published page, so an empty JSON
//! object (`{}`) is a valid configuration.

use crate::error::{Result, TreemapError};
use crate::layout::Viewport;
use crate::model::Color;
use serde::{Deserialize, Serialize};

// ─── Margins ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(5.0)
    }
}

// ─── Config ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapConfig {
    /// Outer width of the map surface, margins included.
    pub canvas_width: f64,
    /// Outer height of the map surface, margins included.
    pub canvas_height: f64,
    pub margin: Margin,
    /// Inner and outer padding between tiles (d3 `padding(n)`).
    pub padding: f64,
    pub tile_stroke: String,
    pub tile_stroke_width: f64,
    /// Offset of the label overlay from the tile's top-left corner.
    pub label_inset: f64,
    /// Right padding inside the label overlay before wrapping.
    pub label_padding_right: f64,
    pub label_font_size: f64,
    pub label_color: String,
    pub legend_width: f64,
    pub legend_swatch_size: f64,
    /// Vertical gap between legend rows.
    pub legend_row_gap: f64,
    /// Label position relative to the swatch's right/bottom edge.
    pub legend_text_offset: (f64, f64),
    pub legend_text_color: String,
    /// Tooltip opacity while hovering.
    pub tooltip_opacity: f64,
    /// Start on the dataset named by `?data=` instead of the default.
    pub read_query_on_load: bool,
    /// Deepest nesting accepted in a dataset.
    pub max_depth: usize,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1300.0,
            canvas_height: 1000.0,
            margin: Margin::default(),
            padding: 1.0,
            tile_stroke: "#000".to_string(),
            tile_stroke_width: 5.0,
            label_inset: 3.0,
            label_padding_right: 8.0,
            label_font_size: 12.0,
            label_color: "#0a0a0a".to_string(),
            legend_width: 610.0,
            legend_swatch_size: 15.0,
            legend_row_gap: 10.0,
            legend_text_offset: (4.0, -1.0),
            legend_text_color: "#343a40".to_string(),
            tooltip_opacity: 0.9,
            read_query_on_load: false,
            max_depth: 32,
        }
    }
}

impl TreemapConfig {
    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TreemapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let vp = self.viewport();
        if !(vp.width > 0.0 && vp.height > 0.0) {
            return Err(TreemapError::Config(format!(
                "canvas {}x{} leaves no drawable area after margins",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.padding >= 0.0) {
            return Err(TreemapError::Config(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }
        if !(self.legend_width > 0.0) {
            return Err(TreemapError::Config(format!(
                "legend width must be positive, got {}",
                self.legend_width
            )));
        }
        if self.max_depth == 0 {
            return Err(TreemapError::Config("max_depth must be at least 1".into()));
        }
        for (field, value) in [
            ("tile_stroke", &self.tile_stroke),
            ("label_color", &self.label_color),
            ("legend_text_color", &self.legend_text_color),
        ] {
            if Color::from_hex(value).is_none() {
                return Err(TreemapError::Config(format!(
                    "{field} must be a #rgb or #rrggbb color, got {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Drawable area: the canvas minus its margins.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.canvas_width - self.margin.left - self.margin.right,
            height: self.canvas_height - self.margin.top - self.margin.bottom,
        }
    }
}

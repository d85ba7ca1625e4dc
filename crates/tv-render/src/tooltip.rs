//! Tooltip content and visibility state.

use crate::scene::Tile;
use crate::svg::escape_xml;
use serde::Serialize;

/// What the tooltip shows for one tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub name: String,
    pub category: String,
    pub value: f64,
}

impl TooltipContent {
    pub fn from_tile(tile: &Tile) -> Self {
        Self {
            name: tile.name.clone(),
            category: tile.category.as_str().to_string(),
            value: tile.value,
        }
    }

    /// Value as displayed: shortest decimal form (`82.74`, `760505847`).
    pub fn value_text(&self) -> String {
        format_value(self.value)
    }

    pub fn html(&self) -> String {
        format!(
            "<h6>{}</h6><p><b>Category</b>: {}</p><p><b>Value</b>: {}</p>",
            escape_xml(&self.name),
            escape_xml(&self.category),
            self.value_text()
        )
    }
}

pub fn format_value(value: f64) -> String {
    format!("{value}")
}

/// Visibility, content, and page position of the tooltip.
///
/// Entering makes it visible without content; content arrives with the
/// first move. Leaving hides it but keeps the stale content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipState {
    pub opacity: f64,
    pub content: Option<TooltipContent>,
    pub left: f64,
    pub top: f64,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            content: None,
            left: 0.0,
            top: 0.0,
        }
    }
}

impl TooltipState {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn show(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    /// Point the tooltip at `tile`, placed at `pointer - offset`.
    pub fn update(&mut self, tile: &Tile, page_x: f64, page_y: f64, offset: (f64, f64)) {
        self.content = Some(TooltipContent::from_tile(tile));
        self.left = page_x - offset.0;
        self.top = page_y - offset.1;
    }

    pub fn hide(&mut self) {
        self.opacity = 0.0;
    }

    pub fn html(&self) -> String {
        self.content
            .as_ref()
            .map(TooltipContent::html)
            .unwrap_or_default()
    }
}

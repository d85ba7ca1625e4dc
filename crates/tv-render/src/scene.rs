//! Laid-out hierarchy → render scene.
//!
//! The scene is the single in-memory record of what is on screen: one tile
//! per leaf (with its typed source data) plus the legend. Every view of the
//! map (SVG, hit testing, tooltip) reads from it.

use crate::wrap::wrap_words;
use kurbo::Rect;
use std::collections::HashMap;
use tv_core::{
    Category, CategoryColors, Color, Dataset, Hierarchy, LegendGrid, NodeId, NodeIndex,
    TreemapConfig, distinct_categories,
};

/// One rendered leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub leaf: NodeIndex,
    pub id: NodeId,
    pub name: String,
    pub category: Category,
    pub value: f64,
    /// Bounds in viewport coordinates (margins excluded).
    pub rect: Rect,
    pub fill: Color,
    /// Label overlay bounds: the tile's size, inset from its corner.
    pub label_rect: Rect,
    pub label_lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TreemapScene {
    /// Tiles in paint order (hierarchy pre-order).
    pub tiles: Vec<Tile>,
    pub legend: LegendGrid,
    /// Outer surface size, margins included.
    pub width: f64,
    pub height: f64,
    /// Translation from surface to viewport coordinates.
    pub origin: (f64, f64),
    pub surface_class: &'static str,
}

impl TreemapScene {
    /// Build tiles, colors, and legend from a laid-out hierarchy.
    ///
    /// Tile colors and legend swatches come from one `CategoryColors`
    /// instance, so a category has the same color everywhere in the scene.
    pub fn build(
        hierarchy: &Hierarchy,
        bounds: &HashMap<NodeIndex, Rect>,
        dataset: &Dataset,
        config: &TreemapConfig,
    ) -> Self {
        let mut colors = CategoryColors::default();
        let line_height = config.label_font_size * 1.2;
        let mut tiles = Vec::new();

        for leaf in hierarchy.leaves() {
            let node = hierarchy.node(leaf);
            let (Some(category), Some(&rect)) = (node.category, bounds.get(&leaf)) else {
                log::warn!("leaf {} has no category or bounds; skipped", node.id);
                continue;
            };
            let label_rect = Rect::new(
                rect.x0 + config.label_inset,
                rect.y0 + config.label_inset,
                rect.x1 + config.label_inset,
                rect.y1 + config.label_inset,
            );
            let max_lines = (label_rect.height() / line_height).floor().max(0.0) as usize;
            let label_lines = wrap_words(
                &node.name,
                label_rect.width() - config.label_padding_right,
                config.label_font_size,
                max_lines,
            );
            tiles.push(Tile {
                leaf,
                id: node.id,
                name: node.name.clone(),
                category,
                value: node.value,
                rect,
                fill: colors.color_for(category),
                label_rect,
                label_lines,
            });
        }

        let categories = distinct_categories(hierarchy);
        let legend = LegendGrid::new(
            &categories,
            &mut colors,
            dataset.legend_spacing,
            dataset.legend_height,
            config,
        );

        log::debug!(
            "scene for {}: {} tiles, {} legend entries",
            dataset.key,
            tiles.len(),
            legend.items.len()
        );

        Self {
            tiles,
            legend,
            width: config.canvas_width,
            height: config.canvas_height,
            origin: (config.margin.left, config.margin.top),
            surface_class: dataset.surface_class,
        }
    }

}

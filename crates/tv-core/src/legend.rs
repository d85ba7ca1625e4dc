//! Legend content and grid geometry.

use crate::config::TreemapConfig;
use crate::id::Category;
use crate::model::{Color, Hierarchy};
use crate::palette::CategoryColors;
use std::collections::HashSet;

/// Distinct leaf categories in first-seen (render) order.
pub fn distinct_categories(hierarchy: &Hierarchy) -> Vec<Category> {
    let mut seen = HashSet::new();
    hierarchy
        .leaves()
        .into_iter()
        .filter_map(|idx| hierarchy.node(idx).category)
        .filter(|cat| seen.insert(*cat))
        .collect()
}

/// One swatch + label, positioned by its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub category: Category,
    pub color: Color,
    pub x: f64,
    pub y: f64,
}

/// Legend laid out as rows of fixed-width columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendGrid {
    pub items: Vec<LegendItem>,
    pub columns: usize,
    pub swatch_size: f64,
    /// Label position relative to the item origin.
    pub text_x: f64,
    pub text_y: f64,
    pub width: f64,
    pub height: f64,
}

impl LegendGrid {
    /// Lay out `categories`; `spacing` is the per-dataset column width.
    pub fn new(
        categories: &[Category],
        colors: &mut CategoryColors,
        spacing: f64,
        height: f64,
        config: &TreemapConfig,
    ) -> Self {
        let columns = ((config.legend_width / spacing).floor() as usize).max(1);
        let swatch = config.legend_swatch_size;
        let items = categories
            .iter()
            .enumerate()
            .map(|(i, &category)| {
                let col = i % columns;
                let row = i / columns;
                LegendItem {
                    category,
                    color: colors.color_for(category),
                    x: col as f64 * spacing,
                    y: row as f64 * swatch + config.legend_row_gap * row as f64,
                }
            })
            .collect();

        Self {
            items,
            columns,
            swatch_size: swatch,
            text_x: swatch + config.legend_text_offset.0,
            text_y: swatch + config.legend_text_offset.1,
            width: config.legend_width,
            height,
        }
    }
}

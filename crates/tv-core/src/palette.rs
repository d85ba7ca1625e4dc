//! Ordinal category → color assignment.

use crate::id::Category;
use crate::model::Color;
use std::collections::HashMap;

/// d3 `schemePaired` followed by d3 `schemeTableau10` in reverse.
pub const PALETTE: [Color; 22] = [
    // schemePaired
    Color::rgb(0xa6, 0xce, 0xe3),
    Color::rgb(0x1f, 0x78, 0xb4),
    Color::rgb(0xb2, 0xdf, 0x8a),
    Color::rgb(0x33, 0xa0, 0x2c),
    Color::rgb(0xfb, 0x9a, 0x99),
    Color::rgb(0xe3, 0x1a, 0x1c),
    Color::rgb(0xfd, 0xbf, 0x6f),
    Color::rgb(0xff, 0x7f, 0x00),
    Color::rgb(0xca, 0xb2, 0xd6),
    Color::rgb(0x6a, 0x3d, 0x9a),
    Color::rgb(0xff, 0xff, 0x99),
    Color::rgb(0xb1, 0x59, 0x28),
    // schemeTableau10, reversed
    Color::rgb(0xba, 0xb0, 0xab),
    Color::rgb(0x9c, 0x75, 0x5f),
    Color::rgb(0xff, 0x9d, 0xa7),
    Color::rgb(0xaf, 0x7a, 0xa1),
    Color::rgb(0xed, 0xc9, 0x49),
    Color::rgb(0x59, 0xa1, 0x4f),
    Color::rgb(0x76, 0xb7, 0xb2),
    Color::rgb(0xe1, 0x57, 0x59),
    Color::rgb(0xf2, 0x8e, 0x2c),
    Color::rgb(0x4e, 0x79, 0xa7),
];

/// Assigns palette entries to categories in first-seen order, cycling when
/// there are more categories than colors. One instance per rendered dataset.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    assigned: HashMap<Category, usize>,
}

impl CategoryColors {
    /// Color of `category`, assigning the next palette slot on first sight.
    pub fn color_for(&mut self, category: Category) -> Color {
        let next = self.assigned.len();
        let slot = *self.assigned.entry(category).or_insert(next);
        PALETTE[slot % PALETTE.len()]
    }
}

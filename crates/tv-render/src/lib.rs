//! Scene construction and output for treemap views.
//!
//! `scene` turns a laid-out hierarchy into tiles and a legend, `svg` writes
//! them out, `hit` and `tooltip` back pointer interaction.

pub mod hit;
pub mod scene;
pub mod svg;
pub mod tooltip;
pub mod wrap;

pub use hit::{Hit, HitPart, hit_test};
pub use scene::{Tile, TreemapScene};
pub use svg::{render_legend_svg, render_map_svg};
pub use tooltip::{TooltipContent, TooltipState};

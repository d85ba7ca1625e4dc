use crate::scene::{Tile, TreemapScene};
use crate::tooltip::format_value;
use std::fmt::Write;
use tv_core::{LegendGrid, TreemapConfig};

/// Escape text for use in XML/HTML text nodes and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the map surface: one `rect.tile` per leaf, then the label overlays.
pub fn render_map_svg(scene: &TreemapScene, config: &TreemapConfig) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" class=\"{}\">",
        scene.width, scene.height, scene.surface_class
    );
    svg.push_str("<style>\n");
    svg.push_str("  text { font-family: Inter, system-ui, sans-serif; }\n");
    svg.push_str("</style>\n");

    let _ = writeln!(
        svg,
        "<g transform=\"translate({}, {})\">",
        scene.origin.0, scene.origin.1
    );

    for (i, tile) in scene.tiles.iter().enumerate() {
        render_tile(&mut svg, i, tile, config);
    }

    // Labels go after every tile so no neighbor paints over them.
    for (i, tile) in scene.tiles.iter().enumerate() {
        render_label(&mut svg, i, tile, config);
    }

    svg.push_str("</g>\n</svg>");
    svg
}

fn data_attrs(tile: &Tile, index: usize) -> String {
    format!(
        "data-index=\"{}\" data-name=\"{}\" data-category=\"{}\" data-value=\"{}\"",
        index,
        escape_xml(&tile.name),
        escape_xml(tile.category.as_str()),
        format_value(tile.value)
    )
}

fn render_tile(out: &mut String, index: usize, tile: &Tile, config: &TreemapConfig) {
    log::trace!("TILE {} at {:?}", tile.id, tile.rect);
    let r = tile.rect;
    let _ = writeln!(
        out,
        "  <rect class=\"tile\" id=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" {} />",
        escape_xml(tile.id.as_str()),
        r.x0,
        r.y0,
        r.width(),
        r.height(),
        tile.fill.to_hex(),
        config.tile_stroke,
        config.tile_stroke_width,
        data_attrs(tile, index)
    );
}

fn render_label(out: &mut String, index: usize, tile: &Tile, config: &TreemapConfig) {
    if tile.label_lines.is_empty() {
        return;
    }
    let r = tile.label_rect;
    let font_size = config.label_font_size;
    let line_height = font_size * 1.2;
    let _ = write!(
        out,
        "  <text class=\"tile-label\" x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\" {}>",
        r.x0,
        r.y0,
        font_size,
        config.label_color,
        data_attrs(tile, index)
    );
    for (n, line) in tile.label_lines.iter().enumerate() {
        let dy = if n == 0 { font_size } else { line_height };
        let _ = write!(
            out,
            "<tspan x=\"{}\" dy=\"{}\">{}</tspan>",
            r.x0,
            dy,
            escape_xml(line)
        );
    }
    out.push_str("</text>\n");
}

/// Render the legend surface: a swatch and label per category.
pub fn render_legend_svg(legend: &LegendGrid, config: &TreemapConfig) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"legend\" width=\"{}\" height=\"{}\">",
        legend.width, legend.height
    );
    for item in &legend.items {
        let _ = writeln!(
            svg,
            "  <g transform=\"translate({}, {})\"><rect class=\"legend-item\" width=\"{}\" height=\"{}\" fill=\"{}\" /><text x=\"{}\" y=\"{}\" fill=\"{}\">{}</text></g>",
            item.x,
            item.y,
            legend.swatch_size,
            legend.swatch_size,
            item.color.to_hex(),
            legend.text_x,
            legend.text_y,
            config.legend_text_color,
            escape_xml(item.category.as_str())
        );
    }
    svg.push_str("</svg>");
    svg
}

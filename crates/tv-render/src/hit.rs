//! Hit testing: surface point → tile lookup.
//!
//! Label overlays are painted after every tile, so they are checked first,
//! last-painted first. A label hit resolves to the label's own tile, which
//! makes hovering a label and hovering its tile indistinguishable.

use crate::scene::TreemapScene;

/// Which element of a tile the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Tile,
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Index into `TreemapScene::tiles`.
    pub tile: usize,
    pub part: HitPart,
}

/// Find the topmost tile element at surface position (px, py).
/// Returns `None` over gaps, margins, and outside the surface.
pub fn hit_test(scene: &TreemapScene, px: f64, py: f64) -> Option<Hit> {
    let x = px - scene.origin.0;
    let y = py - scene.origin.1;

    for (i, tile) in scene.tiles.iter().enumerate().rev() {
        if tile.label_lines.is_empty() {
            continue;
        }
        if contains(&tile.label_rect, x, y) {
            return Some(Hit {
                tile: i,
                part: HitPart::Label,
            });
        }
    }

    scene
        .tiles
        .iter()
        .enumerate()
        .rev()
        .find(|(_, tile)| contains(&tile.rect, x, y))
        .map(|(i, _)| Hit {
            tile: i,
            part: HitPart::Tile,
        })
}

/// Closed-interval containment; edges count as inside.
fn contains(r: &kurbo::Rect, x: f64, y: f64) -> bool {
    x >= r.x0 && x <= r.x1 && y >= r.y0 && y <= r.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use tv_core::{DatasetKey, TreemapConfig, parse_dataset, resolve_layout};

    fn scene() -> TreemapScene {
        let json = r#"{"name":"G","children":[
            {"name":"Wii","children":[
                {"name":"Wii Sports","category":"Wii","value":"82.74"},
                {"name":"Wii Play","category":"Wii","value":"29.02"}
            ]},
            {"name":"GB","children":[
                {"name":"Tetris","category":"GB","value":"30.26"}
            ]}
        ]}"#;
        let config = TreemapConfig::default();
        let h = parse_dataset(json, config.max_depth).unwrap();
        let bounds = resolve_layout(&h, config.viewport(), config.padding);
        TreemapScene::build(&h, &bounds, DatasetKey::Games.dataset(), &config)
    }

    #[test]
    fn center_of_each_tile_hits_that_tile() {
        let s = scene();
        for (i, tile) in s.tiles.iter().enumerate() {
            let c = tile.rect.center();
            let hit = hit_test(&s, c.x + s.origin.0, c.y + s.origin.1).unwrap();
            assert_eq!(hit.tile, i, "center of {} hit tile {}", tile.name, hit.tile);
        }
    }

    #[test]
    fn label_text_resolves_to_its_tile() {
        let s = scene();
        let t = &s.tiles[0];
        let hit = hit_test(
            &s,
            t.label_rect.x0 + 1.0 + s.origin.0,
            t.label_rect.y0 + 1.0 + s.origin.1,
        )
        .unwrap();
        assert_eq!(hit, Hit { tile: 0, part: HitPart::Label });
    }

    #[test]
    fn margins_and_outside_miss() {
        let s = scene();
        assert_eq!(hit_test(&s, 1.0, 1.0), None);
        assert_eq!(hit_test(&s, -10.0, 400.0), None);
        assert_eq!(hit_test(&s, s.width + 10.0, 10.0), None);
    }
}

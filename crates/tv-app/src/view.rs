//! Dataset JSON → everything drawn for it.

use tv_core::{DatasetKey, Hierarchy, Result, TreemapConfig, parse_dataset, resolve_layout};
use tv_render::{TreemapScene, render_legend_svg, render_map_svg};

/// A fully built dataset view. Replaces the previous one wholesale.
#[derive(Debug, Clone)]
pub struct LoadedView {
    pub key: DatasetKey,
    pub hierarchy: Hierarchy,
    pub scene: TreemapScene,
    pub map_svg: String,
    pub legend_svg: String,
}

/// What the map area currently shows.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    #[default]
    Empty,
    Loading(DatasetKey),
    Ready(Box<LoadedView>),
    Failed {
        key: DatasetKey,
        message: String,
        /// The data source was unreachable, as opposed to the data being bad.
        transport: bool,
    },
}

impl ViewState {
    pub fn scene(&self) -> Option<&TreemapScene> {
        match self {
            ViewState::Ready(view) => Some(&view.scene),
            _ => None,
        }
    }

    /// User-facing text for a failed load.
    pub fn error_text(&self) -> Option<String> {
        let ViewState::Failed {
            key,
            message,
            transport,
        } = self
        else {
            return None;
        };
        let title = key.dataset().title;
        Some(if *transport {
            format!("Could not reach the {title} data source ({message}).")
        } else {
            format!("The {title} data could not be drawn ({message}).")
        })
    }
}

/// Parse, validate, lay out, and render one dataset.
pub fn load_view(key: DatasetKey, json: &str, config: &TreemapConfig) -> Result<LoadedView> {
    let dataset = key.dataset();
    let hierarchy = parse_dataset(json, config.max_depth)?;
    let bounds = resolve_layout(&hierarchy, config.viewport(), config.padding);
    let scene = TreemapScene::build(&hierarchy, &bounds, dataset, config);
    let map_svg = render_map_svg(&scene, config);
    let legend_svg = render_legend_svg(&scene.legend, config);
    Ok(LoadedView {
        key,
        hierarchy,
        scene,
        map_svg,
        legend_svg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tv_core::TreemapError;

    fn failed(err: TreemapError) -> ViewState {
        ViewState::Failed {
            key: DatasetKey::Movies,
            transport: err.is_transport(),
            message: err.to_string(),
        }
    }

    #[test]
    fn error_text_distinguishes_unreachable_source_from_bad_data() {
        let offline = failed(TreemapError::Network("offline".into()));
        assert_eq!(
            offline.error_text().as_deref(),
            Some("Could not reach the Movies Sales data source (network error: offline).")
        );

        let bad = failed(TreemapError::structure("Movies.x", "leaf has no value"));
        let text = bad.error_text().unwrap();
        assert!(text.starts_with("The Movies Sales data could not be drawn"));
        assert!(text.contains("Movies.x"));
    }

    #[test]
    fn only_failures_have_error_text() {
        assert_eq!(ViewState::Empty.error_text(), None);
        assert_eq!(ViewState::Loading(DatasetKey::Games).error_text(), None);
    }
}

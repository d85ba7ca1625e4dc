//! The application context: one value owning all page state.
//!
//! - **Selection**: `select_dataset` updates the page chrome at once and
//!   hands back a `LoadRequest`; the caller performs the fetch.
//! - **Sequencing**: every request carries a sequence number. Only the
//!   completion matching the latest request is applied, so overlapping
//!   fetches cannot overwrite a newer selection.
//! - **Interaction**: pointer events are resolved against the current scene
//!   by hit testing; the tooltip reads typed tile data, never DOM strings.

use crate::chrome::PageChrome;
use crate::query::{DATA_PARAM, read_param, set_param};
use crate::view::{ViewState, load_view};
use tv_core::{DatasetKey, TreemapConfig, TreemapError};
use tv_render::{TooltipState, TreemapScene, hit_test};

/// A fetch the caller must perform and report back via `complete_load`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub seq: u64,
    pub key: DatasetKey,
    pub url: String,
}

/// Result of a navigation-link click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAction {
    pub request: LoadRequest,
    /// New `location.search`, to be written with history replacement.
    pub search: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The view now shows the loaded dataset.
    Applied,
    /// A newer request superseded this one; nothing changed.
    Stale,
    /// The view now shows an error for the requested dataset.
    Failed,
}

pub struct TreemapApp {
    pub config: TreemapConfig,
    key: DatasetKey,
    chrome: PageChrome,
    view: ViewState,
    tooltip: TooltipState,
    hovered: Option<usize>,
    /// Sequence number of the most recent request.
    latest_seq: u64,
}

impl TreemapApp {
    pub fn new(config: TreemapConfig) -> Self {
        let key = DatasetKey::default();
        Self {
            config,
            key,
            chrome: PageChrome::from(key.dataset()),
            view: ViewState::Empty,
            tooltip: TooltipState::default(),
            hovered: None,
            latest_seq: 0,
        }
    }

    /// Dataset to show on first load. The query string is consulted only
    /// when `read_query_on_load` is set.
    pub fn initial_key(&self, search: &str) -> DatasetKey {
        if self.config.read_query_on_load {
            DatasetKey::parse_or_default(read_param(search, DATA_PARAM).as_deref())
        } else {
            DatasetKey::default()
        }
    }

    // ─── Selection & loading ─────────────────────────────────────────────

    /// Switch to `key` (unknown or missing keys select the default dataset).
    pub fn select_dataset(&mut self, key: Option<&str>) -> LoadRequest {
        let key = DatasetKey::parse_or_default(key);
        let dataset = key.dataset();
        self.key = key;
        self.chrome = PageChrome::from(dataset);
        self.view = ViewState::Loading(key);
        self.hovered = None;
        self.tooltip.hide();
        self.latest_seq += 1;
        log::debug!("request #{} for {key}", self.latest_seq);
        LoadRequest {
            seq: self.latest_seq,
            key,
            url: dataset.url(),
        }
    }

    /// Apply a finished fetch. `body` is the response text or the transport
    /// error that prevented it.
    pub fn complete_load(
        &mut self,
        request: &LoadRequest,
        body: Result<String, TreemapError>,
    ) -> LoadOutcome {
        if request.seq != self.latest_seq {
            log::debug!(
                "dropping stale response #{} for {} (latest is #{})",
                request.seq,
                request.key,
                self.latest_seq
            );
            return LoadOutcome::Stale;
        }

        match body.and_then(|json| load_view(request.key, &json, &self.config)) {
            Ok(view) => {
                self.view = ViewState::Ready(Box::new(view));
                LoadOutcome::Applied
            }
            Err(err) => {
                log::warn!("loading {} failed: {err}", request.key);
                self.view = ViewState::Failed {
                    key: request.key,
                    message: err.to_string(),
                    transport: err.is_transport(),
                };
                LoadOutcome::Failed
            }
        }
    }

    /// Handle a click on a navigation link whose `id` is `link_id`.
    ///
    /// The resolved key (after fallback) is what gets written to the URL.
    pub fn link_clicked(&mut self, link_id: &str, current_search: &str) -> LinkAction {
        let request = self.select_dataset(Some(link_id));
        let search = set_param(current_search, DATA_PARAM, request.key.as_str());
        LinkAction { request, search }
    }

    // ─── Pointer interaction ─────────────────────────────────────────────

    /// Pointer moved to surface position (`x`, `y`); `page_x`/`page_y` are
    /// page coordinates used to place the tooltip. Returns `true` if the
    /// tooltip changed.
    pub fn pointer_move(&mut self, x: f64, y: f64, page_x: f64, page_y: f64) -> bool {
        let Some(scene) = self.view.scene() else {
            return false;
        };
        let hit = hit_test(scene, x, y);
        let before = self.tooltip.clone();

        match hit {
            Some(hit) => {
                let tile = &scene.tiles[hit.tile];
                if self.hovered.is_none() {
                    self.tooltip.show(self.config.tooltip_opacity);
                }
                self.tooltip
                    .update(tile, page_x, page_y, self.key.dataset().tooltip_offset);
                self.hovered = Some(hit.tile);
            }
            None => {
                self.pointer_leave();
            }
        }
        self.tooltip != before
    }

    /// Pointer left the map surface.
    pub fn pointer_leave(&mut self) {
        self.hovered = None;
        self.tooltip.hide();
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn current_key(&self) -> DatasetKey {
        self.key
    }

    pub fn chrome(&self) -> &PageChrome {
        &self.chrome
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn scene(&self) -> Option<&TreemapScene> {
        self.view.scene()
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Index of the tile under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{"name":"G","children":[
        {"name":"Wii","children":[{"name":"Wii Sports","category":"Wii","value":"82.74"}]},
        {"name":"DS","children":[{"name":"Nintendogs","category":"DS","value":"24.67"}]}
    ]}"#;

    #[test]
    fn selection_updates_chrome_before_data_arrives() {
        let mut app = TreemapApp::new(TreemapConfig::default());
        let req = app.select_dataset(Some("ksPledges"));
        assert_eq!(req.key, DatasetKey::KsPledges);
        assert_eq!(app.chrome().title, "Kickstarter Pledges");
        assert_eq!(app.chrome().surface_class, "kickstarter");
        assert!(matches!(app.view(), ViewState::Loading(DatasetKey::KsPledges)));
    }

    #[test]
    fn unknown_key_selects_default() {
        let mut app = TreemapApp::new(TreemapConfig::default());
        let req = app.select_dataset(Some("vinyl"));
        assert_eq!(req.key, DatasetKey::Games);
        assert!(req.url.ends_with("video-game-sales-data.json"));
    }

    #[test]
    fn query_is_ignored_on_load_unless_configured() {
        let app = TreemapApp::new(TreemapConfig::default());
        assert_eq!(app.initial_key("?data=movies"), DatasetKey::Games);

        let config = TreemapConfig {
            read_query_on_load: true,
            ..TreemapConfig::default()
        };
        let app = TreemapApp::new(config);
        assert_eq!(app.initial_key("?data=movies"), DatasetKey::Movies);
        assert_eq!(app.initial_key("?data=bogus"), DatasetKey::Games);
    }

    #[test]
    fn transport_errors_become_visible_failures() {
        let mut app = TreemapApp::new(TreemapConfig::default());
        let req = app.select_dataset(None);
        let outcome = app.complete_load(
            &req,
            Err(TreemapError::Fetch {
                url: req.url.clone(),
                status: 503,
            }),
        );
        assert_eq!(outcome, LoadOutcome::Failed);
        match app.view() {
            ViewState::Failed {
                key,
                message,
                transport,
            } => {
                assert_eq!(*key, DatasetKey::Games);
                assert!(message.contains("503"));
                assert!(*transport);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn pointer_over_gap_hides_tooltip() {
        let mut app = TreemapApp::new(TreemapConfig::default());
        let req = app.select_dataset(Some("games"));
        app.complete_load(&req, Ok(JSON.to_string()));

        let tile = app.scene().unwrap().tiles[0].rect;
        let (ox, oy) = app.scene().unwrap().origin;
        let c = tile.center();
        assert!(app.pointer_move(c.x + ox, c.y + oy, 500.0, 400.0));
        assert!(app.tooltip().is_visible());
        assert_eq!(app.hovered(), Some(0));

        assert!(app.pointer_move(1.0, 1.0, 10.0, 10.0));
        assert!(!app.tooltip().is_visible());
        assert_eq!(app.hovered(), None);
    }
}

//! WASM bridge for Treemap Viz — wires the application context to the page.
//!
//! Compiled via `wasm-pack build --target web`. The page loads the module,
//! constructs `TreemapApp`, and calls `start()`.

mod dom;
mod fetch;

use dom::{LINKS_ID, PageDom, js_error};
use std::cell::RefCell;
use std::rc::Rc;
use tv_app::{LoadOutcome, LoadRequest, TreemapApp, load_view};
use tv_core::{DatasetKey, TreemapConfig, parse_dataset};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

/// State shared between the exported handle, event listeners, and pending
/// fetches.
struct Page {
    app: TreemapApp,
    dom: PageDom,
}

type Shared = Rc<RefCell<Page>>;

/// The page controller exported to JavaScript.
#[wasm_bindgen(js_name = TreemapApp)]
pub struct TreemapPage {
    page: Shared,
    listeners: Vec<(Element, &'static str, Closure<dyn FnMut(MouseEvent)>)>,
}

#[wasm_bindgen(js_class = TreemapApp)]
impl TreemapPage {
    /// Attach to the current document. `config_json` overrides defaults
    /// field by field.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<TreemapPage, JsValue> {
        console_error_panic_hook_setup();

        let config = match config_json.as_deref() {
            Some(json) => TreemapConfig::from_json(json).map_err(|e| js_error(&e.to_string()))?,
            None => TreemapConfig::default(),
        };
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| js_error("no document"))?;
        let dom = PageDom::attach(document)?;

        Ok(Self {
            page: Rc::new(RefCell::new(Page {
                app: TreemapApp::new(config),
                dom,
            })),
            listeners: Vec::new(),
        })
    }

    /// Install logging and listeners, then load the initial dataset.
    /// Later calls do nothing.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if !self.listeners.is_empty() {
            return Ok(());
        }
        init_logging();
        self.listen_links()?;
        self.listen_pointer()?;

        let request = {
            let mut page = self.page.borrow_mut();
            let key = page.app.initial_key(&location_search());
            page.app.select_dataset(Some(key.as_str()))
        };
        dispatch(&self.page, request);
        Ok(())
    }

    /// Switch datasets programmatically. Unknown keys select the default.
    pub fn select_dataset(&self, key: &str) {
        let request = self.page.borrow_mut().app.select_dataset(Some(key));
        dispatch(&self.page, request);
    }

    pub fn current_key(&self) -> String {
        self.page.borrow().app.current_key().as_str().to_string()
    }

    /// Current tooltip state as JSON.
    pub fn tooltip_json(&self) -> String {
        serde_json::to_string(self.page.borrow().app.tooltip()).unwrap_or_default()
    }

    // ─── Listeners ───────────────────────────────────────────────────────

    /// Delegated on `#dataset-links` when the page has one, otherwise on the
    /// whole document, so links added later are covered.
    fn listen_links(&mut self) -> Result<(), JsValue> {
        let root = {
            let page = self.page.borrow();
            let document = &page.dom.document;
            document
                .get_element_by_id(LINKS_ID)
                .or_else(|| document.document_element())
                .ok_or_else(|| js_error("no document element"))?
        };

        let page = self.page.clone();
        let cb = Closure::new(move |e: MouseEvent| {
            let Some(link) = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("a").ok().flatten())
            else {
                return;
            };
            let Some(id) = dataset_link_id(link.id()) else {
                return;
            };
            e.prevent_default();

            let action = page
                .borrow_mut()
                .app
                .link_clicked(&id, &location_search());
            replace_search(&action.search);
            dispatch(&page, action.request);
        });
        self.add_listener(root, "click", cb)
    }

    fn listen_pointer(&mut self) -> Result<(), JsValue> {
        let surface: Element = self.page.borrow().dom.surface.clone().into();

        let page = self.page.clone();
        let target = surface.clone();
        let on_move = Closure::new(move |e: MouseEvent| {
            let rect = target.get_bounding_client_rect();
            let x = f64::from(e.client_x()) - rect.left();
            let y = f64::from(e.client_y()) - rect.top();
            let mut page = page.borrow_mut();
            if page
                .app
                .pointer_move(x, y, f64::from(e.page_x()), f64::from(e.page_y()))
            {
                page.dom.paint_tooltip(page.app.tooltip());
            }
        });
        self.add_listener(surface.clone(), "mousemove", on_move)?;

        let page = self.page.clone();
        let on_leave = Closure::new(move |_: MouseEvent| {
            let mut page = page.borrow_mut();
            page.app.pointer_leave();
            page.dom.paint_tooltip(page.app.tooltip());
        });
        self.add_listener(surface, "mouseleave", on_leave)
    }

    fn add_listener(
        &mut self,
        target: Element,
        event: &'static str,
        cb: Closure<dyn FnMut(MouseEvent)>,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
        self.listeners.push((target, event, cb));
        Ok(())
    }
}

impl Drop for TreemapPage {
    fn drop(&mut self) {
        for (target, event, cb) in self.listeners.drain(..) {
            let _ = target.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
        }
    }
}

/// Every anchor with an id selects a dataset; unknown ids select the default.
fn dataset_link_id(id: String) -> Option<String> {
    (!id.is_empty()).then_some(id)
}

/// Paint the pending state, then fetch and apply the response.
fn dispatch(page: &Shared, request: LoadRequest) {
    {
        let page = page.borrow();
        page.dom.paint_chrome(page.app.chrome());
        page.dom.paint_view(&page.app);
    }

    let page = page.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let body = fetch::fetch_text(&request.url).await;
        let mut page = page.borrow_mut();
        let outcome = page.app.complete_load(&request, body);
        if outcome != LoadOutcome::Stale {
            log::info!("{}: {outcome:?}", request.key);
            page.dom.paint_view(&page.app);
        }
    });
}

fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Write `search` into the address bar without adding a history entry.
fn replace_search(search: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let url = format!(
        "{}{}{}",
        window.location().pathname().unwrap_or_default(),
        search,
        window.location().hash().unwrap_or_default()
    );
    if let Ok(history) = window.history() {
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log::warn!("history.replaceState failed: {e:?}");
        }
    }
}

// ─── Logging & panic hook ────────────────────────────────────────────────

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        // Fails only when a logger is already installed.
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Treemap WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone functions (no DOM needed) ────────────────────────────────

/// Validate dataset JSON. Returns `{"ok":true,"leaves":N}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_dataset(json: &str) -> String {
    let config = TreemapConfig::default();
    let status = match parse_dataset(json, config.max_depth) {
        Ok(h) => serde_json::json!({ "ok": true, "leaves": h.leaves().len() }),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }),
    };
    status.to_string()
}

/// Render dataset JSON with the styling of dataset `key`. Returns
/// `{"ok":true,"map":"<svg…>","legend":"<svg…>"}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn render_dataset_svg(key: &str, json: &str) -> String {
    let key = DatasetKey::parse_or_default(Some(key));
    let status = match load_view(key, json, &TreemapConfig::default()) {
        Ok(view) => serde_json::json!({
            "ok": true,
            "key": key.as_str(),
            "map": view.map_svg,
            "legend": view.legend_svg,
        }),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }),
    };
    status.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const JSON: &str = r#"{"name":"Movies","children":[
        {"name":"Action","children":[{"name":"Avatar","category":"Action","value":"760505847"}]},
        {"name":"Drama","children":[{"name":"Titanic","category":"Drama","value":"658672302"}]}
    ]}"#;

    fn parse(s: &str) -> serde_json::Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn validate_reports_leaf_count() {
        assert_eq!(parse(&validate_dataset(JSON)), serde_json::json!({"ok": true, "leaves": 2}));
    }

    #[test]
    fn validate_reports_structure_errors() {
        let status = parse(&validate_dataset(r#"{"name":"x","children":[{"name":"y"}]}"#));
        assert_eq!(status["ok"], false);
        assert!(status["error"].as_str().unwrap().contains("x.y"));
    }

    #[test]
    fn render_uses_dataset_styling() {
        let status = parse(&render_dataset_svg("movies", JSON));
        assert_eq!(status["ok"], true);
        assert_eq!(status["key"], "movies");
        let map = status["map"].as_str().unwrap();
        assert!(map.contains("class=\"movies\""));
        assert!(map.contains("data-name=\"Titanic\""));
        assert!(status["legend"].as_str().unwrap().contains("height=\"60\""));
    }

    #[test]
    fn render_falls_back_to_default_dataset() {
        let status = parse(&render_dataset_svg("vinyl", JSON));
        assert_eq!(status["key"], "games");
        assert!(status["map"].as_str().unwrap().contains("class=\"games\""));
    }

    #[test]
    fn any_anchor_id_is_routed_to_selection() {
        assert_eq!(dataset_link_id("movies".into()).as_deref(), Some("movies"));
        assert_eq!(dataset_link_id("vinyl".into()).as_deref(), Some("vinyl"));
        assert_eq!(dataset_link_id(String::new()), None);
    }

    #[test]
    fn render_reports_malformed_json() {
        let status = parse(&render_dataset_svg("games", "not json"));
        assert_eq!(status["ok"], false);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(links: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();
        body.set_inner_html(&format!("<div id=\"tree-map\"></div>{links}"));
    }

    fn click(id: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        let link: HtmlElement = document.get_element_by_id(id).unwrap().dyn_into().unwrap();
        link.click();
    }

    #[wasm_bindgen_test]
    fn unknown_link_falls_back_to_default_dataset() {
        mount(r##"<nav id="dataset-links"><a href="#" id="movies">M</a><a href="#" id="vinyl">V</a></nav>"##);
        let mut page = TreemapPage::new(None).unwrap();
        page.start().unwrap();

        click("movies");
        assert_eq!(page.current_key(), "movies");
        click("vinyl");
        assert_eq!(page.current_key(), "games");
        assert!(location_search().contains("data=games"));
    }

    #[wasm_bindgen_test]
    fn second_start_installs_no_extra_listeners() {
        mount(r##"<nav id="dataset-links"><a href="#" id="games">G</a></nav>"##);
        let mut page = TreemapPage::new(None).unwrap();
        page.start().unwrap();
        let installed = page.listeners.len();
        page.start().unwrap();
        assert_eq!(page.listeners.len(), installed);
    }
}

//! Page elements the bridge writes into, and the painters for each.

use tv_app::{PageChrome, TreemapApp, ViewState};
use tv_render::TooltipState;
use tv_render::svg::escape_xml;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

pub const MAP_ID: &str = "tree-map";
pub const SURFACE_ID: &str = "tree-map-surface";
pub const TITLE_ID: &str = "title";
pub const DESCRIPTION_ID: &str = "description";
pub const LEGEND_ID: &str = "legend";
/// Optional container for the dataset links; click delegation is scoped to it.
pub const LINKS_ID: &str = "dataset-links";
pub const TOOLTIP_ID: &str = "tooltip";

/// Handles to the elements that stay put for the page's lifetime.
///
/// The legend is looked up on every paint because painting replaces it.
pub struct PageDom {
    pub document: Document,
    pub map: Element,
    pub surface: HtmlElement,
    pub title: Option<Element>,
    pub description: Option<Element>,
    pub tooltip: HtmlElement,
}

impl PageDom {
    /// Locate the page elements, creating the surface and tooltip inside the
    /// map container when absent.
    pub fn attach(document: Document) -> Result<Self, JsValue> {
        let map = document
            .get_element_by_id(MAP_ID)
            .ok_or_else(|| js_error(&format!("element #{MAP_ID} not found")))?;

        let surface = child_or_create(&document, &map, SURFACE_ID)?;
        let tooltip = child_or_create(&document, &map, TOOLTIP_ID)?;
        tooltip.style().set_property("position", "absolute")?;
        tooltip.style().set_property("pointer-events", "none")?;
        tooltip.style().set_property("opacity", "0")?;

        Ok(Self {
            title: document.get_element_by_id(TITLE_ID),
            description: document.get_element_by_id(DESCRIPTION_ID),
            document,
            map,
            surface,
            tooltip,
        })
    }

    pub fn paint_chrome(&self, chrome: &PageChrome) {
        if let Some(title) = &self.title {
            title.set_text_content(Some(chrome.title));
        }
        if let Some(description) = &self.description {
            description.set_text_content(Some(chrome.description));
        }
        self.surface.set_class_name(chrome.surface_class);
        if let Some(legend) = self.document.get_element_by_id(LEGEND_ID) {
            let _ = legend.set_attribute("height", &chrome.legend_height.to_string());
        }
    }

    /// Replace the map surface and legend with the current view.
    pub fn paint_view(&self, app: &TreemapApp) {
        match app.view() {
            ViewState::Empty | ViewState::Loading(_) => {
                self.surface.set_inner_html("");
                self.paint_legend(&empty_legend(app));
            }
            ViewState::Ready(view) => {
                self.surface.set_inner_html(&view.map_svg);
                self.paint_legend(&view.legend_svg);
            }
            failed @ ViewState::Failed { .. } => {
                let text = failed.error_text().unwrap_or_default();
                self.surface.set_inner_html(&format!(
                    "<p class=\"load-error\">{}</p>",
                    escape_xml(&text)
                ));
                self.paint_legend(&empty_legend(app));
            }
        }
        self.paint_tooltip(app.tooltip());
    }

    fn paint_legend(&self, svg: &str) {
        match self.document.get_element_by_id(LEGEND_ID) {
            Some(legend) => legend.set_outer_html(svg),
            None => {
                let _ = self.map.insert_adjacent_html("afterend", svg);
            }
        }
    }

    pub fn paint_tooltip(&self, tooltip: &TooltipState) {
        let style = self.tooltip.style();
        let _ = style.set_property("opacity", &tooltip.opacity.to_string());
        if let Some(content) = &tooltip.content {
            self.tooltip.set_inner_html(&tooltip.html());
            let _ = self.tooltip.set_attribute("data-value", &content.value_text());
            let _ = style.set_property("left", &format!("{}px", tooltip.left));
            let _ = style.set_property("top", &format!("{}px", tooltip.top));
        }
    }
}

/// Legend surface with no items, sized like a drawn legend.
fn empty_legend(app: &TreemapApp) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"{LEGEND_ID}\" width=\"{}\" height=\"{}\"></svg>",
        app.config.legend_width,
        app.chrome().legend_height
    )
}

fn child_or_create(
    document: &Document,
    parent: &Element,
    id: &str,
) -> Result<HtmlElement, JsValue> {
    let el = match document.get_element_by_id(id) {
        Some(el) => el,
        None => {
            let el = document.create_element("div")?;
            el.set_id(id);
            parent.append_child(&el)?;
            el
        }
    };
    el.dyn_into::<HtmlElement>()
        .map_err(|_| js_error(&format!("#{id} is not an HTML element")))
}

pub fn js_error(msg: &str) -> JsValue {
    js_sys::Error::new(msg).into()
}

use tv_core::TreemapError;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// GET `url` and return the body as text. Non-2xx statuses are errors.
pub async fn fetch_text(url: &str) -> Result<String, TreemapError> {
    let window = web_sys::window().ok_or_else(|| TreemapError::Network("no window".into()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(network_error)?;
    let response: Response = response.dyn_into().map_err(network_error)?;

    if !response.ok() {
        return Err(TreemapError::Fetch {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body = JsFuture::from(response.text().map_err(network_error)?)
        .await
        .map_err(network_error)?;
    body.as_string()
        .ok_or_else(|| TreemapError::Network(format!("{url}: body is not text")))
}

fn network_error(value: JsValue) -> TreemapError {
    let msg = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    TreemapError::Network(msg)
}

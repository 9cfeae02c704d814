use lab_site::{LabDocument, LoadError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// GETs the lab document from `url` on the page's own origin.
pub async fn fetch_lab_document(url: &str) -> Result<LabDocument, LoadError> {
    let window = web_sys::window().ok_or_else(|| LoadError::transport("no window"))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| LoadError::transport("Failed to read response"))?;

    if !response.ok() {
        return Err(LoadError::Status(response.status()));
    }

    let body = JsFuture::from(response.text().map_err(malformed)?)
        .await
        .map_err(malformed)?;
    let body = body
        .as_string()
        .ok_or_else(|| LoadError::malformed("response body is not text"))?;

    LabDocument::from_json(&body)
}

fn transport(error: JsValue) -> LoadError {
    LoadError::transport(describe(&error))
}

fn malformed(error: JsValue) -> LoadError {
    LoadError::malformed(describe(&error))
}

fn describe(error: &JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{error:?}"))
}

//! File downloads via a temporary object URL

use wasm_bindgen::{JsCast, JsValue};

use skin_glow::report::Report;

/// Offer `contents` to the user as a JSON file named `file_name`
pub fn download_json(file_name: &str, contents: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(
        &js_sys::Array::of1(&contents.into()),
        &options,
    )?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}

/// Build today's report for `user_name` and download it
pub fn download_report(user_name: Option<&str>) -> Result<String, JsValue> {
    let report = Report::new(user_name, chrono::Utc::now());
    let json = report
        .to_pretty_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let file_name = report.file_name();
    download_json(&file_name, &json)?;
    Ok(file_name)
}

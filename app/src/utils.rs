//! Browser helpers: downloads, file reads, clock.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, HtmlInputElement, Url};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const PDF_MIME: &str = "application/pdf";

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Offer `bytes` to the user as a file download.
pub fn download_bytes(file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "anchor element has unexpected type")?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(js_error)?;
    tracing::debug!(file_name, bytes = bytes.len(), "download offered");
    Ok(())
}

/// The first file picked in an `<input type=file>`, if any.
///
/// The input is reset so picking the same file again fires another change
/// event.
pub fn take_selected_file(input_id: &str) -> Result<Option<File>, String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let input: HtmlInputElement = document
        .get_element_by_id(input_id)
        .ok_or("file input not found")?
        .dyn_into()
        .map_err(|_| "file input has unexpected type")?;

    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    Ok(file)
}

pub async fn read_file(file: &File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_error)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Local hour of day, 0-23.
pub fn current_hour() -> u32 {
    js_sys::Date::new_0().get_hours()
}

pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Page origin, used as the backend base URL when none is configured.
pub fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

//! HTML pages served by the upload flow.
//!
//! Both documents are static; handlers pick one and never assemble markup themselves.

use axum::response::Html;

/// Upload form posting a single `image_file` field to `/upload`.
pub const UPLOAD_FORM_HTML: &str = include_str!("../templates/upload_form.html");

/// Returned once the processing service accepted the file.
pub const SUCCESS_HTML: &str = include_str!("../templates/success.html");

pub fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM_HTML)
}

pub fn success() -> Html<&'static str> {
    Html(SUCCESS_HTML)
}

use axum::response::Html;

use crate::views;

pub async fn index() -> Html<&'static str> {
    views::upload_form()
}

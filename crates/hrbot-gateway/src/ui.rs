use axum::response::Html;

/// Single-page chat client, compiled into the binary.
pub const INDEX_HTML: &str = include_str!("../static/index.html");

/// `GET /ui`
pub async fn ui_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

use axum::response::Html;

// axum handler for /
pub async fn root() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

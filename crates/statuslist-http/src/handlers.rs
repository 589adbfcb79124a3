use crate::errors::StatusListHTTPError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use std::sync::Arc;

const INDEX_HTML: &str = r#"<!doctype html>
<html>
  <head><title>Status List Verifier</title></head>
  <body>
    <h1>Status List Verifier</h1>
    <ul>
      <li><code>POST /credentials/verify</code></li>
      <li><code>GET /status/:id</code></li>
    </ul>
  </body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// API endpoint taking the ID of a status list. Response is the status list credential JSON.
pub async fn get_status_list(
    Path(id): Path<String>,
    State(app_state): State<Arc<AppState>>,
) -> impl IntoResponse {
    app_state
        .status_lists
        .get(&id)
        .ok_or_else(|| StatusListHTTPError::StatusListDoesNotExist(id.to_owned()))
        .map(|status_list| (StatusCode::OK, Json(status_list.to_owned())))
}

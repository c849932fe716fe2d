use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html};

use crate::{routes::climate::climate_routes::store_error, templates::home_page, AppState};

/// Handler for the index page (GET /)
pub async fn index_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let most_active = state
        .climate_db
        .most_active_station()
        .await
        .map_err(store_error)?;

    Ok(Html(
        home_page(&state.remote_url, &most_active, &state.window).into_string(),
    ))
}

use crate::{
    db, index_handler, precipitation, routes, stations, stats_for_range, stats_from_start, tobs,
    ClimateAccess, ClimateData, Database, ReportingWindow,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub window: ReportingWindow,
    pub climate_db: Arc<dyn ClimateData>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::climate_routes::precipitation,
        routes::climate::climate_routes::stations,
        routes::climate::climate_routes::tobs,
        routes::climate::climate_routes::stats_from_start,
        routes::climate::climate_routes::stats_for_range,
    ),
    components(schemas(db::TemperatureStats)),
    tags(
        (name = "hawaii climate api", description = "a RESTful api over the Hawaii climate observations dataset")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    remote_url: String,
    database: String,
) -> Result<AppState, anyhow::Error> {
    let db = Database::new(&database)
        .await
        .map_err(|e| anyhow!("error opening dataset: {}", e))?;
    let climate_db: Arc<dyn ClimateData> = Arc::new(ClimateAccess::new(&db));

    // Pin the reporting window to the dataset's own latest date. It is
    // computed once here and reused by every request until restart.
    let most_recent = climate_db
        .most_recent_date()
        .await
        .map_err(|e| anyhow!("error reading most recent measurement date: {}", e))?;
    let window = ReportingWindow::trailing_year(&most_recent)
        .map_err(|e| anyhow!("error computing reporting window: {}", e))?;

    info!(
        "reporting window pinned: {} to {}",
        window.date_start, window.date_end
    );

    Ok(AppState {
        remote_url,
        window,
        climate_db,
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        // HTML index
        .route("/", get(index_handler))
        // API routes
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(stats_from_start))
        .route("/api/v1.0/{start}/{end}", get(stats_for_range))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}

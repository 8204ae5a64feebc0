use crate::{
    constants::ClimateConstants,
    db::{self, ClimateData},
    index_handler, precipitation, routes, stations, temperature_between, temperature_since, tobs,
    ClimateDatabase,
};
use anyhow::Context;
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
    pub climate_db: Arc<dyn ClimateData>,
    pub constants: ClimateConstants,
}

impl AppState {
    /// Derives the dataset constants up front; an empty measurement table is fatal.
    pub async fn new(
        remote_url: String,
        climate_db: Arc<dyn ClimateData>,
    ) -> Result<Self, anyhow::Error> {
        let constants = ClimateConstants::compute(climate_db.as_ref())
            .await
            .context("error deriving dataset constants")?;

        Ok(Self {
            remote_url,
            climate_db,
            constants,
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::climate_routes::precipitation,
        routes::climate::climate_routes::stations,
        routes::climate::climate_routes::tobs,
        routes::climate::climate_routes::temperature_since,
        routes::climate::climate_routes::temperature_between,
    ),
    components(
        schemas(
                db::StationList,
                db::TemperatureSummary
            )
    ),
    tags(
        (name = "surfsup climate api", description = "a read-only RESTful api over historical Hawaii precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    remote_url: String,
    database_path: String,
) -> Result<AppState, anyhow::Error> {
    let climate_db = Arc::new(
        ClimateDatabase::connect(&database_path)
            .await
            .with_context(|| format!("error opening measurement database {}", database_path))?,
    );

    AppState::new(remote_url, climate_db).await
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_since))
        .route("/api/v1.0/{start}/{end}", get(temperature_between))
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

//! Blueprint Directory Server
//!
//! A read-only HTTP service answering blueprint lookups.
//!
//! ## Routes
//!
//! ```text
//! GET /                          banner
//! GET /health                    "ok"
//! GET /blueprints                every blueprint
//! GET /blueprints/{author}       one author's blueprints, 404 if none
//! GET /blueprints/{author}/{name} one blueprint, 404 if missing
//! ```
//!
//! Blueprints are JSON objects: `{ "author": "..", "name": "..", "points": [{ "x": 0, "y": 0 }] }`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use blueprints_core::{Blueprint, BlueprintDirectory, DirectoryError, MemoryDirectory};
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Default listen address.
const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Shared application state
struct AppState {
    /// Blueprints served by this instance
    directory: MemoryDirectory,
}

impl AppState {
    fn new(directory: MemoryDirectory) -> Self {
        Self { directory }
    }
}

/// Error body returned to clients
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Directory error mapped onto an HTTP response
#[derive(Debug)]
struct ApiError(DirectoryError);

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            warn!("Directory failure: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

/// Load the seed data.
///
/// `BLUEPRINTS_SEED` may point at a JSON array of blueprints; otherwise the
/// built-in samples are served.
fn load_directory() -> Result<MemoryDirectory, Box<dyn std::error::Error>> {
    match std::env::var("BLUEPRINTS_SEED") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            let blueprints = Blueprint::list_from_json(&json)?;
            info!("Loaded {} blueprints from {}", blueprints.len(), path);
            Ok(MemoryDirectory::from_blueprints(blueprints))
        }
        Err(_) => Ok(MemoryDirectory::with_sample_data()),
    }
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/blueprints", get(all_blueprints))
        .route("/blueprints/{author}", get(blueprints_by_author))
        .route("/blueprints/{author}/{name}", get(blueprint_by_name))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blueprints_server=info,tower_http=info".into()),
        )
        .init();

    let state = Arc::new(AppState::new(load_directory()?));
    let app = router(state);

    let addr: SocketAddr = std::env::var("BLUEPRINTS_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    info!("Blueprint directory listening on {}", addr);
    info!("Lookup endpoint: http://{}/blueprints/{{author}}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Index page
async fn index() -> &'static str {
    "Blueprint Directory - GET /blueprints/{author}"
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// Every blueprint
async fn all_blueprints(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Blueprint>>, ApiError> {
    Ok(Json(state.directory.all()?))
}

/// Blueprints of one author
async fn blueprints_by_author(
    State(state): State<Arc<AppState>>,
    Path(author): Path<String>,
) -> Result<Json<Vec<Blueprint>>, ApiError> {
    let blueprints = state.directory.blueprints_by_author(&author)?;
    info!("Served {} blueprints of {}", blueprints.len(), author);
    Ok(Json(blueprints))
}

/// One blueprint by author and name
async fn blueprint_by_name(
    State(state): State<Arc<AppState>>,
    Path((author, name)): Path<(String, String)>,
) -> Result<Json<Blueprint>, ApiError> {
    Ok(Json(state.directory.get(&author, &name)?))
}

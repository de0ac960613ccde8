pub mod root;
pub mod song;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::controllers::SongController;
pub use root::health_check_route;
pub use song::song_routes;

/// Anything no route claims is looked up under `public_dir`, so `/` serves
/// its `index.html`.
pub fn app(controller: SongController, public_dir: impl AsRef<Path>) -> Router {
    // CORS is wide open for browser clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Core routes
        .route("/health", get(health_check_route))
        .merge(song_routes())
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(controller)
}

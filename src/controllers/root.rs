use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub struct RootController;

impl RootController {
    pub async fn health_check() -> impl IntoResponse {
        (StatusCode::OK, Json(HealthResponse { status: "ok" }))
    }
}

// Song routes
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};

use crate::controllers::SongController;
use crate::errors::ApiError;

/// Body rejections get the same `{"error": ...}` envelope as everything else.
fn json_body(
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Map<String, Value>, ApiError> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => Err(ApiError::new(rejection.status(), rejection.body_text())),
    }
}

pub fn song_routes() -> Router<SongController> {
    Router::new()
        .route("/songs", get(list_songs_route).post(create_song_route))
        .route(
            "/songs/{id}",
            get(get_song_route)
                .put(update_song_route)
                .delete(delete_song_route),
        )
        .route("/songs/{id}/file", get(song_file_route))
        .route("/demosongs", get(list_demo_songs_route))
}

pub async fn list_songs_route(
    State(controller): State<SongController>,
) -> Result<Response, ApiError> {
    controller.list_songs("Failed to get songs.").await
}

/// Same listing as `/songs`; there is no separate demo set.
pub async fn list_demo_songs_route(
    State(controller): State<SongController>,
) -> Result<Response, ApiError> {
    controller.list_songs("Failed to get demo songs.").await
}

pub async fn create_song_route(
    State(controller): State<SongController>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Response, ApiError> {
    controller.create_song(json_body(body)?).await
}

pub async fn get_song_route(
    State(controller): State<SongController>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    controller.get_song(&id).await
}

pub async fn update_song_route(
    State(controller): State<SongController>,
    Path(id): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Response, ApiError> {
    controller.update_song(&id, json_body(body)?).await
}

pub async fn delete_song_route(
    State(controller): State<SongController>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    controller.delete_song(&id).await
}

pub async fn song_file_route(
    State(controller): State<SongController>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    controller.get_song_file(&id).await
}

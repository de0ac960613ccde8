use std::sync::Arc;

use axum::{
    body::Body,
    extract::Json,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::{
    db::SongStore,
    errors::ApiError,
    models::song::{
        document_from_json, document_to_json, file_id, has_name, parse_song_id,
        stamp_create_date, strip_id,
    },
};

/// Each method is one store call plus the mapping of its outcome to HTTP.
#[derive(Clone)]
pub struct SongController {
    store: Arc<dyn SongStore>,
}

impl SongController {
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        SongController { store }
    }

    /// `failure` is the message sent back if the store call fails, so
    /// `/songs` and `/demosongs` can share this.
    pub async fn list_songs(&self, failure: &str) -> Result<Response, ApiError> {
        let songs = self
            .store
            .list_songs()
            .await
            .map_err(|e| ApiError::from_store(e, failure))?;
        let songs: Vec<Value> = songs.iter().map(document_to_json).collect();
        Ok((StatusCode::OK, Json(songs)).into_response())
    }

    pub async fn create_song(&self, body: Map<String, Value>) -> Result<Response, ApiError> {
        let mut song = document_from_json(body);
        if !has_name(&song) {
            warn!("ERROR: Invalid user input");
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "Must provide a song name",
            ));
        }
        strip_id(&mut song);
        stamp_create_date(&mut song);

        let created = self
            .store
            .insert_song(song)
            .await
            .map_err(|e| ApiError::from_store(e, "Failed to create new song."))?;
        info!("Created song {:?}", created.get("_id"));
        Ok((StatusCode::CREATED, Json(document_to_json(&created))).into_response())
    }

    /// An unknown id is a 200 with `null`, not a 404.
    pub async fn get_song(&self, id: &str) -> Result<Response, ApiError> {
        let failure = "Failed to get song.";
        let id = parse_song_id(id).map_err(|e| ApiError::from_store(e, failure))?;
        let song = self
            .store
            .find_song(id)
            .await
            .map_err(|e| ApiError::from_store(e, failure))?;
        Ok((StatusCode::OK, Json(song.as_ref().map(document_to_json))).into_response())
    }

    pub async fn update_song(
        &self,
        id: &str,
        body: Map<String, Value>,
    ) -> Result<Response, ApiError> {
        let failure = "Failed to update song.";
        let id = parse_song_id(id).map_err(|e| ApiError::from_store(e, failure))?;
        let mut song = document_from_json(body);
        strip_id(&mut song);

        self.store
            .replace_song(id, song)
            .await
            .map_err(|e| ApiError::from_store(e, failure))?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    pub async fn delete_song(&self, id: &str) -> Result<Response, ApiError> {
        let failure = "Failed to delete song.";
        let id = parse_song_id(id).map_err(|e| ApiError::from_store(e, failure))?;
        self.store
            .delete_song(id)
            .await
            .map_err(|e| ApiError::from_store(e, failure))?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Streams the blob behind the song's `file_id` straight into the body.
    pub async fn get_song_file(&self, id: &str) -> Result<Response, ApiError> {
        let failure = "Failed to get song.";
        let id = parse_song_id(id).map_err(|e| ApiError::from_store(e, failure))?;
        let song = self
            .store
            .find_song(id)
            .await
            .map_err(|e| ApiError::from_store(e, failure))?;
        let file_id = song
            .as_ref()
            .and_then(file_id)
            .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Song file not found"))?;

        let stream = self
            .store
            .open_file(file_id)
            .await
            .map_err(|e| ApiError::from_store(e, "Failed to get song file."))?;
        Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            Body::from_stream(stream),
        )
            .into_response())
    }
}

// In-process song store, for local runs without MongoDB and for tests
use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, StreamExt};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::db::{with_id, ByteStream, SongStore, CHUNK_SIZE};
use crate::errors::StoreError;
use crate::models::song::ID_FIELD;

#[derive(Default)]
pub struct MemoryStore {
    songs: RwLock<Vec<Document>>,
    files: RwLock<HashMap<ObjectId, Bytes>>,
}

fn same_id(song: &Document, id: &ObjectId) -> bool {
    matches!(song.get(ID_FIELD), Some(Bson::ObjectId(oid)) if oid == id)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a blob and returns the id songs reference it by.
    pub async fn put_file(&self, data: impl Into<Bytes>) -> ObjectId {
        let id = ObjectId::new();
        self.files.write().await.insert(id, data.into());
        id
    }
}

#[async_trait]
impl SongStore for MemoryStore {
    async fn list_songs(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.songs.read().await.clone())
    }

    async fn insert_song(&self, song: Document) -> Result<Document, StoreError> {
        let stored = with_id(Bson::ObjectId(ObjectId::new()), song);
        self.songs.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_song(&self, id: ObjectId) -> Result<Option<Document>, StoreError> {
        let songs = self.songs.read().await;
        Ok(songs.iter().find(|song| same_id(song, &id)).cloned())
    }

    async fn replace_song(&self, id: ObjectId, song: Document) -> Result<(), StoreError> {
        let mut songs = self.songs.write().await;
        if let Some(slot) = songs.iter_mut().find(|song| same_id(song, &id)) {
            *slot = with_id(Bson::ObjectId(id), song);
        }
        Ok(())
    }

    async fn delete_song(&self, id: ObjectId) -> Result<(), StoreError> {
        self.songs.write().await.retain(|song| !same_id(song, &id));
        Ok(())
    }

    async fn open_file(&self, file_id: Bson) -> Result<ByteStream, StoreError> {
        let data = match &file_id {
            Bson::ObjectId(oid) => self.files.read().await.get(oid).cloned(),
            _ => None,
        };
        let data = data.ok_or_else(|| StoreError::Driver(format!("FileNotFound: {}", file_id)))?;

        let chunks: Vec<std::io::Result<Bytes>> = data
            .chunks(CHUNK_SIZE)
            .map(|chunk| Ok(data.slice_ref(chunk)))
            .collect();
        Ok(stream::iter(chunks).boxed())
    }
}

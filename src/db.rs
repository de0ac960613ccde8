use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{
    io::{AsyncRead, AsyncReadExt},
    stream::BoxStream,
    StreamExt, TryStreamExt,
};
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    gridfs::GridFsBucket,
    Client, Collection,
};
use tracing::debug;

use crate::errors::StoreError;
use crate::models::song::ID_FIELD;

pub const SONGS_COLLECTION: &str = "songs";
pub const DEFAULT_DATABASE: &str = "wetracker";

/// GridFS default chunk size; download reads are sized to match.
pub const CHUNK_SIZE: usize = 255 * 1024;

/// Blob bytes as they come off the store.
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// One store call per route. Implementations own all consistency.
#[async_trait]
pub trait SongStore: Send + Sync {
    async fn list_songs(&self) -> Result<Vec<Document>, StoreError>;

    /// Inserts the song and returns it with its generated `_id`.
    async fn insert_song(&self, song: Document) -> Result<Document, StoreError>;

    async fn find_song(&self, id: ObjectId) -> Result<Option<Document>, StoreError>;

    /// Whole-document replace. Replacing an unknown id is not an error.
    async fn replace_song(&self, id: ObjectId, song: Document) -> Result<(), StoreError>;

    async fn delete_song(&self, id: ObjectId) -> Result<(), StoreError>;

    async fn open_file(&self, file_id: Bson) -> Result<ByteStream, StoreError> {
        let download = self.bucket.open_download_stream(file_id).await?;
        Ok(read_chunks(download))
    }
}

/// Reads up to `CHUNK_SIZE` at a time; each chunk is frozen in place, not copied.
pub fn read_chunks<R>(mut reader: R) -> ByteStream
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let stream = async_stream::stream! {
        loop {
            let mut chunk = BytesMut::zeroed(CHUNK_SIZE);
            match reader.read(&mut chunk[..]).await {
                Ok(0) => break,
                Ok(n) => {
                    chunk.truncate(n);
                    yield Ok::<Bytes, std::io::Error>(chunk.freeze());
                }
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }
        }
    };
    stream.boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;

    #[tokio::test]
    async fn read_chunks_yields_the_reader_bytes_in_order() {
        let data: Vec<u8> = (0..CHUNK_SIZE + 1000).map(|i| (i % 253) as u8).collect();

        let chunks: Vec<Bytes> = read_chunks(Cursor::new(data.clone()))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), CHUNK_SIZE);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks.concat(), data);
    }

    #[tokio::test]
    async fn read_chunks_of_empty_reader_is_empty() {
        let chunks: Vec<Bytes> = read_chunks(Cursor::new(Vec::new())).try_collect().await.unwrap();
        assert!(chunks.is_empty());
    }
}

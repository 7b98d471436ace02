//! Blob Store Trait
//!
//! Storage for uploaded files. Implementations return the public URL of
//! the stored object.

use bytes::Bytes;

use crate::error::ProfileResult;

#[trait_variant::make(BlobStore: Send)]
pub trait LocalBlobStore {
    /// Store `body` under `key` and return its public URL
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> ProfileResult<String>;
}

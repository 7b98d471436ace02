//! In-memory blob store for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use tokio::sync::RwLock;

use crate::domain::blob_store::BlobStore;
use crate::error::{ProfileError, ProfileResult};

#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub body: Bytes,
    pub content_type: String,
}

#[derive(Default)]
pub struct InMemoryBlobStore {
    objects: RwLock<HashMap<String, StoredBlob>>,
    unavailable: AtomicBool,
}

impl InMemoryBlobStore {
    /// Prefix of every returned URL
    pub const BASE_URL: &'static str = "http://blobs.test/user-photos";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn get(&self, key: &str) -> Option<StoredBlob> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }
}

impl BlobStore for InMemoryBlobStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> ProfileResult<String> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProfileError::Storage("blob store unavailable".to_string()));
        }
        self.objects.write().await.insert(
            key.to_string(),
            StoredBlob {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("{}/{}", Self::BASE_URL, key))
    }
}

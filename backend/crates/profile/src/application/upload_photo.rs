//! Upload Photo Use Case
//!
//! Stores a new profile photo and points the user's `photo_url` at it.
//! Earlier photos are left in the bucket.

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::domain::value_object::user_id::UserId;
use bytes::Bytes;
use chrono::Utc;

use crate::domain::blob_store::BlobStore;
use crate::domain::photo::{MAX_PHOTO_BYTES, PhotoFormat, photo_key};
use crate::error::{ProfileError, ProfileResult};

/// Upload photo input
#[derive(Debug)]
pub struct UploadPhotoInput {
    pub file_name: Option<String>,
    pub content_type: String,
    pub body: Bytes,
}

pub struct UploadPhotoUseCase<U, B>
where
    U: UserRepository,
    B: BlobStore,
{
    user_repo: Arc<U>,
    blobs: Arc<B>,
}

impl<U, B> UploadPhotoUseCase<U, B>
where
    U: UserRepository,
    B: BlobStore,
{
    pub fn new(user_repo: Arc<U>, blobs: Arc<B>) -> Self {
        Self { user_repo, blobs }
    }

    /// Returns the public URL of the stored photo
    pub async fn execute(&self, user_id: UserId, input: UploadPhotoInput) -> ProfileResult<String> {
        if input.body.is_empty() {
            return Err(ProfileError::MissingPhoto);
        }
        if input.body.len() > MAX_PHOTO_BYTES {
            return Err(ProfileError::PayloadTooLarge);
        }
        let format = PhotoFormat::from_content_type(&input.content_type)?;

        let mut user = self.user_repo.get_by_id(user_id).await?;

        let now = Utc::now();
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000));
        let key = photo_key(
            user_id,
            nanos,
            &format.extension_for(input.file_name.as_deref()),
        );

        let size = input.body.len();
        let url = self
            .blobs
            .put(&key, input.body, format.content_type())
            .await?;

        user.set_photo_url(url.clone());
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user_id, key = %key, size, "Profile photo uploaded");
        Ok(url)
    }
}

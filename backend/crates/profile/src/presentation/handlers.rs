//! HTTP Handlers

use std::sync::Arc;

use auth::domain::repository::{SessionStore, UserRepository};
use auth::middleware::AuthUser;
use auth::models::UserResponse;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use kernel::response::ApiResponse;

use crate::application::{
    DeleteProfileUseCase, GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase,
    UploadPhotoInput, UploadPhotoUseCase,
};
use crate::domain::blob_store::BlobStore;
use crate::error::{ProfileError, ProfileResult};
use crate::presentation::dto::{PhotoResponse, UpdateProfileRequest};

/// Multipart field carrying the photo
pub const PHOTO_FIELD: &str = "photo";

/// Shared state for profile handlers
pub struct ProfileAppState<U, S, B> {
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub blobs: Arc<B>,
}

impl<U, S, B> Clone for ProfileAppState<U, S, B> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            blobs: self.blobs.clone(),
        }
    }
}

impl<U, S, B> ProfileAppState<U, S, B> {
    pub fn new(users: Arc<U>, sessions: Arc<S>, blobs: Arc<B>) -> Self {
        Self {
            users,
            sessions,
            blobs,
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/v1/profile
pub async fn get_profile<U, S, B>(
    State(state): State<ProfileAppState<U, S, B>>,
    user: AuthUser,
) -> ProfileResult<ApiResponse<UserResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let profile = GetProfileUseCase::new(state.users.clone())
        .execute(user.user_id)
        .await?;

    Ok(ApiResponse::ok(UserResponse::from(&profile)))
}

/// PUT /api/v1/profile
pub async fn update_profile<U, S, B>(
    State(state): State<ProfileAppState<U, S, B>>,
    user: AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> ProfileResult<ApiResponse<UserResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        ProfileError::Validation("invalid request body".to_string())
    })?;

    let profile = UpdateProfileUseCase::new(state.users.clone())
        .execute(
            user.user_id,
            UpdateProfileInput {
                name: req.name,
                email: req.email,
            },
        )
        .await?;

    Ok(ApiResponse::ok(UserResponse::from(&profile)).with_message("profile updated successfully"))
}

/// DELETE /api/v1/profile
pub async fn delete_profile<U, S, B>(
    State(state): State<ProfileAppState<U, S, B>>,
    user: AuthUser,
) -> ProfileResult<ApiResponse<()>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    DeleteProfileUseCase::new(state.users.clone(), state.sessions.clone())
        .execute(user.user_id)
        .await?;

    Ok(ApiResponse::message("profile deleted successfully"))
}

// ============================================================================
// Photo
// ============================================================================

/// POST /api/v1/profile/photo
pub async fn upload_photo<U, S, B>(
    State(state): State<ProfileAppState<U, S, B>>,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ProfileResult<ApiResponse<PhotoResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected multipart body");
        ProfileError::Validation("invalid multipart body".to_string())
    })?;

    let input = read_photo_field(&mut multipart).await?;

    let photo_url = UploadPhotoUseCase::new(state.users.clone(), state.blobs.clone())
        .execute(user.user_id, input)
        .await?;

    Ok(ApiResponse::ok(PhotoResponse { photo_url }).with_message("photo uploaded successfully"))
}

/// Find the `photo` field and buffer it, skipping any other fields
async fn read_photo_field(multipart: &mut Multipart) -> ProfileResult<UploadPhotoInput> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or_default().to_string();
        let body = field.bytes().await.map_err(multipart_error)?;

        return Ok(UploadPhotoInput {
            file_name,
            content_type,
            body,
        });
    }

    Err(ProfileError::MissingPhoto)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ProfileError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ProfileError::PayloadTooLarge
    } else {
        tracing::debug!(error = %err, "Malformed multipart body");
        ProfileError::Validation("invalid multipart body".to_string())
    }
}

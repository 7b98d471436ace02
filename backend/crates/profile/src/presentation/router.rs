//! Profile Router

use auth::domain::repository::{SessionStore, UserRepository};
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get, routing::post};

use crate::domain::blob_store::BlobStore;
use crate::domain::photo::MAX_PHOTO_BYTES;
use crate::presentation::handlers::{self, ProfileAppState};

/// Room for multipart boundaries and headers on top of the photo itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Routes for the authenticated caller, nested under `/api/v1/profile`
pub fn profile_router<U, S, B>(state: ProfileAppState<U, S, B>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::get_profile::<U, S, B>)
                .put(handlers::update_profile::<U, S, B>)
                .delete(handlers::delete_profile::<U, S, B>),
        )
        .route(
            "/photo",
            post(handlers::upload_photo::<U, S, B>)
                .layer(DefaultBodyLimit::max(MAX_PHOTO_BYTES + MULTIPART_OVERHEAD)),
        )
        .with_state(state)
}

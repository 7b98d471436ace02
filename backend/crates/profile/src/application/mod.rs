//! Application Layer
//!
//! Profile use cases.

pub mod delete_profile;
pub mod get_profile;
pub mod update_profile;
pub mod upload_photo;

// Re-exports
pub use delete_profile::DeleteProfileUseCase;
pub use get_profile::GetProfileUseCase;
pub use update_profile::{UpdateProfileInput, UpdateProfileUseCase};
pub use upload_photo::{UploadPhotoInput, UploadPhotoUseCase};

//! Domain Layer
//!
//! Photo upload rules and the blob store abstraction.

pub mod blob_store;
pub mod photo;

pub use blob_store::{BlobStore, LocalBlobStore};
pub use photo::{MAX_PHOTO_BYTES, PhotoFormat};

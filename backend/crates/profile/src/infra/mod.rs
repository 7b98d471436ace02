//! Infrastructure Layer
//!
//! Blob store implementations.

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod s3;

pub use s3::{S3BlobStore, S3Config};

//! Profile Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Photo rules, blob store trait
//! - `application/` - Use cases
//! - `infra/` - S3-compatible object storage
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Users and sessions are owned by the `auth` crate; this crate works
//! through its repository and session store traits.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{ProfileError, ProfileResult};
pub use infra::{S3BlobStore, S3Config};
pub use presentation::handlers::ProfileAppState;
pub use presentation::router::profile_router;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    pub use crate::infra::memory::InMemoryBlobStore;
}

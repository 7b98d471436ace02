//! Domain Layer
//!
//! Contains entities, value objects, tokens, and repository traits.

pub mod entity;
pub mod repository;
pub mod token;
pub mod value_object;

// Re-exports
pub use entity::{NewUser, User};
pub use repository::{SessionStore, UserRepository};
pub use token::{Claims, TokenError, TokenKind, TokenPair};

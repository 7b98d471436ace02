//! Infrastructure Layer
//!
//! Token codec, database and session store implementations.

pub mod jwt;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod redis;

pub use jwt::TokenCodec;
pub use postgres::PgUserRepository;
pub use self::redis::RedisSessionStore;

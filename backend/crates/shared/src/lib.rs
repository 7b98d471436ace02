//! Shared Kernel
//!
//! The small vocabulary every service crate agrees on:
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed integer identifiers ([`id::Id`])
//! - The JSON response envelope ([`response::ApiResponse`])
//!
//! Only things whose meaning is identical across the auth and profile
//! domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod response;

//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`rbac`] -- extractors that require one capability of the caller's role.

pub mod auth;
pub mod rbac;

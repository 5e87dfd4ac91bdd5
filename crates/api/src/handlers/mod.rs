//! Request handlers.
//!
//! Each submodule serves one resource. Handlers authorize through the
//! extractors in [`crate::middleware`], delegate to the roster engine in
//! [`crate::state::AppState::roster`], and map errors via [`crate::error::AppError`].

pub mod admin;
pub mod auth;
pub mod grid;
pub mod request;
pub mod staff;
pub mod stats;
pub mod ward;

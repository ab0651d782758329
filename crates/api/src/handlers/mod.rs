//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the repositories in `prepvault_db` and map errors
//! via [`crate::error::AppError`].

pub mod auth;
pub mod dashboard;
pub mod notes;
pub mod problems;
pub mod topics;

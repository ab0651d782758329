//! Client for the external text-generation service that turns source code
//! into study notes.
//!
//! - [`config`] -- endpoint, model, and credential settings.
//! - [`client`] -- the HTTP client with its model fallback chain.

pub mod client;
pub mod config;

pub use client::{NotesClient, NotesError};
pub use config::NotesConfig;

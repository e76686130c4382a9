//! HTTP endpoint for AI image generation
//!
//! Serves a small test page on GET and, on POST, forwards a user-supplied
//! text prompt to a hosted text-to-image model, relaying the resulting
//! image bytes back to the caller.

pub mod error;
pub mod inference;
pub mod models;
pub mod server;

pub use error::{Error, Result};

//! Data models for the upload client
//!
//! `file` covers what the user picked locally, `upload` covers what the
//! storage endpoint sends back.

mod file;
mod upload;

pub use file::*;
pub use upload::*;

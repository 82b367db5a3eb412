//! Blueprint directory abstraction.
//!
//! A directory answers "which blueprints does this author have". The
//! viewer only consumes decoded results; where they come from is up to the
//! implementation.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod http;

pub use memory::MemoryDirectory;

#[cfg(not(target_arch = "wasm32"))]
pub use http::{HttpDirectory, lookup_url};

use crate::blueprint::Blueprint;
use thiserror::Error;

/// Directory lookup errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectoryError {
    #[error("No blueprints found for author '{0}'")]
    NotFound(String),
    #[error("Directory responded with status {code}: {reason}")]
    Status { code: u16, reason: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed directory response: {0}")]
    Decode(String),
    #[error("Directory error: {0}")]
    Other(String),
}

impl DirectoryError {
    /// Whether this is the informational "author has no blueprints" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound(_))
    }
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Trait for blueprint directory backends.
///
/// Implementations may block; the shell calls them off the UI thread.
pub trait BlueprintDirectory: Send + Sync {
    /// All blueprints of one author.
    ///
    /// An author without blueprints yields [`DirectoryError::NotFound`].
    fn blueprints_by_author(&self, author: &str) -> DirectoryResult<Vec<Blueprint>>;
}

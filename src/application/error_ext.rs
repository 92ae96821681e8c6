//! Path context for I/O failures while reading tree files.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Turns an `io::Result` into an [`ApplicationError::OperationFailed`] naming
/// the file involved, so `arbor nary sum missing.toml` reports which file
/// could not be read instead of a bare OS error.
pub trait IoResultExt<T> {
    /// ```ignore
    /// // load_nary
    /// let content = std::fs::read_to_string(path).with_path_context("read tree", path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{action} {}", path.display()),
            source: Box::new(e),
        })
    }
}

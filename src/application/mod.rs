//! Application layer: loading trees from user input
//!
//! This layer turns encoded strings and TOML files into domain trees,
//! applying the limits from [`crate::config::Settings`].

pub mod error;
pub mod error_ext;
pub mod input;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use input::{load_binary, load_nary, parse_nary, resolve_value};

//! Binary and N-ary trees with classic traversal algorithms.
//!
//! The [`domain`] layer holds the trees and algorithms; [`application`],
//! [`config`] and [`cli`] make them usable from the `arbor` binary.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

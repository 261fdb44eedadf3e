//! Bookshelf application library
//!
//! Application modules served by the `bookshelf` binary.

pub mod modules;

pub use modules::*;

//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{data_dir, expand_tilde, store_path};

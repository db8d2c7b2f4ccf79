//! Platform integration: data and home directory resolution.

pub mod paths;

pub use paths::{default_data_dir, expand_tilde};

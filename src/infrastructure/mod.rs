//! Filesystem helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host` and the
//! plugin's private data directory under `/data`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};

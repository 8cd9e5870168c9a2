//! quill-core - Shared functionality for the quill blogging tool
//!
//! Standard paths and the startup configuration that tells the tool where
//! its document store lives.

pub mod config;
pub mod paths;

pub use config::{Config, StoreConfig};
pub use paths::Paths;

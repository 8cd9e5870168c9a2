//! quill - line-oriented blogging over an embedded document store
//!
//! Commands read one per line:
//! - post: create a post in a blog
//! - comment: reply to a post or to a top-level comment
//! - delete: redact a post, comment or reply
//! - show: print every post of a blog with its comments
//! - find: search post bodies and tags

pub mod command;
pub mod error;
pub mod interpreter;
pub mod locate;
pub mod model;
pub mod permalink;
pub mod render;
pub mod store;
pub mod timestamp;

pub use command::{tokenize, Command};
pub use error::CommandError;
pub use interpreter::Interpreter;
pub use locate::{locate, Location, Target};
pub use model::{Comment, Post};
pub use permalink::generate_permalink;
pub use store::{BlogStore, StoredPost};

//! Blog documents
//!
//! A post is one stored document. Comments and their replies live inside
//! the post's `comments` array and are never stored on their own.

use serde::{Deserialize, Serialize};

use crate::permalink::generate_permalink;
use crate::timestamp;

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub timestamp: String,
    pub permalink: String,
    pub body: String,
    /// Absent when the post was created with an empty tag list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Create a post stamped with the current time
    pub fn new(blog: &str, user: &str, title: &str, body: &str, tags: &str) -> Self {
        Self {
            title: title.to_string(),
            user_name: user.to_string(),
            timestamp: timestamp::now(),
            permalink: generate_permalink(blog, title),
            body: body.to_string(),
            tags: parse_tags(tags),
            comments: Vec::new(),
        }
    }

    /// Whether the tag list holds `tag` exactly
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }
}

/// A comment on a post, or a reply to such a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "userName")]
    pub user_name: String,
    /// Creation timestamp, doubling as the lookup key
    pub permalink: String,
    pub comment: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Last write time, refreshed on redaction
    #[serde(default)]
    pub timestamp: String,
}

impl Comment {
    pub fn new(user: &str, text: &str) -> Self {
        let stamp = timestamp::now();
        Self {
            user_name: user.to_string(),
            permalink: stamp.clone(),
            comment: text.to_string(),
            comments: Vec::new(),
            timestamp: stamp,
        }
    }

    /// Last write time, falling back to the creation stamp for documents
    /// written before comments carried their own timestamp
    pub fn last_modified(&self) -> &str {
        if self.timestamp.is_empty() {
            &self.permalink
        } else {
            &self.timestamp
        }
    }
}

/// Split a comma list into trimmed tags; an empty list means no tags at all
pub fn parse_tags(tags: &str) -> Option<Vec<String>> {
    if tags.is_empty() {
        return None;
    }
    Some(tags.split(',').map(|t| t.trim().to_string()).collect())
}

//! Finding a post, comment or reply by permalink
//!
//! Post permalinks are indexed; comment and reply permalinks are not, so
//! those are found by walking every post. The first match wins, in the order
//! earliest post, then lowest comment index, then lowest reply index.

use anyhow::Result;

use crate::model::Post;
use crate::store::{BlogStore, StoredPost};

/// Which record inside a post a permalink resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Post,
    /// Top-level comment at this index
    Comment(usize),
    /// Reply `.1` under top-level comment `.0`
    Reply(usize, usize),
}

impl Target {
    /// JSON path of this record inside its post document
    fn record_path(self) -> String {
        match self {
            Target::Post => "$".to_string(),
            Target::Comment(i) => format!("$.comments[{}]", i),
            Target::Reply(i, j) => format!("$.comments[{}].comments[{}]", i, j),
        }
    }

    /// Path of the array new replies to this record go into, or `None`
    /// when the record may not be replied to
    pub fn replies_path(self) -> Option<String> {
        match self {
            Target::Post | Target::Comment(_) => Some(format!("{}.comments", self.record_path())),
            Target::Reply(..) => None,
        }
    }

    /// Path of the record's text field (`body` or `comment`)
    pub fn text_path(self) -> String {
        let field = match self {
            Target::Post => "body",
            Target::Comment(_) | Target::Reply(..) => "comment",
        };
        format!("{}.{}", self.record_path(), field)
    }

    pub fn timestamp_path(self) -> String {
        format!("{}.timestamp", self.record_path())
    }

    /// Comment and reply indices, `None` where they do not apply
    pub fn indices(self) -> (Option<usize>, Option<usize>) {
        match self {
            Target::Post => (None, None),
            Target::Comment(i) => (Some(i), None),
            Target::Reply(i, j) => (Some(i), Some(j)),
        }
    }
}

/// A resolved permalink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub post: StoredPost,
    pub target: Target,
}

impl Location {
    /// Last write time of the targeted record
    pub fn timestamp(&self) -> &str {
        let post = &self.post.post;
        match self.target {
            Target::Post => &post.timestamp,
            Target::Comment(i) => post.comments[i].last_modified(),
            Target::Reply(i, j) => post.comments[i].comments[j].last_modified(),
        }
    }
}

/// Resolve `permalink` within `blog`
pub fn locate(store: &BlogStore, blog: &str, permalink: &str) -> Result<Option<Location>> {
    if let Some(post) = store.find_post(blog, permalink)? {
        tracing::debug!(blog, permalink, id = post.id, "permalink is a post");
        return Ok(Some(Location {
            post,
            target: Target::Post,
        }));
    }

    for post in store.posts(blog)? {
        if let Some(target) = scan_comments(&post.post, permalink) {
            tracing::debug!(blog, permalink, id = post.id, ?target, "permalink is a comment");
            return Ok(Some(Location { post, target }));
        }
    }

    Ok(None)
}

fn scan_comments(post: &Post, permalink: &str) -> Option<Target> {
    for (i, comment) in post.comments.iter().enumerate() {
        if comment.permalink == permalink {
            return Some(Target::Comment(i));
        }
        for (j, reply) in comment.comments.iter().enumerate() {
            if reply.permalink == permalink {
                return Some(Target::Reply(i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Comment;
    use tempfile::TempDir;

    fn comment(user: &str, permalink: &str) -> Comment {
        let mut c = Comment::new(user, "text");
        c.permalink = permalink.to_string();
        c
    }

    #[test]
    fn test_paths() {
        assert_eq!(Target::Post.replies_path().unwrap(), "$.comments");
        assert_eq!(Target::Comment(3).replies_path().unwrap(), "$.comments[3].comments");
        assert_eq!(Target::Reply(1, 2).replies_path(), None);
        assert_eq!(Target::Post.text_path(), "$.body");
        assert_eq!(Target::Reply(1, 2).text_path(), "$.comments[1].comments[2].comment");
        assert_eq!(Target::Comment(0).timestamp_path(), "$.comments[0].timestamp");
        assert_eq!(Target::Post.timestamp_path(), "$.timestamp");
    }

    #[test]
    fn test_locate_levels() -> Result<()> {
        let tmp = TempDir::new()?;
        let mut store = BlogStore::open(&tmp.path().join("blog.db"))?;

        let mut post = Post::new("b", "alice", "Hello", "body", "");
        let mut top = comment("bob", "c-1");
        top.comments.push(comment("carol", "r-1"));
        post.comments.push(comment("dan", "c-0"));
        post.comments.push(top);
        let id = store.insert_post("b", &post)?;

        let at = |p: &str| -> Result<Option<(i64, (Option<usize>, Option<usize>))>> {
            Ok(locate(&store, "b", p)?.map(|l| (l.post.id, l.target.indices())))
        };
        assert_eq!(at("b.Hello")?, Some((id, (None, None))));
        assert_eq!(at("c-1")?, Some((id, (Some(1), None))));
        assert_eq!(at("r-1")?, Some((id, (Some(1), Some(0)))));
        assert_eq!(at("nope")?, None);
        Ok(())
    }

    #[test]
    fn test_locate_is_idempotent() -> Result<()> {
        let tmp = TempDir::new()?;
        let mut store = BlogStore::open(&tmp.path().join("blog.db"))?;

        let mut post = Post::new("b", "alice", "Hello", "body", "");
        post.comments.push(comment("bob", "c-0"));
        store.insert_post("b", &post)?;

        let first = locate(&store, "b", "c-0")?;
        let second = locate(&store, "b", "c-0")?;
        assert!(first.is_some());
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_first_match_wins() -> Result<()> {
        let tmp = TempDir::new()?;
        let mut store = BlogStore::open(&tmp.path().join("blog.db"))?;

        let mut first = Post::new("b", "alice", "One", "", "");
        let mut top = comment("bob", "other");
        top.comments.push(comment("carol", "dup"));
        first.comments.push(top);
        first.comments.push(comment("dan", "dup"));
        let first_id = store.insert_post("b", &first)?;

        let mut second = Post::new("b", "alice", "Two", "", "");
        second.comments.push(comment("erin", "dup"));
        store.insert_post("b", &second)?;

        let location = locate(&store, "b", "dup")?.unwrap();
        assert_eq!(location.post.id, first_id);
        assert_eq!(location.target, Target::Reply(0, 0));
        Ok(())
    }
}

//! SQLite-backed document store
//!
//! Every post is one JSON document in the `documents` table, grouped by
//! collection (the blog name). Nested comment updates are applied in place
//! with SQLite's JSON functions, addressed by `$.comments[i]...` paths.

use anyhow::{Context, Result};
use regex::Regex;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::model::Post;

/// A post together with its row id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPost {
    pub id: i64,
    pub post: Post,
}

/// Handle on an open document store
pub struct BlogStore {
    conn: Connection,
}

impl BlogStore {
    /// Open or create the store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let mut store = Self { conn };
        store.init_schema()?;

        tracing::info!(path = %path.display(), "opened blog store");
        Ok(store)
    }

    fn init_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                collection TEXT NOT NULL,
                permalink TEXT NOT NULL,
                doc TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_documents_permalink
                ON documents(collection, permalink);
            "#,
        )?;
        Ok(())
    }

    /// Close the underlying connection, surfacing any error from SQLite
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("Failed to close database")
    }

    /// Insert a post into `blog`, returning its id
    pub fn insert_post(&mut self, blog: &str, post: &Post) -> Result<i64> {
        let doc = serde_json::to_string(post)?;
        self.conn.execute(
            "INSERT INTO documents (collection, permalink, doc) VALUES (?, ?, ?)",
            params![blog, post.permalink, doc],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(blog, id, permalink = %post.permalink, "inserted post");
        Ok(id)
    }

    /// Indexed lookup of the earliest post whose permalink equals `permalink`
    pub fn find_post(&self, blog: &str, permalink: &str) -> Result<Option<StoredPost>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, doc FROM documents
                 WHERE collection = ? AND permalink = ?
                 ORDER BY id LIMIT 1",
                params![blog, permalink],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        row.map(|(id, doc)| decode(id, &doc)).transpose()
    }

    /// Fetch a post by id
    pub fn get_post(&self, blog: &str, id: i64) -> Result<Option<StoredPost>> {
        let doc = self
            .conn
            .query_row(
                "SELECT doc FROM documents WHERE collection = ? AND id = ?",
                params![blog, id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        doc.map(|doc| decode(id, &doc)).transpose()
    }

    /// Every post in `blog`, in insertion order
    pub fn posts(&self, blog: &str) -> Result<Vec<StoredPost>> {
        self.query_posts(
            "SELECT id, doc FROM documents WHERE collection = ? ORDER BY id",
            blog,
        )
    }

    /// Every post in `blog`, oldest timestamp first
    pub fn posts_by_timestamp(&self, blog: &str) -> Result<Vec<StoredPost>> {
        self.query_posts(
            "SELECT id, doc FROM documents WHERE collection = ?
             ORDER BY json_extract(doc, '$.timestamp'), id",
            blog,
        )
    }

    /// Posts whose body matches `pattern` or whose tags contain `tag`,
    /// in insertion order
    pub fn search(&self, blog: &str, pattern: &Regex, tag: &str) -> Result<Vec<StoredPost>> {
        let mut posts = self.posts(blog)?;
        posts.retain(|p| pattern.is_match(&p.post.body) || p.post.has_tag(tag));
        Ok(posts)
    }

    /// Append `value` to the array at `path` (e.g. `$.comments[2].comments`)
    /// inside document `id`
    pub fn push<T: Serialize>(&mut self, blog: &str, id: i64, path: &str, value: &T) -> Result<()> {
        let value = serde_json::to_string(value)?;
        let changed = self.conn.execute(
            "UPDATE documents SET doc = json_insert(doc, ? || '[#]', json(?))
             WHERE collection = ? AND id = ?",
            params![path, value, blog, id],
        )?;
        tracing::debug!(blog, id, path, changed, "pushed into document");
        Ok(())
    }

    /// Set each `(path, value)` field inside document `id`
    pub fn set(&mut self, blog: &str, id: i64, fields: &[(String, String)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let assignments = vec!["?, ?"; fields.len()].join(", ");
        let sql = format!(
            "UPDATE documents SET doc = json_set(doc, {}) WHERE collection = ? AND id = ?",
            assignments
        );

        let mut values: Vec<rusqlite::types::Value> = Vec::with_capacity(fields.len() * 2 + 2);
        for (path, value) in fields {
            values.push(path.clone().into());
            values.push(value.clone().into());
        }
        values.push(blog.to_string().into());
        values.push(id.into());

        let changed = self.conn.execute(&sql, params_from_iter(values))?;
        tracing::debug!(blog, id, fields = fields.len(), changed, "set document fields");
        Ok(())
    }

    fn query_posts(&self, sql: &str, blog: &str) -> Result<Vec<StoredPost>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params![blog], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.iter().map(|(id, doc)| decode(*id, doc)).collect()
    }
}

fn decode(id: i64, doc: &str) -> Result<StoredPost> {
    let post = serde_json::from_str(doc)
        .with_context(|| format!("Malformed document {}", id))?;
    Ok(StoredPost { id, post })
}

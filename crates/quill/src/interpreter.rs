//! The command interpreter
//!
//! Reads one command per line and applies it to the store. Command errors
//! are printed as `Error: ...` and the next line is processed; store and I/O
//! errors end the run.

use anyhow::{Context, Result};
use regex::Regex;
use std::io::{BufRead, Write};

use crate::command::{tokenize, Command};
use crate::error::CommandError;
use crate::locate::locate;
use crate::model::{Comment, Post};
use crate::render;
use crate::store::BlogStore;
use crate::timestamp;

pub struct Interpreter<'a> {
    store: &'a mut BlogStore,
}

impl<'a> Interpreter<'a> {
    pub fn new(store: &'a mut BlogStore) -> Self {
        Self { store }
    }

    /// Process every line of `input` until end of stream
    pub fn run<R, O, E>(&mut self, input: R, out: &mut O, err: &mut E) -> Result<()>
    where
        R: BufRead,
        O: Write,
        E: Write,
    {
        for (line_num, line) in input.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;
            self.execute_line(&line, out, err)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Process a single line. Blank lines are ignored.
    pub fn execute_line<O: Write, E: Write>(
        &mut self,
        line: &str,
        out: &mut O,
        err: &mut E,
    ) -> Result<()> {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            return Ok(());
        }

        let outcome = Command::parse(tokens)
            .map_err(anyhow::Error::from)
            .and_then(|command| self.execute(command, out));

        match outcome {
            Ok(()) => Ok(()),
            Err(e) => match e.downcast::<CommandError>() {
                Ok(command_error) => {
                    tracing::debug!(error = %command_error, "command skipped");
                    writeln!(err, "Error: {}", command_error)?;
                    Ok(())
                }
                Err(fatal) => Err(fatal),
            },
        }
    }

    /// Apply a parsed command
    pub fn execute<O: Write>(&mut self, command: Command, out: &mut O) -> Result<()> {
        tracing::debug!(command = command.name(), "dispatch");

        match command {
            Command::Post {
                blog,
                user,
                title,
                body,
                tags,
            } => self.post(&blog, &user, &title, &body, &tags),
            Command::Comment {
                blog,
                parent,
                user,
                body,
            } => self.comment(&blog, &parent, &user, &body),
            Command::Delete {
                blog,
                permalink,
                user,
            } => self.delete(&blog, &permalink, &user),
            Command::Show { blog } => self.show(&blog, out),
            Command::Find { blog, query } => self.find(&blog, &query, out),
        }
    }

    fn post(&mut self, blog: &str, user: &str, title: &str, body: &str, tags: &str) -> Result<()> {
        let post = Post::new(blog, user, title, body, tags);
        self.store.insert_post(blog, &post)?;
        Ok(())
    }

    fn comment(&mut self, blog: &str, parent: &str, user: &str, body: &str) -> Result<()> {
        let location = locate(self.store, blog, parent)?
            .ok_or_else(|| CommandError::NotFound(parent.to_string()))?;
        let path = location
            .target
            .replies_path()
            .ok_or(CommandError::NestingTooDeep)?;

        self.store
            .push(blog, location.post.id, &path, &Comment::new(user, body))
    }

    fn delete(&mut self, blog: &str, permalink: &str, user: &str) -> Result<()> {
        let location = locate(self.store, blog, permalink)?
            .ok_or_else(|| CommandError::NotFound(permalink.to_string()))?;

        let marker = format!("**deleted by {}**", user);
        let stamp = timestamp::after(location.timestamp());
        let target = location.target;

        self.store.set(
            blog,
            location.post.id,
            &[(target.text_path(), marker), (target.timestamp_path(), stamp)],
        )
    }

    fn show<O: Write>(&mut self, blog: &str, out: &mut O) -> Result<()> {
        render::write_header(out, blog)?;
        for stored in self.store.posts_by_timestamp(blog)? {
            render::write_thread(out, &stored.post)?;
        }
        Ok(())
    }

    fn find<O: Write>(&mut self, blog: &str, query: &str, out: &mut O) -> Result<()> {
        let pattern = search_pattern(query)?;
        render::write_header(out, blog)?;
        for stored in self.store.search(blog, &pattern, query)? {
            render::write_post(out, &stored.post)?;
        }
        Ok(())
    }
}

/// Compile a search string, treating it literally when it is not a valid
/// regular expression
fn search_pattern(query: &str) -> Result<Regex> {
    match Regex::new(query) {
        Ok(pattern) => Ok(pattern),
        Err(e) => {
            tracing::debug!(query, error = %e, "search string is not a regex, matching literally");
            Ok(Regex::new(&regex::escape(query))?)
        }
    }
}

//! Tokenizing and parsing input lines
//!
//! Tokens are separated by whitespace. A double-quoted span is one token with
//! the quotes removed; there are no escape sequences.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::CommandError;

fn token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""[^"]*"|\S+"#).expect("token pattern is valid"))
}

/// Split a line into tokens.
///
/// A `"` only opens a quoted token when a closing `"` follows somewhere on
/// the line. Otherwise the bare word keeps its inner quotes and loses the
/// ones at either end.
pub fn tokenize(line: &str) -> Vec<String> {
    token_pattern()
        .find_iter(line.trim())
        .map(|m| m.as_str().trim_matches('"').to_string())
        .collect()
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Post {
        blog: String,
        user: String,
        title: String,
        body: String,
        tags: String,
    },
    Comment {
        blog: String,
        parent: String,
        user: String,
        body: String,
    },
    Delete {
        blog: String,
        permalink: String,
        user: String,
    },
    Show {
        blog: String,
    },
    Find {
        blog: String,
        query: String,
    },
}

impl Command {
    /// Parse a token list. The first token selects the command
    /// case-insensitively; extra trailing tokens are ignored.
    pub fn parse(tokens: Vec<String>) -> Result<Self, CommandError> {
        let mut tokens = tokens.into_iter();
        let keyword = tokens.next().unwrap_or_default().to_lowercase();
        let args: Vec<String> = tokens.collect();

        match keyword.as_str() {
            "post" => {
                let [blog, user, title, body, tags] = take(args, "post")?;
                Ok(Command::Post {
                    blog,
                    user,
                    title,
                    body,
                    tags,
                })
            }
            "comment" => {
                let [blog, parent, user, body] = take(args, "comment")?;
                Ok(Command::Comment {
                    blog,
                    parent,
                    user,
                    body,
                })
            }
            "delete" => {
                let [blog, permalink, user] = take(args, "delete")?;
                Ok(Command::Delete {
                    blog,
                    permalink,
                    user,
                })
            }
            "show" => {
                let [blog] = take(args, "show")?;
                Ok(Command::Show { blog })
            }
            "find" => {
                let [blog, query] = take(args, "find")?;
                Ok(Command::Find { blog, query })
            }
            _ => Err(CommandError::Unknown(keyword)),
        }
    }

    /// Command keyword, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Post { .. } => "post",
            Command::Comment { .. } => "comment",
            Command::Delete { .. } => "delete",
            Command::Show { .. } => "show",
            Command::Find { .. } => "find",
        }
    }
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::parse(tokenize(line))
    }
}

/// Take exactly the first `N` arguments, failing when fewer are present
fn take<const N: usize>(
    mut args: Vec<String>,
    command: &'static str,
) -> Result<[String; N], CommandError> {
    if args.len() < N {
        return Err(CommandError::Invalid(command));
    }
    args.truncate(N);
    args.try_into()
        .map_err(|_| CommandError::Invalid(command))
}

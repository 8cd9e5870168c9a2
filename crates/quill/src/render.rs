//! Human-readable output for `show` and `find`

use std::io::{self, Write};

use crate::model::{Comment, Post};

/// Upper-case the first character and lower-case the rest
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `in <Blog>:` line that opens a listing
pub fn write_header<W: Write>(out: &mut W, blog: &str) -> io::Result<()> {
    writeln!(out, "in {}:", capitalize(blog))
}

pub fn write_post<W: Write>(out: &mut W, post: &Post) -> io::Result<()> {
    writeln!(out, "  - - - -")?;
    writeln!(out, "title: {}", post.title)?;
    writeln!(out, "userName: {}", post.user_name)?;
    writeln!(out, "timestamp: {}", post.timestamp)?;
    writeln!(out, "permalink: {}", post.permalink)?;
    writeln!(out, "body:")?;
    writeln!(out, "  {}", post.body)?;
    writeln!(out)
}

pub fn write_comment<W: Write>(out: &mut W, comment: &Comment) -> io::Result<()> {
    writeln!(out, "    - - - -")?;
    writeln!(out, "  userName: {}", comment.user_name)?;
    writeln!(out, "  permalink: {}", comment.permalink)?;
    writeln!(out, "  comment:")?;
    writeln!(out, "    {}", comment.comment)?;
    writeln!(out)
}

/// A post followed by its top-level comments
pub fn write_thread<W: Write>(out: &mut W, post: &Post) -> io::Result<()> {
    write_post(out, post)?;
    for comment in &post.comments {
        write_comment(out, comment)?;
    }
    Ok(())
}

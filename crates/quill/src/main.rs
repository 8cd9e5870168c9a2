//! quill - line-oriented blogging
//!
//! Reads commands one per line from stdin (or a script file) and applies
//! them to the configured document store.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use quill::{BlogStore, Interpreter};
use quill_core::Config;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Line-oriented blogging over an embedded document store")]
#[command(version)]
#[command(after_help = r#"COMMANDS (one per input line):
    post    <blog> <user> <title> <body> <tags-comma-list>
    comment <blog> <parent-permalink> <user> <body>
    delete  <blog> <permalink> <user>
    show    <blog>
    find    <blog> <search-string>

    Wrap a token in double quotes to include spaces.

EXAMPLES:
    echo 'post myblog alice "Hello World!" "first post" "intro,test"' | quill
    echo 'show myblog' | quill
    quill --database ./lab.db commands.txt
"#)]
struct Cli {
    /// Read commands from this file instead of stdin
    script: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database file (overrides the configured location)
    #[arg(short, long)]
    database: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs share stderr with command diagnostics, so stay quiet by default
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let db_path = cli.database.unwrap_or_else(|| config.database_path());

    let mut store = BlogStore::open(&db_path).context("Failed to open blog database")?;

    let mut out = io::stdout().lock();
    let mut err = io::stderr();
    {
        let mut interpreter = Interpreter::new(&mut store);
        match cli.script {
            Some(path) => {
                let file = File::open(&path)
                    .with_context(|| format!("Failed to open script: {}", path.display()))?;
                interpreter.run(BufReader::new(file), &mut out, &mut err)?;
            }
            None => interpreter.run(io::stdin().lock(), &mut out, &mut err)?,
        }
    }

    store.close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_help() {
        let cli = Cli::try_parse_from(["quill", "--help"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::try_parse_from(["quill", "-d", "/tmp/x.db", "script.txt"]).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(cli.script, Some(PathBuf::from("script.txt")));
        assert!(cli.config.is_none());
    }
}

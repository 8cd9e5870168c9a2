//! Standard paths used by quill

use std::path::PathBuf;

/// Standard quill paths
pub struct Paths {
    /// Data directory (~/.local/share/quill)
    pub data: PathBuf,
    /// Config directory (~/.config/quill)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("quill");

        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("quill");

        Self { data, config }
    }

    /// Default location of the config file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.toml")
    }

    /// Database file for a named database inside a data directory
    pub fn database_file(data_dir: &std::path::Path, database: &str) -> PathBuf {
        data_dir.join(format!("{}.db", database))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_paths_are_namespaced() {
        let paths = Paths::new();
        assert!(paths.data.ends_with("quill"));
        assert!(paths.config_file().ends_with("quill/config.toml"));
    }

    #[test]
    fn test_database_file() {
        let file = Paths::database_file(Path::new("/tmp/q"), "blog");
        assert_eq!(file, PathBuf::from("/tmp/q/blog.db"));
    }
}

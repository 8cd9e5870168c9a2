//! Permalink generation

use regex::Regex;
use std::sync::OnceLock;

fn non_alnum() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[^0-9a-zA-Z]+").expect("slug pattern is valid"))
}

/// Build `<blog>.<slug>`, where the slug collapses every run of
/// non-alphanumeric characters in `title` into a single underscore.
pub fn generate_permalink(blog: &str, title: &str) -> String {
    format!("{}.{}", blog, non_alnum().replace_all(title, "_"))
}

//! `.env` file reader.
//!
//! Entries feed sops-run's own settings and are handed to the `sops`
//! children. The process environment itself is never modified.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// A parsed .env file
#[derive(Debug, Clone)]
pub struct DotEnv {
    entries: Vec<(String, String)>,
    path: PathBuf,
}

impl DotEnv {
    /// Parse an .env file from disk
    ///
    /// Skips empty lines and comments (lines starting with #), and accepts
    /// an optional leading `export`. Supports values with or without quotes.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Ok(Self {
            entries: parse(&contents),
            path: path.to_path_buf(),
        })
    }

    /// Load `dir/.env` if it exists.
    pub fn find_in(dir: &Path, file_name: &str) -> Result<Option<Self>> {
        let path = dir.join(file_name);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Get a value by key; the last assignment wins
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All entries in file order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse(contents: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    for line in contents.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = line.split_once('=') {
            entries.push((key.trim().to_string(), parse_value(value.trim())));
        }
    }

    entries
}

fn parse_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    // Unquoted values may carry a trailing comment
    match raw.find(" #") {
        Some(idx) => raw[..idx].trim_end().to_string(),
        None => raw.to_string(),
    }
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

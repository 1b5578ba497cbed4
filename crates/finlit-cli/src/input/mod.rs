pub mod config;
pub mod file;

use serde::de::DeserializeOwned;
use std::io::{self, Read};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// A record-shaped input: `--input <file>` wins, then JSON piped on stdin.
/// `None` means neither was given and the caller falls back to its flags.
pub fn read_record<T: DeserializeOwned>(path: Option<&str>) -> CliResult<Option<T>> {
    if let Some(path) = path {
        return file::read_json(path).map(Some);
    }
    match piped_stdin()? {
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| format!("Failed to parse stdin: {e}").into()),
        None => Ok(None),
    }
}

/// Like [`read_record`] for commands that have no flag fallback.
pub fn require_record<T: DeserializeOwned>(path: Option<&str>, usage: &str) -> CliResult<T> {
    read_record(path)?.ok_or_else(|| format!("{usage} or JSON on stdin is required").into())
}

fn piped_stdin() -> CliResult<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        tracing::debug!("stdin was empty");
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

use std::fs;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SnapshotSource {
    File(PathBuf),
    Stdin,
}

impl SnapshotSource {
    pub fn from_arg(value: &str) -> Self {
        if value == "-" {
            return Self::Stdin;
        }
        Self::File(PathBuf::from(value))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "stdin".to_string(),
        }
    }
}

/// Reads a snapshot body. A missing file reads as an empty array so a fresh
/// home directory behaves like an empty dashboard.
pub(crate) fn read_source(
    source: &SnapshotSource,
    stdin_override: Option<&str>,
) -> ClientResult<String> {
    match source {
        SnapshotSource::File(path) => {
            if !path.exists() {
                tracing::debug!(path = %path.display(), "snapshot file missing; treating as empty");
                return Ok("[]".to_string());
            }
            fs::read_to_string(path).map_err(|error| {
                ClientError::source_unreadable(&source.describe(), &error.to_string())
            })
        }
        SnapshotSource::Stdin => read_stdin(stdin_override),
    }
}

fn read_stdin(stdin_override: Option<&str>) -> ClientResult<String> {
    if let Some(value) = stdin_override {
        return Ok(value.to_string());
    }

    if std::io::stdin().is_terminal() {
        return Err(ClientError::invalid_argument_with_recovery(
            "Source `-` means stdin input, but nothing was piped in.",
            vec!["Pipe a JSON array into the command or pass a file path.".to_string()],
        ));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| ClientError::source_unreadable("stdin", &error.to_string()))?;
    Ok(buffer)
}

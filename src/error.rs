use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to spawn '{exe}' on '{target}': {reason}")]
    Spawn {
        exe: String,
        target: String,
        reason: String,
    },

    #[error("command '{command}' failed: {reason}")]
    Command { command: String, reason: String },

    #[error("config file '{}' not found", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to access config file '{}': {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config line {line}: '{text}'")]
    ConfigParse { line: usize, text: String },

    #[error("could not determine home directory")]
    NoHome,

    #[error("\"{0}\" is required in environment")]
    MissingEnv(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn command(command: &str, reason: &str) -> Self {
        Self::Command {
            command: command.to_owned(),
            reason: reason.to_owned(),
        }
    }

    /// Classify an I/O error on the credential file, keeping not-found apart
    pub fn config_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::ConfigNotFound(path)
        } else {
            Self::ConfigIo { path, source }
        }
    }
}

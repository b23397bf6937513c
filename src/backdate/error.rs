use std::path::PathBuf;

use thiserror::Error;

use crate::git::VcsError;

#[derive(Debug, Error)]
pub enum BackdateError {
    #[error("failed to read backdate config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse backdate config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid backdate config: {message}")]
    InvalidConfig { message: String },
    #[error("cannot step {now} back by {months} months")]
    TimestampOutOfRange { now: String, months: f64 },
    #[error(transparent)]
    Vcs(#[from] VcsError),
}

mod backend;
mod error;
mod runner;

pub use backend::{GitBackend, VcsBackend};
pub use error::{Step, VcsError};
pub use runner::{DefaultGitRunner, GitRunner};

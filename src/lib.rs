#![forbid(unsafe_code)]
#![deny(warnings, clippy::all, clippy::pedantic)]

mod backdate;
mod git;
mod system;
mod types;
pub mod output;

pub use backdate::{
    BackdateError, ConfigOverrides, DEFAULT_PATHSPEC, Preset, load_config, plan, run_task,
    validate,
};
pub use git::{DefaultGitRunner, GitBackend, GitRunner, Step, VcsBackend, VcsError};
pub use system::{Clock, DefaultClock};
pub use types::{BackdatedCommit, CommitOutcome, CommitRef, OffsetUnit, TaskConfig};

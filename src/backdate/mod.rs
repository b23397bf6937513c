mod config;
mod error;
mod time;

pub use config::{ConfigOverrides, DEFAULT_PATHSPEC, Preset, load_config, validate};
pub use error::BackdateError;

use chrono::{DateTime, TimeZone};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{Level, debug, info};

use crate::{
    git::{Step, VcsBackend},
    system::Clock,
    types::{BackdatedCommit, CommitOutcome, CommitRef, OffsetUnit, TaskConfig},
};

impl BackdatedCommit {
    /// Work out the commit `config` describes as of `now`.
    ///
    /// # Errors
    /// Returns an error when the offset is invalid or steps outside the representable range.
    pub fn at<Tz: TimeZone>(config: &TaskConfig, now: &DateTime<Tz>) -> Result<Self, BackdateError>
    where
        Tz::Offset: std::fmt::Display,
    {
        let backdated = match config.offset_unit {
            OffsetUnit::Months => time::months_before(now, config.offset_amount)?,
        };
        Ok(Self {
            offset_amount: config.offset_amount,
            offset_unit: config.offset_unit,
            timestamp: time::format_timestamp(&backdated),
            commit_message: config.commit_message.clone(),
        })
    }
}

/// Compute the commit a run would make, without touching any repository.
///
/// # Errors
/// Returns an error when the configuration is invalid or the timestamp cannot be computed.
pub fn plan(config: &TaskConfig, clock: &dyn Clock) -> Result<BackdatedCommit, BackdateError> {
    validate(config)?;
    let now = clock.now_local();
    let commit = BackdatedCommit::at(config, &now)?;
    debug!(now = %now.to_rfc3339(), timestamp = %commit.timestamp, "computed backdated timestamp");
    Ok(commit)
}

/// Stage everything, commit it with a backdated timestamp, then push.
///
/// Each step runs only after the previous one succeeded. A failed push leaves the new commit
/// in the local history.
///
/// # Errors
/// Returns an error when the configuration is invalid, the timestamp cannot be computed, or
/// any backend step fails.
pub fn run_task(
    config: &TaskConfig,
    backend: &dyn VcsBackend,
    clock: &dyn Clock,
) -> Result<CommitOutcome, BackdateError> {
    let commit = plan(config, clock)?;

    let progress = if draw_progress() {
        ProgressBar::new(3)
    } else {
        ProgressBar::hidden()
    };
    let style =
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);

    let result = run_steps(config, &commit, backend, &progress);
    match &result {
        Ok(_) => progress.finish_with_message("pushed"),
        Err(err) => progress.abandon_with_message(format!("{err}")),
    }
    let commit_ref = result?;

    info!(commit = %commit_ref.id, timestamp = %commit.timestamp, "pushed backdated commit");
    Ok(CommitOutcome { commit, commit_ref })
}

// Debug events share stderr with the bar, so the bar only shows when they are off.
fn draw_progress() -> bool {
    !tracing::enabled!(Level::DEBUG)
}

fn run_steps(
    config: &TaskConfig,
    commit: &BackdatedCommit,
    backend: &dyn VcsBackend,
    progress: &ProgressBar,
) -> Result<CommitRef, BackdateError> {
    progress.set_message(Step::Stage.to_string());
    backend.stage_all(&config.pathspec)?;
    progress.inc(1);

    progress.set_message(Step::Commit.to_string());
    let commit_ref = backend.commit(&commit.commit_message, &commit.timestamp)?;
    debug!(commit = %commit_ref.id, "created local commit");
    progress.inc(1);

    progress.set_message(Step::Push.to_string());
    backend.push()?;
    progress.inc(1);
    Ok(commit_ref)
}

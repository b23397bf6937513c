use crate::types::{BackdatedCommit, CommitOutcome};

fn describe(commit: &BackdatedCommit) -> String {
    format!(
        "\"{}\" dated {} ({} {} back)",
        commit.commit_message, commit.timestamp, commit.offset_amount, commit.offset_unit
    )
}

#[must_use]
pub fn format_plan(commit: &BackdatedCommit) -> String {
    format!("would commit {}", describe(commit))
}

#[must_use]
pub fn format_outcome(outcome: &CommitOutcome) -> String {
    format!(
        "pushed {} {}",
        outcome.commit_ref.id,
        describe(&outcome.commit)
    )
}

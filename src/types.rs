use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    #[default]
    Months,
}

impl std::fmt::Display for OffsetUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Months => f.write_str("months"),
        }
    }
}

/// Everything the task needs besides the clock and the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskConfig {
    pub offset_amount: f64,
    pub offset_unit: OffsetUnit,
    pub commit_message: String,
    // Handed verbatim to `git add --`.
    pub pathspec: String,
}

/// A commit waiting to be recorded with a backdated timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackdatedCommit {
    pub offset_amount: f64,
    pub offset_unit: OffsetUnit,
    pub timestamp: String,
    pub commit_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitOutcome {
    pub commit: BackdatedCommit,
    pub commit_ref: CommitRef,
}

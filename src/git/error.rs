use thiserror::Error;

/// One of the three operations the task drives, in the order it drives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Stage,
    Commit,
    Push,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stage => f.write_str("stage"),
            Self::Commit => f.write_str("commit"),
            Self::Push => f.write_str("push"),
        }
    }
}

/// Any failure reported by the version control backend.
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to launch git for {step}: {source}")]
    Io {
        step: Step,
        #[source]
        source: std::io::Error,
    },
    #[error("git {step} failed with {}{}", describe_code(.code.as_ref()), describe_stderr(.stderr))]
    Failed {
        step: Step,
        code: Option<i32>,
        stderr: String,
    },
}

impl VcsError {
    #[must_use]
    pub fn step(&self) -> Step {
        match self {
            Self::Io { step, .. } | Self::Failed { step, .. } => *step,
        }
    }
}

fn describe_code(code: Option<&i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

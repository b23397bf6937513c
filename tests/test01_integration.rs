use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn write_executable(path: &PathBuf, content: &str) -> std::io::Result<()> {
    fs::write(path, content)?;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

// Logs each invocation as "<subcommand> <args...> | committer=<GIT_COMMITTER_DATE>".
// FAIL_ON names a subcommand that exits 1 instead.
const FAKE_GIT: &str = r#"#!/usr/bin/env bash
set -euo pipefail

repo=""
args=()
while [[ $# -gt 0 ]]; do
  case "$1" in
    -C)
      repo="$2"; shift 2;;
    *)
      args+=("$1"); shift;;
  esac
done

cmd="${args[0]:-}"
echo "${args[*]} | committer=${GIT_COMMITTER_DATE:-}" >> "$repo/git.log"

if [[ "${FAIL_ON:-}" == "$cmd" ]]; then
  echo "fatal: $cmd failed" >&2
  exit 1
fi

case "$cmd" in
  rev-parse)
    echo "c0ffee1234"
    ;;
  commit)
    echo "[main c0ffee1] committed"
    ;;
esac
exit 0
"#;

struct Sandbox {
    _tmp: TempDir,
    repo: PathBuf,
    fakebin: PathBuf,
}

impl Sandbox {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let repo = tmp.path().join("repo");
        fs::create_dir_all(&repo)?;
        let fakebin = tmp.path().join("fakebin");
        fs::create_dir_all(&fakebin)?;
        write_executable(&fakebin.join("git"), FAKE_GIT)?;
        Ok(Self {
            _tmp: tmp,
            repo,
            fakebin,
        })
    }

    fn command(&self) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin("backdate")?;
        let new_path = format!(
            "{}:{}",
            self.fakebin.display(),
            std::env::var("PATH").unwrap_or_default()
        );
        cmd.env("PATH", new_path)
            .env_remove("FAIL_ON")
            .env_remove("GIT_COMMITTER_DATE")
            .arg("--repo")
            .arg(&self.repo);
        Ok(cmd)
    }

    fn log(&self) -> Vec<String> {
        read_log(&self.repo.join("git.log"))
    }
}

fn read_log(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn subcommands(log: &[String]) -> Vec<String> {
    log.iter()
        .filter_map(|line| line.split_whitespace().next().map(str::to_string))
        .collect()
}

fn commit_date(log: &[String]) -> Option<(String, String)> {
    let line = log.iter().find(|l| l.starts_with("commit "))?;
    let (args, committer) = line.split_once(" | committer=")?;
    let date = args.split_whitespace().last()?.to_string();
    Some((date, committer.to_string()))
}

#[test]
fn test01_stage_commit_push_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;

    sandbox
        .command()?
        .assert()
        .success()
        .stdout(predicate::str::contains("pushed c0ffee1234 \"Update TD\" dated "))
        .stdout(predicate::str::contains("(7.5 months back)"));

    let log = sandbox.log();
    assert_eq!(
        subcommands(&log),
        vec!["add", "commit", "rev-parse", "push"],
        "log was:\n{log:#?}"
    );
    assert!(log[0].starts_with("add -- ./* |"), "log was:\n{log:#?}");
    assert!(log[1].starts_with("commit -m Update TD --date "), "log was:\n{log:#?}");

    let (author, committer) = commit_date(&log).ok_or("no commit in log")?;
    assert_eq!(author, committer);
    let date = chrono::DateTime::parse_from_rfc3339(&author)?;
    let age = chrono::Utc::now().signed_duration_since(date);
    // 7 months plus 15 days is somewhere between 225 and 230 days.
    assert!(
        (225..=230).contains(&age.num_days()),
        "unexpected age {age} for {author}"
    );
    Ok(())
}

#[test]
fn test02_stage_failure_stops_before_commit() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;

    sandbox
        .command()?
        .env("FAIL_ON", "add")
        .assert()
        .failure()
        .stderr(predicate::str::contains("git stage failed"))
        .stderr(predicate::str::contains("fatal: add failed"));

    assert_eq!(subcommands(&sandbox.log()), vec!["add"]);
    Ok(())
}

#[test]
fn test03_push_failure_exits_non_zero_after_commit() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;

    sandbox
        .command()?
        .env("FAIL_ON", "push")
        .assert()
        .failure()
        .stderr(predicate::str::contains("git push failed"));

    assert_eq!(
        subcommands(&sandbox.log()),
        vec!["add", "commit", "rev-parse", "push"]
    );
    Ok(())
}

#[test]
fn test04_preset_and_overrides() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;

    sandbox
        .command()?
        .arg("--preset")
        .arg("clear-extra-line")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Update clear extra line\""))
        .stdout(predicate::str::contains("(9 months back)"));

    let config = sandbox.repo.join("..").join("backdate.toml");
    fs::write(&config, "offset-amount = 2\npathspec = \"docs\"\n")?;
    sandbox
        .command()?
        .arg("--config")
        .arg(&config)
        .arg("--message")
        .arg("Tidy docs")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Tidy docs\""))
        .stdout(predicate::str::contains("(2 months back)"));

    let log = sandbox.log();
    assert!(
        log.iter().any(|l| l.starts_with("add -- docs |")),
        "log was:\n{log:#?}"
    );
    Ok(())
}

#[test]
fn test05_dry_run_leaves_repo_alone() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;

    let output = sandbox
        .command()?
        .arg("--dry-run")
        .arg("--output")
        .arg("json")
        .arg("--months")
        .arg("9")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(value["commit_message"], "Update TD");
    assert_eq!(value["offset_unit"], "months");
    assert_eq!(value["offset_amount"], 9.0);
    let timestamp = value["timestamp"].as_str().ok_or("missing timestamp")?;
    chrono::DateTime::parse_from_rfc3339(timestamp)?;

    assert!(sandbox.log().is_empty());
    Ok(())
}

#[test]
fn test06_invalid_offset_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;

    sandbox
        .command()?
        .arg("--months")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("offset-amount must be a positive number"));

    assert!(sandbox.log().is_empty());
    Ok(())
}

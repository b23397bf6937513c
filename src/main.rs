#![forbid(unsafe_code)]
#![deny(warnings, clippy::all, clippy::pedantic)]

use std::path::PathBuf;
use std::process::ExitCode;

use backdate::{
    BackdateError, ConfigOverrides, DefaultClock, DefaultGitRunner, GitBackend, Preset,
    TaskConfig, load_config, output, plan, run_task,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Parser, Debug)]
#[command(version, about = "Stage, commit and push everything with a backdated timestamp.")]
struct Args {
    /// Repository to commit in
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Built-in offset and message to start from
    #[arg(long, value_enum, default_value_t = Preset::Td)]
    preset: Preset,

    /// TOML file overriding the preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Months to step back (fractions allowed)
    #[arg(long)]
    months: Option<f64>,

    /// Commit message
    #[arg(long)]
    message: Option<String>,

    /// Print the commit that would be made and leave the repository alone
    #[arg(long)]
    dry_run: bool,

    /// Output format: text (default) or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Print debug info while running
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(args: &Args) -> Result<TaskConfig, BackdateError> {
    let mut config = args.preset.config();
    if let Some(path) = &args.config {
        config = load_config(path)?.apply(config);
    }
    let cli = ConfigOverrides {
        offset_amount: args.months,
        commit_message: args.message.clone(),
        ..ConfigOverrides::default()
    };
    Ok(cli.apply(config))
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    let clock = DefaultClock;
    if args.dry_run {
        let commit = plan(&config, &clock)?;
        return Ok(match args.output {
            OutputFormat::Text => output::format_plan(&commit),
            OutputFormat::Json => output::to_json(&commit)?,
        });
    }
    let git = DefaultGitRunner;
    let backend = GitBackend::new(&args.repo, &git);
    let outcome = run_task(&config, &backend, &clock)?;
    Ok(match args.output {
        OutputFormat::Text => output::format_outcome(&outcome),
        OutputFormat::Json => output::to_json(&outcome)?,
    })
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.debug);
    match run(&args) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

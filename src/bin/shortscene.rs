use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shortscene", version)]
struct Cli {
    /// Raise log verbosity (`-v` debug, `-vv` trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse, validate and prepare a scenario (includes the safe-zone check).
    Validate(ValidateArgs),
    /// Dump one evaluated frame as JSON.
    Frame(FrameArgs),
    /// Estimate how a text run fits a box.
    Layout(LayoutArgs),
    /// Print one fingerprint per frame.
    Fingerprint(FingerprintArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[arg(long)]
    text: String,

    /// Container width in pixels.
    #[arg(long)]
    width: f64,

    /// Starting font size in pixels.
    #[arg(long)]
    font_size: f64,

    /// Height budget in pixels; no shrinking when omitted.
    #[arg(long)]
    max_height: Option<f64>,

    #[arg(long, value_enum, default_value_t = PolicyChoice::Solve)]
    policy: PolicyChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyChoice {
    Solve,
    Staged,
}

impl From<PolicyChoice> for shortscene::ShrinkPolicy {
    fn from(p: PolicyChoice) -> Self {
        match p {
            PolicyChoice::Solve => Self::Solve,
            PolicyChoice::Staged => Self::Staged,
        }
    }
}

#[derive(Parser, Debug)]
struct FingerprintArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End frame (exclusive); defaults to the scenario duration.
    #[arg(long)]
    end: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Fingerprint(args) => cmd_fingerprint(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn prepare(path: &Path) -> anyhow::Result<shortscene::PreparedScenario> {
    let scenario = shortscene::Scenario::from_path(path)
        .with_context(|| format!("load scenario '{}'", path.display()))?;
    shortscene::PreparedScenario::prepare(scenario)
        .with_context(|| format!("prepare scenario '{}'", path.display()))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.in_path)?;
    tracing::info!(
        theme = prepared.theme().name,
        frames = prepared.duration_frames(),
        "scenario is valid"
    );
    println!(
        "ok: {} frames, theme {}",
        prepared.duration_frames(),
        prepared.theme().name
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.in_path)?;
    let frame = shortscene::Evaluator::eval_frame(&prepared, shortscene::FrameIndex(args.frame))?;
    let json = serde_json::to_string_pretty(&frame).context("serialize evaluated frame")?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            tracing::info!(frame = args.frame, out = %out.display(), "wrote frame");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let mut config = shortscene::TextLayoutConfig {
        policy: args.policy.into(),
        ..Default::default()
    };
    if let Some(h) = args.max_height {
        config = config.with_budget(h);
    }
    config.validate()?;
    let result = config.estimate(&args.text, args.width, args.font_size);
    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("serialize layout result")?
    );
    Ok(())
}

fn cmd_fingerprint(args: FingerprintArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.in_path)?;
    let end = args.end.unwrap_or_else(|| prepared.duration_frames());
    let range = shortscene::FrameRange::new(
        shortscene::FrameIndex(args.start),
        shortscene::FrameIndex(end),
    )?;
    let threading = shortscene::EvalThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let prints = shortscene::fingerprint_frames(&prepared, range, &threading)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (i, fp) in prints.iter().enumerate() {
        writeln!(out, "{}\t{fp}", args.start + i as u64).context("write fingerprint")?;
    }
    tracing::info!(frames = prints.len(), parallel = args.parallel, "fingerprinted");
    Ok(())
}

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use folio::effects::{PageLayout, PostLoadEffects};
use folio::{
    FontsSignal, InMemorySurface, LoaderConfig, LoadingController, Millis, ScriptedEnvironment,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite `styles.css?v=` and `script.js?v=` tokens in an HTML file with fresh versions.
    Bust(BustArgs),
    /// Replay the loading sequence against an in-memory surface and print the report.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct BustArgs {
    /// HTML file rewritten in place.
    #[arg(default_value = "index.html")]
    html: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Loader config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page layout JSON for the post-load effects.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Library that becomes available at the given instant, as `name=ms`.
    #[arg(long = "available", value_parser = parse_availability)]
    available: Vec<(String, u64)>,

    /// Library that never becomes available.
    #[arg(long = "never")]
    never: Vec<String>,

    /// Fonts-ready signal resolves after this many ms. Without it the fallback delay is used.
    #[arg(long, conflicts_with = "fonts_never")]
    fonts_after: Option<u64>,

    /// Fonts-ready signal exists but never resolves.
    #[arg(long)]
    fonts_never: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn parse_availability(s: &str) -> Result<(String, u64), String> {
    let (name, ms) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=ms, got '{s}'"))?;
    let ms = ms
        .parse::<u64>()
        .map_err(|e| format!("invalid ms in '{s}': {e}"))?;
    Ok((name.to_owned(), ms))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Bust(args) => cmd_bust(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn cmd_bust(args: BustArgs) -> anyhow::Result<()> {
    let report = folio::bust_file(&args.html)
        .with_context(|| format!("bust versions in '{}'", args.html.display()))?;
    println!("{}", report.summary());
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} '{}'", path.display()))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open loader config '{}'", path.display()))?;
            LoaderConfig::from_reader(BufReader::new(f))
                .with_context(|| format!("load loader config '{}'", path.display()))?
        }
        None => LoaderConfig::default(),
    };
    let layout: PageLayout = match &args.layout {
        Some(path) => read_json(path, "page layout")?,
        None => PageLayout::default(),
    };

    let mut env = ScriptedEnvironment::new();
    for name in config.library_names() {
        if !args.never.iter().any(|n| n == name) {
            env = env.available_immediately(name);
        }
    }
    for (name, ms) in &args.available {
        env = env.available_at(name.clone(), Millis(*ms));
    }
    env = env.fonts(match (args.fonts_after, args.fonts_never) {
        (_, true) => FontsSignal::Never,
        (Some(ms), false) => FontsSignal::ResolvesAfter(Millis(ms)),
        (None, false) => FontsSignal::Unsupported,
    });

    let effects = PostLoadEffects::new(config.features, layout);
    let mut ctl =
        LoadingController::new(config, InMemorySurface::new(), env, effects.initializers())?;
    let report = ctl.run_to_completion();
    let surface = ctl.into_surface();

    if args.json {
        let out = serde_json::json!({
            "report": report,
            "effects": effects.snapshot(),
            "surface": surface.events(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for change in &report.phases {
        println!("{:>8}  {:?}", change.at.to_string(), change.phase);
    }
    println!(
        "progress: {} ({} step(s) shown{})",
        report.final_progress.label(),
        report.steps_shown,
        if report.forced_by_ceiling {
            ", forced by ceiling"
        } else {
            ""
        }
    );
    for (name, ready) in report.readiness.iter() {
        println!("  {name}: {}", if ready { "ready" } else { "not ready" });
    }
    for outcome in &report.initializers {
        match &outcome.status {
            folio::InitStatus::Succeeded => println!("  init {}: ok", outcome.name),
            folio::InitStatus::Failed { reason } => {
                println!("  init {}: failed: {reason}", outcome.name)
            }
        }
    }
    Ok(())
}

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use yatra_motion::{
    BloomEvent, ChoreoConfig, Choreographer, ElementId, Millis, PageEvent, PageState, Rect, Size,
    SyntheticGeometry,
};

#[derive(Parser, Debug)]
#[command(name = "yatra-motion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Log filter directive (e.g. `debug`, `yatra_motion=trace`).
    #[arg(long, global = true, default_value = "warn")]
    log: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scripted session against synthetic geometry and print page snapshots.
    Simulate(SimulateArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Configuration JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the ambient bloom scheduler.
    #[arg(long, default_value_t = 2026)]
    seed: u64,

    /// Output path for JSON lines (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Initial geometry plus an ordered list of steps.
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Script {
    geometry: SyntheticGeometry,
    steps: Vec<Step>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    /// Scrolls and dispatches a scroll event.
    ScrollTo { y: f64 },
    /// Resizes the viewport and dispatches a resize event.
    Resize { viewport: Size },
    SetElement { id: ElementId, rect: Rect },
    RemoveElement { id: ElementId },
    Event { event: PageEvent },
    Advance { ms: u64 },
    Snapshot,
    Teardown,
}

#[derive(serde::Serialize)]
struct SnapshotLine<'a> {
    state: &'a PageState,
    blooms: &'a [BloomEvent],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = tracing_subscriber::EnvFilter::try_new(&cli.log)
        .with_context(|| format!("parse log filter '{}'", cli.log))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Config => cmd_config(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    let v = serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))?;
    Ok(v)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<ChoreoConfig> {
    let Some(path) = path else {
        return Ok(ChoreoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let cfg = ChoreoConfig::from_json_str(&text)
        .with_context(|| format!("load config '{}'", path.display()))?;
    Ok(cfg)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let script: Script = read_json(&args.script, "script")?;
    let cfg = read_config(args.config.as_deref())?;

    let mut page = Choreographer::new(cfg, script.geometry, StdRng::seed_from_u64(args.seed))?;
    page.mount();

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let mut snapshots = 0usize;
    for (i, step) in script.steps.into_iter().enumerate() {
        match step {
            Step::ScrollTo { y } => {
                page.geometry_mut().scroll_to(y);
                page.dispatch(PageEvent::Scroll)
                    .with_context(|| format!("step {i}: scroll"))?;
            }
            Step::Resize { viewport } => {
                page.geometry_mut().resize(viewport);
                page.dispatch(PageEvent::Resize)
                    .with_context(|| format!("step {i}: resize"))?;
            }
            Step::SetElement { id, rect } => page.geometry_mut().set_element(id, rect),
            Step::RemoveElement { id } => page.geometry_mut().remove_element(id),
            Step::Event { event } => page
                .dispatch(event)
                .with_context(|| format!("step {i}: event"))?,
            Step::Advance { ms } => page.advance(Millis(ms)),
            Step::Snapshot => {
                let state = page.snapshot();
                let blooms = page.take_blooms();
                let line = SnapshotLine {
                    state: &state,
                    blooms: &blooms,
                };
                serde_json::to_writer(&mut out, &line)
                    .with_context(|| format!("step {i}: write snapshot"))?;
                writeln!(out)?;
                snapshots += 1;
            }
            Step::Teardown => page.teardown(),
        }
    }
    out.flush()?;

    if let Some(path) = &args.out {
        eprintln!("wrote {snapshots} snapshots to {}", path.display());
    }
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let json = ChoreoConfig::default().to_json_pretty()?;
    println!("{json}");
    Ok(())
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use haus_scroll::{
    CpuCanvas, DirFrameSource, FrameCanvas, FrameStore, PaintOutcome, Rgba8Premul,
    ScrollSequence, SequenceConfig, SiteConfig, TextOverlay, Viewport, overlay_states,
};

#[derive(Parser, Debug)]
#[command(name = "haus", version)]
struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a sequence and print its readiness report as JSON.
    Inspect(InspectArgs),
    /// Render the frame shown at one progress value as a PNG.
    Frame(FrameArgs),
    /// Print per-step progress, frame, overlay and effect values as JSON lines.
    Timeline(TimelineArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Which {
    Stone,
    Reveal,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Site config JSON; the built-in OneNine config when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which sequence to use.
    #[arg(long, value_enum, default_value_t = Which::Stone)]
    sequence: Which,
}

impl ConfigArgs {
    fn load(&self) -> anyhow::Result<SiteConfig> {
        let cfg = match &self.config {
            Some(path) => SiteConfig::from_path(path)?,
            None => SiteConfig::onenine(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn pick<'a>(&self, cfg: &'a SiteConfig) -> &'a SequenceConfig {
        match self.sequence {
            Which::Stone => &cfg.stone,
            Which::Reveal => &cfg.reveal,
        }
    }
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Directory serving as the site's document root.
    #[arg(long)]
    assets: PathBuf,

    /// Override loader worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Directory serving as the site's document root.
    #[arg(long)]
    assets: PathBuf,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Number of evenly spaced progress samples (inclusive of both ends).
    #[arg(long, default_value_t = 21)]
    steps: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let cfg = args.config.load()?;
    let seq = args.config.pick(&cfg);
    let pool = haus_scroll::build_loader_pool(args.threads)?;
    let source = Arc::new(DirFrameSource::new(&args.assets));

    let mut store = FrameStore::load_in(&pool, seq.descriptor.clone(), source);
    let report = store.wait_ready();
    tracing::info!(
        loaded = report.loaded,
        failed = report.failed.len(),
        "sequence settled"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = args.config.load()?;
    let seq = args.config.pick(&cfg);
    let canvas = CpuCanvas::new(Viewport::new(args.width, args.height))?
        .with_clear_color(Rgba8Premul::from_straight_rgba(26, 26, 26, 255));
    let source = Arc::new(DirFrameSource::new(&args.assets));

    let mut player = ScrollSequence::create(seq, source, canvas)?;
    player.wait_ready();
    // Drive the container to the scroll offset that yields the requested progress.
    let viewport = player.canvas().map(FrameCanvas::viewport);
    let scroll_y = scroll_for_progress(seq, viewport, args.progress)?;
    let update = player.on_scroll(scroll_y);
    match player.on_animation_frame() {
        PaintOutcome::Painted(index) | PaintOutcome::Suppressed(index) => {
            tracing::info!(index = index.0, progress = update.progress, "frame painted");
        }
        PaintOutcome::Skipped(index, reason) => {
            anyhow::bail!("frame {} was not painted: {reason:?}", index.0);
        }
        PaintOutcome::Idle => anyhow::bail!("no frame was scheduled"),
    }

    let snapshot = player
        .canvas()
        .map(CpuCanvas::snapshot)
        .context("surface was released")?;
    snapshot.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn scroll_for_progress(
    seq: &SequenceConfig,
    viewport: Option<Viewport>,
    progress: f64,
) -> anyhow::Result<f64> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&progress),
        "progress must be within [0, 1], got {progress}"
    );
    let viewport = viewport.context("surface was released")?;
    let container = seq.container(viewport)?;
    let (s0, s1) = seq.range.bounds(container, f64::from(viewport.height));
    Ok(s0 + (s1 - s0) * progress)
}

#[derive(Serialize)]
struct TimelineRow {
    progress: f64,
    frame: usize,
    overlays: Vec<f64>,
    effects: serde_json::Value,
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.steps >= 2, "--steps must be >= 2");
    let cfg = args.config.load()?;
    let seq = args.config.pick(&cfg);
    let overlays: &[TextOverlay] = match args.config.sequence {
        Which::Stone => cfg.overlays.as_slice(),
        Which::Reveal => &[],
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for i in 0..args.steps {
        let progress = i as f64 / (args.steps - 1) as f64;
        let effects = match args.config.sequence {
            Which::Stone => serde_json::to_value(cfg.stone_effects.sample(progress))?,
            Which::Reveal => serde_json::to_value(cfg.reveal_effects.sample(progress))?,
        };
        let row = TimelineRow {
            progress,
            frame: seq.descriptor.frame_for_progress(progress).0,
            overlays: overlay_states(overlays, progress)
                .into_iter()
                .map(|o| o.opacity)
                .collect(),
            effects,
        };
        write_json_line(&mut out, &row)?;
    }
    Ok(())
}

fn write_json_line(out: &mut impl std::io::Write, row: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, row).context("encode timeline row")?;
    writeln!(out).context("write timeline row")?;
    Ok(())
}

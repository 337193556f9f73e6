use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use fourier_anim::{ReportTarget, RunConfig, TargetFunction};

#[derive(Parser, Debug)]
#[command(name = "fourier-anim", version)]
struct Cli {
    /// Log per-harmonic progress.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the partial sums as an animated GIF.
    Render(RenderArgs),
    /// Render one PNG per harmonic count.
    Frames(FramesArgs),
    /// Print the JSON convergence report.
    Report(ReportArgs),
}

/// Series options shared by every subcommand. Flags override `--config`.
#[derive(Args, Debug)]
struct SeriesArgs {
    /// JSON run config to start from.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of harmonics (frames).
    #[arg(long)]
    harmonics: Option<i64>,

    /// Sample points per frame.
    #[arg(long)]
    points: Option<usize>,

    /// Target function.
    #[arg(long, value_enum)]
    function: Option<TargetFunction>,

    /// Lower integration limit.
    #[arg(long, allow_hyphen_values = true)]
    lower: Option<f64>,

    /// Upper integration limit.
    #[arg(long, allow_hyphen_values = true)]
    upper: Option<f64>,

    /// Frame width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Output GIF path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Display time of each frame in milliseconds.
    #[arg(long)]
    delay_ms: Option<u32>,

    /// Also write the JSON convergence report here.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Write the report to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Report(args) => cmd_report(args),
    }
}

fn load_config(args: &SeriesArgs) -> anyhow::Result<RunConfig> {
    let mut cfg = match &args.config {
        Some(path) => RunConfig::from_path(path)?,
        None => RunConfig::default(),
    };
    if let Some(v) = args.harmonics {
        cfg.total_harmonics = v;
    }
    if let Some(v) = args.points {
        cfg.num_points = v;
    }
    if let Some(v) = args.function {
        cfg.function = v;
    }
    if let Some(v) = args.lower {
        cfg.lower = v;
    }
    if let Some(v) = args.upper {
        cfg.upper = v;
    }
    if let Some(v) = args.width {
        cfg.plot.width = v;
    }
    if let Some(v) = args.height {
        cfg.plot.height = v;
    }
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.series)?;
    if let Some(out) = args.out {
        cfg.out = out;
    }
    if let Some(delay) = args.delay_ms {
        cfg.plot.frame_delay_ms = delay;
    }
    if args.report.is_some() {
        cfg.report = args.report;
    }

    let stats = fourier_anim::render_animation(&cfg)
        .with_context(|| format!("render animation '{}'", cfg.out.display()))?;
    if stats.frames == 0 {
        eprintln!("no harmonics requested, {} not written", cfg.out.display());
    } else {
        eprintln!(
            "wrote {} frames to {} in {:.2?}",
            stats.frames,
            cfg.out.display(),
            stats.elapsed
        );
    }
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.series)?;
    let stats = fourier_anim::render_frames(&cfg, &args.out_dir)
        .with_context(|| format!("render frames into '{}'", args.out_dir.display()))?;
    eprintln!(
        "wrote {} frames to {}",
        stats.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_report(args: ReportArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.series)?;
    let target = match args.out {
        Some(path) => ReportTarget::File(path),
        None => ReportTarget::Stdout,
    };
    fourier_anim::series_report(&cfg, target).context("compute series report")?;
    Ok(())
}

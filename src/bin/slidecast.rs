use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "slidecast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble and render the final MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the computed timeline as JSON without rendering.
    Timeline(TimelineArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Engine configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Slide asset list JSON (array of slide rows).
    #[arg(long)]
    slides: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Engine configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Slide asset list JSON (array of slide rows).
    #[arg(long)]
    slides: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn load_slides(path: &PathBuf) -> anyhow::Result<Vec<slidecast::SlideAssets>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read slide list '{}'", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("parse slide list '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = slidecast::EngineConfig::from_path(&args.config)?;
    let sources = load_slides(&args.slides)?;

    let output = slidecast::assemble(&sources, &config, &args.out)?;
    eprintln!(
        "wrote {} ({} frames, {:.2}s)",
        output.out_path.display(),
        output.stats.frames_total,
        output.report.total_secs
    );
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let config = slidecast::EngineConfig::from_path(&args.config)?;
    let sources = load_slides(&args.slides)?;

    let timeline = slidecast::plan_timeline(&sources, &config)?;
    let json = serde_json::to_string_pretty(&timeline).context("serialize timeline")?;
    println!("{json}");
    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use mitsuframe::{
    ConvertOpts, FrameIndex, FrameRange, SceneConfig, convert_frames,
    frames::DEFAULT_PAD_WIDTH,
};

/// Convert per-frame particle snapshots (`<BASE>-<stem>.txt`) into Mitsuba
/// scene files (`<BASE>-<stem>.xml`).
#[derive(Parser, Debug)]
#[command(name = "mitsuframe", version)]
struct Cli {
    /// Path prefix shared by input and output files.
    base: PathBuf,

    /// First frame index (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End frame index (exclusive).
    #[arg(long, default_value_t = 183)]
    end: u64,

    /// Zero-padding width of the frame stem.
    #[arg(long, default_value_t = DEFAULT_PAD_WIDTH)]
    pad: usize,

    /// Particle sphere radius override.
    #[arg(long)]
    radius: Option<f64>,

    /// Scene configuration JSON (partial files override defaults field by field).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep converting past a failed frame; report a summary at the end.
    #[arg(long)]
    keep_going: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SceneConfig::from_json_file(path)?,
        None => SceneConfig::default(),
    };
    if let Some(radius) = cli.radius {
        config.particle_radius = radius;
    }

    let opts = ConvertOpts {
        range: FrameRange::new(FrameIndex(cli.start), FrameIndex(cli.end))?,
        pad_width: cli.pad,
        keep_going: cli.keep_going,
    };

    let stats = convert_frames(&cli.base, &config, &opts)?;

    eprintln!(
        "wrote {} frames ({} particles)",
        stats.frames_written, stats.particles_total
    );
    if stats.frames_failed > 0 {
        anyhow::bail!("{} of {} frames failed", stats.frames_failed, stats.frames_total);
    }
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    config::SceneConfig,
    error::MitsuframeResult,
    frames::{DEFAULT_PAD_WIDTH, FrameIndex, FrameRange, check_stem_width, frame_stem, input_path,
        output_path},
    particles::read_particles,
    scene::scene_document,
};

/// Options for [`convert_frames`].
#[derive(Clone, Debug)]
pub struct ConvertOpts {
    /// Frame range to convert (start inclusive, end exclusive).
    pub range: FrameRange,
    /// Zero-padding width of the frame stem.
    pub pad_width: usize,
    /// Keep converting past a failed frame instead of aborting the batch.
    pub keep_going: bool,
}

impl Default for ConvertOpts {
    fn default() -> Self {
        // The original batch: frames 00000 through 00182, abort on the
        // first failure.
        Self {
            range: FrameRange {
                start: FrameIndex(0),
                end: FrameIndex(183),
            },
            pad_width: DEFAULT_PAD_WIDTH,
            keep_going: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub frames_total: u64,
    pub frames_written: u64,
    pub frames_failed: u64,
    pub particles_total: u64,
}

/// One successfully converted frame.
#[derive(Clone, Debug)]
pub struct WrittenFrame {
    pub index: FrameIndex,
    pub path: PathBuf,
    pub particles: usize,
}

/// Convert a single frame: read `<base>-<stem>.txt`, serialize the scene,
/// write `<base>-<stem>.xml` (truncating any existing file).
#[tracing::instrument(skip(config))]
pub fn convert_frame(
    base: &Path,
    index: FrameIndex,
    config: &SceneConfig,
    pad_width: usize,
) -> MitsuframeResult<WrittenFrame> {
    let stem = frame_stem(index, pad_width);
    let particles = read_particles(&input_path(base, &stem))?;
    let document = scene_document(config, &particles);

    let out = output_path(base, &stem);
    std::fs::write(&out, document)
        .with_context(|| format!("write scene file '{}'", out.display()))?;

    tracing::debug!(frame = index.0, particles = particles.len(), path = %out.display(), "wrote scene");
    Ok(WrittenFrame {
        index,
        path: out,
        particles: particles.len(),
    })
}

/// Convert every frame in `opts.range`, strictly sequentially.
///
/// By default the first failing frame aborts the batch; frames already
/// written stay on disk and no output is produced for the failing frame.
/// With `keep_going` set, failures are logged and counted in the returned
/// stats and the remaining frames are still converted.
pub fn convert_frames(
    base: &Path,
    config: &SceneConfig,
    opts: &ConvertOpts,
) -> MitsuframeResult<ConvertStats> {
    config.validate()?;
    check_stem_width(opts.range, opts.pad_width)?;

    let mut stats = ConvertStats::default();
    for index in opts.range.iter() {
        stats.frames_total += 1;
        match convert_frame(base, index, config, opts.pad_width) {
            Ok(written) => {
                stats.frames_written += 1;
                stats.particles_total += written.particles as u64;
            }
            Err(err) if opts.keep_going => {
                stats.frames_failed += 1;
                tracing::warn!(frame = index.0, error = %err, "skipping failed frame");
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        frames_total = stats.frames_total,
        frames_written = stats.frames_written,
        frames_failed = stats.frames_failed,
        particles_total = stats.particles_total,
        "batch finished"
    );
    Ok(stats)
}

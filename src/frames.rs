use std::path::{Path, PathBuf};

use crate::error::{MitsuframeError, MitsuframeResult};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> MitsuframeResult<Self> {
        if start.0 > end.0 {
            return Err(MitsuframeError::validation(
                "FrameRange start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

/// Default zero-padding width of a frame stem (`0 -> "00000"`).
pub const DEFAULT_PAD_WIDTH: usize = 5;

/// Render a frame index as a fixed-width, zero-padded decimal stem.
///
/// The caller is responsible for checking up front that every index it
/// intends to format fits in `pad_width` digits (see [`check_stem_width`]);
/// an oversized index here simply renders wider than requested.
pub fn frame_stem(index: FrameIndex, pad_width: usize) -> String {
    format!("{:0width$}", index.0, width = pad_width)
}

/// Validate that every index in `range` renders to exactly `pad_width` digits.
pub fn check_stem_width(range: FrameRange, pad_width: usize) -> MitsuframeResult<()> {
    if pad_width == 0 {
        return Err(MitsuframeError::validation("stem pad width must be >= 1"));
    }
    if range.is_empty() {
        return Ok(());
    }
    let last = range.end.0 - 1;
    if frame_stem(FrameIndex(last), pad_width).len() > pad_width {
        return Err(MitsuframeError::validation(format!(
            "frame index {last} does not fit in a {pad_width}-digit stem"
        )));
    }
    Ok(())
}

/// Input path for a frame: `<base>-<stem>.txt`.
pub fn input_path(base: &Path, stem: &str) -> PathBuf {
    sibling_with_suffix(base, stem, "txt")
}

/// Output path for a frame: `<base>-<stem>.xml`.
pub fn output_path(base: &Path, stem: &str) -> PathBuf {
    sibling_with_suffix(base, stem, "xml")
}

fn sibling_with_suffix(base: &Path, stem: &str, ext: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(format!("-{stem}.{ext}"));
    PathBuf::from(name)
}

#![forbid(unsafe_code)]

pub mod config;
pub mod convert;
pub mod error;
pub mod frames;
pub mod particles;
pub mod scene;

pub use config::SceneConfig;
pub use convert::{ConvertOpts, ConvertStats, WrittenFrame, convert_frame, convert_frames};
pub use error::{MitsuframeError, MitsuframeResult};
pub use frames::{FrameIndex, FrameRange, frame_stem, input_path, output_path};
pub use particles::{Particle, read_particles};
pub use scene::scene_document;

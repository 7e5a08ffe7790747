use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::error::{MitsuframeError, MitsuframeResult};

/// Everything about the emitted scene that used to be a hardcoded literal.
///
/// Defaults reproduce the original batch converter: a fixed perspective
/// camera, 32 independent samples, an HD LDR film and 0.017-radius
/// thindielectric spheres.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Radius applied to every particle sphere (the `<scale>` value).
    pub particle_radius: f64,
    /// Camera translation in world space.
    pub camera_translate: [f64; 3],
    /// Camera rotation axis (need not be normalized, must be non-zero).
    pub camera_rotate_axis: [f64; 3],
    /// Camera rotation angle in degrees.
    pub camera_rotate_angle: f64,
    /// Field of view in degrees, exclusive (0, 180).
    pub fov: f64,
    /// Samples per pixel for the independent sampler.
    pub sample_count: u32,
    /// Film resolution.
    pub film_width: u32,
    pub film_height: u32,
    /// BSDF type assigned to every particle sphere.
    pub material: String,
    /// `version` attribute of the `<scene>` root element.
    pub scene_version: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_radius: 0.017,
            camera_translate: [0.5, 0.4, -2.3],
            camera_rotate_axis: [1.0, 0.0, 0.0],
            camera_rotate_angle: 10.0,
            fov: 45.0,
            sample_count: 32,
            film_width: 1920,
            film_height: 1080,
            material: "thindielectric".to_string(),
            scene_version: "0.5.0".to_string(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> MitsuframeResult<()> {
        if !(self.particle_radius.is_finite() && self.particle_radius > 0.0) {
            return Err(MitsuframeError::validation(
                "particle_radius must be finite and > 0",
            ));
        }
        if !(self.fov.is_finite() && self.fov > 0.0 && self.fov < 180.0) {
            return Err(MitsuframeError::validation(
                "fov must be in the open interval (0, 180) degrees",
            ));
        }
        if self.sample_count == 0 {
            return Err(MitsuframeError::validation("sample_count must be > 0"));
        }
        if self.film_width == 0 || self.film_height == 0 {
            return Err(MitsuframeError::validation(
                "film width/height must be > 0",
            ));
        }
        if self.camera_translate.iter().any(|c| !c.is_finite()) {
            return Err(MitsuframeError::validation(
                "camera_translate components must be finite",
            ));
        }
        if self.camera_rotate_axis.iter().any(|c| !c.is_finite())
            || self.camera_rotate_axis.iter().all(|c| *c == 0.0)
        {
            return Err(MitsuframeError::validation(
                "camera_rotate_axis must be finite and non-zero",
            ));
        }
        if !self.camera_rotate_angle.is_finite() {
            return Err(MitsuframeError::validation(
                "camera_rotate_angle must be finite",
            ));
        }
        if self.material.is_empty() {
            return Err(MitsuframeError::validation("material must be non-empty"));
        }
        if self.scene_version.is_empty() {
            return Err(MitsuframeError::validation(
                "scene_version must be non-empty",
            ));
        }
        Ok(())
    }

    /// Load a config from JSON. Fields missing from the file keep their
    /// default value, so a file may override just `particle_radius`.
    pub fn from_json_file(path: &Path) -> MitsuframeResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open scene config '{}'", path.display()))?;
        let r = BufReader::new(f);
        let cfg: SceneConfig = serde_json::from_reader(r)
            .with_context(|| format!("parse scene config '{}'", path.display()))?;
        Ok(cfg)
    }
}

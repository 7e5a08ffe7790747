use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::Context as _;
use glam::DVec3;

use crate::error::{MitsuframeError, MitsuframeResult};

/// One particle's position at a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: DVec3,
}

impl Particle {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: DVec3::new(x, y, z),
        }
    }
}

/// Read one frame's particle snapshot.
///
/// The first line of the file is a header and is always discarded. Every
/// remaining line must hold exactly three whitespace-separated floats
/// (`x y z`). A header-only or empty file yields an empty set.
pub fn read_particles(path: &Path) -> MitsuframeResult<Vec<Particle>> {
    let file =
        File::open(path).with_context(|| format!("open particle file '{}'", path.display()))?;
    let reader = BufReader::new(file);

    let mut particles = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read particle file '{}'", path.display()))?;
        if lineno == 0 {
            continue; // header
        }
        particles.push(parse_line(&line, path, lineno + 1)?);
    }
    Ok(particles)
}

fn parse_line(line: &str, path: &Path, lineno: usize) -> MitsuframeResult<Particle> {
    let mut tokens = line.split_whitespace();
    let mut coords = [0.0f64; 3];
    for coord in &mut coords {
        let token = tokens.next().ok_or_else(|| {
            MitsuframeError::parse(format!(
                "{}:{lineno}: expected 3 coordinates, got fewer",
                path.display()
            ))
        })?;
        *coord = token.parse().map_err(|_| {
            MitsuframeError::parse(format!(
                "{}:{lineno}: '{token}' is not a number",
                path.display()
            ))
        })?;
    }
    if tokens.next().is_some() {
        return Err(MitsuframeError::parse(format!(
            "{}:{lineno}: expected 3 coordinates, got more",
            path.display()
        )));
    }
    Ok(Particle::new(coords[0], coords[1], coords[2]))
}

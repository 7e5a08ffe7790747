//! Structured Mitsuba scene serialization.
//!
//! The document is assembled as a small element tree and serialized in one
//! pass, so nesting and attribute escaping are correct by construction
//! rather than by careful string splicing.

use crate::{config::SceneConfig, particles::Particle};

#[derive(Clone, Debug)]
pub struct XmlElement {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("    ");
        }
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_attr_into(out, value);
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push_str(">\n");
        for child in &self.children {
            child.write_into(out, depth + 1);
        }
        for _ in 0..depth {
            out.push_str("    ");
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push_str(">\n");
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0);
        out
    }
}

fn escape_attr_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

/// Particle-derived values keep the original converter's `%f` rendering
/// (six fractional digits), so `0.017` serializes as `0.017000`.
fn fmt_fixed(v: f64) -> String {
    format!("{v:.6}")
}

/// Config scalars use shortest-form rendering (`0.5`, `45`, `-2.3`).
fn fmt_scalar(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// The fixed perspective sensor block: camera transform, fov, independent
/// sampler and LDR film.
pub fn sensor_element(config: &SceneConfig) -> XmlElement {
    let [tx, ty, tz] = config.camera_translate;
    let [ax, ay, az] = config.camera_rotate_axis;

    let mut rotate = XmlElement::new("rotate");
    for (key, value) in [("x", ax), ("y", ay), ("z", az)] {
        if value != 0.0 {
            rotate = rotate.attr(key, fmt_scalar(value));
        }
    }
    rotate = rotate.attr("angle", fmt_scalar(config.camera_rotate_angle));

    XmlElement::new("sensor")
        .attr("type", "perspective")
        .child(
            XmlElement::new("transform")
                .attr("name", "toWorld")
                .child(
                    XmlElement::new("translate")
                        .attr("x", fmt_scalar(tx))
                        .attr("y", fmt_scalar(ty))
                        .attr("z", fmt_scalar(tz)),
                )
                .child(rotate),
        )
        .child(
            XmlElement::new("float")
                .attr("name", "fov")
                .attr("value", fmt_scalar(config.fov)),
        )
        .child(
            XmlElement::new("sampler").attr("type", "independent").child(
                XmlElement::new("integer")
                    .attr("name", "sampleCount")
                    .attr("value", config.sample_count.to_string()),
            ),
        )
        .child(
            XmlElement::new("film")
                .attr("type", "ldrfilm")
                .child(
                    XmlElement::new("integer")
                        .attr("name", "width")
                        .attr("value", config.film_width.to_string()),
                )
                .child(
                    XmlElement::new("integer")
                        .attr("name", "height")
                        .attr("value", config.film_height.to_string()),
                ),
        )
}

/// One particle as a sphere: scale by the particle radius, translate to
/// the particle position, assign the configured BSDF.
pub fn shape_element(config: &SceneConfig, particle: &Particle) -> XmlElement {
    let p = particle.position;
    XmlElement::new("shape")
        .attr("type", "sphere")
        .child(
            XmlElement::new("transform")
                .attr("name", "toWorld")
                .child(XmlElement::new("scale").attr("value", fmt_fixed(config.particle_radius)))
                .child(
                    XmlElement::new("translate")
                        .attr("x", fmt_fixed(p.x))
                        .attr("y", fmt_fixed(p.y))
                        .attr("z", fmt_fixed(p.z)),
                ),
        )
        .child(XmlElement::new("bsdf").attr("type", config.material.clone()))
}

/// Serialize one frame's scene document. Shapes follow the particle input
/// order; output is deterministic for a given config and particle set.
pub fn scene_document(config: &SceneConfig, particles: &[Particle]) -> String {
    let mut scene = XmlElement::new("scene")
        .attr("version", config.scene_version.clone())
        .child(sensor_element(config));
    for particle in particles {
        scene = scene.child(shape_element(config, particle));
    }
    scene.to_xml()
}

use std::path::PathBuf;

use mitsuframe::{
    ConvertOpts, ConvertStats, FrameIndex, FrameRange, SceneConfig, convert_frame,
    convert_frames,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn fixture_base(case: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("convert_pipeline").join(case);
    std::fs::create_dir_all(&dir).unwrap();
    dir.join("scene")
}

fn write_frame_input(base: &PathBuf, stem: &str, lines: &[&str]) {
    let path = PathBuf::from(format!("{}-{stem}.txt", base.display()));
    let mut body = String::from("3 particles, frame header\n");
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    std::fs::write(path, body).unwrap();
}

fn read_output(base: &PathBuf, stem: &str) -> String {
    std::fs::read_to_string(format!("{}-{stem}.xml", base.display())).unwrap()
}

#[test]
fn single_particle_frame_round_trips_values() {
    let base = fixture_base("single");
    write_frame_input(&base, "00000", &["1.0 2.0 3.0"]);

    let written = convert_frame(&base, FrameIndex(0), &SceneConfig::default(), 5).unwrap();
    assert_eq!(written.particles, 1);

    let doc = read_output(&base, "00000");
    assert_eq!(doc.matches("<shape type=\"sphere\">").count(), 1);
    assert!(doc.contains("<scale value=\"0.017000\"/>"));
    assert!(doc.contains("<translate x=\"1.000000\" y=\"2.000000\" z=\"3.000000\"/>"));
    assert!(doc.contains("<bsdf type=\"thindielectric\"/>"));
}

#[test]
fn shape_count_matches_data_lines() {
    let base = fixture_base("count");
    write_frame_input(
        &base,
        "00000",
        &["0 0 0", "0.1 0.2 0.3", "-1 -2 -3", "4 5 6"],
    );

    convert_frame(&base, FrameIndex(0), &SceneConfig::default(), 5).unwrap();
    let doc = read_output(&base, "00000");
    assert_eq!(doc.matches("<shape type=\"sphere\">").count(), 4);
}

#[test]
fn header_only_input_yields_a_scene_without_shapes() {
    let base = fixture_base("empty");
    write_frame_input(&base, "00000", &[]);

    convert_frame(&base, FrameIndex(0), &SceneConfig::default(), 5).unwrap();
    let doc = read_output(&base, "00000");
    assert!(doc.starts_with("<scene version=\"0.5.0\">"));
    assert!(doc.trim_end().ends_with("</scene>"));
    assert_eq!(doc.matches("<shape").count(), 0);
    assert_eq!(doc.matches("<sensor type=\"perspective\">").count(), 1);
}

#[test]
fn conversion_is_idempotent() {
    let base = fixture_base("idempotent");
    write_frame_input(&base, "00000", &["0.25 0.5 0.75"]);

    convert_frame(&base, FrameIndex(0), &SceneConfig::default(), 5).unwrap();
    let first = read_output(&base, "00000");
    convert_frame(&base, FrameIndex(0), &SceneConfig::default(), 5).unwrap();
    let second = read_output(&base, "00000");
    assert_eq!(first, second);
}

#[test]
fn missing_frame_aborts_the_batch_and_leaves_no_partial_output() {
    init_tracing();
    let base = fixture_base("abort");
    write_frame_input(&base, "00000", &["1 1 1"]);
    // No input for frame 1.

    let opts = ConvertOpts {
        range: FrameRange::new(FrameIndex(0), FrameIndex(3)).unwrap(),
        ..ConvertOpts::default()
    };
    let err = convert_frames(&base, &SceneConfig::default(), &opts);
    assert!(err.is_err());

    assert!(PathBuf::from(format!("{}-00000.xml", base.display())).exists());
    assert!(!PathBuf::from(format!("{}-00001.xml", base.display())).exists());
}

#[test]
fn keep_going_converts_past_a_bad_frame() {
    init_tracing();
    let base = fixture_base("keep_going");
    write_frame_input(&base, "00000", &["1 1 1"]);
    write_frame_input(&base, "00001", &["not a number line"]);
    write_frame_input(&base, "00002", &["2 2 2"]);

    let opts = ConvertOpts {
        range: FrameRange::new(FrameIndex(0), FrameIndex(3)).unwrap(),
        keep_going: true,
        ..ConvertOpts::default()
    };
    let stats = convert_frames(&base, &SceneConfig::default(), &opts).unwrap();
    assert_eq!(
        stats,
        ConvertStats {
            frames_total: 3,
            frames_written: 2,
            frames_failed: 1,
            particles_total: 2,
        }
    );

    assert!(PathBuf::from(format!("{}-00002.xml", base.display())).exists());
    assert!(!PathBuf::from(format!("{}-00001.xml", base.display())).exists());
}

#[test]
fn malformed_line_reports_path_and_line_number() {
    let base = fixture_base("diagnostics");
    write_frame_input(&base, "00000", &["1 1 1", "2 2"]);

    let err = convert_frame(&base, FrameIndex(0), &SceneConfig::default(), 5).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("scene-00000.txt"));
    assert!(msg.contains(":3:"));
}

#[test]
fn radius_override_flows_into_every_shape() {
    let base = fixture_base("radius");
    write_frame_input(&base, "00000", &["0 0 0", "1 1 1"]);

    let config = SceneConfig {
        particle_radius: 0.05,
        ..SceneConfig::default()
    };
    convert_frame(&base, FrameIndex(0), &config, 5).unwrap();
    let doc = read_output(&base, "00000");
    assert_eq!(doc.matches("<scale value=\"0.050000\"/>").count(), 2);
    assert!(!doc.contains("0.017000"));
}

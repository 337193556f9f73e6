use super::*;
use crate::config::RunConfig;
use crate::pipeline::run_config;

fn small_config() -> RunConfig {
    let mut cfg = RunConfig {
        total_harmonics: 3,
        num_points: 64,
        ..RunConfig::default()
    };
    cfg.plot.width = 96;
    cfg.plot.height = 72;
    cfg
}

fn fresh_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_png_seq").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn frame_names_are_zero_padded() {
    assert_eq!(PngSequenceSink::frame_file_name(7), "frame_0007.png");
    assert_eq!(PngSequenceSink::frame_file_name(12345), "frame_12345.png");
}

#[test]
fn writes_one_png_per_harmonic_in_order() {
    let cfg = small_config();
    let dir = fresh_dir("in_order");
    let mut sink = PngSequenceSink::new(&dir, cfg.plot_style()).with_title("f(t) = t²");

    let stats = run_config(&cfg, &mut sink).unwrap();
    assert_eq!(stats.frames, 3);

    let expected: Vec<PathBuf> = (1..=3)
        .map(|k| dir.join(PngSequenceSink::frame_file_name(k)))
        .collect();
    assert_eq!(sink.written(), expected.as_slice());

    for path in &expected {
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), (96, 72));
    }
}

#[test]
fn render_frames_fills_the_directory() {
    let cfg = small_config();
    let dir = fresh_dir("render_frames");

    let stats = crate::pipeline::render_frames(&cfg, &dir).unwrap();
    assert_eq!(stats.frames, 3);

    let mut names: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["frame_0001.png", "frame_0002.png", "frame_0003.png"]
    );
    let img = image::open(dir.join("frame_0002.png")).unwrap();
    assert_eq!((img.width(), img.height()), (96, 72));
}

#[test]
fn end_before_begin_is_rejected() {
    let dir = fresh_dir("not_begun");
    let mut sink = PngSequenceSink::new(&dir, PlotStyle::default());
    assert!(sink.end().is_err());
    assert!(sink.written().is_empty());
    assert!(!dir.exists());
}

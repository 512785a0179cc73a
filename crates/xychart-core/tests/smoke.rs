// File: crates/xychart-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use xychart_core::{Field, Frame, RenderOptions, ScatterChart, Theme, XyChartOptions};

#[test]
fn render_smoke_png() {
    let frames = vec![Frame::new(vec![
        Field::number("x", [0.0, 1.0, 2.0, 3.0, 4.0]),
        Field::number("y", [0.0, 2.0, 1.0, 3.5, 2.5]),
        Field::number("z", [1.0, 1.5, 0.5, 2.0, 1.0]),
    ])];
    let mut chart = ScatterChart::new(XyChartOptions::default(), frames, Theme::dark()).expect("chart");

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn error_panel_still_renders() {
    let frames = vec![Frame::new(vec![Field::number("x", [0.0]), Field::number("y", [1.0])])];
    let mut chart = ScatterChart::new(XyChartOptions::default(), frames, Theme::light()).expect("chart");
    assert!(chart.set_frames(Vec::new()).is_err());

    let bytes = chart.render_to_png_bytes(&RenderOptions::default()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
    assert!(chart.interaction().hits().is_empty());
}

// File: crates/xychart-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic small bubble chart to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use xychart_core::mapping::{PointColorConfig, PointSizeConfig};
use xychart_core::{Field, Frame, RenderOptions, ScatterChart, SeriesSpec, Theme, XyChartOptions};

fn render_bytes() -> Vec<u8> {
    let frames = vec![Frame::new(vec![
        Field::number("x", [0.0, 1.0, 2.0, 3.0, 4.0]),
        Field::number("y", [0.0, 1.0, 0.0, 1.5, 1.0]),
        Field::number("size", [1.0, 4.0, 2.0, 8.0, 3.0]),
    ])];
    let spec = SeriesSpec::new("x", "y")
        .with_color(PointColorConfig { fixed: Some("orange".into()), field: None })
        .with_size(PointSizeConfig { field: Some("size".into()), fixed: 5.0, min: 6.0, max: 40.0 });
    let mut chart = ScatterChart::new(XyChartOptions::manual(vec![spec]), frames, Theme::dark()).expect("chart");

    let opts = RenderOptions {
        width: 480,
        height: 320,
        draw_labels: false, // avoid text nondeterminism across platforms
        ..RenderOptions::default()
    };
    chart.render_to_png_bytes(&opts).expect("render bytes")
}

#[test]
fn golden_bubble_chart() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("bubble_chart.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
        // Skip without failing on first run
    }
}

// File: crates/xychart-demo/src/main.rs
// Summary: Demo loads a CSV into a frame, renders an XY bubble chart PNG and simulates a hover on the first point.

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};
use xychart_core::interaction::InteractionController;
use xychart_core::theme;
use xychart_core::{Field, FieldType, Frame, RenderOptions, ScatterChart, Value, XyChartOptions};

fn main() -> Result<()> {
    env_logger::init();

    // Usage: xychart-demo [data.csv] [options.json]; XYCHART_THEME=dark|light
    let mut args = std::env::args().skip(1);
    let raw = args
        .next()
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/data/bubbles.csv").to_string());
    let options_path = args.next();

    let (path, used_alt) = resolve_path(&raw)?;
    println!("Using input file: {}", path.display());
    if used_alt {
        println!("  (extension swapped between .csv/.cvs)");
    }

    let frame = load_frame_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    println!("Loaded {} rows x {} fields", frame.len(), frame.fields.len());
    if frame.is_empty() {
        anyhow::bail!("no rows loaded; check headers/delimiter.");
    }

    let options = match &options_path {
        Some(p) => {
            let json = std::fs::read_to_string(p).with_context(|| format!("reading options {p}"))?;
            XyChartOptions::from_json(&json).with_context(|| format!("parsing options {p}"))?
        }
        None => XyChartOptions::default(),
    };

    let interaction = InteractionController::new(|event| match event {
        Some(e) => println!(
            "hover: series {} point {} at ({:.1}, {:.1})",
            e.series_index, e.data_index, e.screen_x, e.screen_y
        ),
        None => println!("hover: none"),
    });
    let theme = theme::find(&std::env::var("XYCHART_THEME").unwrap_or_else(|_| "dark".to_string()));
    let mut chart = ScatterChart::new(options, vec![frame], theme)
        .context("chart configuration")?
        .with_interaction(interaction);
    for s in chart.series() {
        println!("Series {}: {} (x field {}, y field {})", s.series_index, s.name, s.x_index, s.y_index);
    }

    let opts = RenderOptions { theme, ..RenderOptions::default() };
    let out = out_name(&path);
    chart.render_to_png(&opts, &out)?;
    println!("Wrote {}", out.display());

    // hover the first plotted point
    match chart.point_position(0, 0) {
        Some(pos) => {
            info!("simulating pointer at {pos:?}");
            let event = chart.pointer_move(Some(pos));
            println!("Hover event: {event:?}");
            chart.pointer_leave();
        }
        None => println!("First point is not plotted; skipping hover."),
    }
    Ok(())
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Output file name like target/out/xychart_<stem>.png
fn out_name(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    PathBuf::from("target/out").join(format!("xychart_{stem}.png"))
}

/// Load a CSV with headers into one frame. `time`/`timestamp` columns become
/// time fields, columns whose non-empty cells all parse as numbers become
/// number fields, everything else stays text.
fn load_frame_csv(path: &Path) -> Result<Frame> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
    println!("Headers: {:?}", headers);

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for rec in rdr.records() {
        let rec = rec?;
        for (i, col) in columns.iter_mut().enumerate() {
            col.push(rec.get(i).unwrap_or("").to_string());
        }
    }

    let fields = headers
        .iter()
        .zip(columns)
        .map(|(name, cells)| column_field(name, cells))
        .collect();
    Ok(Frame::new(fields).with_name(path.file_stem().and_then(|s| s.to_str()).unwrap_or("data")))
}

fn column_field(name: &str, cells: Vec<String>) -> Field {
    let lower = name.to_lowercase();
    if lower == "time" || lower == "timestamp" {
        let values = cells.iter().map(|c| parse_time_millis(c).map_or(Value::Null, Value::Number)).collect();
        return Field::new(name, FieldType::Time, values);
    }
    let numeric = cells.iter().all(|c| c.is_empty() || c.parse::<f64>().is_ok());
    if numeric {
        let values = cells.iter().map(|c| c.parse::<f64>().map_or(Value::Null, Value::Number)).collect();
        Field::new(name, FieldType::Number, values)
    } else {
        Field::string(name, cells)
    }
}

fn parse_time_millis(s: &str) -> Option<f64> {
    let n = s.parse::<i64>().ok()?;
    // epoch seconds vs. milliseconds
    if n > 10_i64.pow(12) { Some(n as f64) } else { Some(n as f64 * 1000.0) }
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_typing() {
        let f = column_field("size", vec!["1".into(), "".into(), "2.5".into()]);
        assert_eq!(f.field_type, FieldType::Number);
        assert_eq!(f.numbers(), vec![Some(1.0), None, Some(2.5)]);
        assert_eq!(column_field("city", vec!["Oslo".into()]).field_type, FieldType::String);
        let t = column_field("Timestamp", vec!["1700000000".into()]);
        assert_eq!(t.number_at(0), Some(1_700_000_000_000.0));
    }

    #[test]
    fn out_name_uses_stem() {
        assert_eq!(out_name(Path::new("data/bubbles.csv")), PathBuf::from("target/out/xychart_bubbles.png"));
    }
}

// File: crates/xychart-core/src/resolve.rs
// Summary: Series resolver: dimension mapping + frames -> ordered scatter series.

use log::debug;

use crate::dims::{display_name, find_field_index, is_graphable};
use crate::error::ConfigError;
use crate::frame::Frame;
use crate::mapping::{AutoDims, DimensionMapping, SeriesSpec};
use crate::series::{Dims, ScatterSeries};
use crate::theme::Theme;

/// Derive the scatter series for `mapping` over `frames`.
///
/// Series indices start at 0 and follow resolution order. Any error aborts the
/// whole pass; no partial list is returned.
pub fn resolve(mapping: &DimensionMapping, frames: &[Frame], theme: &Theme) -> Result<Vec<ScatterSeries>, ConfigError> {
    if frames.is_empty() {
        return Err(ConfigError::MissingData);
    }
    let series = match mapping {
        DimensionMapping::Manual(specs) => resolve_manual(specs, frames, theme)?,
        DimensionMapping::Auto(dims) => resolve_auto(dims, frames, theme)?,
    };
    debug!("resolved {} scatter series from {} frames", series.len(), frames.len());
    Ok(series)
}

fn resolve_manual(specs: &[SeriesSpec], frames: &[Frame], theme: &Theme) -> Result<Vec<ScatterSeries>, ConfigError> {
    if specs.is_empty() {
        return Err(ConfigError::MissingSeriesConfig);
    }
    let mut out = Vec::new();
    for spec in specs {
        let x = spec.x.as_deref().filter(|s| !s.is_empty()).ok_or(ConfigError::MissingX)?;
        let y = spec.y.as_deref().filter(|s| !s.is_empty()).ok_or(ConfigError::MissingY)?;

        for (frame_index, frame) in frames.iter().enumerate() {
            let Some(x_index) = find_field_index(frame, frames, Some(x)) else { continue };
            let y_index = find_field_index(frame, frames, Some(y)).ok_or(ConfigError::YNotInFrame)?;

            let color = spec.point_color.as_ref();
            let size = spec.point_size.as_ref();
            let dims = Dims {
                point_color_fixed: color.and_then(|c| c.fixed.clone()).filter(|c| !c.is_empty()),
                point_color_index: find_field_index(frame, frames, color.and_then(|c| c.field.as_deref())),
                point_size_config: size.cloned(),
                point_size_index: find_field_index(frame, frames, size.and_then(|s| s.field.as_deref())),
            };
            out.push(ScatterSeries::new(out.len(), frames, frame_index, x_index, y_index, dims, theme)?);
        }
    }
    Ok(out)
}

fn resolve_auto(dims: &AutoDims, frames: &[Frame], theme: &Theme) -> Result<Vec<ScatterSeries>, ConfigError> {
    let frame_index = dims.frame.unwrap_or(0);
    let frame = frames
        .get(frame_index)
        .ok_or(ConfigError::FrameOutOfRange { index: frame_index, count: frames.len() })?;

    let mut x_index = find_field_index(frame, frames, dims.x.as_deref());
    let mut y_indices = Vec::new();
    for (i, field) in frame.fields.iter().enumerate() {
        if !is_graphable(field) {
            continue;
        }
        match x_index {
            None => {
                x_index = Some(i);
                continue;
            }
            Some(x) if x == i => continue,
            Some(_) => {}
        }
        if dims.exclude.iter().any(|e| *e == display_name(field, frame, frames)) {
            continue;
        }
        y_indices.push(i);
    }

    let x_index = x_index.ok_or(ConfigError::MissingXDimension)?;
    if y_indices.is_empty() {
        return Err(ConfigError::NoYValues);
    }
    y_indices
        .into_iter()
        .enumerate()
        .map(|(series_index, y_index)| {
            ScatterSeries::new(series_index, frames, frame_index, x_index, y_index, Dims::default(), theme)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Field;

    fn theme() -> Theme { Theme::dark() }

    #[test]
    fn empty_frames_is_missing_data() {
        let err = resolve(&DimensionMapping::default(), &[], &theme()).unwrap_err();
        assert_eq!(err, ConfigError::MissingData);
        assert_eq!(err.to_string(), "Missing data");
    }

    #[test]
    fn explicit_x_wins_regardless_of_position() {
        let frames = vec![Frame::new(vec![
            Field::number("a", [1.0]),
            Field::number("b", [2.0]),
            Field::number("c", [3.0]),
        ])];
        let dims = AutoDims { x: Some("c".into()), ..AutoDims::default() };
        let series = resolve(&DimensionMapping::Auto(dims), &frames, &theme()).expect("resolve");
        assert!(series.iter().all(|s| s.x_index == 2));
        assert_eq!(series.iter().map(|s| s.y_index).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn auto_frame_out_of_range() {
        let frames = vec![Frame::new(vec![Field::number("a", [1.0])])];
        let dims = AutoDims { frame: Some(3), ..AutoDims::default() };
        let err = resolve(&DimensionMapping::Auto(dims), &frames, &theme()).unwrap_err();
        assert_eq!(err, ConfigError::FrameOutOfRange { index: 3, count: 1 });
    }
}

// File: crates/xychart-core/src/axis.rs
// Summary: Axis model: one shared X axis plus one Y axis per unit scale, with auto ranges and tick layout.

use crate::dims::display_name;
use crate::display::DisplayProcessor;
use crate::facet::FacetedData;
use crate::frame::{AxisPlacement, Field, Frame};
use crate::scale::{Orientation, Scale};
use crate::series::ScatterSeries;
use crate::theme::Theme;

pub const X_SCALE_KEY: &str = "x";
/// Y scale key for fields without a unit.
pub const DEFAULT_Y_SCALE_KEY: &str = "y";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisSide {
    Left,
    Right,
    Bottom,
    Top,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub scale_key: String,
    pub label: String,
    pub side: AxisSide,
    pub show: bool,
    pub scale: Scale,
    formatter: DisplayProcessor,
}

impl Axis {
    /// `steps` evenly spaced ticks across the scale, formatted with the field's unit.
    pub fn ticks(&self, steps: usize) -> Vec<(f64, String)> {
        linspace(self.scale.min, self.scale.max, steps)
            .into_iter()
            .map(|v| (v, self.formatter.format_number(v)))
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct AxisLayout {
    pub x: Axis,
    /// Y axes in first-use order, one per scale key.
    pub y: Vec<Axis>,
}

impl AxisLayout {
    /// Axes for the resolved series; `None` when there is nothing to plot.
    /// The X axis follows the first series.
    pub fn build(series: &[ScatterSeries], frames: &[Frame], facets: &FacetedData, theme: &Theme) -> Option<Self> {
        let first = series.first()?;
        let (frame, x_field) = (first.frame(frames)?, first.x_field(frames)?);

        let visible = || series.iter().filter(|s| s.show).filter_map(|s| Some((s, facets.slot(s.slot())?)));
        let x_range = extent(visible().flat_map(|(_, f)| f.xs.iter().copied()));
        let x = Axis {
            scale_key: X_SCALE_KEY.to_string(),
            label: axis_label(x_field, frame, frames),
            side: if x_field.config.custom.axis_placement == AxisPlacement::Top { AxisSide::Top } else { AxisSide::Bottom },
            show: x_field.config.custom.axis_placement != AxisPlacement::Hidden,
            scale: Scale::auto(x_range, Orientation::Horizontal),
            formatter: DisplayProcessor::for_field(x_field, theme, 0),
        };

        let mut y: Vec<Axis> = Vec::new();
        for s in series {
            let (Some(frame), Some(field)) = (s.frame(frames), s.y_field(frames)) else { continue };
            let key = scale_key(field);
            if y.iter().any(|a| a.scale_key == key) {
                continue;
            }
            let range = extent(
                visible()
                    .filter(|(other, _)| other.y_field(frames).map(scale_key).as_deref() == Some(key.as_str()))
                    .flat_map(|(_, f)| f.ys.iter().copied()),
            );
            let placement = field.config.custom.axis_placement;
            y.push(Axis {
                scale_key: key,
                label: axis_label(field, frame, frames),
                side: if placement == AxisPlacement::Right { AxisSide::Right } else { AxisSide::Left },
                show: placement != AxisPlacement::Hidden,
                scale: Scale::auto(range, Orientation::Vertical),
                formatter: DisplayProcessor::for_field(field, theme, s.series_index),
            });
        }
        Some(Self { x, y })
    }

    pub fn y_axis(&self, key: &str) -> Option<&Axis> {
        self.y.iter().find(|a| a.scale_key == key)
    }

    /// Y scale the series is drawn against.
    pub fn y_scale_for(&self, series: &ScatterSeries, frames: &[Frame]) -> Scale {
        series
            .y_field(frames)
            .and_then(|f| self.y_axis(&scale_key(f)))
            .map(|a| a.scale)
            .unwrap_or_else(|| Scale::auto(None, Orientation::Vertical))
    }
}

/// Custom axis label when set, else the field's display name.
pub fn axis_label(field: &Field, frame: &Frame, frames: &[Frame]) -> String {
    match field.config.custom.axis_label.as_deref() {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => display_name(field, frame, frames),
    }
}

/// Y scale key: the field unit, or `"y"`.
pub fn scale_key(field: &Field) -> String {
    field
        .config
        .unit
        .as_deref()
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_Y_SCALE_KEY)
        .to_string()
}

fn extent(values: impl Iterator<Item = Option<f64>>) -> Option<(f64, f64)> {
    values.flatten().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::build_faceted_data;
    use crate::mapping::DimensionMapping;
    use crate::resolve::resolve;

    fn frames() -> Vec<Frame> {
        let mut temp = Field::number("temp", [10.0, 30.0, 20.0]);
        temp.config.unit = Some("celsius".into());
        temp.config.custom.axis_label = Some("Temperature".into());
        let mut hum = Field::number("hum", [40.0, 60.0, 50.0]);
        hum.config.custom.axis_placement = AxisPlacement::Hidden;
        vec![Frame::new(vec![Field::number("t", [1.0, 2.0, 3.0]), temp, hum])]
    }

    #[test]
    fn one_y_axis_per_unit() {
        let theme = Theme::dark();
        let frames = frames();
        let series = resolve(&DimensionMapping::default(), &frames, &theme).expect("resolve");
        let facets = build_faceted_data(&series, &frames, &theme);
        let axes = AxisLayout::build(&series, &frames, &facets, &theme).expect("axes");

        assert_eq!(axes.x.label, "t");
        assert_eq!((axes.x.scale.min, axes.x.scale.max), (1.0, 3.0));
        assert_eq!(axes.y.len(), 2);
        let temp = axes.y_axis("celsius").expect("celsius axis");
        assert_eq!(temp.label, "Temperature");
        assert_eq!((temp.scale.min, temp.scale.max), (10.0, 30.0));
        assert!(!axes.y_axis("y").expect("y axis").show);
        assert_eq!(temp.ticks(3)[1].1, "20 celsius");
    }

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 4.0, 1), vec![2.0, 4.0]);
    }
}

// File: crates/xychart-core/src/series.rs
// Summary: Resolved scatter series and their style accessors (color, size, line/point visibility).
// Notes:
// - Accessors never hold on to frames. Every evaluation takes the active frame
//   set as an argument, so swapping frames cannot leave stale data behind.

use log::warn;
use skia_safe as skia;

use crate::color::{field_series_color, ColorCalculator};
use crate::display::DisplayProcessor;
use crate::dims::{display_name, QuadraticSizeScale};
use crate::error::ConfigError;
use crate::frame::{Field, FieldColorMode, Frame, LineStyle, ScatterShow};
use crate::mapping::PointSizeConfig;
use crate::theme::Theme;

/// Default point diameter in CSS px when nothing is configured.
pub const DEFAULT_POINT_SIZE: f32 = 5.0;
/// Default line width in CSS px.
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityMode {
    Always,
    Never,
    /// Decided at draw time from the point count.
    Auto,
}

/// One value for the whole series, or one per data point.
#[derive(Clone, Debug, PartialEq)]
pub enum DimensionValues<T> {
    Single(T),
    PerPoint(Vec<T>),
}

impl<T: Clone> DimensionValues<T> {
    /// Expand to exactly `len` entries. Short per-point vectors are padded
    /// with their last value.
    pub fn as_array(&self, len: usize) -> Vec<T> {
        match self {
            DimensionValues::Single(v) => vec![v.clone(); len],
            DimensionValues::PerPoint(vals) => {
                let mut out: Vec<T> = vals.iter().take(len).cloned().collect();
                if let Some(last) = out.last().cloned() {
                    out.resize(len, last);
                }
                out
            }
        }
    }

    pub fn first(&self) -> Option<T> {
        match self {
            DimensionValues::Single(v) => Some(v.clone()),
            DimensionValues::PerPoint(vals) => vals.first().cloned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointColorAccessor {
    Fixed(skia::Color),
    /// Color each point through the display processor of this field.
    ByValue { field_index: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointSizeAccessor {
    Fixed(f32),
    /// Quadratic scale of this field's values into the configured range.
    Scaled { field_index: usize, config: PointSizeConfig },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesHints {
    pub point_size: PointSizeConfig,
    pub color_mode: FieldColorMode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub color: skia::Color,
    pub y_axis: usize,
}

/// Field references found for one series besides X and Y.
#[derive(Clone, Debug, Default)]
pub struct Dims {
    pub point_color_index: Option<usize>,
    pub point_color_fixed: Option<String>,
    pub point_size_index: Option<usize>,
    pub point_size_config: Option<PointSizeConfig>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScatterSeries {
    pub name: String,
    /// Global index in resolution order; the plot slot is `series_index + 1`.
    pub series_index: usize,
    pub frame_index: usize,
    pub x_index: usize,
    pub y_index: usize,
    pub show_line: bool,
    pub line_width: f32,
    pub line_style: LineStyle,
    pub line_color: skia::Color,
    pub show_points: VisibilityMode,
    pub point_size: PointSizeAccessor,
    pub point_color: PointColorAccessor,
    pub hints: SeriesHints,
    pub legend: LegendItem,
    /// False when the Y field is hidden from the visualization.
    pub show: bool,
}

impl ScatterSeries {
    /// Build a series for `(x_index, y_index)` of `frames[frame_index]`.
    pub fn new(
        series_index: usize,
        frames: &[Frame],
        frame_index: usize,
        x_index: usize,
        y_index: usize,
        dims: Dims,
        theme: &Theme,
    ) -> Result<Self, ConfigError> {
        let frame = frames
            .get(frame_index)
            .ok_or(ConfigError::FrameOutOfRange { index: frame_index, count: frames.len() })?;
        if x_index >= frame.fields.len() {
            return Err(ConfigError::MissingXDimension);
        }
        let y = frame.fields.get(y_index).ok_or(ConfigError::YNotInFrame)?;
        let custom = &y.config.custom;

        // color
        let mut color_mode = FieldColorMode::PaletteClassic;
        let (series_color, point_color) = match dims.point_color_fixed.as_deref() {
            Some(fixed) => {
                let c = theme.color_by_name(fixed);
                (c, PointColorAccessor::Fixed(c))
            }
            None => {
                let mut c = field_series_color(y, theme, series_index);
                let mut accessor = PointColorAccessor::Fixed(c);
                if let Some(ci) = dims.point_color_index {
                    match frame.fields.get(ci) {
                        Some(f) => {
                            color_mode = f.config.color.mode;
                            if color_mode.is_by_value() {
                                accessor = PointColorAccessor::ByValue { field_index: ci };
                            } else {
                                c = ColorCalculator::for_field(f, theme, series_index).color(f.number_at(0), 1.0);
                                accessor = PointColorAccessor::Fixed(c);
                            }
                        }
                        None => warn!("color field {ci} missing from frame {frame_index}; using series color"),
                    }
                }
                (c, accessor)
            }
        };

        // size
        let fixed = dims
            .point_size_config
            .as_ref()
            .map(|c| c.fixed)
            .or_else(|| custom.point_size.and_then(|p| p.fixed))
            .unwrap_or(DEFAULT_POINT_SIZE);
        let (point_size, size_hints) = match (dims.point_size_index, dims.point_size_config) {
            (Some(field_index), Some(config)) if field_index < frame.fields.len() => {
                (PointSizeAccessor::Scaled { field_index, config: config.clone() }, config)
            }
            _ => (PointSizeAccessor::Fixed(fixed), PointSizeConfig::fixed(fixed)),
        };

        let name = display_name(y, frame, frames);
        Ok(Self {
            legend: LegendItem { label: name.clone(), color: series_color, y_axis: y_index },
            name,
            series_index,
            frame_index,
            x_index,
            y_index,
            show_line: custom.show != ScatterShow::Points,
            line_width: custom.line_width.unwrap_or(DEFAULT_LINE_WIDTH),
            line_style: custom.line_style.clone(),
            line_color: series_color,
            show_points: match custom.show {
                ScatterShow::Lines => VisibilityMode::Never,
                ScatterShow::Auto => VisibilityMode::Auto,
                ScatterShow::Points | ScatterShow::PointsAndLines => VisibilityMode::Always,
            },
            point_size,
            point_color,
            hints: SeriesHints { point_size: size_hints, color_mode },
            show: !custom.hide_from.viz,
        })
    }

    /// Plot slot of this series; slot 0 is the shared X facet.
    pub fn slot(&self) -> usize { self.series_index + 1 }

    pub fn frame<'a>(&self, frames: &'a [Frame]) -> Option<&'a Frame> {
        frames.get(self.frame_index)
    }

    pub fn x_field<'a>(&self, frames: &'a [Frame]) -> Option<&'a Field> {
        self.frame(frames)?.field(self.x_index)
    }

    pub fn y_field<'a>(&self, frames: &'a [Frame]) -> Option<&'a Field> {
        self.frame(frames)?.field(self.y_index)
    }

    pub fn color_by_value(&self) -> bool {
        self.hints.color_mode.is_by_value()
    }

    /// Point diameters in CSS px for the current frames.
    pub fn point_sizes(&self, frames: &[Frame]) -> DimensionValues<f32> {
        match &self.point_size {
            PointSizeAccessor::Fixed(px) => DimensionValues::Single(*px),
            PointSizeAccessor::Scaled { field_index, config } => {
                let Some(field) = self.frame(frames).and_then(|f| f.field(*field_index)) else {
                    warn!("size field {field_index} missing for series {}; using fixed size", self.name);
                    return DimensionValues::Single(config.fixed);
                };
                let scale = QuadraticSizeScale::new(field, config);
                DimensionValues::PerPoint((0..field.len()).map(|i| scale.get(field.number_at(i))).collect())
            }
        }
    }

    /// Point colors for the current frames.
    pub fn point_colors(&self, frames: &[Frame], theme: &Theme) -> DimensionValues<skia::Color> {
        match &self.point_color {
            PointColorAccessor::Fixed(c) => DimensionValues::Single(*c),
            PointColorAccessor::ByValue { field_index } => {
                let Some(field) = self.frame(frames).and_then(|f| f.field(*field_index)) else {
                    warn!("color field {field_index} missing for series {}; using series color", self.name);
                    return DimensionValues::Single(self.line_color);
                };
                let disp = DisplayProcessor::for_field(field, theme, self.series_index);
                DimensionValues::PerPoint(field.values.iter().map(|v| disp.display(v).color).collect())
            }
        }
    }
}

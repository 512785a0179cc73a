// File: crates/xychart-core/src/mapping.rs
// Summary: Panel options and the dimension mapping (manual series specs vs. auto detection).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Point color for one manual series: a field whose values drive the color,
/// or a fixed palette/CSS color.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointColorConfig {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub fixed: Option<String>,
}

/// Point size: a field scaled into `[min, max]` px, or `fixed` px.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointSizeConfig {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default = "default_point_size")]
    pub fixed: f32,
    #[serde(default = "default_min_size")]
    pub min: f32,
    #[serde(default = "default_max_size")]
    pub max: f32,
}

fn default_point_size() -> f32 { 5.0 }
fn default_min_size() -> f32 { 1.0 }
fn default_max_size() -> f32 { 100.0 }

impl PointSizeConfig {
    /// Fixed size with the hint range collapsed to `[px, px]`.
    pub fn fixed(px: f32) -> Self {
        Self { field: None, fixed: px, min: px, max: px }
    }
}

impl Default for PointSizeConfig {
    fn default() -> Self {
        Self { field: None, fixed: default_point_size(), min: default_min_size(), max: default_max_size() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub y: Option<String>,
    #[serde(default)]
    pub point_color: Option<PointColorConfig>,
    #[serde(default)]
    pub point_size: Option<PointSizeConfig>,
}

impl SeriesSpec {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self { x: Some(x.into()), y: Some(y.into()), ..Self::default() }
    }

    pub fn with_color(mut self, color: PointColorConfig) -> Self {
        self.point_color = Some(color);
        self
    }

    pub fn with_size(mut self, size: PointSizeConfig) -> Self {
        self.point_size = Some(size);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoDims {
    #[serde(default)]
    pub frame: Option<usize>,
    #[serde(default)]
    pub x: Option<String>,
    /// Display names of fields never used as Y.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DimensionMapping {
    Manual(Vec<SeriesSpec>),
    Auto(AutoDims),
}

impl Default for DimensionMapping {
    fn default() -> Self { DimensionMapping::Auto(AutoDims::default()) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesMappingMode {
    #[default]
    Auto,
    Manual,
}

/// Panel options as stored in dashboard JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XyChartOptions {
    #[serde(default)]
    pub series_mapping: SeriesMappingMode,
    #[serde(default)]
    pub dims: Option<AutoDims>,
    #[serde(default)]
    pub series: Vec<SeriesSpec>,
}

impl XyChartOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn manual(series: Vec<SeriesSpec>) -> Self {
        Self { series_mapping: SeriesMappingMode::Manual, dims: None, series }
    }

    pub fn auto(dims: AutoDims) -> Self {
        Self { series_mapping: SeriesMappingMode::Auto, dims: Some(dims), series: Vec::new() }
    }

    pub fn mapping(&self) -> DimensionMapping {
        match self.series_mapping {
            SeriesMappingMode::Manual => DimensionMapping::Manual(self.series.clone()),
            SeriesMappingMode::Auto => DimensionMapping::Auto(self.dims.clone().unwrap_or_default()),
        }
    }
}

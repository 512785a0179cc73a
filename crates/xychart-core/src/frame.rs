// File: crates/xychart-core/src/frame.rs
// Summary: Columnar data frames: typed fields, field config and nullable values.
// Notes:
// - Frames are read-only inputs for one render pass. Nothing in the crate mutates
//   a field; per-series state (series index etc.) lives on `ScatterSeries`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Time,
    Number,
    String,
    Boolean,
    Other,
}

/// A single cell. Time values are epoch milliseconds stored as `Number`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Number(v) }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self { v.map(Value::Number).unwrap_or(Value::Null) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Text(v.to_string()) }
}

/// How a field picks its color(s).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldColorMode {
    /// One configured color for every value.
    Fixed,
    /// Next color of the classic palette, picked by series index.
    #[default]
    PaletteClassic,
    /// Color of the highest threshold step at or below the value.
    Thresholds,
    /// Green → yellow → red gradient over the field's value range.
    ContinuousGrYlRd,
    /// Light → dark blue gradient over the field's value range.
    ContinuousBlues,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldColor {
    #[serde(default)]
    pub mode: FieldColorMode,
    #[serde(default)]
    pub fixed_color: Option<String>,
}

/// One threshold step. The base step uses `f64::NEG_INFINITY` (`null` in JSON).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(default = "neg_infinity", deserialize_with = "de_threshold_value")]
    pub value: f64,
    pub color: String,
}

fn neg_infinity() -> f64 { f64::NEG_INFINITY }

fn de_threshold_value<'de, D: serde::Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NEG_INFINITY))
}

pub fn default_thresholds() -> Vec<Threshold> {
    vec![
        Threshold { value: f64::NEG_INFINITY, color: "green".into() },
        Threshold { value: 80.0, color: "red".into() },
    ]
}

/// What the scatter panel draws for a series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatterShow {
    #[default]
    Points,
    Lines,
    PointsAndLines,
    /// Lines, plus points while the series is small enough.
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineFill {
    #[default]
    Solid,
    Dash,
    Dot,
    Square,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default)]
    pub fill: LineFill,
    #[serde(default)]
    pub dash: Option<Vec<f32>>,
}

impl LineStyle {
    pub fn is_solid(&self) -> bool { self.fill == LineFill::Solid }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPlacement {
    #[default]
    Auto,
    Left,
    Right,
    Bottom,
    Top,
    Hidden,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HideFrom {
    #[serde(default)]
    pub viz: bool,
    #[serde(default)]
    pub legend: bool,
    #[serde(default)]
    pub tooltip: bool,
}

/// Fixed point size hint carried by a field's custom config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSizeHint {
    #[serde(default)]
    pub fixed: Option<f32>,
}

/// Panel-specific per-field options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterFieldConfig {
    #[serde(default)]
    pub show: ScatterShow,
    #[serde(default)]
    pub line_width: Option<f32>,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default)]
    pub point_size: Option<PointSizeHint>,
    #[serde(default)]
    pub axis_placement: AxisPlacement,
    #[serde(default)]
    pub axis_label: Option<String>,
    #[serde(default)]
    pub hide_from: HideFrom,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub decimals: Option<usize>,
    #[serde(default)]
    pub color: FieldColor,
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<Threshold>,
    #[serde(default)]
    pub custom: ScatterFieldConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    pub config: FieldConfig,
    pub values: Vec<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            field_type,
            config: FieldConfig { thresholds: default_thresholds(), ..FieldConfig::default() },
            values,
        }
    }

    /// Numeric field from plain numbers.
    pub fn number(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, FieldType::Number, values.into_iter().map(Value::Number).collect())
    }

    /// Time field from epoch milliseconds.
    pub fn time(name: impl Into<String>, millis: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, FieldType::Time, millis.into_iter().map(Value::Number).collect())
    }

    pub fn string(name: impl Into<String>, values: impl IntoIterator<Item = String>) -> Self {
        Self::new(name, FieldType::String, values.into_iter().map(Value::Text).collect())
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn number_at(&self, i: usize) -> Option<f64> {
        self.values.get(i).and_then(Value::as_f64)
    }

    /// Numeric copy of the values; nulls and non-numbers become `None`.
    pub fn numbers(&self) -> Vec<Option<f64>> {
        self.values.iter().map(Value::as_f64).collect()
    }

    /// Min and max over the finite numeric values.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in self.values.iter().filter_map(Value::as_f64) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo.is_finite() && hi.is_finite() { Some((lo, hi)) } else { None }
    }

    /// Last non-null numeric value.
    pub fn last_number(&self) -> Option<f64> {
        self.values.iter().rev().find_map(Value::as_f64)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub name: Option<String>,
    pub fields: Vec<Field>,
}

impl Frame {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { name: None, fields }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Row count, taken from the first field.
    pub fn len(&self) -> usize {
        self.fields.first().map(Field::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn field(&self, index: usize) -> Option<&Field> { self.fields.get(index) }
}

// File: crates/xychart-core/src/display.rs
// Summary: Per-field display processor: value -> formatted text + numeric + color.

use chrono::DateTime;
use skia_safe as skia;

use crate::color::{percent_in_range, ColorCalculator};
use crate::frame::{Field, FieldType, Value};
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayValue {
    pub text: String,
    pub numeric: Option<f64>,
    pub color: skia::Color,
}

/// Formats values of one field and colors them through the field's color mode.
#[derive(Clone, Debug)]
pub struct DisplayProcessor {
    field_type: FieldType,
    unit: Option<String>,
    decimals: Option<usize>,
    range: Option<(f64, f64)>,
    calc: ColorCalculator,
}

impl DisplayProcessor {
    pub fn for_field(field: &Field, theme: &Theme, series_index: usize) -> Self {
        Self {
            field_type: field.field_type,
            unit: field.config.unit.clone(),
            decimals: field.config.decimals,
            range: field.min_max(),
            calc: ColorCalculator::for_field(field, theme, series_index),
        }
    }

    pub fn display(&self, value: &Value) -> DisplayValue {
        let numeric = value.as_f64();
        let percent = numeric.map(|v| percent_in_range(v, self.range)).unwrap_or(0.0);
        DisplayValue {
            text: self.format(value),
            numeric,
            color: self.calc.color(numeric, percent),
        }
    }

    /// Text only, for axis tick labels.
    pub fn format_number(&self, v: f64) -> String {
        self.format(&Value::Number(v))
    }

    fn format(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Text(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(v) if self.field_type == FieldType::Time => format_time(*v),
            Value::Number(v) => {
                let text = format_decimal(*v, self.decimals);
                match self.unit.as_deref() {
                    None | Some("") | Some("none") => text,
                    Some("percent") | Some("%") => format!("{text}%"),
                    Some(unit) => format!("{text} {unit}"),
                }
            }
        }
    }
}

fn format_decimal(v: f64, decimals: Option<usize>) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    match decimals {
        Some(d) => format!("{v:.d$}"),
        None if v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
        None => {
            let s = format!("{v:.3}");
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

fn format_time(millis: f64) -> String {
    DateTime::from_timestamp_millis(millis as i64)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format!("{millis}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FieldColorMode;

    #[test]
    fn formats_with_unit_and_decimals() {
        let theme = Theme::dark();
        let mut f = Field::number("v", [1.0, 2.5]);
        f.config.unit = Some("ms".into());
        let d = DisplayProcessor::for_field(&f, &theme, 0);
        assert_eq!(d.display(&Value::Number(2.0)).text, "2 ms");
        assert_eq!(d.display(&Value::Number(2.125)).text, "2.125 ms");
        f.config.decimals = Some(1);
        f.config.unit = Some("percent".into());
        let d = DisplayProcessor::for_field(&f, &theme, 0);
        assert_eq!(d.format_number(12.34), "12.3%");
    }

    #[test]
    fn formats_time_as_utc() {
        let theme = Theme::dark();
        let f = Field::time("t", [0.0]);
        let d = DisplayProcessor::for_field(&f, &theme, 0);
        assert_eq!(d.display(&Value::Number(0.0)).text, "1970-01-01 00:00:00");
    }

    #[test]
    fn colors_by_value() {
        let theme = Theme::dark();
        let mut f = Field::number("v", [0.0, 100.0]);
        f.config.color.mode = FieldColorMode::Thresholds;
        let d = DisplayProcessor::for_field(&f, &theme, 0);
        assert_eq!(d.display(&Value::Number(0.0)).color, theme.color_by_name("green"));
        assert_eq!(d.display(&Value::Number(100.0)).color, theme.color_by_name("red"));
    }
}

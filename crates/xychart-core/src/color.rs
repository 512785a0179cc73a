// File: crates/xychart-core/src/color.rs
// Summary: CSS color parsing/formatting and per-field color calculators (fixed, palette, thresholds, gradients).

use skia_safe as skia;

use crate::frame::{Field, FieldColorMode, Threshold};
use crate::theme::Theme;

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
pub fn parse_css_color(s: &str) -> Option<skia::Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    let body = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |p: &str| p.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let (r, g, b) = (channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    let a = match parts.get(3) {
        Some(p) => (p.parse::<f32>().ok()?.clamp(0.0, 1.0) * 255.0).round() as u8,
        None => 255,
    };
    Some(skia::Color::from_argb(a, r, g, b))
}

fn parse_hex(hex: &str) -> Option<skia::Color> {
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok().map(|v| v * 17);
            Some(skia::Color::from_argb(255, nib(0)?, nib(1)?, nib(2)?))
        }
        6 => Some(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

/// Format as `rgba(r, g, b, a)` with alpha in 0..=1.
pub fn to_css(c: skia::Color) -> String {
    let a = (c.a() as f32 / 255.0 * 1000.0).round() / 1000.0;
    format!("rgba({}, {}, {}, {})", c.r(), c.g(), c.b(), a)
}

/// Same color with alpha replaced by `alpha` (0..=1).
pub fn alpha(c: skia::Color, alpha: f32) -> skia::Color {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    skia::Color::from_argb(a, c.r(), c.g(), c.b())
}

fn lerp(a: skia::Color, b: skia::Color, t: f64) -> skia::Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    skia::Color::from_argb(mix(a.a(), b.a()), mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

fn gradient(stops: &[skia::Color], percent: f64) -> skia::Color {
    match stops.len() {
        0 => skia::Color::from_argb(255, 128, 128, 128),
        1 => stops[0],
        n => {
            let scaled = percent.clamp(0.0, 1.0) * (n - 1) as f64;
            let i = (scaled.floor() as usize).min(n - 2);
            lerp(stops[i], stops[i + 1], scaled - i as f64)
        }
    }
}

impl FieldColorMode {
    /// By-value modes color each data point independently.
    pub fn is_by_value(&self) -> bool {
        matches!(
            self,
            FieldColorMode::Thresholds | FieldColorMode::ContinuousGrYlRd | FieldColorMode::ContinuousBlues
        )
    }
}

/// A field's color function of `(value, percent)`, resolved against a theme.
#[derive(Clone, Debug)]
pub enum ColorCalculator {
    Constant(skia::Color),
    Thresholds(Vec<(f64, skia::Color)>),
    Gradient(Vec<skia::Color>),
}

impl ColorCalculator {
    /// `series_index` picks the classic palette entry; it is ignored by other modes.
    pub fn for_field(field: &Field, theme: &Theme, series_index: usize) -> Self {
        let cfg = &field.config.color;
        match cfg.mode {
            FieldColorMode::Fixed => {
                let c = cfg
                    .fixed_color
                    .as_deref()
                    .map(|n| theme.color_by_name(n))
                    .unwrap_or_else(|| theme.palette_color(series_index));
                ColorCalculator::Constant(c)
            }
            FieldColorMode::PaletteClassic => ColorCalculator::Constant(theme.palette_color(series_index)),
            FieldColorMode::Thresholds => ColorCalculator::Thresholds(resolve_steps(&field.config.thresholds, theme)),
            FieldColorMode::ContinuousGrYlRd => ColorCalculator::Gradient(
                ["green", "yellow", "red"].iter().map(|n| theme.color_by_name(n)).collect(),
            ),
            FieldColorMode::ContinuousBlues => ColorCalculator::Gradient(
                ["light-blue", "dark-blue"].iter().map(|n| theme.color_by_name(n)).collect(),
            ),
        }
    }

    pub fn color(&self, value: Option<f64>, percent: f64) -> skia::Color {
        match self {
            ColorCalculator::Constant(c) => *c,
            ColorCalculator::Thresholds(steps) => {
                let v = value.unwrap_or(f64::NEG_INFINITY);
                steps
                    .iter()
                    .rev()
                    .find(|(at, _)| *at <= v)
                    .or_else(|| steps.first())
                    .map(|(_, c)| *c)
                    .unwrap_or(skia::Color::from_argb(255, 128, 128, 128))
            }
            ColorCalculator::Gradient(stops) => gradient(stops, percent),
        }
    }
}

fn resolve_steps(steps: &[Threshold], theme: &Theme) -> Vec<(f64, skia::Color)> {
    let mut out: Vec<(f64, skia::Color)> = steps.iter().map(|t| (t.value, theme.color_by_name(&t.color))).collect();
    out.sort_by(|a, b| a.0.total_cmp(&b.0));
    out
}

/// Where `value` sits in the field's range, 0..=1 (0 for an empty or flat range).
pub fn percent_in_range(value: f64, range: Option<(f64, f64)>) -> f64 {
    match range {
        Some((lo, hi)) if hi > lo => ((value - lo) / (hi - lo)).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// One color for a whole series driven by `field`. By-value modes use the
/// field's last value.
pub fn field_series_color(field: &Field, theme: &Theme, series_index: usize) -> skia::Color {
    let calc = ColorCalculator::for_field(field, theme, series_index);
    if !field.config.color.mode.is_by_value() {
        return calc.color(None, 0.0);
    }
    let last = field.last_number();
    let percent = last.map(|v| percent_in_range(v, field.min_max())).unwrap_or(0.0);
    calc.color(last, percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Field, FieldColor};

    #[test]
    fn parses_css_forms() {
        assert_eq!(parse_css_color("#fff"), Some(skia::Color::from_argb(255, 255, 255, 255)));
        assert_eq!(parse_css_color("#00ff0080"), Some(skia::Color::from_argb(0x80, 0, 255, 0)));
        assert_eq!(parse_css_color("rgba(255, 255, 255, 0.4)"), Some(skia::Color::from_argb(102, 255, 255, 255)));
        assert_eq!(parse_css_color("rgb(1,2,3)"), Some(skia::Color::from_argb(255, 1, 2, 3)));
        assert_eq!(parse_css_color("chartreuse"), None);
    }

    #[test]
    fn css_output_and_alpha() {
        let c = skia::Color::from_argb(255, 10, 20, 30);
        assert_eq!(to_css(alpha(c, 0.5)), "rgba(10, 20, 30, 0.502)");
    }

    #[test]
    fn thresholds_pick_highest_step_below_value() {
        let theme = Theme::dark();
        let mut f = Field::number("v", [0.0, 50.0, 100.0]);
        f.config.color = FieldColor { mode: FieldColorMode::Thresholds, fixed_color: None };
        let calc = ColorCalculator::for_field(&f, &theme, 0);
        assert_eq!(calc.color(Some(10.0), 0.0), theme.color_by_name("green"));
        assert_eq!(calc.color(Some(80.0), 0.0), theme.color_by_name("red"));
        assert_eq!(calc.color(None, 0.0), theme.color_by_name("green"));
    }

    #[test]
    fn gradient_endpoints() {
        let theme = Theme::dark();
        let mut f = Field::number("v", [0.0, 1.0]);
        f.config.color.mode = FieldColorMode::ContinuousGrYlRd;
        let calc = ColorCalculator::for_field(&f, &theme, 0);
        assert_eq!(calc.color(Some(0.0), 0.0), theme.color_by_name("green"));
        assert_eq!(calc.color(Some(1.0), 1.0), theme.color_by_name("red"));
        assert_eq!(calc.color(Some(0.5), 0.5), theme.color_by_name("yellow"));
    }

    #[test]
    fn series_color_uses_palette_by_index() {
        let theme = Theme::dark();
        let f = Field::number("v", [1.0]);
        assert_eq!(field_series_color(&f, &theme, 3), theme.palette_color(3));
    }
}

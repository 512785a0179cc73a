// File: crates/xychart-core/src/dims.rs
// Summary: Field lookup helpers (graphable test, selector matching, display names) and the quadratic size scale.

use std::f64::consts::PI;

use crate::frame::{Field, FieldType, Frame};
use crate::mapping::PointSizeConfig;

/// Numeric and not hidden from the visualization.
pub fn is_graphable(field: &Field) -> bool {
    field.field_type == FieldType::Number && !field.config.custom.hide_from.viz
}

/// Name shown for a field: configured display name, else the raw name. When
/// several frames share a field name the frame name is appended.
pub fn display_name(field: &Field, frame: &Frame, frames: &[Frame]) -> String {
    if let Some(name) = field.config.display_name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    let shared = frames
        .iter()
        .filter(|f| !std::ptr::eq(*f, frame))
        .any(|f| f.fields.iter().any(|other| other.name == field.name));
    match (&frame.name, shared) {
        (Some(frame_name), true) => format!("{} {}", field.name, frame_name),
        _ => field.name.clone(),
    }
}

/// Index of the field matching `selector` by display name, then by raw name.
/// Empty or absent selectors never match.
pub fn find_field_index(frame: &Frame, frames: &[Frame], selector: Option<&str>) -> Option<usize> {
    let selector = selector.filter(|s| !s.is_empty())?;
    frame
        .fields
        .iter()
        .position(|f| display_name(f, frame, frames) == selector)
        .or_else(|| frame.fields.iter().position(|f| f.name == selector))
}

/// Maps field values to pixel diameters so that circle *area* grows linearly
/// with the value between `min` and `max` px.
#[derive(Clone, Debug)]
pub struct QuadraticSizeScale {
    fixed: f64,
    min_area: f64,
    delta_area: f64,
    range: Option<(f64, f64)>,
}

impl QuadraticSizeScale {
    pub fn new(field: &Field, config: &PointSizeConfig) -> Self {
        let (lo, hi) = (config.min.min(config.max) as f64, config.min.max(config.max) as f64);
        let area = |d: f64| PI * (d / 2.0).powi(2);
        Self {
            fixed: config.fixed as f64,
            min_area: area(lo),
            delta_area: area(hi) - area(lo),
            range: field.min_max(),
        }
    }

    /// Diameter in CSS px; null values use the fixed size, a flat range the minimum.
    pub fn get(&self, value: Option<f64>) -> f32 {
        let Some(v) = value else { return self.fixed as f32 };
        let percent = match self.range {
            Some((lo, hi)) if hi > lo => ((v - lo) / (hi - lo)).clamp(0.0, 1.0),
            _ => 0.0,
        };
        let area = self.min_area + self.delta_area * percent;
        ((area / PI).sqrt() * 2.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FieldConfig;

    fn frame() -> Frame {
        let mut hidden = Field::number("hidden", [1.0]);
        hidden.config.custom.hide_from.viz = true;
        let renamed = Field::number("raw", [2.0]).with_config(FieldConfig {
            display_name: Some("Pretty".into()),
            ..FieldConfig::default()
        });
        Frame::new(vec![Field::string("s", ["a".to_string()]), hidden, renamed])
    }

    #[test]
    fn graphable_excludes_strings_and_hidden() {
        let f = frame();
        let graphable: Vec<bool> = f.fields.iter().map(is_graphable).collect();
        assert_eq!(graphable, vec![false, false, true]);
    }

    #[test]
    fn selector_matches_display_then_raw_name() {
        let f = frame();
        let frames = std::slice::from_ref(&f);
        assert_eq!(find_field_index(&f, frames, Some("Pretty")), Some(2));
        assert_eq!(find_field_index(&f, frames, Some("raw")), Some(2));
        assert_eq!(find_field_index(&f, frames, Some("")), None);
        assert_eq!(find_field_index(&f, frames, None), None);
    }

    #[test]
    fn shared_names_get_frame_suffix() {
        let a = Frame::new(vec![Field::number("v", [1.0])]).with_name("A");
        let b = Frame::new(vec![Field::number("v", [1.0])]).with_name("B");
        let frames = vec![a, b];
        assert_eq!(display_name(&frames[0].fields[0], &frames[0], &frames), "v A");
        assert_eq!(display_name(&frames[1].fields[0], &frames[1], &frames), "v B");
    }

    #[test]
    fn quadratic_scale_bounds() {
        let f = Field::number("size", [0.0, 50.0, 100.0]);
        let s = QuadraticSizeScale::new(&f, &PointSizeConfig { field: None, fixed: 5.0, min: 4.0, max: 20.0 });
        assert!((s.get(Some(0.0)) - 4.0).abs() < 1e-4);
        assert!((s.get(Some(100.0)) - 20.0).abs() < 1e-4);
        let mid = s.get(Some(50.0));
        // area-linear: midpoint diameter = sqrt((4^2 + 20^2) / 2)
        assert!((mid as f64 - ((16.0f64 + 400.0) / 2.0).sqrt()).abs() < 1e-3);
        assert_eq!(s.get(None), 5.0);
    }
}

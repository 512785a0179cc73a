// File: crates/xychart-core/src/facet.rs
// Summary: Faceted data builder: column-major x/y/size/color/alpha arrays per series.

use log::debug;
use skia_safe as skia;

use crate::color::alpha;
use crate::frame::Frame;
use crate::series::ScatterSeries;
use crate::theme::Theme;

/// Alpha applied to point colors for the circle fill.
pub const FILL_ALPHA: f32 = 0.5;

/// Renderer input for one series. All five vectors have the frame's length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FacetSeries {
    pub xs: Vec<Option<f64>>,
    pub ys: Vec<Option<f64>>,
    /// Diameters in CSS px.
    pub sizes: Vec<f32>,
    pub colors: Vec<skia::Color>,
    pub alpha_colors: Vec<skia::Color>,
}

impl FacetSeries {
    pub fn len(&self) -> usize { self.xs.len() }
    pub fn is_empty(&self) -> bool { self.xs.is_empty() }
}

/// Per-series facets in resolution order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FacetedData {
    pub series: Vec<FacetSeries>,
}

impl FacetedData {
    /// Facets for a plot slot. Slot 0 is the shared X axis and has none.
    pub fn slot(&self, slot: usize) -> Option<&FacetSeries> {
        slot.checked_sub(1).and_then(|i| self.series.get(i))
    }

    pub fn is_empty(&self) -> bool { self.series.is_empty() }
}

/// Build renderer-ready arrays for every series from the current frames.
/// A series whose frame has gone missing yields empty facets.
pub fn build_faceted_data(series: &[ScatterSeries], frames: &[Frame], theme: &Theme) -> FacetedData {
    let out = series.iter().map(|s| build_series(s, frames, theme)).collect::<Vec<_>>();
    debug!(
        "built facets for {} series ({} points)",
        out.len(),
        out.iter().map(FacetSeries::len).sum::<usize>()
    );
    FacetedData { series: out }
}

fn build_series(s: &ScatterSeries, frames: &[Frame], theme: &Theme) -> FacetSeries {
    let (Some(frame), Some(x), Some(y)) = (s.frame(frames), s.x_field(frames), s.y_field(frames)) else {
        return FacetSeries::default();
    };
    let len = frame.len();
    let mut xs = x.numbers();
    let mut ys = y.numbers();
    xs.resize(len, None);
    ys.resize(len, None);

    let mut colors = s.point_colors(frames, theme).as_array(len);
    colors.resize(len, s.line_color);
    let mut sizes = s.point_sizes(frames).as_array(len);
    sizes.resize(len, s.hints.point_size.fixed);
    let alpha_colors = colors.iter().map(|c| alpha(*c, FILL_ALPHA)).collect();
    FacetSeries { xs, ys, sizes, colors, alpha_colors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::DimensionMapping;
    use crate::resolve::resolve;
    use crate::frame::Field;

    #[test]
    fn slot_zero_is_the_x_axis() {
        let data = FacetedData { series: vec![FacetSeries::default()] };
        assert!(data.slot(0).is_none());
        assert!(data.slot(1).is_some());
        assert!(data.slot(2).is_none());
    }

    #[test]
    fn missing_frame_gives_empty_facets() {
        let theme = Theme::dark();
        let frames = vec![Frame::new(vec![Field::number("x", [1.0]), Field::number("y", [2.0])])];
        let series = resolve(&DimensionMapping::default(), &frames, &theme).expect("resolve");
        let data = build_faceted_data(&series, &[], &theme);
        assert_eq!(data.series.len(), 1);
        assert!(data.series[0].is_empty());
    }
}

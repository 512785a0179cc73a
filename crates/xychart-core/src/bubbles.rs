// File: crates/xychart-core/src/bubbles.rs
// Summary: Bubble/line path renderer for one scatter series on a Skia canvas; registers hit rects.

use log::trace;
use skia_safe as skia;

use crate::color::alpha;
use crate::facet::{FacetSeries, FILL_ALPHA};
use crate::frame::LineFill;
use crate::geometry::BBox;
use crate::quadtree::{HitRect, Quadtree};
use crate::scale::Scale;
use crate::series::{ScatterSeries, VisibilityMode, DEFAULT_POINT_SIZE};

/// `Auto` point visibility turns points off at this many points.
pub const AUTO_POINTS_THRESHOLD: usize = 1000;
/// Circle outline width in device px.
pub const POINT_STROKE_WIDTH: f32 = 1.0;
/// Dash pattern for non-solid lines without an explicit one, in CSS px.
pub const DEFAULT_DASH: [f32; 2] = [10.0, 10.0];

/// Everything the renderer needs about the plot besides the series itself.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext {
    pub dpr: f32,
    /// Plotting box in device px.
    pub bbox: BBox,
    pub x_scale: Scale,
    pub y_scale: Scale,
}

/// Series-level paint colors used when points are not colored by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPaint {
    pub fill: skia::Color,
    pub stroke: skia::Color,
}

impl SeriesPaint {
    /// Fill is the first point color at the fill alpha; stroke is the series color.
    pub fn for_series(series: &ScatterSeries, facet: &FacetSeries) -> Self {
        let fill = facet
            .alpha_colors
            .first()
            .copied()
            .unwrap_or_else(|| alpha(series.line_color, FILL_ALPHA));
        Self { fill, stroke: series.line_color }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Points inside the visibility bounds (drawn and/or joined by the line).
    pub drawn: usize,
    /// Points with a null coordinate or outside the bounds.
    pub skipped: usize,
}

pub struct BubbleRenderer;

impl BubbleRenderer {
    /// Draw `facet` for plot `slot`, clipped to the plotting box. Every drawn
    /// circle is registered in `hits` relative to the box origin.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_series(
        canvas: &skia::Canvas,
        ctx: &RenderContext,
        slot: usize,
        series: &ScatterSeries,
        facet: &FacetSeries,
        paint: SeriesPaint,
        hits: &mut Quadtree,
    ) -> DrawStats {
        let len = facet.len();
        let mut show_line = series.show_line;
        let show_points = match series.show_points {
            VisibilityMode::Always => true,
            VisibilityMode::Auto => len < AUTO_POINTS_THRESHOLD,
            VisibilityMode::Never => false,
        };
        // always show something
        if !show_points && !show_line {
            show_line = true;
        }

        let dpr = ctx.dpr;
        let bbox = ctx.bbox;
        let (xdim, ydim) = (bbox.width, bbox.height);

        let max_size = series.hints.point_size.max.max(0.0) * dpr;
        let (x_lo, x_hi) = ordered(ctx.x_scale.pos_to_val(-max_size / 2.0, xdim), ctx.x_scale.pos_to_val(xdim + max_size / 2.0, xdim));
        let (y_lo, y_hi) = ordered(ctx.y_scale.pos_to_val(ydim + max_size / 2.0, ydim), ctx.y_scale.pos_to_val(-max_size / 2.0, ydim));

        canvas.save();
        canvas.clip_rect(bbox.to_rect(), skia::ClipOp::Intersect, true);

        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_style(skia::paint::Style::Fill);
        fill.set_color(paint.fill);

        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        stroke.set_stroke_width(POINT_STROKE_WIDTH);
        stroke.set_color(paint.stroke);

        let by_value = series.color_by_value();
        let mut line = skia::Path::new();
        let mut started = false;
        let mut stats = DrawStats::default();

        for i in 0..len {
            let x = facet.xs.get(i).copied().flatten();
            let y = facet.ys.get(i).copied().flatten();
            let (Some(x), Some(y)) = (x, y) else {
                stats.skipped += 1;
                continue;
            };
            if x < x_lo || x > x_hi || y < y_lo || y > y_hi {
                stats.skipped += 1;
                continue;
            }
            let cx = ctx.x_scale.val_to_pos(x, xdim, bbox.left);
            let cy = ctx.y_scale.val_to_pos(y, ydim, bbox.top);

            if show_line {
                if started {
                    line.line_to((cx, cy));
                } else {
                    line.move_to((cx, cy));
                    started = true;
                }
            }

            if show_points {
                let size = facet.sizes.get(i).copied().unwrap_or(DEFAULT_POINT_SIZE) * dpr;
                if by_value {
                    if let (Some(a), Some(c)) = (facet.alpha_colors.get(i), facet.colors.get(i)) {
                        fill.set_color(*a);
                        stroke.set_color(*c);
                    }
                }
                canvas.draw_circle((cx, cy), size / 2.0, &fill);
                canvas.draw_circle((cx, cy), size / 2.0, &stroke);
                hits.insert(HitRect {
                    x: cx - size / 2.0 - POINT_STROKE_WIDTH / 2.0 - bbox.left,
                    y: cy - size / 2.0 - POINT_STROKE_WIDTH / 2.0 - bbox.top,
                    w: size + POINT_STROKE_WIDTH,
                    h: size + POINT_STROKE_WIDTH,
                    series_index: slot,
                    data_index: i,
                });
            }
            stats.drawn += 1;
        }

        if show_line && started {
            canvas.draw_path(&line, &line_paint(series, dpr));
        }

        canvas.restore();
        trace!(
            "series {} (slot {slot}): drawn={} skipped={} points={show_points} line={show_line}",
            series.name, stats.drawn, stats.skipped
        );
        stats
    }
}

fn line_paint(series: &ScatterSeries, dpr: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_color(series.line_color);
    paint.set_stroke_width(series.line_width * dpr);

    let style = &series.line_style;
    if !style.is_solid() {
        if style.fill == LineFill::Dot {
            paint.set_stroke_cap(skia::paint::Cap::Round);
        }
        let dash: Vec<f32> = style
            .dash
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DASH.to_vec())
            .into_iter()
            .map(|v| v * dpr)
            .collect();
        paint.set_path_effect(skia::PathEffect::dash(&dash, 0.0));
    }
    paint
}

#[inline]
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

// File: crates/xychart-core/src/chart.rs
// Summary: ScatterChart host: option resolution, headless Skia rendering pipeline and pointer plumbing.

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use skia_safe as skia;

use crate::axis::{Axis, AxisLayout, AxisSide};
use crate::bubbles::{BubbleRenderer, DrawStats, RenderContext, SeriesPaint};
use crate::error::ConfigError;
use crate::facet::{build_faceted_data, FacetedData};
use crate::frame::Frame;
use crate::geometry::BBox;
use crate::interaction::{ChartHost, HoverEvent, InteractionController};
use crate::mapping::XyChartOptions;
use crate::resolve::resolve;
use crate::series::ScatterSeries;
use crate::theme::Theme;
use crate::types::{Insets, DPR, HEIGHT, WIDTH};

#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Canvas size in CSS px; the surface is `width * dpr` by `height * dpr`.
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub dpr: f32,
    /// Axis titles, tick labels and the error message. Off for pixel tests.
    pub draw_labels: bool,
    /// Chrome colors (background, grid, axes). Series colors come from the chart's theme.
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            dpr: DPR,
            draw_labels: true,
            theme: Theme::default(),
        }
    }
}

/// Resolution outcome shown by the panel: series, or the message that
/// replaces the plot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterPanel {
    pub error: Option<String>,
    pub series: Vec<ScatterSeries>,
}

pub fn prep_scatter(options: &XyChartOptions, frames: &[Frame], theme: &Theme) -> ScatterPanel {
    match resolve(&options.mapping(), frames, theme) {
        Ok(series) => ScatterPanel { error: None, series },
        Err(e) => {
            warn!("scatter config: {e}");
            ScatterPanel { error: Some(e.to_string()), series: Vec::new() }
        }
    }
}

/// Faceted arrays for the panel; empty when it carries an error or there is no data.
pub fn prep_data(panel: &ScatterPanel, frames: &[Frame], theme: &Theme) -> FacetedData {
    if panel.error.is_some() || frames.is_empty() {
        return FacetedData::default();
    }
    build_faceted_data(&panel.series, frames, theme)
}

/// Last draw geometry, needed to map pointer positions.
#[derive(Clone, Copy, Debug)]
struct Layout {
    bbox: BBox,
    insets: Insets,
    dpr: f32,
}

pub struct ScatterChart {
    options: XyChartOptions,
    frames: Vec<Frame>,
    theme: Theme,
    panel: ScatterPanel,
    facets: FacetedData,
    axes: Option<AxisLayout>,
    interaction: InteractionController,
    layout: Option<Layout>,
    cursor: Option<(f32, f32)>,
    /// Page position of the canvas, added to hover screen coordinates.
    pub page_origin: (f32, f32),
}

impl ScatterChart {
    pub fn new(options: XyChartOptions, frames: Vec<Frame>, theme: Theme) -> Result<Self, ConfigError> {
        let series = resolve(&options.mapping(), &frames, &theme)?;
        let mut chart = Self {
            options,
            frames,
            theme,
            panel: ScatterPanel { error: None, series },
            facets: FacetedData::default(),
            axes: None,
            interaction: InteractionController::new(|_| {}),
            layout: None,
            cursor: None,
            page_origin: (0.0, 0.0),
        };
        chart.rebuild_facets();
        Ok(chart)
    }

    /// Replace the interaction controller (hover callback, click handler).
    pub fn with_interaction(mut self, interaction: InteractionController) -> Self {
        self.interaction = interaction;
        self
    }

    /// Register the click listener on the element hosting the chart.
    pub fn attach(&mut self, host: &mut dyn ChartHost) {
        self.interaction.attach(host);
    }

    /// Tear down: remove the click listener, close any open tooltip and
    /// forget the cursor.
    pub fn detach(&mut self, host: &mut dyn ChartHost) {
        self.interaction.detach(host);
        self.cursor = None;
    }

    /// Swap in new data. On a config error the chart keeps rendering the
    /// error panel until frames resolve again.
    pub fn set_frames(&mut self, frames: Vec<Frame>) -> Result<(), ConfigError> {
        self.frames = frames;
        let result = resolve(&self.options.mapping(), &self.frames, &self.theme);
        let out = match result {
            Ok(series) => {
                self.panel = ScatterPanel { error: None, series };
                Ok(())
            }
            Err(e) => {
                self.panel = ScatterPanel { error: Some(e.to_string()), series: Vec::new() };
                Err(e)
            }
        };
        self.rebuild_facets();
        out
    }

    fn rebuild_facets(&mut self) {
        self.facets = prep_data(&self.panel, &self.frames, &self.theme);
        self.axes = AxisLayout::build(&self.panel.series, &self.frames, &self.facets, &self.theme);
    }

    pub fn series(&self) -> &[ScatterSeries] { &self.panel.series }
    pub fn error(&self) -> Option<&str> { self.panel.error.as_deref() }
    pub fn frames(&self) -> &[Frame] { &self.frames }
    pub fn facets(&self) -> &FacetedData { &self.facets }
    pub fn axes(&self) -> Option<&AxisLayout> { self.axes.as_ref() }
    pub fn interaction(&self) -> &InteractionController { &self.interaction }
    pub fn interaction_mut(&mut self) -> &mut InteractionController { &mut self.interaction }

    /// Draw onto a canvas sized `opts.width * dpr` by `opts.height * dpr`.
    /// Rebuilds the hit quadtree from scratch.
    pub fn draw(&mut self, canvas: &skia::Canvas, opts: &RenderOptions) -> DrawStats {
        let dpr = opts.dpr.max(0.1);
        let bbox = BBox::from_canvas(opts.width, opts.height, &opts.insets, dpr);
        self.layout = Some(Layout { bbox, insets: opts.insets, dpr });

        canvas.clear(opts.theme.background);
        self.interaction.begin_draw(bbox.width, bbox.height);
        draw_grid(canvas, &bbox, &opts.theme);

        if let Some(message) = &self.panel.error {
            if opts.draw_labels {
                draw_message(canvas, &bbox, message, dpr, &opts.theme);
            }
            return DrawStats::default();
        }
        let Some(axes) = &self.axes else {
            return DrawStats::default();
        };
        draw_axes(canvas, &bbox, axes, dpr, opts);

        let mut total = DrawStats::default();
        for s in self.panel.series.iter().filter(|s| s.show) {
            let Some(facet) = self.facets.slot(s.slot()) else { continue };
            let ctx = RenderContext {
                dpr,
                bbox,
                x_scale: axes.x.scale,
                y_scale: axes.y_scale_for(s, &self.frames),
            };
            let paint = SeriesPaint::for_series(s, facet);
            let stats = BubbleRenderer::draw_series(canvas, &ctx, s.slot(), s, facet, paint, self.interaction.hits_mut());
            total.drawn += stats.drawn;
            total.skipped += stats.skipped;
        }
        // re-resolve against the rects drawn this frame
        if self.cursor.is_some() {
            self.interaction.data_index(1, self.cursor, dpr);
        }
        self.draw_cursor_point(canvas, &bbox, dpr);
        debug!("drew {} series: {} points, {} skipped", self.panel.series.len(), total.drawn, total.skipped);
        total
    }

    fn draw_cursor_point(&self, canvas: &skia::Canvas, bbox: &BBox, dpr: f32) {
        let Some(h) = self.interaction.hovered() else { return };
        let point = self.interaction.highlight(h.series_index, dpr);
        if point.size <= 0.0 {
            return;
        }
        let (cx, cy) = h.center();
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_color(point.fill);
        canvas.draw_circle((bbox.left + cx, bbox.top + cy), point.size * dpr / 2.0, &paint);
    }

    /// Pointer moved to `pos` (CSS px relative to the canvas), or left it.
    /// Resolves the hovered point for every slot and dispatches hover.
    pub fn pointer_move(&mut self, pos: Option<(f32, f32)>) -> Option<HoverEvent> {
        let layout = self.layout?;
        let cursor = pos.map(|(x, y)| (x - layout.insets.left as f32, y - layout.insets.top as f32));
        self.cursor = cursor;

        let slots = self.panel.series.len();
        let mut idxs = vec![None; slots + 1];
        for (slot, idx) in idxs.iter_mut().enumerate().skip(1) {
            *idx = self.interaction.data_index(slot, cursor, layout.dpr);
        }
        let (cx, cy) = cursor.unwrap_or((0.0, 0.0));
        let over = (
            self.page_origin.0 + layout.insets.left as f32,
            self.page_origin.1 + layout.insets.top as f32,
        );
        self.interaction.set_legend(&idxs, (cx, cy), over);

        let hovered = self.interaction.hovered()?;
        Some(HoverEvent {
            series_index: hovered.series_index - 1,
            data_index: hovered.data_index,
            screen_x: over.0 + cx,
            screen_y: over.1 + cy,
        })
    }

    pub fn pointer_leave(&mut self) {
        self.pointer_move(None);
    }

    /// CSS-px canvas position of a data point, as drawn in the last frame.
    pub fn point_position(&self, series_index: usize, data_index: usize) -> Option<(f32, f32)> {
        let layout = self.layout?;
        let axes = self.axes.as_ref()?;
        let s = self.panel.series.get(series_index)?;
        let facet = self.facets.slot(s.slot())?;
        let (x, y) = (facet.xs.get(data_index).copied()??, facet.ys.get(data_index).copied()??);
        let bbox = layout.bbox;
        let px = axes.x.scale.val_to_pos(x, bbox.width, bbox.left);
        let py = axes.y_scale_for(s, &self.frames).val_to_pos(y, bbox.height, bbox.top);
        Some((px / layout.dpr, py / layout.dpr))
    }

    fn render_surface(&mut self, opts: &RenderOptions) -> Result<skia::Surface> {
        let (w, h) = device_size(opts);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface {w}x{h}"))?;
        self.draw(surface.canvas(), opts);
        Ok(surface)
    }

    /// Render into a tightly packed RGBA8 buffer. Returns `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&mut self, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = self.render_surface(opts)?;
        let (w, h) = device_size(opts);
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("read pixels failed");
        }
        Ok((pixels, w, h, stride))
    }

    pub fn render_to_png_bytes(&mut self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.render_surface(opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(&mut self, opts: &RenderOptions, output_png_path: impl AsRef<Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

fn device_size(opts: &RenderOptions) -> (i32, i32) {
    let dpr = opts.dpr.max(0.1);
    ((opts.width as f32 * dpr).round() as i32, (opts.height as f32 * dpr).round() as i32)
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, b: &BBox, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    for x in crate::axis::linspace(b.left as f64, b.right() as f64, 10) {
        canvas.draw_line((x as f32, b.top), (x as f32, b.bottom()), &paint);
    }
    for y in crate::axis::linspace(b.top as f64, b.bottom() as f64, 6) {
        canvas.draw_line((b.left, y as f32), (b.right(), y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, b: &BBox, axes: &AxisLayout, dpr: f32, opts: &RenderOptions) {
    let theme = &opts.theme;
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5 * dpr);

    let mut text = skia::Paint::default();
    text.set_anti_alias(true);
    let mut font = skia::Font::default();

    for axis in std::iter::once(&axes.x).chain(axes.y.iter()).filter(|a| a.show) {
        let (from, to) = axis_line(b, axis.side);
        canvas.draw_line(from, to, &axis_paint);
        if !opts.draw_labels {
            continue;
        }
        font.set_size(11.0 * dpr);
        text.set_color(theme.tick);
        for (v, label) in axis.ticks(5) {
            let pos = match axis.side {
                AxisSide::Bottom | AxisSide::Top => axis.scale.val_to_pos(v, b.width, b.left),
                AxisSide::Left | AxisSide::Right => axis.scale.val_to_pos(v, b.height, b.top),
            };
            canvas.draw_str(&label, tick_anchor(b, axis.side, pos, dpr), &font, &text);
        }
        font.set_size(14.0 * dpr);
        text.set_color(theme.axis_label);
        canvas.draw_str(&axis.label, title_anchor(b, axis, dpr), &font, &text);
    }
}

fn axis_line(b: &BBox, side: AxisSide) -> ((f32, f32), (f32, f32)) {
    match side {
        AxisSide::Bottom => ((b.left, b.bottom()), (b.right(), b.bottom())),
        AxisSide::Top => ((b.left, b.top), (b.right(), b.top)),
        AxisSide::Left => ((b.left, b.top), (b.left, b.bottom())),
        AxisSide::Right => ((b.right(), b.top), (b.right(), b.bottom())),
    }
}

fn tick_anchor(b: &BBox, side: AxisSide, pos: f32, dpr: f32) -> (f32, f32) {
    match side {
        AxisSide::Bottom => (pos - 8.0 * dpr, b.bottom() + 16.0 * dpr),
        AxisSide::Top => (pos - 8.0 * dpr, b.top - 6.0 * dpr),
        AxisSide::Left => (b.left - 48.0 * dpr, pos + 4.0 * dpr),
        AxisSide::Right => (b.right() + 6.0 * dpr, pos + 4.0 * dpr),
    }
}

fn title_anchor(b: &BBox, axis: &Axis, dpr: f32) -> (f32, f32) {
    match axis.side {
        AxisSide::Bottom => (b.right() - 80.0 * dpr, b.bottom() + 36.0 * dpr),
        AxisSide::Top => (b.right() - 80.0 * dpr, b.top - 20.0 * dpr),
        AxisSide::Left => (b.left - 64.0 * dpr, b.top - 8.0 * dpr),
        AxisSide::Right => (b.right() - 40.0 * dpr, b.top - 8.0 * dpr),
    }
}

fn draw_message(canvas: &skia::Canvas, b: &BBox, message: &str, dpr: f32, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(theme.axis_label);
    let mut font = skia::Font::default();
    font.set_size(16.0 * dpr);
    canvas.draw_str(message, (b.left + 16.0 * dpr, b.top + b.height / 2.0), &font, &paint);
}

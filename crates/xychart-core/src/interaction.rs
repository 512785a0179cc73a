// File: crates/xychart-core/src/interaction.rs
// Summary: Cursor -> data index resolution over the hit quadtree, hover/tooltip dispatch and click wiring.
// Notes:
// - Cursor positions are CSS px relative to the plotting area; the quadtree
//   stores device px, so every lookup multiplies by dpr first.
// - `data_index` recomputes the hovered rect only for slot 1; other slots
//   read the cached result of that pass.

use std::fmt;
use std::rc::Rc;

use log::debug;
use skia_safe as skia;

use crate::quadtree::{point_within, HitRect, Quadtree};

/// Fill of the enlarged point under the cursor, rgba(255, 255, 255, 0.4).
pub const CURSOR_POINT_FILL: skia::Color = skia::Color::new(0x66FF_FFFF);

/// Payload handed to the hover callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverEvent {
    /// Index into the resolved scatter series (slot - 1).
    pub series_index: usize,
    pub data_index: usize,
    /// Cursor position in page coordinates.
    pub screen_x: f32,
    pub screen_y: f32,
}

/// Highlight point drawn at the cursor for one slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorPoint {
    /// Diameter in CSS px; 0 hides it.
    pub size: f32,
    pub fill: skia::Color,
}

pub type ListenerId = u64;

/// The element hosting the chart. Only click listeners are needed.
pub trait ChartHost {
    fn add_click_listener(&mut self, handler: Rc<dyn Fn()>) -> ListenerId;
    fn remove_click_listener(&mut self, id: ListenerId);
}

pub struct InteractionController {
    hits: Quadtree,
    hovered: Option<HitRect>,
    tooltip_open: bool,
    on_hover: Box<dyn FnMut(Option<HoverEvent>)>,
    on_click: Option<Rc<dyn Fn()>>,
    listener: Option<ListenerId>,
}

impl fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("hits", &self.hits.len())
            .field("hovered", &self.hovered)
            .field("tooltip_open", &self.tooltip_open)
            .field("listener", &self.listener)
            .finish()
    }
}

impl InteractionController {
    pub fn new(on_hover: impl FnMut(Option<HoverEvent>) + 'static) -> Self {
        Self {
            hits: Quadtree::new(0.0, 0.0, 0.0, 0.0),
            hovered: None,
            tooltip_open: false,
            on_hover: Box::new(on_hover),
            on_click: None,
            listener: None,
        }
    }

    /// Handler run on clicks on the host element and when an open tooltip is
    /// force-closed.
    pub fn with_click_handler(mut self, on_click: Rc<dyn Fn()>) -> Self {
        self.on_click = Some(on_click);
        self
    }

    /// Register the click handler on the host. Repeated calls keep one listener.
    pub fn attach(&mut self, host: &mut dyn ChartHost) {
        if self.listener.is_some() {
            return;
        }
        if let Some(handler) = &self.on_click {
            self.listener = Some(host.add_click_listener(handler.clone()));
        }
    }

    /// Remove the click listener and force-close an open tooltip.
    pub fn detach(&mut self, host: &mut dyn ChartHost) {
        if let Some(id) = self.listener.take() {
            host.remove_click_listener(id);
        }
        self.close_popup();
    }

    pub fn is_attached(&self) -> bool { self.listener.is_some() }

    /// Start of a draw cycle: close any open popup, forget the hovered rect,
    /// then size and empty the quadtree for a `width x height` (device px)
    /// plotting box.
    pub fn begin_draw(&mut self, width: f32, height: f32) {
        self.close_popup();
        self.hovered = None;
        if self.hits.bounds() != (0.0, 0.0, width, height) {
            self.hits.reset(0.0, 0.0, width, height);
        } else {
            self.hits.clear();
        }
    }

    /// Quadtree the renderer registers drawn points into.
    pub fn hits_mut(&mut self) -> &mut Quadtree { &mut self.hits }

    pub fn hits(&self) -> &Quadtree { &self.hits }

    pub fn hovered(&self) -> Option<HitRect> { self.hovered }

    /// Data index under the cursor for `slot`, if the hovered point belongs to it.
    pub fn data_index(&mut self, slot: usize, cursor: Option<(f32, f32)>, dpr: f32) -> Option<usize> {
        if slot == 1 {
            self.hovered = cursor.and_then(|(x, y)| self.closest(x * dpr, y * dpr));
        }
        self.hovered.filter(|h| h.series_index == slot).map(|h| h.data_index)
    }

    fn closest(&self, cx: f32, cy: f32) -> Option<HitRect> {
        let mut best: Option<HitRect> = None;
        let mut dist = f32::INFINITY;
        self.hits.query(cx, cy, 1.0, 1.0, |o| {
            if !point_within(cx, cy, o.x, o.y, o.x + o.w, o.y + o.h) {
                return;
            }
            let (ocx, ocy) = o.center();
            let d = ((ocx - cx).powi(2) + (ocy - cy).powi(2)).sqrt();
            // inside the circle, not just its box
            if d <= o.w / 2.0 && d < dist {
                dist = d;
                best = Some(*o);
            }
        });
        best
    }

    /// Cursor highlight for `slot`, sized to the hovered circle.
    pub fn highlight(&self, slot: usize, dpr: f32) -> CursorPoint {
        let size = match self.hovered {
            Some(h) if h.series_index == slot => h.w / dpr,
            _ => 0.0,
        };
        CursorPoint { size, fill: CURSOR_POINT_FILL }
    }

    /// Dispatch hover for the first slot with a resolved index. `idxs[0]` is
    /// the X facet. `over_origin` is the page position of the plotting area.
    pub fn set_legend(&mut self, idxs: &[Option<usize>], cursor: (f32, f32), over_origin: (f32, f32)) {
        if self.tooltip_open {
            if idxs.iter().skip(1).all(Option::is_none) {
                // moved off every point
                self.tooltip_open = false;
                (self.on_hover)(None);
            }
            return;
        }
        let first = idxs.iter().enumerate().skip(1).find_map(|(slot, idx)| idx.map(|i| (slot, i)));
        match first {
            Some((slot, data_index)) => (self.on_hover)(Some(HoverEvent {
                series_index: slot - 1,
                data_index,
                screen_x: over_origin.0 + cursor.0,
                screen_y: over_origin.1 + cursor.1,
            })),
            None => (self.on_hover)(None),
        }
    }

    /// The host pinned (or unpinned) the tooltip.
    pub fn set_tooltip_open(&mut self, open: bool) {
        self.tooltip_open = open;
    }

    pub fn is_tooltip_open(&self) -> bool { self.tooltip_open }

    fn close_popup(&mut self) {
        if !self.tooltip_open {
            return;
        }
        debug!("closing open tooltip");
        self.tooltip_open = false;
        (self.on_hover)(None);
        if let Some(on_click) = &self.on_click {
            on_click();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<Option<HoverEvent>>>>, InteractionController) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        (log, InteractionController::new(move |e| sink.borrow_mut().push(e)))
    }

    fn circle(cx: f32, cy: f32, d: f32, slot: usize, i: usize) -> HitRect {
        HitRect { x: cx - d / 2.0 - 0.5, y: cy - d / 2.0 - 0.5, w: d + 1.0, h: d + 1.0, series_index: slot, data_index: i }
    }

    #[test]
    fn corner_of_box_is_not_a_hit() {
        let (_, mut ctl) = recorder();
        ctl.begin_draw(100.0, 100.0);
        ctl.hits_mut().insert(circle(50.0, 50.0, 10.0, 1, 0));
        assert_eq!(ctl.data_index(1, Some((50.0, 50.0)), 1.0), Some(0));
        // inside the box, outside the radius
        assert_eq!(ctl.data_index(1, Some((45.0, 45.0)), 1.0), None);
    }

    #[test]
    fn nearest_center_wins_and_other_slots_read_cache() {
        let (_, mut ctl) = recorder();
        ctl.begin_draw(100.0, 100.0);
        ctl.hits_mut().insert(circle(50.0, 50.0, 20.0, 1, 0));
        ctl.hits_mut().insert(circle(54.0, 50.0, 20.0, 2, 7));
        assert_eq!(ctl.data_index(1, Some((53.0, 50.0)), 1.0), None);
        assert_eq!(ctl.data_index(2, Some((53.0, 50.0)), 1.0), Some(7));
        assert_eq!(ctl.highlight(2, 1.0).size, 21.0);
        assert_eq!(ctl.highlight(1, 1.0).size, 0.0);
    }

    #[test]
    fn redraw_forgets_hovered_rect() {
        let (_, mut ctl) = recorder();
        ctl.begin_draw(100.0, 100.0);
        ctl.hits_mut().insert(circle(50.0, 50.0, 10.0, 1, 0));
        assert_eq!(ctl.data_index(1, Some((50.0, 50.0)), 1.0), Some(0));
        ctl.begin_draw(100.0, 100.0);
        assert_eq!(ctl.hovered(), None);
        assert_eq!(ctl.highlight(1, 1.0).size, 0.0);
    }

    #[test]
    fn open_tooltip_is_kept_until_cursor_leaves_points() {
        let (log, mut ctl) = recorder();
        ctl.set_tooltip_open(true);
        ctl.set_legend(&[None, Some(3)], (1.0, 1.0), (0.0, 0.0));
        assert!(log.borrow().is_empty());
        ctl.set_legend(&[None, None], (1.0, 1.0), (0.0, 0.0));
        assert_eq!(*log.borrow(), vec![None]);
        assert!(!ctl.is_tooltip_open());
    }
}

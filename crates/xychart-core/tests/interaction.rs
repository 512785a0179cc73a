// File: crates/xychart-core/tests/interaction.rs
// Purpose: Hover dispatch, tooltip pinning and click listener lifecycle of the interaction controller.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use xychart_core::interaction::ListenerId;
use xychart_core::{ChartHost, Field, Frame, HitRect, HoverEvent, InteractionController, ScatterChart, Theme, XyChartOptions};

#[derive(Default)]
struct MockHost {
    next: ListenerId,
    listeners: Vec<(ListenerId, Rc<dyn Fn()>)>,
}

impl MockHost {
    fn click(&self) {
        for (_, l) in &self.listeners {
            l();
        }
    }
}

impl ChartHost for MockHost {
    fn add_click_listener(&mut self, handler: Rc<dyn Fn()>) -> ListenerId {
        self.next += 1;
        self.listeners.push((self.next, handler));
        self.next
    }

    fn remove_click_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(l, _)| *l != id);
    }
}

type Events = Rc<RefCell<Vec<Option<HoverEvent>>>>;

fn controller() -> (Events, Rc<Cell<usize>>, InteractionController) {
    let events: Events = Rc::default();
    let clicks = Rc::new(Cell::new(0));
    let sink = events.clone();
    let counter = clicks.clone();
    let ctl = InteractionController::new(move |e| sink.borrow_mut().push(e))
        .with_click_handler(Rc::new(move || counter.set(counter.get() + 1)));
    (events, clicks, ctl)
}

fn point(cx: f32, cy: f32, slot: usize, i: usize) -> HitRect {
    HitRect { x: cx - 3.0, y: cy - 3.0, w: 6.0, h: 6.0, series_index: slot, data_index: i }
}

#[test]
fn dispatches_only_the_first_matching_slot() {
    let (events, _, mut ctl) = controller();
    ctl.set_legend(&[Some(0), None, Some(4), Some(9)], (10.0, 20.0), (100.0, 200.0));
    assert_eq!(
        *events.borrow(),
        vec![Some(HoverEvent { series_index: 1, data_index: 4, screen_x: 110.0, screen_y: 220.0 })]
    );

    ctl.set_legend(&[None, None, None], (10.0, 20.0), (100.0, 200.0));
    assert_eq!(events.borrow().last(), Some(&None));
}

#[test]
fn cursor_at_center_hits_and_outside_radius_misses() {
    let (_, _, mut ctl) = controller();
    ctl.begin_draw(200.0, 100.0);
    ctl.hits_mut().insert(point(40.0, 40.0, 1, 2));
    ctl.hits_mut().insert(point(80.0, 40.0, 2, 5));

    assert_eq!(ctl.data_index(1, Some((40.0, 40.0)), 1.0), Some(2));
    assert_eq!(ctl.data_index(1, Some((80.0, 40.0)), 1.0), None);
    assert_eq!(ctl.data_index(2, Some((80.0, 40.0)), 1.0), Some(5));
    assert_eq!(ctl.highlight(2, 1.0).size, 6.0);

    // strictly outside every radius
    assert_eq!(ctl.data_index(1, Some((60.0, 40.0)), 1.0), None);
    assert!(ctl.hovered().is_none());
    assert_eq!(ctl.highlight(1, 1.0).size, 0.0);
}

#[test]
fn cursor_is_scaled_by_dpr() {
    let (_, _, mut ctl) = controller();
    ctl.begin_draw(400.0, 200.0);
    ctl.hits_mut().insert(point(80.0, 80.0, 1, 0));
    assert_eq!(ctl.data_index(1, Some((40.0, 40.0)), 2.0), Some(0));
    assert_eq!(ctl.highlight(1, 2.0).size, 3.0);
}

#[test]
fn redraw_clears_hits_and_closes_pinned_tooltip() {
    let (events, clicks, mut ctl) = controller();
    ctl.begin_draw(100.0, 100.0);
    ctl.hits_mut().insert(point(10.0, 10.0, 1, 0));
    ctl.set_tooltip_open(true);

    ctl.begin_draw(100.0, 100.0);
    assert!(ctl.hits().is_empty());
    assert!(!ctl.is_tooltip_open());
    assert_eq!(*events.borrow(), vec![None]);
    assert_eq!(clicks.get(), 1);
}

#[test]
fn attach_registers_one_listener_and_detach_removes_it() {
    let (events, clicks, mut ctl) = controller();
    let mut host = MockHost::default();
    ctl.attach(&mut host);
    ctl.attach(&mut host);
    assert_eq!(host.listeners.len(), 1);
    host.click();
    assert_eq!(clicks.get(), 1);

    ctl.set_tooltip_open(true);
    ctl.detach(&mut host);
    assert!(host.listeners.is_empty());
    assert!(!ctl.is_attached());
    // force-close ran the hover reset and the click handler
    assert_eq!(*events.borrow(), vec![None]);
    assert_eq!(clicks.get(), 2);
}

#[test]
fn chart_attach_and_detach_pair_the_click_listener() {
    let (events, clicks, ctl) = controller();
    let frames = vec![Frame::new(vec![Field::number("x", [1.0, 2.0]), Field::number("y", [3.0, 4.0])])];
    let mut chart = ScatterChart::new(XyChartOptions::default(), frames, Theme::dark())
        .expect("chart")
        .with_interaction(ctl);
    let mut host = MockHost::default();
    chart.attach(&mut host);
    assert_eq!(host.listeners.len(), 1);
    assert!(chart.interaction().is_attached());

    chart.interaction_mut().set_tooltip_open(true);
    chart.detach(&mut host);
    assert!(host.listeners.is_empty());
    assert!(!chart.interaction().is_tooltip_open());
    assert_eq!(*events.borrow(), vec![None]);
    assert_eq!(clicks.get(), 1);
}

//! Lifecycle tests for [`SurfaceController`] against a recording backend.

use core::cell::{Cell, RefCell};
use std::rc::Rc;

use nami::binding;
use tideui_core::{Point, Rect, Size};
use tideui_placement::{Align, PlacementRequest, Position};

use crate::{
    AnchorHandle, BackdropStyle, DismissPolicy, Interaction, LayoutBridge, LayoutEvent,
    MeasureTicket, OverlayHost, SurfaceController, SurfaceLayer, SurfaceOptions, SurfacePhase,
};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Default)]
struct BridgeLog {
    tickets: Vec<MeasureTicket>,
    subscriptions: i32,
    viewport: Option<Rect>,
}

/// A backend that records what the controller asks of it.
#[derive(Clone, Default)]
struct RecordingBridge(Rc<RefCell<BridgeLog>>);

impl RecordingBridge {
    fn last_ticket(&self) -> MeasureTicket {
        *self.0.borrow().tickets.last().expect("no measurement requested")
    }

    fn ticket_count(&self) -> usize {
        self.0.borrow().tickets.len()
    }

    fn subscriptions(&self) -> i32 {
        self.0.borrow().subscriptions
    }

    fn set_viewport(&self, viewport: Rect) {
        self.0.borrow_mut().viewport = Some(viewport);
    }
}

impl LayoutBridge for RecordingBridge {
    fn request_measure(&mut self, ticket: MeasureTicket) {
        self.0.borrow_mut().tickets.push(ticket);
    }

    fn subscribe(&mut self, _anchor: AnchorHandle) {
        self.0.borrow_mut().subscriptions += 1;
    }

    fn unsubscribe(&mut self, _anchor: AnchorHandle) {
        self.0.borrow_mut().subscriptions -= 1;
    }

    fn viewport(&self) -> Option<Rect> {
        self.0.borrow().viewport
    }
}

const ANCHOR: Rect = Rect::from_xywh(100.0, 50.0, 80.0, 30.0);
const SURFACE: Size = Size::new(160.0, 40.0);

type Host = OverlayHost<SurfaceLayer<&'static str>>;

fn bottom_center() -> PlacementRequest {
    PlacementRequest::builder()
        .position(Position::Bottom)
        .align(Align::Center)
        .offset(8.0)
        .build()
        .unwrap()
}

fn options() -> SurfaceOptions {
    let mut options = SurfaceOptions::new(AnchorHandle::new(1));
    options.request = bottom_center();
    options
}

fn controller(options: SurfaceOptions) -> (SurfaceController<&'static str>, Host, RecordingBridge) {
    let host = Host::new();
    let bridge = RecordingBridge::default();
    let controller = SurfaceController::new(options, "menu", host.clone(), bridge.clone());
    (controller, host, bridge)
}

/// Opens the surface and answers the first measurement and layout.
fn open_and_settle(controller: &mut SurfaceController<&'static str>, bridge: &RecordingBridge) {
    controller.open();
    controller.on_anchor_measured(bridge.last_ticket(), Some(ANCHOR));
    controller.on_surface_layout(SURFACE);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn opening_mounts_hidden_until_measured() {
    let (mut controller, host, bridge) = controller(options());
    assert_eq!(controller.phase(), SurfacePhase::Closed);
    assert_eq!(bridge.subscriptions(), 0);
    assert_eq!(bridge.ticket_count(), 0);

    controller.open();
    assert_eq!(controller.phase(), SurfacePhase::Opening);
    assert_eq!(bridge.subscriptions(), 1);
    assert_eq!(bridge.ticket_count(), 1);
    assert_eq!(
        host.with_content(controller.id(), SurfaceLayer::is_visible),
        Some(false)
    );

    // Anchor known, surface size not yet: still hidden.
    controller.on_anchor_measured(bridge.last_ticket(), Some(ANCHOR));
    assert_eq!(controller.phase(), SurfacePhase::Opening);
    assert_eq!(controller.placement().unwrap().opacity, 0.0);

    controller.on_surface_layout(SURFACE);
    assert_eq!(controller.phase(), SurfacePhase::Open);

    let placement = controller.placement().unwrap();
    assert_eq!((placement.top, placement.left, placement.opacity), (88.0, 60.0, 1.0));
    assert_eq!(
        host.with_content(controller.id(), |layer| (layer.placement.left, layer.placement.top)),
        Some((60.0, 88.0))
    );
}

#[test]
fn surface_size_may_arrive_before_anchor() {
    let (mut controller, _host, bridge) = controller(options());
    controller.open();
    controller.on_surface_layout(SURFACE);
    assert_eq!(controller.phase(), SurfacePhase::Opening);

    controller.on_anchor_measured(bridge.last_ticket(), Some(ANCHOR));
    assert_eq!(controller.phase(), SurfacePhase::Open);
}

#[test]
fn close_unmounts_and_unsubscribes() {
    let (mut controller, host, bridge) = controller(options());
    open_and_settle(&mut controller, &bridge);

    controller.request_close();
    assert_eq!(controller.phase(), SurfacePhase::Closed);
    assert!(!host.contains(controller.id()));
    assert_eq!(bridge.subscriptions(), 0);
    assert!(controller.placement().is_none());

    // No background work while closed.
    let before = bridge.ticket_count();
    controller.on_layout_event(LayoutEvent::Scroll);
    controller.on_layout_event(LayoutEvent::Resize);
    assert_eq!(bridge.ticket_count(), before);
}

#[test]
fn reopening_reuses_one_host_entry() {
    let (mut controller, host, bridge) = controller(options());

    open_and_settle(&mut controller, &bridge);
    controller.open();
    assert_eq!(host.len(), 1);

    controller.request_close();
    open_and_settle(&mut controller, &bridge);
    assert_eq!(host.len(), 1);
    assert!(host.contains(controller.id()));
}

#[test]
fn measurement_after_close_is_discarded() {
    let (mut controller, host, bridge) = controller(options());
    controller.open();
    let in_flight = bridge.last_ticket();

    controller.request_close();
    controller.on_anchor_measured(in_flight, Some(ANCHOR));
    controller.on_surface_layout(SURFACE);

    assert_eq!(controller.phase(), SurfacePhase::Closed);
    assert!(controller.placement().is_none());
    assert!(host.is_empty());
}

#[test]
fn measurement_from_previous_session_is_discarded() {
    let (mut controller, _host, bridge) = controller(options());
    controller.open();
    let old = bridge.last_ticket();
    controller.request_close();
    controller.open();

    controller.on_anchor_measured(old, Some(ANCHOR));
    assert_eq!(controller.session().unwrap().anchor(), None);

    controller.on_anchor_measured(bridge.last_ticket(), Some(ANCHOR));
    assert_eq!(controller.session().unwrap().anchor(), Some(ANCHOR));
}

#[test]
fn dropping_the_controller_releases_everything() {
    let (mut controller, host, bridge) = controller(options());
    open_and_settle(&mut controller, &bridge);

    drop(controller);
    assert!(host.is_empty());
    assert_eq!(bridge.subscriptions(), 0);
}

// ============================================================================
// Remeasurement
// ============================================================================

#[test]
fn unchanged_remeasurement_keeps_placement_identity() {
    let (mut controller, host, bridge) = controller(options());
    open_and_settle(&mut controller, &bridge);
    let before = controller.placement().unwrap();
    let revision = host.revision();

    controller.on_layout_event(LayoutEvent::Scroll);
    controller.on_anchor_measured(bridge.last_ticket(), Some(ANCHOR));
    controller.on_surface_layout(SURFACE);

    assert!(Rc::ptr_eq(&before, &controller.placement().unwrap()));
    assert_eq!(host.revision(), revision);
}

#[test]
fn scrolled_anchor_moves_the_surface() {
    let (mut controller, _host, bridge) = controller(options());
    open_and_settle(&mut controller, &bridge);
    let before = controller.placement().unwrap();

    controller.on_layout_event(LayoutEvent::Scroll);
    controller.on_anchor_measured(
        bridge.last_ticket(),
        Some(Rect::from_xywh(100.0, 20.0, 80.0, 30.0)),
    );

    let after = controller.placement().unwrap();
    assert!(!Rc::ptr_eq(&before, &after));
    assert_eq!(after.top, 58.0);
}

#[test]
fn newest_request_wins_over_late_older_reply() {
    let (mut controller, _host, bridge) = controller(options());
    open_and_settle(&mut controller, &bridge);

    controller.on_layout_event(LayoutEvent::Scroll);
    let older = bridge.last_ticket();
    controller.on_layout_event(LayoutEvent::Scroll);
    let newer = bridge.last_ticket();

    controller.on_anchor_measured(newer, Some(Rect::from_xywh(100.0, 10.0, 80.0, 30.0)));
    controller.on_anchor_measured(older, Some(Rect::from_xywh(100.0, 90.0, 80.0, 30.0)));

    assert_eq!(controller.placement().unwrap().top, 48.0);
}

#[test]
fn hidden_anchor_hides_an_open_surface() {
    let (mut controller, _host, bridge) = controller(options());
    open_and_settle(&mut controller, &bridge);

    controller.on_layout_event(LayoutEvent::Scroll);
    controller.on_anchor_measured(bridge.last_ticket(), Some(Rect::default()));

    assert_eq!(controller.phase(), SurfacePhase::Open);
    assert_eq!(controller.placement().unwrap().opacity, 0.0);
}

#[test]
fn resize_applies_the_new_viewport() {
    let mut options = options();
    options.request = PlacementRequest::builder()
        .overflow(tideui_placement::Overflow::Shift)
        .build()
        .unwrap();
    let (mut controller, _host, bridge) = controller(options);
    open_and_settle(&mut controller, &bridge);
    assert_eq!(controller.placement().unwrap().left, 100.0);

    bridge.set_viewport(Rect::from_xywh(0.0, 0.0, 200.0, 400.0));
    controller.on_layout_event(LayoutEvent::Resize);

    assert_eq!(controller.placement().unwrap().left, 40.0);
}

#[test]
fn new_request_repositions_open_surface() {
    let (mut controller, _host, bridge) = controller(options());
    open_and_settle(&mut controller, &bridge);

    controller.set_request(PlacementRequest::new(Position::Top, Align::Start));

    let placement = controller.placement().unwrap();
    assert_eq!((placement.top, placement.left), (10.0, 100.0));
}

// ============================================================================
// Dismissal
// ============================================================================

#[test]
fn outside_press_closes_by_default() {
    let (mut controller, _host, bridge) = controller(options());
    open_and_settle(&mut controller, &bridge);

    assert!(!controller.dismiss(Interaction::PointerDown(Point::new(120.0, 100.0))));
    assert!(controller.is_open());

    assert!(controller.dismiss(Interaction::PointerDown(Point::new(5.0, 5.0))));
    assert_eq!(controller.phase(), SurfacePhase::Closed);
}

#[test]
fn backdrop_dismissal_ignores_outside_press() {
    let mut options = options();
    options.dismiss = DismissPolicy::Backdrop;
    options.backdrop_style = Some(BackdropStyle::new(0x000000, 0.4));
    let (mut controller, host, bridge) = controller(options);
    open_and_settle(&mut controller, &bridge);

    assert_eq!(
        host.with_content(controller.id(), |layer| layer.backdrop),
        Some(Some(BackdropStyle::new(0x000000, 0.4)))
    );

    assert!(!controller.dismiss(Interaction::PointerDown(Point::new(5.0, 5.0))));
    assert!(controller.is_open());

    assert!(controller.dismiss(Interaction::BackdropPress));
    assert!(!controller.is_open());
}

#[test]
fn toggle_opens_then_closes() {
    let (mut controller, host, bridge) = controller(options());

    controller.toggle();
    assert_eq!(controller.phase(), SurfacePhase::Opening);
    controller.on_anchor_measured(bridge.last_ticket(), Some(ANCHOR));
    controller.on_surface_layout(SURFACE);
    assert_eq!(controller.phase(), SurfacePhase::Open);
    assert!(host.contains(controller.id()));

    controller.toggle();
    assert_eq!(controller.phase(), SurfacePhase::Closed);
    assert!(host.is_empty());
    assert_eq!(bridge.subscriptions(), 0);
}

#[test]
fn close_notifies_uncontrolled_listener() {
    let closed = Rc::new(Cell::new(0));
    let mut options = options();
    options.on_close = Some(Box::new({
        let closed = Rc::clone(&closed);
        move || closed.set(closed.get() + 1)
    }));
    let (mut controller, _host, bridge) = controller(options);
    open_and_settle(&mut controller, &bridge);

    controller.dismiss(Interaction::SystemBack);
    assert_eq!(closed.get(), 1);
    assert!(!controller.is_open());

    // Closing a closed surface does not notify again.
    controller.request_close();
    assert_eq!(closed.get(), 1);
}

// ============================================================================
// Controlled surfaces
// ============================================================================

#[test]
fn controlled_surface_follows_binding() {
    let is_open = binding(false);
    let mut options = options();
    options.is_open = Some(is_open.clone());
    let (mut controller, _host, _bridge) = controller(options);
    assert!(controller.is_controlled());

    controller.open();
    assert!(!controller.is_open());

    is_open.set(true);
    controller.sync();
    assert_eq!(controller.phase(), SurfacePhase::Opening);

    is_open.set(false);
    controller.sync();
    assert_eq!(controller.phase(), SurfacePhase::Closed);
}

#[test]
fn binding_flipped_outside_stops_all_work() {
    let is_open = binding(true);
    let mut options = options();
    options.is_open = Some(is_open.clone());
    let (mut controller, host, bridge) = controller(options);
    controller.on_anchor_measured(bridge.last_ticket(), Some(ANCHOR));
    controller.on_surface_layout(SURFACE);
    assert_eq!(controller.phase(), SurfacePhase::Open);
    assert!(!controller.needs_sync());

    is_open.set(false);
    assert!(controller.needs_sync());
    let tickets = bridge.ticket_count();

    controller.on_layout_event(LayoutEvent::Scroll);
    assert_eq!(controller.phase(), SurfacePhase::Closed);
    assert!(!controller.needs_sync());
    assert!(host.is_empty());
    assert_eq!(bridge.subscriptions(), 0);
    assert_eq!(bridge.ticket_count(), tickets);
}

#[test]
fn binding_flipped_outside_is_seen_by_layout_input() {
    let is_open = binding(true);
    let mut options = options();
    options.is_open = Some(is_open.clone());
    let (mut controller, host, bridge) = controller(options);
    let ticket = bridge.last_ticket();

    is_open.set(false);
    controller.on_anchor_measured(ticket, Some(ANCHOR));
    controller.on_surface_layout(SURFACE);

    assert!(controller.placement().is_none());
    assert!(host.is_empty());
}

#[test]
fn controlled_surface_opens_at_construction() {
    let mut options = options();
    options.is_open = Some(binding(true));
    let (controller, host, _bridge) = controller(options);

    assert!(controller.is_open());
    assert!(host.contains(controller.id()));
}

#[test]
fn controlled_dismissal_without_on_close_is_dropped() {
    let mut options = options();
    options.is_open = Some(binding(true));
    let (mut controller, _host, bridge) = controller(options);
    controller.on_anchor_measured(bridge.last_ticket(), Some(ANCHOR));
    controller.on_surface_layout(SURFACE);

    assert!(controller.dismiss(Interaction::PointerDown(Point::new(5.0, 5.0))));
    assert_eq!(controller.phase(), SurfacePhase::Open);
}

#[test]
fn controlled_dismissal_goes_through_on_close() {
    let is_open = binding(true);
    let mut options = options();
    options.is_open = Some(is_open.clone());
    options.on_close = Some(Box::new({
        let is_open = is_open.clone();
        move || is_open.set(false)
    }));
    let (mut controller, host, _bridge) = controller(options);

    assert!(controller.dismiss(Interaction::Close));
    assert!(!is_open.get());
    assert_eq!(controller.phase(), SurfacePhase::Closed);
    assert!(host.is_empty());
}

#[test]
fn control_mode_cannot_switch() {
    let (controller, _host, _bridge) = controller(options());
    assert!(controller.reconcile_control(false).is_ok());
    assert!(controller.reconcile_control(true).is_err());
}

#[test]
fn inversion_flag_reaches_the_layer() {
    let (mut controller, host, bridge) = controller(options());
    open_and_settle(&mut controller, &bridge);
    assert_eq!(host.with_content(controller.id(), |layer| layer.inverted), Some(false));

    controller.set_request(bottom_center().to_builder().inverted(true).build().unwrap());
    assert_eq!(host.with_content(controller.id(), |layer| layer.inverted), Some(true));
}

use std::cell::RefCell;
use std::rc::Rc;

use chart_overlays::events::Dispatcher;
use chart_overlays::surface::NodeId;
use chart_overlays::widgets::binning::{BinningEvent, CHANGE};

#[test]
fn emit_invokes_handlers_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = Dispatcher::new();

    let first = Rc::clone(&log);
    dispatcher.on(CHANGE, "first", move |_, _: &BinningEvent| {
        first.borrow_mut().push("first");
    });
    let second = Rc::clone(&log);
    dispatcher.on(CHANGE, "second", move |_, _: &BinningEvent| {
        second.borrow_mut().push("second");
    });

    dispatcher.emit(NodeId::new(1), &BinningEvent::Change { is_selected: true });

    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

#[test]
fn same_namespace_replaces_handler_in_place() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = Dispatcher::new();

    let stale = Rc::clone(&log);
    dispatcher.on(CHANGE, "shared", move |_, _: &BinningEvent| {
        stale.borrow_mut().push("stale");
    });
    let tail = Rc::clone(&log);
    dispatcher.on(CHANGE, "tail", move |_, _: &BinningEvent| {
        tail.borrow_mut().push("tail");
    });
    let fresh = Rc::clone(&log);
    dispatcher.on(CHANGE, "shared", move |_, _: &BinningEvent| {
        fresh.borrow_mut().push("fresh");
    });

    dispatcher.emit(NodeId::new(1), &BinningEvent::Change { is_selected: false });

    // replacement keeps the original registration slot
    assert_eq!(dispatcher.handler_count(), 2);
    assert_eq!(*log.borrow(), vec!["fresh", "tail"]);
}

#[test]
fn off_removes_only_the_named_namespace() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = Dispatcher::new();

    let keep = Rc::clone(&log);
    dispatcher.on(CHANGE, "keep", move |_, _: &BinningEvent| {
        keep.borrow_mut().push("keep");
    });
    let drop_me = Rc::clone(&log);
    dispatcher.on(CHANGE, "drop", move |_, _: &BinningEvent| {
        drop_me.borrow_mut().push("drop");
    });

    dispatcher.off(CHANGE, "drop");
    dispatcher.emit(NodeId::new(1), &BinningEvent::Change { is_selected: true });

    assert_eq!(dispatcher.handler_count(), 1);
    assert_eq!(*log.borrow(), vec!["keep"]);
}

#[test]
fn emit_passes_the_originating_node_and_payload() {
    let seen = Rc::new(RefCell::new(None));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&seen);
    dispatcher.on(CHANGE, "probe", move |node, event: &BinningEvent| {
        *sink.borrow_mut() = Some((node, *event));
    });

    let origin = NodeId::new(42);
    dispatcher.emit(origin, &BinningEvent::Change { is_selected: true });

    assert_eq!(
        *seen.borrow(),
        Some((origin, BinningEvent::Change { is_selected: true }))
    );
}

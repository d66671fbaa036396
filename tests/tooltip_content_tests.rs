use std::cell::RefCell;
use std::rc::Rc;

use chrono::TimeZone;

use chart_overlays::core::{DomainValue, HoverPoint, KeyType, SeriesRow};
use chart_overlays::events::{Dispatcher, PanelEvent};
use chart_overlays::surface::{Color, MemorySurface, Surface, shared};
use chart_overlays::widgets::Tooltip;
use chart_overlays::widgets::tooltip::{TooltipConfigPatch, TooltipSnapshot};

fn new_tooltip() -> (
    chart_overlays::surface::SharedSurface<MemorySurface>,
    Tooltip<MemorySurface>,
) {
    let surface = shared(MemorySurface::new());
    let container = surface.borrow().root();
    let tooltip = Tooltip::new(Rc::clone(&surface), container);
    (surface, tooltip)
}

#[test]
fn configured_series_order_wins_and_drops_unlisted_rows() {
    let (_surface, mut tooltip) = new_tooltip();

    tooltip.set_config(TooltipConfigPatch {
        series_order: Some(vec!["b".to_owned(), "a".to_owned()]),
        ..TooltipConfigPatch::default()
    });
    let point = HoverPoint::new(DomainValue::Number(1.0)).with_series(vec![
        SeriesRow::new("a", "Alpha").with_value(1.0),
        SeriesRow::new("b", "Beta").with_value(2.0),
        SeriesRow::new("c", "Gamma").with_value(3.0),
    ]);
    tooltip.setup_tooltip(&point, 10.0, 10.0).expect("tooltip update");

    let snapshot = tooltip.snapshot();
    let ids: Vec<&str> = snapshot
        .content
        .iter()
        .map(|row| row.id.as_str())
        .collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn labeled_rows_fall_back_to_alphabetical_order() {
    let (_surface, mut tooltip) = new_tooltip();

    let point = HoverPoint::new(DomainValue::Number(1.0)).with_series(vec![
        SeriesRow::new("z", "Zeta").with_value(1.0),
        SeriesRow::new("a", "Alpha").with_value(2.0),
    ]);
    tooltip.setup_tooltip(&point, 10.0, 10.0).expect("tooltip update");

    let snapshot = tooltip.snapshot();
    let labels: Vec<&str> = snapshot
        .content
        .iter()
        .map(|row| row.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Alpha", "Zeta"]);
}

#[test]
fn unlabeled_rows_keep_insertion_order() {
    let (_surface, mut tooltip) = new_tooltip();

    let point = HoverPoint::new(DomainValue::Number(1.0)).with_series(vec![
        SeriesRow::new("s2", "").with_value(2.0),
        SeriesRow::new("s1", "").with_value(1.0),
    ]);
    tooltip.setup_tooltip(&point, 10.0, 10.0).expect("tooltip update");

    let snapshot = tooltip.snapshot();
    let ids: Vec<&str> = snapshot
        .content
        .iter()
        .map(|row| row.id.as_str())
        .collect();
    assert_eq!(ids, vec!["s2", "s1"]);
}

#[test]
fn value_rows_render_three_sections_and_label_only_rows_two() {
    let (surface, mut tooltip) = new_tooltip();

    let point = HoverPoint::new(DomainValue::Number(1.0)).with_series(vec![
        SeriesRow::new("a", "Alpha").with_value(1.5),
        SeriesRow::new("b", "Beta"),
    ]);
    tooltip.setup_tooltip(&point, 10.0, 10.0).expect("tooltip update");

    let surface = surface.borrow();
    let items = surface.find_by_class("tooltip-item");
    assert_eq!(items.len(), 2);
    assert_eq!(surface.children(items[0]).len(), 3);
    assert_eq!(surface.children(items[1]).len(), 2);

    let value_sections = surface.find_by_class("value");
    assert_eq!(value_sections.len(), 1);
    assert_eq!(surface.text(value_sections[0]), "1.50");
}

#[test]
fn swatches_use_the_injected_color_scale() {
    let (surface, mut tooltip) = new_tooltip();

    tooltip.set_color_scale(|id| {
        if id == "a" {
            Color::rgb(1.0, 0.0, 0.0)
        } else {
            Color::rgb(0.0, 0.0, 1.0)
        }
    });
    let point = HoverPoint::new(DomainValue::Number(1.0)).with_series(vec![
        SeriesRow::new("a", "Alpha").with_value(1.0),
        SeriesRow::new("b", "Beta").with_value(2.0),
    ]);
    tooltip.setup_tooltip(&point, 10.0, 10.0).expect("tooltip update");

    let surface = surface.borrow();
    let swatches = surface.find_by_class("color");
    assert_eq!(surface.background(swatches[0]), Some(Color::rgb(1.0, 0.0, 0.0)));
    assert_eq!(surface.background(swatches[1]), Some(Color::rgb(0.0, 0.0, 1.0)));
}

#[test]
fn injected_value_formatter_overrides_the_default() {
    let (surface, mut tooltip) = new_tooltip();

    tooltip.set_value_formatter(|value| format!("{value:.0}%"));
    let point = HoverPoint::new(DomainValue::Number(1.0))
        .with_series(vec![SeriesRow::new("a", "Alpha").with_value(42.4)]);
    tooltip.setup_tooltip(&point, 10.0, 10.0).expect("tooltip update");

    let surface = surface.borrow();
    let value_section = surface.find_by_class("value")[0];
    assert_eq!(surface.text(value_section), "42%");
}

#[test]
fn time_keyed_titles_go_through_the_date_formatter() {
    let (surface, mut tooltip) = new_tooltip();

    let timestamp = chrono::Utc
        .with_ymd_and_hms(2024, 3, 9, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let point = HoverPoint::new(DomainValue::Time(timestamp))
        .with_series(vec![SeriesRow::new("a", "Alpha").with_value(1.0)]);
    tooltip.setup_tooltip(&point, 10.0, 10.0).expect("tooltip update");

    let surface = surface.borrow();
    let title = surface.find_by_class("tooltip-title")[0];
    assert_eq!(surface.text(title), "Mar 09, 2024");
}

#[test]
fn non_time_key_types_display_the_title_verbatim() {
    let (surface, mut tooltip) = new_tooltip();

    tooltip.set_config(TooltipConfigPatch {
        key_type: Some(KeyType::Number),
        ..TooltipConfigPatch::default()
    });
    let point = HoverPoint::new(DomainValue::Text("Spring".to_owned()))
        .with_series(vec![SeriesRow::new("a", "Alpha").with_value(1.0)]);
    tooltip.setup_tooltip(&point, 10.0, 10.0).expect("tooltip update");

    let surface = surface.borrow();
    let title = surface.find_by_class("tooltip-title")[0];
    assert_eq!(surface.text(title), "Spring");
}

#[test]
fn show_and_hide_degrade_gracefully_before_the_subtree_exists() {
    let (_surface, mut tooltip) = new_tooltip();

    assert!(tooltip.show().is_none());
    assert!(tooltip.hide().is_none());
}

#[test]
fn show_and_hide_toggle_visibility_once_built() {
    let (surface, mut tooltip) = new_tooltip();

    let point = HoverPoint::new(DomainValue::Number(1.0))
        .with_series(vec![SeriesRow::new("a", "Alpha").with_value(1.0)]);
    tooltip.setup_tooltip(&point, 10.0, 10.0).expect("tooltip update");

    assert!(tooltip.hide().is_some());
    {
        let surface = surface.borrow();
        let root = surface.find_by_class("tooltip-group")[0];
        assert!(!surface.is_visible(root));
    }

    assert!(tooltip.show().is_some());
    let surface = surface.borrow();
    let root = surface.find_by_class("tooltip-group")[0];
    assert!(surface.is_visible(root));
}

#[test]
fn bound_events_drive_the_show_update_hide_state_machine() {
    let surface = shared(MemorySurface::new());
    let container = surface.borrow().root();
    let tooltip = Rc::new(RefCell::new(Tooltip::new(Rc::clone(&surface), container)));
    let mut host = Dispatcher::new();
    Tooltip::bind_events(&tooltip, &mut host);
    assert_eq!(host.handler_count(), 3);

    let panel = surface.borrow().root();

    // enter before anything is built: gracefully ignored
    host.emit(panel, &PanelEvent::MouseOverPanel);

    let point = HoverPoint::new(DomainValue::Number(1.0))
        .with_series(vec![SeriesRow::new("a", "Alpha").with_value(1.0)]);
    host.emit(
        panel,
        &PanelEvent::MouseMovePanel {
            point,
            x: 40.0,
            y: 60.0,
        },
    );
    {
        let surface = surface.borrow();
        let root = surface.find_by_class("tooltip-group")[0];
        assert!(surface.is_visible(root));
        assert_eq!(surface.find_by_class("tooltip-item").len(), 1);
    }

    host.emit(panel, &PanelEvent::MouseOutPanel);
    {
        let surface = surface.borrow();
        let root = surface.find_by_class("tooltip-group")[0];
        assert!(!surface.is_visible(root));
    }

    host.emit(panel, &PanelEvent::MouseOverPanel);
    let surface = surface.borrow();
    let root = surface.find_by_class("tooltip-group")[0];
    assert!(surface.is_visible(root));
}

#[test]
fn rebinding_replaces_handlers_instead_of_duplicating_them() {
    let surface = shared(MemorySurface::new());
    let container = surface.borrow().root();
    let tooltip = Rc::new(RefCell::new(Tooltip::new(Rc::clone(&surface), container)));
    let mut host = Dispatcher::new();

    Tooltip::bind_events(&tooltip, &mut host);
    Tooltip::bind_events(&tooltip, &mut host);

    assert_eq!(host.handler_count(), 3);
}

#[test]
fn snapshot_json_round_trips() {
    let (_surface, mut tooltip) = new_tooltip();

    let point = HoverPoint::new(DomainValue::Number(3.0))
        .with_series(vec![SeriesRow::new("a", "Alpha").with_value(1.0)]);
    tooltip.setup_tooltip(&point, 10.0, 10.0).expect("tooltip update");

    let json = tooltip.snapshot_json_pretty().expect("snapshot json");
    let parsed: TooltipSnapshot = serde_json::from_str(&json).expect("parse snapshot");
    assert_eq!(parsed, tooltip.snapshot());
}

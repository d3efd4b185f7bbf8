//! Drag directive and context registry against the in-memory host.

use dragkit_testing::{FakeHost, FakeTarget, GestureRobot, StyleWrite};
use dragkit_ui::{
    BoundedRect, ContextId, ContextRegistry, DirectiveSettings, DragDirective, Point,
    TrackerOptions,
};
use std::cell::Cell;
use std::rc::Rc;

fn style_write(element: dragkit_testing::FakeElement, property: &str, value: &str) -> StyleWrite {
    StyleWrite {
        element,
        property: property.into(),
        value: value.into(),
    }
}

#[test]
fn default_settings() {
    let settings = DirectiveSettings::default();
    assert_eq!(settings.name, "drag");
    assert_eq!(settings.id_attribute, "data-deid");
    assert_eq!(settings.tracker, TrackerOptions::default());

    let directive = DragDirective::install(FakeHost::shared(), settings);
    assert_eq!(directive.name(), "drag");
}

#[test]
fn mounted_tags_element_and_binds_tracker() {
    let host = FakeHost::shared();
    let element = host.create_element(Point::ZERO);
    let mut directive = DragDirective::install(host.clone(), DirectiveSettings::default());

    directive.mounted(&element);

    let id = host
        .read_attribute(element, "data-deid")
        .expect("context id attribute");
    let context = directive
        .registry()
        .get(&ContextId::new(id))
        .expect("registered context");
    assert_eq!(context.element(), &element);
    assert_eq!(context.tracker().bound_element(), Some(element));
    assert_eq!(host.listener_count(element), 2);
    assert_eq!(host.listener_count(FakeTarget::Document), 5);
}

#[test]
fn dragging_moves_element_with_top_and_left_styles() {
    let host = FakeHost::shared();
    let element = host.create_element(Point::new(50.0, 50.0));
    let mut directive = DragDirective::install(host.clone(), DirectiveSettings::default());
    directive.mounted(&element);
    let mut robot = GestureRobot::mouse(host.clone());

    robot.press(element, 100.0, 70.0);
    robot.move_to(110.0, 80.0);
    robot.move_to(120.0, 95.0);
    robot.release();
    robot.move_to(300.0, 300.0);

    assert_eq!(host.style(element, "top").as_deref(), Some("65px"));
    assert_eq!(host.style(element, "left").as_deref(), Some("60px"));
    assert_eq!(
        host.style_writes(),
        vec![
            style_write(element, "top", "50px"),
            style_write(element, "left", "50px"),
            style_write(element, "top", "65px"),
            style_write(element, "left", "60px"),
        ]
    );
}

#[test]
fn updated_with_same_element_keeps_single_binding() {
    let host = FakeHost::shared();
    let element = host.create_element(Point::ZERO);
    let mut directive = DragDirective::install(host.clone(), DirectiveSettings::default());

    directive.mounted(&element);
    directive.updated(&element);
    directive.updated(&element);

    assert_eq!(directive.registry().len(), 1);
    assert_eq!(host.total_listeners(), 7);
}

#[test]
fn before_unmount_releases_listeners_and_entry() {
    let host = FakeHost::shared();
    let element = host.create_element(Point::ZERO);
    let mut directive = DragDirective::install(host.clone(), DirectiveSettings::default());
    directive.mounted(&element);

    directive.before_unmount(&element);

    assert!(directive.registry().is_empty());
    assert_eq!(host.total_listeners(), 0);

    let mut robot = GestureRobot::mouse(host.clone());
    robot.drag(element, Point::ZERO, &[Point::new(1.0, 1.0), Point::new(5.0, 5.0)]);
    assert!(host.style_writes().is_empty());
}

#[test]
fn mount_cycles_do_not_accumulate_contexts() {
    let host = FakeHost::shared();
    let mut directive = DragDirective::install(host.clone(), DirectiveSettings::default());

    for _ in 0..5 {
        let element = host.create_element(Point::ZERO);
        directive.mounted(&element);
        directive.before_unmount(&element);
    }

    assert!(directive.registry().is_empty());
    assert_eq!(host.total_listeners(), 0);
}

#[test]
fn remounted_element_keeps_its_context_id() {
    let host = FakeHost::shared();
    let element = host.create_element(Point::ZERO);
    let mut directive = DragDirective::install(host.clone(), DirectiveSettings::default());

    directive.mounted(&element);
    let first = host.read_attribute(element, "data-deid");
    directive.before_unmount(&element);
    directive.mounted(&element);
    let second = host.read_attribute(element, "data-deid");

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(directive.registry().len(), 1);
}

#[test]
fn each_element_gets_its_own_context() {
    let host = FakeHost::shared();
    let a = host.create_element(Point::new(0.0, 0.0));
    let b = host.create_element(Point::new(100.0, 0.0));
    let mut directive = DragDirective::install(host.clone(), DirectiveSettings::default());

    directive.mounted(&a);
    directive.mounted(&b);

    assert_eq!(directive.registry().len(), 2);
    assert_ne!(
        host.read_attribute(a, "data-deid"),
        host.read_attribute(b, "data-deid")
    );

    let mut robot = GestureRobot::mouse(host.clone());
    robot.drag(b, Point::ZERO, &[Point::ZERO, Point::new(5.0, 7.0)]);

    assert_eq!(host.style(a, "left"), None);
    assert_eq!(host.style(b, "left").as_deref(), Some("105px"));
    assert_eq!(host.style(b, "top").as_deref(), Some("7px"));
}

#[test]
fn dispose_and_drop_release_every_element() {
    let host = FakeHost::shared();
    let a = host.create_element(Point::ZERO);
    let b = host.create_element(Point::ZERO);

    let mut directive = DragDirective::install(host.clone(), DirectiveSettings::default());
    directive.mounted(&a);
    directive.mounted(&b);
    assert_eq!(host.total_listeners(), 14);
    directive.dispose();
    assert!(directive.registry().is_empty());
    assert_eq!(host.total_listeners(), 0);

    let mut directive = DragDirective::install(host.clone(), DirectiveSettings::default());
    directive.mounted(&a);
    drop(directive);
    assert_eq!(host.total_listeners(), 0);
}

#[test]
fn custom_settings_flow_into_contexts() {
    let host = FakeHost::shared();
    let element = host.create_element(Point::new(5.0, 5.0));
    let settings = DirectiveSettings::new()
        .with_name("draggable")
        .with_id_attribute("data-drag-id")
        .with_tracker_options(
            TrackerOptions::new().with_limit(BoundedRect::new(0.0, 0.0, 10.0, 10.0)),
        );
    let mut directive = DragDirective::install(host.clone(), settings);
    directive.mounted(&element);
    let mut robot = GestureRobot::mouse(host.clone());

    robot.drag(element, Point::ZERO, &[Point::ZERO, Point::new(50.0, -50.0)]);

    assert_eq!(directive.name(), "draggable");
    assert!(host.read_attribute(element, "data-drag-id").is_some());
    assert_eq!(host.read_attribute(element, "data-deid"), None);
    assert_eq!(host.style(element, "left").as_deref(), Some("10px"));
    assert_eq!(host.style(element, "top").as_deref(), Some("0px"));
}

#[test]
fn registry_upsert_is_lookup_or_create() {
    let host = FakeHost::shared();
    let element = host.create_element(Point::ZERO);
    let created = Rc::new(Cell::new(0));
    let counter = created.clone();
    let mut registry = ContextRegistry::new(host.clone(), "data-deid", TrackerOptions::default())
        .with_initializer(move |_| counter.set(counter.get() + 1));

    let first = registry.upsert_by_element(&element).id().clone();
    let second = registry.upsert_by_element(&element).id().clone();

    assert_eq!(first, second);
    assert_eq!(created.get(), 1);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.id_attribute(), "data-deid");
    assert_eq!(
        host.read_attribute(element, "data-deid").as_deref(),
        Some(first.as_str())
    );
}

#[test]
fn registry_reuses_id_already_on_element() {
    let host = FakeHost::shared();
    let element = host.create_element(Point::ZERO);
    host.write_attribute(element, "data-deid", "preset");
    let mut registry = ContextRegistry::new(host.clone(), "data-deid", TrackerOptions::default());

    let id = registry.upsert_by_element(&element).id().clone();

    assert_eq!(id, ContextId::new("preset"));
}

#[test]
fn releasing_unknown_element_leaves_registry_empty() {
    let host = FakeHost::shared();
    let element = host.create_element(Point::ZERO);
    let mut registry = ContextRegistry::new(host.clone(), "data-deid", TrackerOptions::default());

    registry.release_by_element(&element);

    assert!(registry.is_empty());
    assert_eq!(host.total_listeners(), 0);
    assert!(host.read_attribute(element, "data-deid").is_some());
}

#[test]
fn copied_id_attribute_gets_its_own_context() {
    let host = FakeHost::shared();
    let a = host.create_element(Point::ZERO);
    let b = host.create_element(Point::new(20.0, 0.0));
    let mut directive = DragDirective::install(host.clone(), DirectiveSettings::default());
    directive.mounted(&a);
    let copied = host
        .read_attribute(a, "data-deid")
        .expect("context id attribute");
    host.write_attribute(b, "data-deid", &copied);

    directive.mounted(&b);

    assert_eq!(directive.registry().len(), 2);
    assert_ne!(host.read_attribute(b, "data-deid"), Some(copied.clone()));
    assert_eq!(host.listener_count(a), 2);
    assert_eq!(host.listener_count(b), 2);

    directive.before_unmount(&a);

    assert_eq!(directive.registry().len(), 1);
    assert_eq!(host.listener_count(a), 0);
    assert_eq!(host.listener_count(b), 2);

    let mut robot = GestureRobot::mouse(host.clone());
    robot.drag(b, Point::ZERO, &[Point::ZERO, Point::new(3.0, 4.0)]);
    assert_eq!(host.style(b, "left").as_deref(), Some("23px"));
    assert_eq!(host.style(b, "top").as_deref(), Some("4px"));
}

#[test]
fn releasing_element_with_copied_id_keeps_owner_bound() {
    let host = FakeHost::shared();
    let a = host.create_element(Point::ZERO);
    let b = host.create_element(Point::ZERO);
    let mut registry = ContextRegistry::new(host.clone(), "data-deid", TrackerOptions::default());
    let id = {
        let context = registry.upsert_by_element(&a);
        context.tracker().bind(&a);
        context.id().clone()
    };
    host.write_attribute(b, "data-deid", id.as_str());

    registry.release_by_element(&b);

    let owner = registry.get(&id).expect("owner context");
    assert_eq!(owner.element(), &a);
    assert_eq!(owner.tracker().bound_element(), Some(a));
    assert_eq!(host.listener_count(a), 2);
    assert_eq!(registry.len(), 1);
}

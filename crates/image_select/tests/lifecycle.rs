//! End-to-end selection lifecycles through the public API.
#![allow(unused_crate_dependencies)]

use std::sync::Arc;

use imgsel::geometry::{ContainerMetrics, Rect, ScrollOffset, Size};
use imgsel::memory::{HostCall, Journal, MemoryHost, RecordingFactory, Scene};
use imgsel::{
	Config, Controller, ElementId, Error, HostEvent, KeyCode, ModuleFactories, Mount, PointerEvent,
	SelectState, SignalSet,
};
use pretty_assertions::assert_eq;

fn document() -> MemoryHost {
	MemoryHost::new(
		Scene::new(ContainerMetrics::new(Rect::new(100.0, 20.0, 800.0, 600.0), ScrollOffset::new(5.0, 0.0)))
			.text(1, 101, 40)
			.image(2, 102, Rect::new(110.0, 40.0, 200.0, 150.0), Some(Size::new(800.0, 600.0)))
			.text(3, 103, 12),
	)
}

fn click(element: u64) -> HostEvent {
	HostEvent::Activate {
		target: Some(ElementId(element)),
	}
}

#[test]
fn default_modules_round_trip_leaves_nothing_behind() {
	let mut host = document();
	let mut controller = Controller::new(&Config::default(), &ModuleFactories::new()).unwrap();
	controller.attach(&mut host);

	controller.handle(&mut host, &click(2));
	assert_eq!(controller.state(), SelectState::Selected);
	assert_eq!(host.selection(), Some((40, 0)));
	assert!(!host.text_selectable());
	// overlay, size label and four handles
	assert_eq!(host.live_elements().len(), 6);

	let overlay = controller.overlay_element().unwrap();
	let styles = &host.element(overlay).unwrap().styles;
	assert_eq!(styles["border"], "1px dashed #444");
	assert_eq!(styles["left"], "14px");
	assert_eq!(styles["top"], "20px");

	controller.handle(&mut host, &click(1));
	assert_eq!(controller.state(), SelectState::Idle);
	assert!(host.live_elements().is_empty());
	assert!(host.text_selectable());

	controller.detach(&mut host);
	assert_eq!(host.subscriptions(), SignalSet::empty());
	assert!(host.native_resizing());
}

#[test]
fn directly_supplied_module_joins_builtins() {
	let journal = Journal::new();
	let config = Config {
		modules: vec!["DisplaySize".into()],
		..Config::default()
	}
	.with_module(Arc::new(RecordingFactory::new("Audit", &journal)));
	let mut host = document();
	let mut controller = Controller::new(&config, &ModuleFactories::new()).unwrap();
	controller.attach(&mut host);

	controller.handle(&mut host, &click(2));

	assert_eq!(controller.module_names(), ["DisplaySize", "Audit"]);
	assert_eq!(journal.entries(), ["Audit:create", "Audit:update"]);
	let label = host
		.live_elements()
		.values()
		.find(|e| matches!(e.mount, Mount::Element(_)))
		.unwrap();
	assert_eq!(label.text, "200 × 150");
}

#[test]
fn toml_config_with_unknown_module_is_rejected() {
	let config = Config::from_toml_str(r#"modules = ["DisplaySize", "Rotate"]"#).unwrap();
	match Controller::new(&config, &ModuleFactories::new()) {
		Err(Error::UnknownModule(name)) => assert_eq!(name, "Rotate"),
		Err(other) => panic!("unexpected error: {other}"),
		Ok(_) => panic!("controller built with an unknown module"),
	}
}

#[test]
fn scroll_hides_instead_of_repositioning() {
	let mut host = document();
	let mut controller = Controller::new(&Config::default(), &ModuleFactories::new()).unwrap();
	controller.attach(&mut host);
	controller.handle(&mut host, &click(2));

	host.set_scroll(ScrollOffset::new(5.0, 80.0));
	controller.handle(&mut host, &HostEvent::Scroll);

	assert_eq!(controller.state(), SelectState::Idle);
	assert_eq!(controller.overlay_rect(&host), None);
}

#[test]
fn drag_then_delete() {
	let mut host = document();
	let mut controller = Controller::new(
		&Config {
			modules: vec!["Resize".into()],
			..Config::default()
		},
		&ModuleFactories::new(),
	)
	.unwrap();
	controller.attach(&mut host);
	controller.handle(&mut host, &click(2));

	let north_west = *host
		.live_elements()
		.iter()
		.find(|(_, e)| e.styles.get("cursor").map(String::as_str) == Some("nwse-resize"))
		.unwrap()
		.0;
	for pointer in [
		PointerEvent::Down { target: north_west, x: 110.0 },
		PointerEvent::Move { x: 150.0 },
		PointerEvent::Up,
	] {
		controller.handle(&mut host, &HostEvent::Pointer { pointer });
	}
	assert_eq!(controller.overlay_rect(&host), Some(Rect::new(14.0, 20.0, 160.0, 120.0)));

	host.take_calls();
	controller.handle(&mut host, &HostEvent::KeyUp { key: KeyCode::from_code(46) });

	let calls = host.take_calls();
	assert!(matches!(calls.first(), Some(HostCall::DeleteAt { offset: 0, .. })));
	assert_eq!(calls.iter().filter(|c| matches!(c, HostCall::DeleteAt { .. })).count(), 1);
	assert_eq!(host.nodes().len(), 2);
	assert!(host.live_elements().is_empty());
	assert_eq!(controller.state(), SelectState::Idle);
}

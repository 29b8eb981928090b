//! Lifecycle invariants of the selection controller, one proof each.

use std::sync::Arc;

use imgsel_geometry::{ContainerMetrics, Rect, ScrollOffset};
use pretty_assertions::assert_eq;

use super::{BASE_SIGNALS, Controller, SelectState};
use crate::config::{Config, ModuleEntry};
use crate::event::{HostEvent, KeyCode, PointerEvent};
use crate::host::ElementId;
use crate::memory::{HostCall, Journal, MemoryHost, RecordingFactory, Scene};
use crate::modules::ModuleFactories;

fn fixture(names: &[&str]) -> (Controller, Journal, MemoryHost) {
	let journal = Journal::new();
	let mut factories = ModuleFactories::new();
	for name in names {
		factories.register(Arc::new(RecordingFactory::new(*name, &journal)));
	}
	let config = Config {
		modules: names.iter().map(|&n| ModuleEntry::from(n)).collect(),
		..Config::default()
	};
	let mut controller = Controller::new(&config, &factories).unwrap();
	let mut host = MemoryHost::new(
		Scene::new(ContainerMetrics::new(Rect::new(0.0, 0.0, 640.0, 480.0), ScrollOffset::default()))
			.image(1, 11, Rect::new(20.0, 20.0, 100.0, 100.0), None)
			.image(2, 12, Rect::new(20.0, 200.0, 50.0, 50.0), None),
	);
	controller.attach(&mut host);
	host.take_calls();
	(controller, journal, host)
}

fn activate(element: u64) -> HostEvent {
	HostEvent::Activate {
		target: Some(ElementId(element)),
	}
}

fn overlays_created(calls: &[HostCall]) -> usize {
	calls
		.iter()
		.filter(|c| matches!(c, HostCall::CreateElement { mount: crate::host::Mount::Container, .. }))
		.count()
}

/// Must create the overlay and modules once per selected image.
///
/// - Enforced in: `Controller::select`
/// - Failure symptom: Re-clicking the active image flickers and leaks module UI.
#[cfg_attr(test, test)]
pub(crate) fn test_reactivation_is_idempotent() {
	let (mut controller, journal, mut host) = fixture(&["A"]);

	for _ in 0..4 {
		controller.handle(&mut host, &activate(1));
	}

	assert_eq!(overlays_created(host.calls()), 1);
	assert_eq!(journal.entries(), ["A:create", "A:update"]);
	assert_eq!(controller.state(), SelectState::Selected);
}

/// Must finish tearing down the previous selection before building the next.
///
/// - Enforced in: `Controller::select`
/// - Failure symptom: Two overlays on screen, or modules bound to the wrong image.
#[cfg_attr(test, test)]
pub(crate) fn test_switching_images_tears_down_first() {
	let (mut controller, journal, mut host) = fixture(&["A", "B"]);
	controller.handle(&mut host, &activate(1));
	let first_overlay = controller.overlay_element().unwrap();
	journal.clear();
	host.take_calls();

	controller.handle(&mut host, &activate(2));

	assert_eq!(
		journal.entries(),
		["A:destroy", "B:destroy", "A:create", "B:create", "A:update", "B:update"]
	);
	let calls = host.take_calls();
	let removed = calls
		.iter()
		.position(|c| *c == HostCall::RemoveElement { element: first_overlay })
		.unwrap();
	let created = calls
		.iter()
		.position(|c| matches!(c, HostCall::CreateElement { .. }))
		.unwrap();
	assert!(removed < created);
	assert_eq!(host.live_elements().len(), 1);
	assert_eq!(controller.active().unwrap().element, ElementId(2));
}

/// Must produce identical overlay geometry for unchanged measurements.
///
/// - Enforced in: `OverlayManager::reposition`
/// - Failure symptom: Overlay drifts on every content change.
#[cfg_attr(test, test)]
pub(crate) fn test_repeated_updates_are_stable() {
	let (mut controller, _, mut host) = fixture(&[]);
	controller.handle(&mut host, &activate(1));
	host.take_calls();

	controller.handle(&mut host, &HostEvent::ContentChanged);
	controller.handle(&mut host, &HostEvent::ContentChanged);

	let calls = host.take_calls();
	assert_eq!(calls.len(), 2);
	assert_eq!(calls[0], calls[1]);
	assert_eq!(controller.overlay_rect(&host), Some(Rect::new(19.0, 20.0, 100.0, 100.0)));
}

/// Must delete the image exactly once, then tear down fully, on a deletion key.
///
/// - Enforced in: `Controller::on_key_up`
/// - Failure symptom: Overlay left hanging over deleted content, or a double delete.
#[cfg_attr(test, test)]
pub(crate) fn test_deletion_key_deletes_once_then_tears_down() {
	let (mut controller, journal, mut host) = fixture(&["A", "B"]);
	controller.handle(&mut host, &activate(1));
	journal.clear();
	host.take_calls();

	controller.handle(&mut host, &HostEvent::KeyUp { key: KeyCode::Delete });
	controller.handle(&mut host, &HostEvent::KeyUp { key: KeyCode::Delete });

	let deletes: Vec<_> = host
		.calls()
		.iter()
		.filter(|c| matches!(c, HostCall::DeleteAt { .. }))
		.collect();
	assert_eq!(deletes, [&HostCall::DeleteAt { node: crate::host::NodeId(11), offset: 0 }]);
	assert_eq!(journal.entries(), ["A:destroy", "B:destroy"]);
	assert!(host.live_elements().is_empty());
	assert!(controller.active().is_none());
}

/// Must leave no selection-scoped listeners registered once idle.
///
/// - Enforced in: `Controller::deselect`
/// - Failure symptom: Key presses or scrolling act on an image that is no longer selected.
#[cfg_attr(test, test)]
pub(crate) fn test_no_listeners_survive_teardown() {
	let (mut controller, journal, mut host) = fixture(&["A"]);

	for _ in 0..3 {
		controller.handle(&mut host, &activate(1));
		controller.handle(&mut host, &HostEvent::Scroll);
	}
	assert_eq!(host.subscriptions(), BASE_SIGNALS);
	assert_eq!(controller.listeners(), BASE_SIGNALS);
	journal.clear();
	host.take_calls();

	for event in [
		HostEvent::KeyUp { key: KeyCode::Backspace },
		HostEvent::Input,
		HostEvent::Scroll,
		HostEvent::Pointer { pointer: PointerEvent::Up },
		HostEvent::ContentChanged,
	] {
		controller.handle(&mut host, &event);
	}

	assert!(host.calls().is_empty());
	assert!(journal.entries().is_empty());
	assert_eq!(host.nodes().len(), 2);
}

/// Must run every hook in configured list order.
///
/// - Enforced in: `ModuleRegistry`
/// - Failure symptom: Modules that layer UI render in an unstable stacking order.
#[cfg_attr(test, test)]
pub(crate) fn test_hooks_follow_list_order() {
	let (mut controller, journal, mut host) = fixture(&["A", "B"]);

	controller.handle(&mut host, &activate(1));
	controller.handle(&mut host, &HostEvent::ContentChanged);
	controller.handle(&mut host, &HostEvent::Input);

	assert_eq!(
		journal.entries(),
		[
			"A:create", "B:create", "A:update", "B:update", "A:update", "B:update", "A:destroy",
			"B:destroy",
		]
	);
}

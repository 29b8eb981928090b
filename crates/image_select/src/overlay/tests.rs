use imgsel_geometry::{ContainerMetrics, Rect, ScrollOffset};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::OverlayManager;
use crate::host::{ElementId, Mount, NodeId, StyleMap};
use crate::memory::{HostCall, MemoryHost, Scene};
use crate::selection::ActiveSelection;

fn host() -> MemoryHost {
	MemoryHost::new(
		Scene::new(ContainerMetrics::new(Rect::new(100.0, 20.0, 800.0, 600.0), ScrollOffset::new(5.0, 0.0)))
			.image(1, 11, Rect::new(110.0, 40.0, 200.0, 150.0), None),
	)
}

fn selection() -> ActiveSelection {
	ActiveSelection {
		element: ElementId(1),
		node: NodeId(11),
		index: Some(0),
	}
}

fn manager() -> OverlayManager {
	OverlayManager::new(StyleMap::from([("position".to_string(), "absolute".to_string())]))
}

#[test]
fn create_mounts_on_container_and_positions() {
	let mut host = host();
	let mut overlay = manager();

	let element = overlay.create(&mut host, &selection());

	let live = host.element(element).unwrap();
	assert_eq!(live.mount, Mount::Container);
	assert_eq!(live.styles["position"], "absolute");
	assert_eq!(live.styles["left"], "14px");
	assert_eq!(live.styles["top"], "20px");
	assert_eq!(live.styles["width"], "200px");
	assert_eq!(live.styles["height"], "150px");
}

#[test]
fn second_create_is_a_noop() {
	let mut host = host();
	let mut overlay = manager();

	let first = overlay.create(&mut host, &selection());
	host.take_calls();
	let second = overlay.create(&mut host, &selection());

	assert_eq!(first, second);
	assert!(host.calls().is_empty());
	assert_eq!(host.live_elements().len(), 1);
}

#[test]
fn destroy_is_idempotent() {
	let mut host = host();
	let mut overlay = manager();
	overlay.create(&mut host, &selection());

	assert!(overlay.destroy(&mut host));
	assert!(!overlay.destroy(&mut host));
	assert!(host.live_elements().is_empty());
	assert!(!overlay.exists());
}

#[test]
fn reposition_without_overlay_or_selection_is_silent() {
	let mut host = host();
	let mut overlay = manager();

	assert_eq!(overlay.reposition(&mut host, Some(&selection())), None);
	overlay.create(&mut host, &selection());
	host.take_calls();
	assert_eq!(overlay.reposition(&mut host, None), None);
	assert!(host.calls().is_empty());
}

#[test]
fn reposition_tracks_live_layout() {
	let mut host = host();
	let mut overlay = manager();
	overlay.create(&mut host, &selection());

	host.set_scroll(ScrollOffset::new(0.0, 40.0));
	host.set_image_rect(ElementId(1), Rect::new(150.0, 40.0, 50.0, 60.0));

	assert_eq!(
		overlay.reposition(&mut host, Some(&selection())),
		Some(Rect::new(49.0, 60.0, 50.0, 60.0))
	);
}

#[test]
fn reposition_after_image_removed_is_silent() {
	let mut host = host();
	let mut overlay = manager();
	overlay.create(&mut host, &selection());
	crate::host::EditorHost::delete_at(&mut host, NodeId(11), 0);
	host.take_calls();

	assert_eq!(overlay.reposition(&mut host, Some(&selection())), None);
	assert!(host.calls().is_empty());
}

proptest! {
	#[test]
	fn reposition_is_idempotent(left in 0.0f64..900.0, top in 0.0f64..900.0, scroll in 0.0f64..300.0) {
		let mut host = host();
		let mut overlay = manager();
		let element = overlay.create(&mut host, &selection());
		host.set_scroll(ScrollOffset::new(scroll, scroll));
		host.set_image_rect(ElementId(1), Rect::new(left, top, 20.0, 30.0));
		host.take_calls();

		let first = overlay.reposition(&mut host, Some(&selection()));
		let second = overlay.reposition(&mut host, Some(&selection()));

		prop_assert!(first.is_some());
		prop_assert_eq!(first, second);
		let calls = host.take_calls();
		prop_assert_eq!(calls.len(), 2);
		prop_assert_eq!(&calls[0], &calls[1]);
		let styled = matches!(&calls[0], HostCall::ApplyStyles { element: e, .. } if *e == element);
		prop_assert!(styled, "overlay restyled on reposition");
	}
}

//! The selection/event state machine.
//!
//! [`Controller`] is `Idle` or `Selected`. It is the only owner of the
//! [`ActiveSelection`] and the only caller of the overlay manager and module
//! registry, so all mutation happens inside its own transition functions.
//!
//! # Listener symmetry
//!
//! [`Controller::attach`] registers [`BASE_SIGNALS`] and [`Controller::detach`]
//! releases them. Entering `Selected` registers [`SELECTED_SIGNALS`] and
//! entering `Idle` releases them. Events for signals that are not registered
//! are ignored, which is what the host would do once a listener is gone.

use imgsel_geometry::Rect;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::error::Result;
use crate::event::{HostEvent, KeyCode, PointerEvent, SignalSet};
use crate::host::{EditorHost, ElementId, NodeId};
use crate::modules::{ModuleFactories, ModuleRegistry};
use crate::overlay::OverlayManager;
use crate::selection::ActiveSelection;

#[cfg(test)]
mod invariants;

/// Signals listened to for the controller's whole attached lifetime.
pub const BASE_SIGNALS: SignalSet = SignalSet::ACTIVATE.union(SignalSet::CONTENT_CHANGED);

/// Signals listened to only while an image is selected.
pub const SELECTED_SIGNALS: SignalSet = SignalSet::KEY_UP
	.union(SignalSet::INPUT)
	.union(SignalSet::SCROLL)
	.union(SignalSet::POINTER);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectState {
	Idle,
	Selected,
}

/// Image selection controller for one editing surface.
pub struct Controller {
	overlay: OverlayManager,
	modules: ModuleRegistry,
	active: Option<ActiveSelection>,
	listeners: SignalSet,
	attached: bool,
}

impl Controller {
	/// Builds a controller, resolving the configured module list against the
	/// built-ins and `factories`.
	///
	/// # Errors
	///
	/// [`Error::UnknownModule`](crate::Error::UnknownModule) if a module entry
	/// resolves to nothing.
	pub fn new(config: &Config, factories: &ModuleFactories) -> Result<Self> {
		let modules = ModuleRegistry::new(&config.modules, factories, config.module_options())?;
		Ok(Self {
			overlay: OverlayManager::new(config.overlay_styles.clone()),
			modules,
			active: None,
			listeners: SignalSet::empty(),
			attached: false,
		})
	}

	pub fn state(&self) -> SelectState {
		if self.active.is_some() {
			SelectState::Selected
		} else {
			SelectState::Idle
		}
	}

	pub fn active(&self) -> Option<&ActiveSelection> {
		self.active.as_ref()
	}

	pub fn is_attached(&self) -> bool {
		self.attached
	}

	/// Signals currently registered with the host.
	pub fn listeners(&self) -> SignalSet {
		self.listeners
	}

	pub fn overlay_element(&self) -> Option<ElementId> {
		self.overlay.element()
	}

	/// Where the overlay belongs right now, measured live.
	pub fn overlay_rect(&self, host: &dyn EditorHost) -> Option<Rect> {
		self.overlay.measure(host, self.active.as_ref())
	}

	/// Names of the live module instances, in order.
	pub fn module_names(&self) -> Vec<&str> {
		self.modules.names()
	}

	/// Takes over image resizing from the host and starts listening for
	/// activation and content changes. Call once before delivering events.
	pub fn attach(&mut self, host: &mut dyn EditorHost) {
		if self.attached {
			trace!("controller already attached");
			return;
		}
		host.set_native_resizing(false);
		host.ensure_container_positioned();
		register(&mut self.listeners, host, BASE_SIGNALS);
		self.attached = true;
		debug!("controller attached");
	}

	/// Drops any selection and undoes everything [`Self::attach`] did.
	pub fn detach(&mut self, host: &mut dyn EditorHost) {
		if !self.attached {
			trace!("controller not attached");
			return;
		}
		self.deselect(host);
		release(&mut self.listeners, host, BASE_SIGNALS);
		host.set_native_resizing(true);
		self.attached = false;
		debug!("controller detached");
	}

	/// Entry point for every host signal.
	pub fn handle(&mut self, host: &mut dyn EditorHost, event: &HostEvent) {
		let signal = event.signal();
		if !self.listeners.contains(signal.as_set()) {
			trace!(?signal, "ignoring unregistered signal");
			return;
		}
		match *event {
			HostEvent::Activate { target } => self.on_activate(host, target),
			HostEvent::ContentChanged => self.update(host),
			HostEvent::KeyUp { key } => self.on_key_up(host, key),
			HostEvent::Input | HostEvent::Scroll => {
				debug!(?signal, "structural change, deselecting");
				self.deselect(host);
			}
			HostEvent::Pointer { pointer } => self.on_pointer(host, &pointer),
		}
	}

	fn on_activate(&mut self, host: &mut dyn EditorHost, target: Option<ElementId>) {
		let image = target.filter(|&element| host.is_image(element));
		let Some(element) = image else {
			self.deselect(host);
			return;
		};
		match host.find_node(element) {
			Some(node) => self.select(host, element, node),
			None => {
				debug!(?element, "activated image has no content node");
				self.deselect(host);
			}
		}
	}

	/// Transitions to `Selected` on `element`, tearing down any other
	/// selection first. Re-selecting the active image does nothing, and so
	/// does selecting before [`Self::attach`].
	pub fn select(&mut self, host: &mut dyn EditorHost, element: ElementId, node: NodeId) {
		if !self.attached {
			warn!(?element, "select on a detached controller");
			return;
		}
		if self.active.is_some_and(|active| active.element == element) {
			trace!(?element, "image already active");
			return;
		}
		self.deselect(host);

		let index = host.node_index(node);
		let active = ActiveSelection { element, node, index };
		self.active = Some(active);
		debug!(?element, ?node, ?index, "image selected");

		match index {
			Some(index) => host.set_selection(index, 0),
			None => warn!(?node, "no document index for selected image"),
		}
		host.set_text_selectable(false);
		register(&mut self.listeners, host, SELECTED_SIGNALS);

		let overlay = self.overlay.create(host, &active);
		let rect = self.overlay.measure(&*host, Some(&active));
		self.modules.initialize(host, &active, overlay, rect);
	}

	/// Transitions to `Idle`: destroys modules, removes the overlay, then
	/// clears the selection. Every step runs once started.
	pub fn deselect(&mut self, host: &mut dyn EditorHost) {
		let Some(active) = self.active else {
			return;
		};
		let rect = self.overlay.measure(&*host, Some(&active));
		self.modules.teardown_all(host, &active, rect);
		self.overlay.destroy(host);
		host.set_text_selectable(true);
		release(&mut self.listeners, host, SELECTED_SIGNALS);
		self.active = None;
		debug!(element = ?active.element, "image deselected");
	}

	/// Repositions the overlay, then lets every module observe the new
	/// geometry. No-op while idle.
	pub fn update(&mut self, host: &mut dyn EditorHost) {
		let Some(active) = self.active else {
			trace!("update while idle");
			return;
		};
		let rect = self.overlay.reposition(host, Some(&active));
		self.modules.update(host, &active, rect);
	}

	fn on_key_up(&mut self, host: &mut dyn EditorHost, key: KeyCode) {
		let Some(active) = self.active else {
			return;
		};
		if key.is_deletion() {
			debug!(node = ?active.node, "deleting selected image");
			host.delete_at(active.node, 0);
		}
		self.deselect(host);
	}

	fn on_pointer(&mut self, host: &mut dyn EditorHost, event: &PointerEvent) {
		let Some(active) = self.active else {
			return;
		};
		let rect = self.overlay.measure(&*host, Some(&active));
		let outcome = self.modules.dispatch_pointer(host, &active, rect, event);
		if outcome.update_requested {
			self.update(host);
		}
	}
}

fn register(listeners: &mut SignalSet, host: &mut dyn EditorHost, signals: SignalSet) {
	for signal in signals.difference(*listeners).signals() {
		host.subscribe(signal);
	}
	listeners.insert(signals);
}

fn release(listeners: &mut SignalSet, host: &mut dyn EditorHost, signals: SignalSet) {
	for signal in signals.intersection(*listeners).signals() {
		host.unsubscribe(signal);
	}
	listeners.remove(signals);
}

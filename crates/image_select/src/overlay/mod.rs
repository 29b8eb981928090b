//! Ownership and positioning of the overlay element.
//!
//! [`OverlayManager`] holds at most one overlay. Its geometry is never stored:
//! every [`OverlayManager::reposition`] measures the image and the container
//! again, because either may have moved since the last event.

use imgsel_geometry::{Rect, overlay_rect};
use tracing::{debug, trace};

use crate::host::{EditorHost, ElementId, Mount, StyleMap, rect_styles};
use crate::selection::ActiveSelection;

#[derive(Debug, Default)]
pub struct OverlayManager {
	styles: StyleMap,
	element: Option<ElementId>,
}

impl OverlayManager {
	/// Creates a manager that styles its overlay with `styles`, verbatim.
	pub fn new(styles: StyleMap) -> Self {
		Self { styles, element: None }
	}

	pub fn element(&self) -> Option<ElementId> {
		self.element
	}

	pub fn exists(&self) -> bool {
		self.element.is_some()
	}

	/// Attaches a new overlay to the container and positions it over
	/// `selection`.
	///
	/// If an overlay already exists it is left alone and returned; callers are
	/// expected to create once per selection.
	pub fn create(&mut self, host: &mut dyn EditorHost, selection: &ActiveSelection) -> ElementId {
		if let Some(element) = self.element {
			trace!(?element, "overlay already exists");
			return element;
		}
		let element = host.create_element(Mount::Container, &self.styles);
		self.element = Some(element);
		debug!(?element, image = ?selection.element, "overlay created");
		self.reposition(host, Some(selection));
		element
	}

	/// Detaches and releases the overlay. Returns `false` when there was none.
	pub fn destroy(&mut self, host: &mut dyn EditorHost) -> bool {
		let Some(element) = self.element.take() else {
			trace!("no overlay to destroy");
			return false;
		};
		host.remove_element(element);
		debug!(?element, "overlay removed");
		true
	}

	/// Measures where the overlay belongs right now without touching it.
	pub fn measure(&self, host: &dyn EditorHost, selection: Option<&ActiveSelection>) -> Option<Rect> {
		self.element?;
		let image = host.element_rect(selection?.element)?;
		Some(overlay_rect(image, &host.container_metrics()))
	}

	/// Re-measures and applies the overlay box. A no-op returning `None` when
	/// there is no overlay, no selection, or the image cannot be measured.
	pub fn reposition(&mut self, host: &mut dyn EditorHost, selection: Option<&ActiveSelection>) -> Option<Rect> {
		let Some(rect) = self.measure(&*host, selection) else {
			trace!("overlay geometry unavailable");
			return None;
		};
		if let Some(element) = self.element {
			host.apply_styles(element, &rect_styles(rect));
		}
		Some(rect)
	}
}

#[cfg(test)]
mod tests;

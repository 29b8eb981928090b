use imgsel_geometry::{ContainerMetrics, Rect, Size};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::event::Signal;

/// Handle to a rendered element owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

/// Handle to a logical content node in the host's document model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Ordered style property map, applied verbatim.
pub type StyleMap = IndexMap<String, String>;

/// Where a newly created element is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mount {
	/// The parent of the editing root, which is also the positioning context
	/// for overlay geometry.
	Container,
	/// Inside an existing element, usually the overlay.
	Element(ElementId),
}

/// The narrow slice of the host editor the controller consumes.
///
/// Implementations answer from live layout on every call; nothing returned
/// here is cached by the controller across events.
pub trait EditorHost {
	/// Resolves a rendered element back to its content node.
	fn find_node(&self, element: ElementId) -> Option<NodeId>;

	/// Whether an activation on `element` targets an image.
	fn is_image(&self, element: ElementId) -> bool;

	/// Linear document offset of `node`.
	fn node_index(&self, node: NodeId) -> Option<usize>;

	/// Moves the document selection.
	fn set_selection(&mut self, index: usize, length: usize);

	/// Deletes content at `offset` relative to `node`.
	fn delete_at(&mut self, node: NodeId, offset: usize);

	/// Rendered box of `element` in viewport coordinates.
	fn element_rect(&self, element: ElementId) -> Option<Rect>;

	/// Box and scroll offsets of the overlay's positioning container.
	fn container_metrics(&self) -> ContainerMetrics;

	/// Intrinsic size of an image element.
	fn image_natural_size(&self, element: ElementId) -> Option<Size>;

	/// Whether an image element floats to the right of its line.
	fn image_floats_right(&self, element: ElementId) -> bool;

	/// Sets the rendered width of an image element.
	fn set_image_width(&mut self, element: ElementId, width: f64);

	fn create_element(&mut self, mount: Mount, styles: &StyleMap) -> ElementId;

	fn remove_element(&mut self, element: ElementId);

	/// Merges `styles` into the element's inline style.
	fn apply_styles(&mut self, element: ElementId, styles: &StyleMap);

	fn set_text(&mut self, element: ElementId, text: &str);

	/// Starts delivering `signal` to the controller.
	fn subscribe(&mut self, signal: Signal);

	/// Stops delivering `signal` to the controller.
	fn unsubscribe(&mut self, signal: Signal);

	/// Toggles the platform's built-in object resizing for the document.
	fn set_native_resizing(&mut self, enabled: bool);

	/// Toggles whether document text can be selected by the user.
	fn set_text_selectable(&mut self, enabled: bool);

	/// Makes the overlay container a positioning context if it is not already.
	fn ensure_container_positioned(&mut self);
}

/// Formats a pixel length the way style maps expect it.
pub(crate) fn px(value: f64) -> String {
	format!("{value}px")
}

/// Reads a pixel length back out of a style map.
pub(crate) fn style_px(styles: &StyleMap, key: &str) -> Option<f64> {
	let raw = styles.get(key)?.trim();
	raw.strip_suffix("px").unwrap_or(raw).trim().parse().ok()
}

/// Inline style for an absolutely positioned box.
pub(crate) fn rect_styles(rect: Rect) -> StyleMap {
	StyleMap::from([
		("left".to_string(), px(rect.left)),
		("top".to_string(), px(rect.top)),
		("width".to_string(), px(rect.width)),
		("height".to_string(), px(rect.height)),
	])
}

//! An [`EditorHost`] over an in-memory scene.
//!
//! Every mutating call is appended to a call log so callers can assert on
//! ordering, and live subscriptions and elements are tracked so leaks show up
//! as leftovers.

use std::path::Path;

use imgsel_geometry::{ContainerMetrics, Rect, ScrollOffset, Size};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::event::{Signal, SignalSet};
use crate::host::{EditorHost, ElementId, Mount, NodeId, StyleMap, style_px};

mod recording;

pub use recording::{Hook, HookRecord, Journal, RecordingFactory};

/// Text measures this many pixels per character.
const CHAR_WIDTH: f64 = 7.0;
const LINE_HEIGHT: f64 = 14.0;
/// Ids handed out for created elements start here, well above scene ids.
const FIRST_CREATED_ID: u64 = 10_000;

/// Layout of an image node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBox {
	/// Rendered box in viewport coordinates.
	pub rect: Rect,
	#[serde(default)]
	pub natural: Option<Size>,
	#[serde(default)]
	pub float_right: bool,
}

/// One content node of the scene, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
	pub element: ElementId,
	pub node: NodeId,
	/// Length in document units; images are always one unit long.
	#[serde(default = "one")]
	pub len: usize,
	#[serde(default)]
	pub image: Option<ImageBox>,
}

fn one() -> usize {
	1
}

/// Initial state of a [`MemoryHost`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
	pub container: ContainerMetrics,
	#[serde(default)]
	pub nodes: Vec<SceneNode>,
}

impl Scene {
	pub fn new(container: ContainerMetrics) -> Self {
		Self {
			container,
			nodes: Vec::new(),
		}
	}

	/// Appends a text node `len` units long.
	pub fn text(mut self, element: u64, node: u64, len: usize) -> Self {
		self.nodes.push(SceneNode {
			element: ElementId(element),
			node: NodeId(node),
			len,
			image: None,
		});
		self
	}

	/// Appends an image node rendered at `rect`.
	pub fn image(mut self, element: u64, node: u64, rect: Rect, natural: Option<Size>) -> Self {
		self.nodes.push(SceneNode {
			element: ElementId(element),
			node: NodeId(node),
			len: 1,
			image: Some(ImageBox {
				rect,
				natural,
				float_right: false,
			}),
		});
		self
	}

	pub fn from_json_str(raw: &str) -> Result<Self> {
		Ok(serde_json::from_str(raw)?)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path).map_err(|error| Error::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_json_str(&raw)
	}
}

/// A host call, as recorded by [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
	SetSelection { index: usize, length: usize },
	DeleteAt { node: NodeId, offset: usize },
	SetImageWidth { element: ElementId, width: f64 },
	CreateElement { element: ElementId, mount: Mount },
	RemoveElement { element: ElementId },
	ApplyStyles { element: ElementId, styles: StyleMap },
	SetText { element: ElementId, text: String },
	Subscribe { signal: Signal },
	Unsubscribe { signal: Signal },
	SetNativeResizing { enabled: bool },
	SetTextSelectable { enabled: bool },
	EnsureContainerPositioned,
}

/// An element created through the host API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveElement {
	pub mount: Mount,
	pub styles: StyleMap,
	pub text: String,
}

impl LiveElement {
	/// Box from explicit pixel styles, falling back to text metrics.
	fn rect(&self) -> Rect {
		let chars = self.text.chars().count() as f64;
		Rect::new(
			style_px(&self.styles, "left").unwrap_or_default(),
			style_px(&self.styles, "top").unwrap_or_default(),
			style_px(&self.styles, "width").unwrap_or(chars * CHAR_WIDTH),
			style_px(&self.styles, "height").unwrap_or(if chars > 0.0 { LINE_HEIGHT } else { 0.0 }),
		)
	}
}

#[derive(Debug, Clone)]
pub struct MemoryHost {
	container: ContainerMetrics,
	nodes: Vec<SceneNode>,
	elements: IndexMap<ElementId, LiveElement>,
	next_id: u64,
	subscriptions: SignalSet,
	selection: Option<(usize, usize)>,
	native_resizing: bool,
	text_selectable: bool,
	container_positioned: bool,
	calls: Vec<HostCall>,
}

impl MemoryHost {
	pub fn new(scene: Scene) -> Self {
		let next_id = scene
			.nodes
			.iter()
			.map(|n| n.element.0 + 1)
			.max()
			.unwrap_or_default()
			.max(FIRST_CREATED_ID);
		Self {
			container: scene.container,
			nodes: scene.nodes,
			elements: IndexMap::new(),
			next_id,
			subscriptions: SignalSet::empty(),
			selection: None,
			native_resizing: true,
			text_selectable: true,
			container_positioned: false,
			calls: Vec::new(),
		}
	}

	/// Calls recorded so far, oldest first.
	pub fn calls(&self) -> &[HostCall] {
		&self.calls
	}

	pub fn take_calls(&mut self) -> Vec<HostCall> {
		std::mem::take(&mut self.calls)
	}

	pub fn subscriptions(&self) -> SignalSet {
		self.subscriptions
	}

	/// Elements created through the host API and not yet removed.
	pub fn live_elements(&self) -> &IndexMap<ElementId, LiveElement> {
		&self.elements
	}

	pub fn element(&self, element: ElementId) -> Option<&LiveElement> {
		self.elements.get(&element)
	}

	pub fn selection(&self) -> Option<(usize, usize)> {
		self.selection
	}

	pub fn native_resizing(&self) -> bool {
		self.native_resizing
	}

	pub fn text_selectable(&self) -> bool {
		self.text_selectable
	}

	pub fn container_positioned(&self) -> bool {
		self.container_positioned
	}

	pub fn nodes(&self) -> &[SceneNode] {
		&self.nodes
	}

	pub fn set_scroll(&mut self, scroll: ScrollOffset) {
		self.container.scroll = scroll;
	}

	pub fn set_image_float_right(&mut self, element: ElementId, float_right: bool) {
		if let Some(image) = self.image_mut(element) {
			image.float_right = float_right;
		}
	}

	/// Moves or resizes an image without going through the host API.
	pub fn set_image_rect(&mut self, element: ElementId, rect: Rect) {
		if let Some(image) = self.image_mut(element) {
			image.rect = rect;
		}
	}

	fn image(&self, element: ElementId) -> Option<&ImageBox> {
		self.nodes.iter().find(|n| n.element == element)?.image.as_ref()
	}

	fn image_mut(&mut self, element: ElementId) -> Option<&mut ImageBox> {
		self.nodes.iter_mut().find(|n| n.element == element)?.image.as_mut()
	}
}

impl EditorHost for MemoryHost {
	fn find_node(&self, element: ElementId) -> Option<NodeId> {
		self.nodes.iter().find(|n| n.element == element).map(|n| n.node)
	}

	fn is_image(&self, element: ElementId) -> bool {
		self.image(element).is_some()
	}

	fn node_index(&self, node: NodeId) -> Option<usize> {
		let mut offset = 0;
		for n in &self.nodes {
			if n.node == node {
				return Some(offset);
			}
			offset += n.len;
		}
		None
	}

	fn set_selection(&mut self, index: usize, length: usize) {
		self.selection = Some((index, length));
		self.calls.push(HostCall::SetSelection { index, length });
	}

	fn delete_at(&mut self, node: NodeId, offset: usize) {
		self.calls.push(HostCall::DeleteAt { node, offset });
		let Some(pos) = self.nodes.iter().position(|n| n.node == node) else {
			return;
		};
		let target = &mut self.nodes[pos];
		if offset >= target.len {
			return;
		}
		if target.image.is_some() || target.len <= 1 {
			self.nodes.remove(pos);
		} else {
			target.len -= 1;
		}
	}

	fn element_rect(&self, element: ElementId) -> Option<Rect> {
		if let Some(image) = self.image(element) {
			return Some(image.rect);
		}
		self.elements.get(&element).map(LiveElement::rect)
	}

	fn container_metrics(&self) -> ContainerMetrics {
		self.container
	}

	fn image_natural_size(&self, element: ElementId) -> Option<Size> {
		self.image(element)?.natural
	}

	fn image_floats_right(&self, element: ElementId) -> bool {
		self.image(element).is_some_and(|image| image.float_right)
	}

	fn set_image_width(&mut self, element: ElementId, width: f64) {
		self.calls.push(HostCall::SetImageWidth { element, width });
		if let Some(image) = self.image_mut(element) {
			let (ratio_w, ratio_h) = match image.natural {
				Some(natural) if natural.width > 0.0 => (natural.width, natural.height),
				_ => (image.rect.width, image.rect.height),
			};
			if ratio_w > 0.0 {
				image.rect.height = (width / ratio_w * ratio_h).round();
			}
			image.rect.width = width;
		}
	}

	fn create_element(&mut self, mount: Mount, styles: &StyleMap) -> ElementId {
		let element = ElementId(self.next_id);
		self.next_id += 1;
		self.elements.insert(
			element,
			LiveElement {
				mount,
				styles: styles.clone(),
				text: String::new(),
			},
		);
		self.calls.push(HostCall::CreateElement { element, mount });
		element
	}

	fn remove_element(&mut self, element: ElementId) {
		self.calls.push(HostCall::RemoveElement { element });
		self.elements.shift_remove(&element);
		// Children go with their parent.
		self.elements.retain(|_, child| child.mount != Mount::Element(element));
	}

	fn apply_styles(&mut self, element: ElementId, styles: &StyleMap) {
		self.calls.push(HostCall::ApplyStyles {
			element,
			styles: styles.clone(),
		});
		if let Some(live) = self.elements.get_mut(&element) {
			live.styles.extend(styles.iter().map(|(k, v)| (k.clone(), v.clone())));
		}
	}

	fn set_text(&mut self, element: ElementId, text: &str) {
		self.calls.push(HostCall::SetText {
			element,
			text: text.to_string(),
		});
		if let Some(live) = self.elements.get_mut(&element) {
			live.text = text.to_string();
		}
	}

	fn subscribe(&mut self, signal: Signal) {
		self.subscriptions.insert(signal.as_set());
		self.calls.push(HostCall::Subscribe { signal });
	}

	fn unsubscribe(&mut self, signal: Signal) {
		self.subscriptions.remove(signal.as_set());
		self.calls.push(HostCall::Unsubscribe { signal });
	}

	fn set_native_resizing(&mut self, enabled: bool) {
		self.native_resizing = enabled;
		self.calls.push(HostCall::SetNativeResizing { enabled });
	}

	fn set_text_selectable(&mut self, enabled: bool) {
		self.text_selectable = enabled;
		self.calls.push(HostCall::SetTextSelectable { enabled });
	}

	fn ensure_container_positioned(&mut self) {
		self.container_positioned = true;
		self.calls.push(HostCall::EnsureContainerPositioned);
	}
}

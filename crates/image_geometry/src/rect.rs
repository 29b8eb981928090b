use serde::{Deserialize, Serialize};

/// A position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// An axis-aligned box with its origin at the top-left corner.
///
/// Negative dimensions are clamped to zero on construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
		Self {
			left,
			top,
			width: width.max(0.0),
			height: height.max(0.0),
		}
	}

	pub const fn size(&self) -> Size {
		Size::new(self.width, self.height)
	}
}

/// Scroll position of a scrollable container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
	pub left: f64,
	pub top: f64,
}

impl ScrollOffset {
	pub const fn new(left: f64, top: f64) -> Self {
		Self { left, top }
	}
}

/// Live measurements of the element the overlay is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerMetrics {
	/// Rendered box in viewport coordinates.
	pub rect: Rect,
	#[serde(default)]
	pub scroll: ScrollOffset,
}

impl ContainerMetrics {
	pub const fn new(rect: Rect, scroll: ScrollOffset) -> Self {
		Self { rect, scroll }
	}
}

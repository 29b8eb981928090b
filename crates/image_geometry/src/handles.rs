use serde::{Deserialize, Serialize};

use crate::rect::{Point, Size};

/// One of the four resize handles placed on the overlay corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
	NorthWest,
	NorthEast,
	SouthWest,
	SouthEast,
}

impl Corner {
	pub const ALL: [Corner; 4] = [Self::NorthWest, Self::NorthEast, Self::SouthWest, Self::SouthEast];

	/// West-side handles shrink the image when dragged right.
	pub const fn is_west(self) -> bool {
		matches!(self, Self::NorthWest | Self::SouthWest)
	}

	const fn is_south(self) -> bool {
		matches!(self, Self::SouthWest | Self::SouthEast)
	}

	/// CSS cursor shown while hovering the handle.
	pub const fn cursor(self) -> &'static str {
		match self {
			Self::NorthWest | Self::SouthEast => "nwse-resize",
			Self::NorthEast | Self::SouthWest => "nesw-resize",
		}
	}
}

/// Top-left position of a handle, relative to the overlay, so that the handle
/// is centred on the overlay corner.
pub fn handle_origin(corner: Corner, overlay: Size, handle: Size) -> Point {
	let x = if corner.is_west() { 0.0 } else { overlay.width };
	let y = if corner.is_south() { overlay.height } else { 0.0 };
	Point::new(x - handle.width / 2.0, y - handle.height / 2.0)
}

/// Width of the image after dragging `corner` horizontally by `dx` pixels
/// from a drag that started at `start_width`. Never less than one pixel.
pub fn drag_width(corner: Corner, start_width: f64, dx: f64) -> f64 {
	let width = if corner.is_west() { start_width - dx } else { start_width + dx };
	width.round().max(1.0)
}

/// Height that keeps the natural aspect ratio at `width`, rounded to whole
/// pixels. `None` when the natural size is degenerate.
pub fn proportional_height(width: f64, natural: Size) -> Option<f64> {
	if natural.width <= 0.0 {
		return None;
	}
	Some((width / natural.width * natural.height).round())
}

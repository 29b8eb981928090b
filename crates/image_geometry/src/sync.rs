use crate::rect::{ContainerMetrics, Rect};

/// Horizontal correction for the overlay's one-pixel outline.
pub const OUTLINE_ADJUST: f64 = 1.0;

/// Computes the overlay box that covers `image` inside `container`.
///
/// `image` and `container.rect` are both viewport coordinates; the result is
/// relative to the container's scrolled content box. Always call with fresh
/// measurements, the output is not meant to be cached across events.
pub fn overlay_rect(image: Rect, container: &ContainerMetrics) -> Rect {
	Rect {
		left: image.left - container.rect.left - OUTLINE_ADJUST + container.scroll.left,
		top: image.top - container.rect.top + container.scroll.top,
		width: image.width,
		height: image.height,
	}
}

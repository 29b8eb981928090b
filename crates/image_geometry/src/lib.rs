//! Geometry for image selection overlays.
//!
//! All values are in CSS pixels, matching what a host reports for rendered
//! boxes. Nothing here measures anything: callers pass live measurements in
//! and get derived boxes back, so the results are only valid until the host
//! layout changes again.

/// Corner handles and drag-resize arithmetic.
pub mod handles;
/// Rectangles, points, sizes and scroll offsets.
pub mod rect;
/// Overlay placement relative to the editing container.
pub mod sync;

pub use handles::{Corner, drag_width, handle_origin, proportional_height};
pub use rect::{ContainerMetrics, Point, Rect, ScrollOffset, Size};
pub use sync::overlay_rect;

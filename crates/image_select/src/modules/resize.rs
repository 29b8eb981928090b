//! Corner handles that resize the image by dragging.

use imgsel_geometry::{Corner, Size, drag_width, handle_origin};
use smallvec::SmallVec;
use tracing::debug;

use super::{CapabilityModule, ModuleContext, ModuleKind};
use crate::event::PointerEvent;
use crate::host::{ElementId, Mount, StyleMap, px, style_px};

const DEFAULT_HANDLE_SIZE: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
	corner: Corner,
	start_x: f64,
	start_width: f64,
}

#[derive(Debug, Default)]
pub struct Resize {
	handles: SmallVec<[(Corner, ElementId); 4]>,
	drag: Option<Drag>,
}

impl Resize {
	fn handle_size(styles: &StyleMap) -> Size {
		Size::new(
			style_px(styles, "width").unwrap_or(DEFAULT_HANDLE_SIZE),
			style_px(styles, "height").unwrap_or(DEFAULT_HANDLE_SIZE),
		)
	}
}

impl CapabilityModule for Resize {
	fn name(&self) -> &str {
		ModuleKind::RESIZE
	}

	fn on_create(&mut self, ctx: &mut ModuleContext<'_>) {
		let mount = Mount::Element(ctx.overlay());
		for corner in Corner::ALL {
			let mut styles = ctx.options().handle_styles.clone();
			styles.insert("cursor".to_string(), corner.cursor().to_string());
			let handle = ctx.host().create_element(mount, &styles);
			self.handles.push((corner, handle));
		}
	}

	fn on_update(&mut self, ctx: &mut ModuleContext<'_>) {
		let Some(overlay) = ctx.overlay_rect() else {
			return;
		};
		let handle_size = Self::handle_size(&ctx.options().handle_styles);
		for &(corner, handle) in &self.handles {
			let origin = handle_origin(corner, overlay.size(), handle_size);
			let styles = StyleMap::from([
				("left".to_string(), px(origin.x)),
				("top".to_string(), px(origin.y)),
			]);
			ctx.host().apply_styles(handle, &styles);
		}
	}

	fn on_destroy(&mut self, ctx: &mut ModuleContext<'_>) {
		self.drag = None;
		for (_, handle) in self.handles.drain(..) {
			ctx.host().remove_element(handle);
		}
	}

	fn on_pointer(&mut self, ctx: &mut ModuleContext<'_>, event: &PointerEvent) -> bool {
		match *event {
			PointerEvent::Down { target, x } => {
				let Some(&(corner, _)) = self.handles.iter().find(|(_, handle)| *handle == target) else {
					return false;
				};
				let image = ctx.selection().element;
				let Some(rect) = ctx.host().element_rect(image) else {
					return false;
				};
				debug!(?corner, start_width = rect.width, "resize drag started");
				self.drag = Some(Drag {
					corner,
					start_x: x,
					start_width: rect.width,
				});
				true
			}
			PointerEvent::Move { x } => {
				let Some(drag) = self.drag else {
					return false;
				};
				let width = drag_width(drag.corner, drag.start_width, x - drag.start_x);
				let image = ctx.selection().element;
				ctx.host().set_image_width(image, width);
				ctx.request_update();
				true
			}
			PointerEvent::Up => self.drag.take().is_some(),
		}
	}
}

//! Size label shown in a corner of the overlay.

use imgsel_geometry::proportional_height;

use super::{CapabilityModule, ModuleContext, ModuleKind};
use crate::host::{ElementId, Mount, StyleMap, px};

/// Images at least this large get the label inside their bottom-right corner.
const INSIDE_MIN_WIDTH: f64 = 120.0;
const INSIDE_MIN_HEIGHT: f64 = 30.0;
const MARGIN: f64 = 4.0;

#[derive(Debug, Default)]
pub struct DisplaySize {
	label: Option<ElementId>,
}

impl DisplaySize {
	/// Rendered width and the height implied by the natural aspect ratio.
	fn current_size(ctx: &mut ModuleContext<'_>) -> Option<(f64, f64)> {
		let image = ctx.selection().element;
		let rect = ctx.host().element_rect(image)?;
		let width = rect.width.round();
		let height = ctx
			.host()
			.image_natural_size(image)
			.and_then(|natural| proportional_height(width, natural))
			.unwrap_or_else(|| rect.height.round());
		Some((width, height))
	}
}

fn placement(left: String, right: String, bottom: String) -> StyleMap {
	StyleMap::from([
		("right".to_string(), right),
		("bottom".to_string(), bottom),
		("left".to_string(), left),
	])
}

impl CapabilityModule for DisplaySize {
	fn name(&self) -> &str {
		ModuleKind::DISPLAY_SIZE
	}

	fn on_create(&mut self, ctx: &mut ModuleContext<'_>) {
		let mount = Mount::Element(ctx.overlay());
		let styles = ctx.options().display_styles.clone();
		self.label = Some(ctx.host().create_element(mount, &styles));
	}

	fn on_update(&mut self, ctx: &mut ModuleContext<'_>) {
		let Some(label) = self.label else {
			return;
		};
		let Some((width, height)) = Self::current_size(ctx) else {
			return;
		};

		ctx.host().set_text(label, &format!("{width} × {height}"));

		let auto = || "auto".to_string();
		let styles = if width > INSIDE_MIN_WIDTH && height > INSIDE_MIN_HEIGHT {
			placement(auto(), px(MARGIN), px(MARGIN))
		} else {
			// Too small to cover: hang the label off a bottom corner, measured after the text changed.
			let size = ctx.host().element_rect(label).map(|r| r.size()).unwrap_or_default();
			let outside = (px(-(size.width + MARGIN)), px(-(size.height + MARGIN)));
			let image = ctx.selection().element;
			if ctx.host().image_floats_right(image) {
				placement(outside.0, auto(), outside.1)
			} else {
				placement(auto(), outside.0, outside.1)
			}
		};
		ctx.host().apply_styles(label, &styles);
	}

	fn on_destroy(&mut self, ctx: &mut ModuleContext<'_>) {
		if let Some(label) = self.label.take() {
			ctx.host().remove_element(label);
		}
	}
}

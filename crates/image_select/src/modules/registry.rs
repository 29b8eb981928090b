use imgsel_geometry::Rect;
use tracing::{debug, trace};

use super::{CapabilityModule, ModuleContext, ModuleFactories, ModuleKind, ModuleOptions};
use crate::config::ModuleEntry;
use crate::error::Result;
use crate::event::PointerEvent;
use crate::host::{EditorHost, ElementId};
use crate::selection::ActiveSelection;

/// Result of routing a pointer event through the live modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerOutcome {
	pub consumed: bool,
	pub update_requested: bool,
}

/// Owns the module instances of the active selection and drives their hooks.
///
/// Instances exist only between [`Self::initialize`] and
/// [`Self::teardown_all`]; every hook runs in configured order.
pub struct ModuleRegistry {
	kinds: Vec<ModuleKind>,
	options: ModuleOptions,
	instances: Vec<Box<dyn CapabilityModule>>,
	/// Overlay the live instances were mounted into.
	mounted: Option<ElementId>,
}

impl ModuleRegistry {
	/// Resolves every entry up front so a bad name fails at construction.
	pub fn new(entries: &[ModuleEntry], factories: &ModuleFactories, options: ModuleOptions) -> Result<Self> {
		let kinds = entries
			.iter()
			.map(|entry| ModuleKind::resolve(entry, factories))
			.collect::<Result<Vec<_>>>()?;
		Ok(Self {
			kinds,
			options,
			instances: Vec::new(),
			mounted: None,
		})
	}

	pub fn is_live(&self) -> bool {
		!self.instances.is_empty()
	}

	pub fn len(&self) -> usize {
		self.instances.len()
	}

	pub fn is_empty(&self) -> bool {
		self.instances.is_empty()
	}

	/// Names of the live instances, in order.
	pub fn names(&self) -> Vec<&str> {
		self.instances.iter().map(|m| m.name()).collect()
	}

	/// Builds one instance per configured entry, then runs `on_create` on all
	/// of them followed by `on_update` on all of them.
	///
	/// Live instances from an earlier selection are destroyed first.
	pub fn initialize(
		&mut self,
		host: &mut dyn EditorHost,
		selection: &ActiveSelection,
		overlay: ElementId,
		overlay_rect: Option<Rect>,
	) {
		self.teardown_all(host, selection, overlay_rect);

		self.instances = self.kinds.iter().map(|kind| kind.instantiate(&self.options)).collect();
		self.mounted = Some(overlay);
		debug!(modules = ?self.kinds, "module instances created");

		for module in &mut self.instances {
			let mut ctx = ModuleContext::new(&mut *host, selection, overlay, overlay_rect, &self.options);
			module.on_create(&mut ctx);
		}
		for module in &mut self.instances {
			let mut ctx = ModuleContext::new(&mut *host, selection, overlay, overlay_rect, &self.options);
			module.on_update(&mut ctx);
		}
	}

	/// Runs `on_update` on every live instance. The caller repositions the
	/// overlay first so `overlay_rect` is current.
	pub fn update(&mut self, host: &mut dyn EditorHost, selection: &ActiveSelection, overlay_rect: Option<Rect>) {
		let Some(overlay) = self.mounted else {
			trace!("module update with no live instances");
			return;
		};
		for module in &mut self.instances {
			let mut ctx = ModuleContext::new(&mut *host, selection, overlay, overlay_rect, &self.options);
			module.on_update(&mut ctx);
		}
	}

	/// Runs `on_destroy` on every live instance in instantiation order, then
	/// drops them all. No-op when nothing is live.
	pub fn teardown_all(
		&mut self,
		host: &mut dyn EditorHost,
		selection: &ActiveSelection,
		overlay_rect: Option<Rect>,
	) {
		let Some(overlay) = self.mounted.take() else {
			trace!("module teardown with no live instances");
			return;
		};
		for module in &mut self.instances {
			let mut ctx = ModuleContext::new(&mut *host, selection, overlay, overlay_rect, &self.options);
			module.on_destroy(&mut ctx);
		}
		debug!(count = self.instances.len(), "module instances destroyed");
		self.instances.clear();
	}

	/// Offers `event` to each live instance in order until one consumes it.
	///
	/// Update requests from every instance that saw the event are kept, even
	/// when none of them consumed it.
	pub fn dispatch_pointer(
		&mut self,
		host: &mut dyn EditorHost,
		selection: &ActiveSelection,
		overlay_rect: Option<Rect>,
		event: &PointerEvent,
	) -> PointerOutcome {
		let Some(overlay) = self.mounted else {
			return PointerOutcome::default();
		};
		let mut outcome = PointerOutcome::default();
		for module in &mut self.instances {
			let mut ctx = ModuleContext::new(&mut *host, selection, overlay, overlay_rect, &self.options);
			outcome.consumed = module.on_pointer(&mut ctx, event);
			outcome.update_requested |= ctx.update_requested();
			if outcome.consumed {
				trace!(module = module.name(), ?event, "pointer consumed");
				break;
			}
		}
		outcome
	}
}

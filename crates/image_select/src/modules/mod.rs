use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use imgsel_geometry::Rect;
use indexmap::IndexMap;

use crate::config::ModuleEntry;
use crate::error::{Error, Result};
use crate::event::PointerEvent;
use crate::host::{EditorHost, ElementId, StyleMap};
use crate::selection::ActiveSelection;

pub mod display_size;
pub mod registry;
pub mod resize;

pub use display_size::DisplaySize;
pub use registry::{ModuleRegistry, PointerOutcome};
pub use resize::Resize;

/// Options shared by every module instance of a controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleOptions {
	pub handle_styles: StyleMap,
	pub display_styles: StyleMap,
	/// Unrecognized configuration keys, unvalidated.
	pub extra: BTreeMap<String, serde_json::Value>,
}

/// What a module hook can see and touch.
///
/// The selection and the overlay are read-only here; only the controller
/// changes them.
pub struct ModuleContext<'a> {
	host: &'a mut dyn EditorHost,
	selection: &'a ActiveSelection,
	overlay: ElementId,
	overlay_rect: Option<Rect>,
	options: &'a ModuleOptions,
	update_requested: bool,
}

impl<'a> ModuleContext<'a> {
	pub fn new(
		host: &'a mut dyn EditorHost,
		selection: &'a ActiveSelection,
		overlay: ElementId,
		overlay_rect: Option<Rect>,
		options: &'a ModuleOptions,
	) -> Self {
		Self {
			host,
			selection,
			overlay,
			overlay_rect,
			options,
			update_requested: false,
		}
	}

	pub fn host(&mut self) -> &mut dyn EditorHost {
		&mut *self.host
	}

	pub fn selection(&self) -> &ActiveSelection {
		self.selection
	}

	/// The overlay element module UI is mounted into.
	pub fn overlay(&self) -> ElementId {
		self.overlay
	}

	/// Overlay geometry measured for this cycle, relative to the container.
	///
	/// `None` when the image could not be measured, e.g. during teardown after
	/// the image was deleted.
	pub fn overlay_rect(&self) -> Option<Rect> {
		self.overlay_rect
	}

	pub fn options(&self) -> &ModuleOptions {
		self.options
	}

	/// Asks the controller to reposition the overlay and run `on_update` on
	/// every module once the current hook returns.
	pub fn request_update(&mut self) {
		self.update_requested = true;
	}

	pub(crate) fn update_requested(&self) -> bool {
		self.update_requested
	}
}

/// A pluggable behavior attached to the active selection.
///
/// Hooks run in registry list order. `on_destroy` must release everything
/// `on_create` acquired.
pub trait CapabilityModule {
	fn name(&self) -> &str;

	/// Acquires and renders whatever the module needs.
	fn on_create(&mut self, ctx: &mut ModuleContext<'_>);

	/// Re-renders after a geometry or content change.
	fn on_update(&mut self, ctx: &mut ModuleContext<'_>);

	fn on_destroy(&mut self, ctx: &mut ModuleContext<'_>);

	/// Handles pointer interaction with overlay UI. Returns `true` when the
	/// event was consumed.
	fn on_pointer(&mut self, ctx: &mut ModuleContext<'_>, event: &PointerEvent) -> bool {
		let _ = (ctx, event);
		false
	}
}

/// Builds instances of an externally supplied module.
pub trait ModuleFactory {
	/// Name the module is referred to by in configuration.
	fn name(&self) -> &str;

	fn build(&self, options: &ModuleOptions) -> Box<dyn CapabilityModule>;
}

/// Externally supplied factories, looked up by name.
#[derive(Default, Clone)]
pub struct ModuleFactories {
	inner: IndexMap<String, Arc<dyn ModuleFactory>>,
}

impl ModuleFactories {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `factory` under its own name, replacing any earlier one.
	pub fn register(&mut self, factory: Arc<dyn ModuleFactory>) -> &mut Self {
		self.inner.insert(factory.name().to_string(), factory);
		self
	}

	pub fn get(&self, name: &str) -> Option<&Arc<dyn ModuleFactory>> {
		self.inner.get(name)
	}
}

impl fmt::Debug for ModuleFactories {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.inner.keys()).finish()
	}
}

/// A resolved module list entry.
#[derive(Clone)]
pub enum ModuleKind {
	DisplaySize,
	Resize,
	External(Arc<dyn ModuleFactory>),
}

impl ModuleKind {
	pub const DISPLAY_SIZE: &'static str = "DisplaySize";
	pub const RESIZE: &'static str = "Resize";

	/// Resolves a configured entry against the built-ins, then `factories`.
	pub fn resolve(entry: &ModuleEntry, factories: &ModuleFactories) -> Result<Self> {
		match entry {
			ModuleEntry::External(factory) => Ok(Self::External(Arc::clone(factory))),
			ModuleEntry::Named(name) => match name.as_str() {
				Self::DISPLAY_SIZE => Ok(Self::DisplaySize),
				Self::RESIZE => Ok(Self::Resize),
				other => factories
					.get(other)
					.map(|factory| Self::External(Arc::clone(factory)))
					.ok_or_else(|| Error::UnknownModule(other.to_string())),
			},
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::DisplaySize => Self::DISPLAY_SIZE,
			Self::Resize => Self::RESIZE,
			Self::External(factory) => factory.name(),
		}
	}

	pub fn instantiate(&self, options: &ModuleOptions) -> Box<dyn CapabilityModule> {
		match self {
			Self::DisplaySize => Box::new(DisplaySize::default()),
			Self::Resize => Box::new(Resize::default()),
			Self::External(factory) => factory.build(options),
		}
	}
}

impl fmt::Debug for ModuleKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::External(factory) => f.debug_tuple("External").field(&factory.name()).finish(),
			builtin => f.write_str(builtin.name()),
		}
	}
}

use std::cell::RefCell;
use std::rc::Rc;

use imgsel_geometry::Rect;

use crate::event::PointerEvent;
use crate::modules::{CapabilityModule, ModuleContext, ModuleFactory, ModuleOptions};

/// Which lifecycle hook ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
	Create,
	Update,
	Destroy,
	Pointer,
}

impl Hook {
	pub const fn label(self) -> &'static str {
		match self {
			Self::Create => "create",
			Self::Update => "update",
			Self::Destroy => "destroy",
			Self::Pointer => "pointer",
		}
	}
}

/// One hook invocation seen by a [`RecordingFactory`] module.
#[derive(Debug, Clone, PartialEq)]
pub struct HookRecord {
	pub module: String,
	pub hook: Hook,
	pub overlay_rect: Option<Rect>,
}

/// Shared, append-only log of hook invocations across modules.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<HookRecord>>>);

impl Journal {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn records(&self) -> Vec<HookRecord> {
		self.0.borrow().clone()
	}

	/// Records flattened to `"<module>:<hook>"` strings.
	pub fn entries(&self) -> Vec<String> {
		self.0
			.borrow()
			.iter()
			.map(|r| format!("{}:{}", r.module, r.hook.label()))
			.collect()
	}

	pub fn clear(&self) {
		self.0.borrow_mut().clear();
	}

	fn push(&self, module: &str, hook: Hook, overlay_rect: Option<Rect>) {
		self.0.borrow_mut().push(HookRecord {
			module: module.to_string(),
			hook,
			overlay_rect,
		});
	}
}

/// Factory for modules that only record their hook calls.
#[derive(Debug, Clone)]
pub struct RecordingFactory {
	name: String,
	journal: Journal,
	consume_pointer: bool,
	request_update: bool,
}

impl RecordingFactory {
	pub fn new(name: impl Into<String>, journal: &Journal) -> Self {
		Self {
			name: name.into(),
			journal: journal.clone(),
			consume_pointer: false,
			request_update: false,
		}
	}

	/// Built modules consume every pointer event and request an update.
	pub fn consuming_pointer(mut self) -> Self {
		self.consume_pointer = true;
		self.request_update = true;
		self
	}

	/// Built modules request an update on every pointer event but let it pass.
	pub fn requesting_update(mut self) -> Self {
		self.request_update = true;
		self
	}
}

impl ModuleFactory for RecordingFactory {
	fn name(&self) -> &str {
		&self.name
	}

	fn build(&self, _options: &ModuleOptions) -> Box<dyn CapabilityModule> {
		Box::new(RecordingModule {
			name: self.name.clone(),
			journal: self.journal.clone(),
			consume_pointer: self.consume_pointer,
			request_update: self.request_update,
		})
	}
}

struct RecordingModule {
	name: String,
	journal: Journal,
	consume_pointer: bool,
	request_update: bool,
}

impl CapabilityModule for RecordingModule {
	fn name(&self) -> &str {
		&self.name
	}

	fn on_create(&mut self, ctx: &mut ModuleContext<'_>) {
		self.journal.push(&self.name, Hook::Create, ctx.overlay_rect());
	}

	fn on_update(&mut self, ctx: &mut ModuleContext<'_>) {
		self.journal.push(&self.name, Hook::Update, ctx.overlay_rect());
	}

	fn on_destroy(&mut self, ctx: &mut ModuleContext<'_>) {
		self.journal.push(&self.name, Hook::Destroy, ctx.overlay_rect());
	}

	fn on_pointer(&mut self, ctx: &mut ModuleContext<'_>, _event: &PointerEvent) -> bool {
		self.journal.push(&self.name, Hook::Pointer, ctx.overlay_rect());
		if self.request_update {
			ctx.request_update();
		}
		self.consume_pointer
	}
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use imgsel::geometry::Rect;
use imgsel::memory::{HostCall, MemoryHost, Scene};
use imgsel::{Config, Controller, HostEvent, ModuleFactories, SelectState, Signal};
use serde::Serialize;
use tracing::{debug, info_span};

/// Files and switches for one replay.
#[derive(Debug, Clone)]
pub struct Inputs {
	pub scene: PathBuf,
	pub events: PathBuf,
	pub config: Option<PathBuf>,
	pub keep_attached: bool,
}

/// Controller state after one event.
#[derive(Debug, Serialize)]
pub struct Step {
	pub index: usize,
	pub event: HostEvent,
	pub state: SelectState,
	pub overlay: Option<Rect>,
	pub modules: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Report {
	pub steps: Vec<Step>,
	pub final_state: SelectState,
	pub calls: Vec<HostCall>,
	pub live_elements: usize,
	pub subscriptions: Vec<Signal>,
}

fn load_events(path: &Path) -> anyhow::Result<Vec<HostEvent>> {
	let raw = std::fs::read_to_string(path).with_context(|| format!("reading events from {}", path.display()))?;
	serde_json::from_str(&raw).with_context(|| format!("parsing events in {}", path.display()))
}

pub fn run(inputs: &Inputs) -> anyhow::Result<Report> {
	let config = match &inputs.config {
		Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => Config::default(),
	};
	let scene = Scene::load(&inputs.scene).with_context(|| format!("loading scene {}", inputs.scene.display()))?;
	let events = load_events(&inputs.events)?;

	let mut controller = Controller::new(&config, &ModuleFactories::new()).context("building controller")?;
	let mut host = MemoryHost::new(scene);
	controller.attach(&mut host);

	let mut steps = Vec::with_capacity(events.len());
	for (index, event) in events.into_iter().enumerate() {
		let _span = info_span!("event", index).entered();
		debug!(?event, "delivering");
		controller.handle(&mut host, &event);
		steps.push(Step {
			index,
			event,
			state: controller.state(),
			overlay: controller.overlay_rect(&host),
			modules: controller.module_names().into_iter().map(str::to_string).collect(),
		});
	}

	if !inputs.keep_attached {
		controller.detach(&mut host);
	}

	Ok(Report {
		steps,
		final_state: controller.state(),
		calls: host.take_calls(),
		live_elements: host.live_elements().len(),
		subscriptions: host.subscriptions().signals().collect(),
	})
}

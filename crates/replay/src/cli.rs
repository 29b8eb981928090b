use std::path::PathBuf;

use clap::Parser;

use crate::replay::Inputs;

/// Replay image selection events against an in-memory editor.
#[derive(Parser, Debug)]
#[command(name = "imgsel", version)]
pub struct Cli {
	/// Scene description (JSON)
	#[arg(short, long, value_name = "PATH")]
	pub scene: PathBuf,

	/// Event trace (JSON array of host events)
	#[arg(short, long, value_name = "PATH")]
	pub events: PathBuf,

	/// Controller configuration (TOML, or JSON by extension)
	#[arg(short, long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Leave the controller attached after the last event
	#[arg(long)]
	pub keep_attached: bool,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Cli {
	pub fn inputs(&self) -> Inputs {
		Inputs {
			scene: self.scene.clone(),
			events: self.events.clone(),
			config: self.config.clone(),
			keep_attached: self.keep_attached,
		}
	}
}

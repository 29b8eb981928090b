#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Headless driver for the image selection controller.
//!
//! Loads a scene and an event trace, runs every event through a
//! [`Controller`](imgsel::Controller) attached to an in-memory host, and
//! prints a JSON report of what the controller did.

mod cli;
mod replay;

use clap::Parser;
use cli::Cli;
use tracing::info;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let report = replay::run(&cli.inputs())?;
	info!(steps = report.steps.len(), state = ?report.final_state, "replay finished");
	println!("{}", serde_json::to_string_pretty(&report)?);
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("IMGSEL_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("imgsel=trace,imgsel_replay=debug")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use frontdesk::logging;
use workflow::DeskWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize();

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let mut workflow = DeskWorkflow::from_config(resolved)?;
	let report = workflow.run(cli.command)?;

	match cli.output {
		OutputFormat::Plain => print_plain(&report),
		OutputFormat::Json => print_json(&report)?,
	}

	Ok(())
}

use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::command::Command;
use super::options::{OutputFormat, RoleArg};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `frontdesk` binary.
#[derive(Parser, Debug)]
#[command(
	name = "frontdesk",
	version,
	long_version = long_version(),
	about = "Front-of-house desk for members, guestlists and check-ins",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "FRONTDESK_CONFIG",
		action = ArgAction::Append,
		global = true,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		global = true,
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'd',
		long = "data-file",
		value_name = "PATH",
		global = true,
		help = "Venue data file to read and write (default: <data dir>/venue.json)"
	)]
	pub(crate) data_file: Option<PathBuf>,
	#[arg(
		short = 'r',
		long,
		value_enum,
		global = true,
		help = "Staff role for this session (default: reception)"
	)]
	pub(crate) role: Option<RoleArg>,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		global = true,
		help = "Quiet period before a suggestion lookup runs (default: 300)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		long = "min-query-len",
		value_name = "CHARS",
		global = true,
		help = "Shortest query that triggers suggestions (default: 2)"
	)]
	pub(crate) min_query_len: Option<usize>,
	#[arg(
		long = "suggestion-limit",
		value_name = "COUNT",
		global = true,
		help = "Maximum number of suggestions shown (default: 5)"
	)]
	pub(crate) suggestion_limit: Option<usize>,
	#[arg(
		long = "print-config",
		global = true,
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		global = true,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
	#[command(subcommand)]
	pub(crate) command: Option<Command>,
}

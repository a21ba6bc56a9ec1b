mod args;
mod output;

pub(crate) use args::{
	AddMemberArgs, CliArgs, Command, CreateGuestlistArgs, EditMemberArgs, OutputFormat, parse_cli,
};
pub(crate) use output::{print_json, print_plain};

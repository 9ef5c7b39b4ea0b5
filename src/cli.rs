//! CLI domain: parse, route and output only.
//! No lookup logic; the route table dispatches to the data builder.

mod output;
mod parse;
mod route;

pub use output::{format_capabilities_table, map_error, render_value, OutputFormat};
pub use parse::{Cli, Commands};
pub use route::{parse_assignment, RunContext};

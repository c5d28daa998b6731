// Table and chart rendering shared by the subcommands and the browser
pub mod display;

// Interactive browser loop over the HTTP API
mod browse;

// HTTP-backed handlers for browser commands
mod command_handlers;

pub use browse::{browse_loop, parse_command, Command, TableState};

//! Command-line interface: flags handled before the TUI starts.
//!
//! ```ignore
//! use quakes::cli::{parse_args, run_cli_command};
//!
//! if run_cli_command(parse_args(std::env::args())) {
//!     return Ok(());
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::{help_text, version_text, VERSION};

/// Run a non-TUI command. Returns true if one was handled and the process
/// should exit.
pub fn run_cli_command(command: CliCommand) -> bool {
    match command {
        CliCommand::Version => {
            println!("{}", version_text());
            true
        }
        CliCommand::Help => {
            print!("{}", help_text());
            true
        }
        CliCommand::RunTui => false,
    }
}

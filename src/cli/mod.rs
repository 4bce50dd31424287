//! CLI layer: argument parsing and command execution.

pub mod run;
pub mod types;

pub use types::Cli;

/// Report an unrecovered error and exit non-zero.
pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("Error: {err:#}");
    std::process::exit(1);
}

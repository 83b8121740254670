//! # Intake CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! CLI (src/cli/)            clap parsing, tracing setup, rendering
//!        |
//! intakeapp::api            input normalization, dispatch
//!        |
//! intakeapp::commands       wizard logic, ledger, export
//! ```
//!
//! Everything from `intakeapp::api` inward is UI agnostic. The CLI owns every
//! user-facing concern: argument parsing, context initialization, dispatch,
//! error handling and rendering.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

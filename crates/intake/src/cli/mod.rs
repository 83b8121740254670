//! # CLI Behavior
//!
//! This is **one possible UI client** for intake. It is the only place that knows
//! about terminal I/O, exit codes and output formatting.
//!
//! Each invocation performs one wizard action and exits. The draft is saved after
//! every change, so a session spans as many invocations as the user likes:
//!
//! ```text
//! intake set contact.firstName Amara
//! intake set contact.email amara@example.com
//! intake next
//! ...
//! intake submit
//! ```
//!
//! Running `intake` with no arguments shows the current step and its fields.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Per-command handlers that call the API and print results
//! - `render`: Output formatting (colors, tables, messages)

mod commands;
mod render;
pub mod setup;

pub use commands::run;

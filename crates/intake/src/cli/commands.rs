//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//! - Owns the async runtime for export and upload
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_logging()`: stderr tracing, `-v` or `RUST_LOG` to raise the level
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::render::{
    print_config, print_export, print_fields, print_messages, print_records, print_status,
};
use super::setup::{Cli, Commands, LedgerCommands};
use anyhow::{bail, Result};
use clap::Parser;
use intakeapp::api::IntakeApi;
use intakeapp::init::{initialize, IntakeContext};
use intakeapp::store::fs_backend::FsBackend;
use std::future::Future;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Api = IntakeApi<FsBackend, FsBackend>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = initialize(cli.data_dir.clone())?;
    tracing::debug!(command = ?cli.command, data_dir = %ctx.data_dir.display(), "dispatching");

    match cli.command {
        None | Some(Commands::Status) => handle_status(&ctx.api),
        Some(Commands::Set { path, value }) => {
            handle_set(&mut ctx.api, &path, value.as_deref().unwrap_or(""))
        }
        Some(Commands::Next) => handle_next(&mut ctx.api),
        Some(Commands::Back) => handle_back(&mut ctx.api),
        Some(Commands::Submit { user }) => handle_submit(&mut ctx.api, user.as_deref()),
        Some(Commands::Fields) => handle_fields(&ctx.api),
        Some(Commands::Export) => handle_export(&ctx.api),
        Some(Commands::Ledger { action }) => match action {
            LedgerCommands::List { json } => handle_ledger_list(&ctx.api, json),
            LedgerCommands::Clear { yes } => handle_ledger_clear(&mut ctx.api, yes),
        },
        Some(Commands::Config) => handle_config(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Drive one async API call to completion on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

fn handle_status(api: &Api) -> Result<()> {
    let result = api.status();
    print_status(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(api: &mut Api, path: &str, value: &str) -> Result<()> {
    let result = api.update(path, value)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_next(api: &mut Api) -> Result<()> {
    let result = api.advance();
    print_messages(&result.messages);
    if !result.passed() {
        print_status(&api.status());
    }
    Ok(())
}

fn handle_back(api: &mut Api) -> Result<()> {
    let result = api.retreat();
    print_messages(&result.messages);
    Ok(())
}

fn handle_submit(api: &mut Api, user: Option<&str>) -> Result<()> {
    let result = block_on(api.submit(user))??;
    if let Some(report) = &result.export {
        print_export(report);
    }
    print_messages(&result.messages);
    if !result.passed() {
        bail!("submission blocked by validation");
    }
    Ok(())
}

fn handle_fields(api: &Api) -> Result<()> {
    print_fields(&api.fields().fields);
    Ok(())
}

fn handle_export(api: &Api) -> Result<()> {
    let result = block_on(api.export())??;
    if let Some(report) = &result.export {
        print_export(report);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_ledger_list(api: &Api, json: bool) -> Result<()> {
    let result = api.list_records();
    if json {
        println!("{}", serde_json::to_string_pretty(&result.records)?);
        return Ok(());
    }
    print_records(&result.records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_ledger_clear(api: &mut Api, yes: bool) -> Result<()> {
    if !yes {
        bail!(
            "refusing to clear {} record(s) without --yes",
            api.ledger().len()
        );
    }
    let result = api.clear_records()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &IntakeContext) -> Result<()> {
    println!("data_dir = {}", ctx.data_dir.display());
    print_config(&ctx.config.entries(&ctx.data_dir));
    Ok(())
}

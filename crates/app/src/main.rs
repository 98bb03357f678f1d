//! fakturo - bulk invoice client for the sevDesk accounting API
//!
//! Queue invoice drafts locally (manual entry or CSV import), then
//! submit them sequentially against the remote API with per-item
//! failure tolerance.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;
mod context;
mod logging;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use context::AppContext;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before logging init so RUST_LOG from the file applies.
    let dotenv = dotenvy::dotenv();
    logging::init();
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env file");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        Some("import") => {
            let path = args.get(1).ok_or_else(|| anyhow!("usage: fakturo import <file.csv>"))?;
            let ctx = AppContext::init().await?;
            commands::import(&ctx, Path::new(path)).await
        }
        Some("add") => {
            let ctx = AppContext::init().await?;
            commands::add(&ctx, &args[1..]).await
        }
        Some("list") => {
            let ctx = AppContext::init().await?;
            commands::list(&ctx).await
        }
        Some("remove") => {
            let index = args
                .get(1)
                .ok_or_else(|| anyhow!("usage: fakturo remove <index>"))?
                .parse::<usize>()
                .context("index must be a number, as shown by `fakturo list`")?;
            let ctx = AppContext::init().await?;
            commands::remove(&ctx, index).await
        }
        Some("clear") => {
            let ctx = AppContext::init().await?;
            commands::clear(&ctx).await
        }
        Some("submit") => {
            let ctx = AppContext::init().await?;
            commands::submit(&ctx).await
        }
        Some("contacts") => {
            let ctx = AppContext::init().await?;
            commands::contacts(&ctx).await
        }
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("unknown command"))
        }
    }
}

fn print_help() {
    println!("fakturo - bulk invoice client for the sevDesk API");
    println!();
    println!("USAGE:");
    println!("    fakturo <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    import <file.csv>   Append invoices from a CSV file to the batch queue");
    println!("    add [flags]         Queue one invoice (--contact-id, --contact, --date,");
    println!("                        --due, --number, --item desc:qty:price[:tax])");
    println!("    list                Show the queued invoices");
    println!("    remove <index>      Remove one queued invoice by its list index");
    println!("    clear               Empty the batch queue");
    println!("    submit              Submit the queue to the API (Ctrl-C aborts)");
    println!("    contacts            List contacts known to the API");
    println!("    help                Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    FAKTURO_API_KEY     sevDesk API key (required for submit/contacts)");
    println!("    RUST_LOG            Log filter, e.g. RUST_LOG=debug");
}

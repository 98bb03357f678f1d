//! Command implementations
//!
//! This is a CLI tool, so `println!` is intentionally used for
//! user-facing output; structured logging stays on stderr via tracing.

use std::path::Path;

use anyhow::{anyhow, bail, Context};
use fakturo_core::builder::{build_from_form, FormSnapshot, LineItemInput};
use fakturo_core::report::summarize;
use fakturo_core::submit::{InvoiceGateway, SubmitError};
use fakturo_domain::constants::DEFAULT_TAX_RATE;
use fakturo_infra::import::read_csv_drafts;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::context::AppContext;

/// `import <file.csv>`: read a CSV file and append every decodable row
/// to the batch queue.
pub async fn import(ctx: &AppContext, path: &Path) -> anyhow::Result<()> {
    let report = read_csv_drafts(path)?;

    let imported = report.drafts.len();
    for draft in report.drafts {
        ctx.queue.append(draft).await?;
    }

    println!("Imported {imported} invoice(s) into the batch queue.");
    if report.skipped_rows > 0 {
        println!("Skipped {} unreadable row(s).", report.skipped_rows);
    }
    Ok(())
}

/// `add`: build one draft from command-line flags and queue it.
pub async fn add(ctx: &AppContext, args: &[String]) -> anyhow::Result<()> {
    let snapshot = parse_add_flags(args)?;
    let draft = build_from_form(&snapshot).map_err(|e| anyhow!("invalid invoice: {e}"))?;

    let total = draft.computed_total();
    ctx.queue.append(draft).await?;

    println!("Queued invoice (total {total:.2} EUR). Queue length: {}.", ctx.queue.len().await);
    Ok(())
}

/// `list`: print the queued drafts with 1-based indices.
pub async fn list(ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = ctx.queue.snapshot().await;
    if snapshot.is_empty() {
        println!("The batch queue is empty.");
        return Ok(());
    }

    for (index, draft) in snapshot.iter().enumerate() {
        let contact = match draft.contact_id {
            Some(id) => format!("{} (#{id})", draft.contact_label),
            None => format!("{} (unresolved)", draft.contact_label),
        };
        println!(
            "{:>3}. {}  {}  {} item(s)  {:.2} EUR",
            index + 1,
            draft.invoice_date,
            contact,
            draft.line_items.len(),
            draft.computed_total()
        );
    }
    Ok(())
}

/// `remove <index>`: drop one draft by its 1-based list index.
pub async fn remove(ctx: &AppContext, index: usize) -> anyhow::Result<()> {
    if index == 0 {
        bail!("indices are 1-based, as shown by `fakturo list`");
    }
    ctx.queue.remove_at(index - 1).await?;
    println!("Queue length: {}.", ctx.queue.len().await);
    Ok(())
}

/// `clear`: empty the queue.
pub async fn clear(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.queue.clear().await?;
    println!("Batch queue cleared.");
    Ok(())
}

/// `submit`: run the batch against the remote API. Ctrl-C aborts the
/// run after the in-flight request; outcomes gathered so far are still
/// reported.
pub async fn submit(ctx: &AppContext) -> anyhow::Result<()> {
    let gateway = ctx.gateway()?;
    let submitter = ctx.submitter(gateway);

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, cancelling batch run");
            signal_token.cancel();
        }
    });

    let report = match submitter.run(&cancel).await {
        Ok(report) => report,
        Err(SubmitError::NothingToSubmit) => {
            println!("Nothing to submit: the batch queue is empty.");
            return Ok(());
        }
        Err(SubmitError::Fakturo(err)) => return Err(err.into()),
    };

    let summary = summarize(&report.outcomes);
    for message in &summary.per_item_messages {
        println!("{message}");
    }
    println!("Submitted {} invoice(s), {} failed.", summary.success_count, summary.failure_count);
    if report.cancelled {
        println!("Run cancelled before completion; remaining drafts were not attempted.");
    }
    Ok(())
}

/// `contacts`: list the contacts known to the remote API, for picking
/// ids to pass to `add --contact-id`.
pub async fn contacts(ctx: &AppContext) -> anyhow::Result<()> {
    let gateway = ctx.gateway()?;
    let contacts = gateway.list_contacts().await.context("failed to fetch contacts")?;

    if contacts.is_empty() {
        println!("No contacts found.");
        return Ok(());
    }
    for contact in contacts {
        println!("{:>8}  {}", contact.id, contact.label);
    }
    Ok(())
}

/// Parse `add` flags into a form snapshot.
///
/// Flags: `--contact-id <id>`, `--contact <label>`,
/// `--date <YYYY-MM-DD>` (default today), `--due <YYYY-MM-DD>`,
/// `--number <text>`, `--item <desc:qty:price[:tax]>` (repeatable).
fn parse_add_flags(args: &[String]) -> anyhow::Result<FormSnapshot> {
    let mut contact_id = None;
    let mut contact_label = String::new();
    let mut invoice_date = None;
    let mut due_date = None;
    let mut invoice_number = None;
    let mut items = Vec::new();

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next().cloned().ok_or_else(|| anyhow!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--contact-id" => {
                contact_id =
                    Some(value()?.parse::<i64>().context("invalid --contact-id value")?);
            }
            "--contact" => contact_label = value()?,
            "--date" => invoice_date = Some(value()?),
            "--due" => due_date = Some(value()?),
            "--number" => invoice_number = Some(value()?),
            "--item" => items.push(parse_item_spec(&value()?)?),
            unknown => bail!("unknown flag: {unknown}"),
        }
    }

    Ok(FormSnapshot {
        contact_id,
        contact_label,
        invoice_date: invoice_date
            .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()),
        due_date,
        invoice_number,
        items,
    })
}

/// Parse one `--item` value of the form `description:qty:price[:tax]`.
/// The tax rate defaults to 19 percent when omitted.
fn parse_item_spec(spec: &str) -> anyhow::Result<LineItemInput> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() < 3 || parts.len() > 4 {
        bail!("invalid --item '{spec}': expected description:qty:price[:tax]");
    }

    let quantity =
        parts[1].trim().parse::<f64>().with_context(|| format!("invalid quantity in '{spec}'"))?;
    let unit_price =
        parts[2].trim().parse::<f64>().with_context(|| format!("invalid price in '{spec}'"))?;
    let tax_rate_percent = match parts.get(3) {
        Some(raw) => {
            raw.trim().parse::<f64>().with_context(|| format!("invalid tax rate in '{spec}'"))?
        }
        None => DEFAULT_TAX_RATE,
    };

    Ok(LineItemInput {
        description: parts[0].trim().to_string(),
        quantity,
        unit_price,
        tax_rate_percent,
    })
}

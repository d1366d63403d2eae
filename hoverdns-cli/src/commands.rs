//! Subcommand handlers.

use anyhow::{Context, Result, bail};
use hoverdns_api::{Action, ActionBatch, Client, ExecutionReport, relative_to_full_name};

use crate::cli::{Command, RecordArgs};

/// Run `command` against every domain in `domains`.
pub async fn run(client: &mut Client, domains: &[String], command: &Command) -> Result<()> {
    if domains.is_empty() {
        bail!("No domains given: pass --domains or set HOVER_DOMAINS");
    }

    match command {
        Command::Info => info(client, domains).await,
        Command::Add(record) => {
            check_record(record)?;
            let batch = per_domain(domains, &record.host, |fqdn, domain| {
                Action::add(fqdn, domain, &record.value, record.ttl)
            });
            execute(client, &batch, "add").await
        }
        Command::Update(record) => {
            check_record(record)?;
            let batch = per_domain(domains, &record.host, |fqdn, domain| {
                Action::update(fqdn, domain, &record.value, record.ttl)
            });
            execute(client, &batch, "update").await
        }
        Command::Upsert(record) => {
            check_record(record)?;
            upsert(client, domains, record).await
        }
        Command::Delete(args) => {
            if args.host.trim().is_empty() {
                bail!("--host must not be empty");
            }
            let batch = per_domain(domains, &args.host, |fqdn, domain| {
                Action::delete(fqdn, domain)
            });
            execute(client, &batch, "delete").await
        }
    }
}

async fn info(client: &mut Client, domains: &[String]) -> Result<()> {
    for name in domains {
        match client.domain(name).await.context("Failed to list domains")? {
            Some(domain) => {
                let json = serde_json::to_string_pretty(domain)
                    .context("Failed to serialize domain")?;
                println!("{json}");
            }
            None => println!("Domain: {name} not found"),
        }
    }
    Ok(())
}

async fn upsert(client: &mut Client, domains: &[String], record: &RecordArgs) -> Result<()> {
    for domain in domains {
        let fqdn = relative_to_full_name(&record.host, domain);
        let report = client
            .upsert(&fqdn, domain, &record.value, record.ttl)
            .await
            .with_context(|| format!("upsert of {fqdn} failed"))?;
        summarize("upsert", &report);
    }
    Ok(())
}

async fn execute(client: &mut Client, batch: &ActionBatch, verb: &str) -> Result<()> {
    tracing::info!("Running {verb} for {} domain(s)", batch.len());
    let report = client
        .execute(batch)
        .await
        .with_context(|| format!("{verb} aborted"))?;
    summarize(verb, &report);
    Ok(())
}

fn check_record(record: &RecordArgs) -> Result<()> {
    if record.host.trim().is_empty() {
        bail!("--host must not be empty");
    }
    if record.value.is_empty() {
        bail!("--value must not be empty");
    }
    Ok(())
}

/// One action per domain, targeting `host.<domain>`.
fn per_domain<F>(domains: &[String], host: &str, build: F) -> ActionBatch
where
    F: Fn(String, &str) -> Action,
{
    domains
        .iter()
        .map(|domain| build(relative_to_full_name(host, domain), domain))
        .collect()
}

fn summarize(verb: &str, report: &ExecutionReport) {
    for failure in &report.failures {
        tracing::warn!(
            "{verb} #{} {} failed: {}",
            failure.index,
            failure.action.fqdn(),
            failure.error
        );
    }
    tracing::info!(
        "{verb}: {} applied, {} failed",
        report.success_count,
        report.failed_count
    );
}

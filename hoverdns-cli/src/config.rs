//! Runtime settings resolved from flags and the environment.
//!
//! `clap` covers the `HOVER_*` variables; the bare names (`PASSFILE`,
//! `USERNAME`, `PASSWORD`, `DOMAINS`, `EMAIL`) are consulted here as a
//! fallback.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use hoverdns_api::{ClientConfig, Credential, normalize_domain_name};

use crate::cli::GlobalArgs;

/// Everything needed to build the client and pick the target domains.
#[derive(Debug)]
pub struct Settings {
    pub credential: Credential,
    pub domains: Vec<String>,
    pub client: ClientConfig,
    /// ACME account email; accepted for `lego` compatibility, otherwise unused.
    pub email: Option<String>,
}

impl Settings {
    /// Resolve settings, looking fallback variables up through `env`.
    pub fn resolve(args: &GlobalArgs, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let credential = resolve_credential(args, &env)?;
        let domains = resolve_domains(args, &env);
        let email = args.email.clone().or_else(|| env("EMAIL"));

        let mut client = ClientConfig::default()
            .with_timeout(Duration::from_secs(args.timeout))
            .with_log_bodies(args.verbose);
        if let Some(base_url) = &args.base_url {
            client = client.with_base_url(base_url.as_str());
        }

        Ok(Self {
            credential,
            domains,
            client,
            email,
        })
    }
}

/// Passfile wins when given; otherwise username and password.
fn resolve_credential(
    args: &GlobalArgs,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<Credential> {
    let passfile = args
        .passfile
        .clone()
        .or_else(|| env("PASSFILE").map(PathBuf::from));

    if let Some(path) = passfile {
        tracing::debug!("Reading credentials from {}", path.display());
        return Credential::from_passfile(&path)
            .with_context(|| format!("Failed to load passfile {}", path.display()));
    }

    let username = args.username.clone().or_else(|| env("USERNAME"));
    let password = args.password.clone().or_else(|| env("PASSWORD"));

    match (username, password) {
        (Some(username), Some(password)) => {
            Credential::new(username, password).context("Invalid credentials")
        }
        (None, _) => bail!("No credentials: pass --passfile, or --username and --password"),
        (Some(_), None) => bail!("No password: pass --password or use --passfile"),
    }
}

fn resolve_domains(args: &GlobalArgs, env: &impl Fn(&str) -> Option<String>) -> Vec<String> {
    let raw = if args.domains.is_empty() {
        env("DOMAINS")
            .map(|v| v.split(',').map(str::to_string).collect())
            .unwrap_or_default()
    } else {
        args.domains.clone()
    };

    raw.iter()
        .map(|d| normalize_domain_name(d.trim()).to_string())
        .filter(|d| !d.is_empty())
        .collect()
}

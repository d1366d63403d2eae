//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "hoverdns", version)]
#[command(about = "Hover DNS CLI Client", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Placeholder to accept the current Let's Encrypt terms of service
    #[arg(short = 'a', long, global = true)]
    pub accept_tos: bool,

    /// Placeholder for the Let's Encrypt account email
    #[arg(short = 'm', long, global = true, env = "HOVER_EMAIL")]
    pub email: Option<String>,

    /// JSON file with `username` and `plaintextpassword`
    #[arg(long, global = true, env = "HOVER_PASSFILE")]
    pub passfile: Option<PathBuf>,

    /// Username if not using a passfile
    #[arg(long, global = true, env = "HOVER_USERNAME")]
    pub username: Option<String>,

    /// Password if not using a passfile
    #[arg(long, global = true, env = "HOVER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Domain(s) to act upon, comma separated
    #[arg(long, global = true, env = "HOVER_DOMAINS", value_delimiter = ',')]
    pub domains: Vec<String>,

    /// API root
    #[arg(long, global = true, env = "HOVER_API_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Debug logging, including truncated response bodies
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check info about each domain; also confirms access
    #[command(visible_aliases = ["q", "check"])]
    Info,
    /// Add a TXT record in each domain
    Add(RecordArgs),
    /// Update the TXT record in each domain
    Update(RecordArgs),
    /// Update the TXT record in each domain, adding it where missing
    Upsert(RecordArgs),
    /// Delete the TXT record from each domain
    Delete(HostArgs),
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Relative host name, the `host` in `host.<domain>`
    #[arg(long)]
    pub host: String,

    /// TXT record value
    #[arg(long)]
    pub value: String,

    /// TTL of the record
    #[arg(long, default_value_t = 300)]
    pub ttl: u32,
}

#[derive(Debug, Args)]
pub struct HostArgs {
    /// Relative host name, the `host` in `host.<domain>`
    #[arg(long)]
    pub host: String,
}

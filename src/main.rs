//! Command-line client for the alias registry.
//!
//! Every command goes through [`AliasRegistry`], so the same validation,
//! reserved-alias and uniqueness rules apply as for any other caller.
//!
//! # Usage
//!
//! ```bash
//! # Register an alias
//! alias-registry register exmpl https://example.com
//!
//! # Look it up
//! alias-registry resolve exmpl
//!
//! # Remove it (asks for confirmation unless -y)
//! alias-registry unregister exmpl
//!
//! # List everything, machine-readable
//! alias-registry --json list
//!
//! # Check the store
//! alias-registry db check
//! ```
//!
//! # Environment Variables
//!
//! See [`alias_registry::config`]. A `.env` file is loaded if present.
//!
//! # Retries
//!
//! Transient store failures are retried with jittered exponential backoff,
//! up to `RETRY_ATTEMPTS` times. Every other failure is reported immediately.

use alias_registry::AliasRegistry;
use alias_registry::bootstrap;
use alias_registry::config::{self, Config};
use alias_registry::domain::entities::AliasMapping;
use alias_registry::error::RegistryError;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde_json::json;
use std::future::Future;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing_subscriber::EnvFilter;

/// CLI client for the alias registry.
#[derive(Parser)]
#[command(name = "alias-registry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results and errors as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log the loaded configuration before running the command
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Register a new alias
    Register {
        /// Alias (3-30 characters: letters, digits, '_' or '-')
        alias: String,

        /// Absolute destination URL
        url: String,
    },

    /// Show where an alias points
    Resolve { alias: String },

    /// Remove an alias
    Unregister {
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all aliases
    List,

    /// Store operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Store diagnostic subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check that the configured store answers
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    init_tracing(&config)?;

    if cli.verbose {
        config.print_summary();
    }

    let registry = bootstrap::build_registry(&config).await?;

    let outcome = match cli.command {
        Commands::Register { alias, url } => {
            register(&registry, &config, &alias, &url, cli.json).await
        }
        Commands::Resolve { alias } => resolve(&registry, &config, &alias, cli.json).await,
        Commands::Unregister { alias, yes } => {
            unregister(&registry, &config, &alias, yes, cli.json).await
        }
        Commands::List => list(&registry, &config, cli.json).await,
        Commands::Db { action } => match action {
            DbAction::Check => check_store(&registry, cli.json).await,
        },
    };

    if let Err(err) = outcome {
        match err.downcast_ref::<RegistryError>() {
            Some(registry_err) => report_registry_error(registry_err, cli.json),
            None => return Err(err),
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Installs the global tracing subscriber. Logs go to stderr so that
/// command output on stdout stays parseable.
fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

/// Runs `op`, retrying only on [`RegistryError::StoreUnavailable`].
async fn with_retry<T, F, Fut>(config: &Config, op: F) -> Result<T, RegistryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RegistryError>>,
{
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(config.retry_attempts);

    RetryIf::spawn(strategy, op, |e: &RegistryError| {
        let retry = e.is_retryable();
        if retry {
            tracing::warn!(error = %e, details = %e.details(), "Store unavailable, retrying");
        }
        retry
    })
    .await
}

async fn register(
    registry: &AliasRegistry,
    config: &Config,
    alias: &str,
    url: &str,
    json_output: bool,
) -> Result<()> {
    let mapping = with_retry(config, || registry.register(alias, url)).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
        return Ok(());
    }

    println!("{}", "✅ Alias registered".green().bold());
    println!();
    print_mapping(&mapping);
    println!();

    Ok(())
}

async fn resolve(
    registry: &AliasRegistry,
    config: &Config,
    alias: &str,
    json_output: bool,
) -> Result<()> {
    let mapping = with_retry(config, || registry.resolve(alias)).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
    } else {
        println!("{}", mapping.destination_url);
    }

    Ok(())
}

/// Removes an alias after an optional confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes`
/// - Reserved aliases are rejected by the registry before anything is deleted
async fn unregister(
    registry: &AliasRegistry,
    config: &Config,
    alias: &str,
    skip_confirm: bool,
    json_output: bool,
) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove alias '{}'?", alias))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    with_retry(config, || registry.unregister(alias)).await?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "deleted_alias": alias }))?
        );
    } else {
        println!("{} {}", "✅ Removed".green().bold(), alias.cyan());
    }

    Ok(())
}

/// Lists all aliases.
///
/// # Output Format
///
/// ```text
/// 📋 Aliases
///
///   ID   Alias                          Created              Destination
///   ─────────────────────────────────────────────────────────────────────
///   1    exmpl                          2025-03-01 10:30     https://example.com
/// ```
async fn list(registry: &AliasRegistry, config: &Config, json_output: bool) -> Result<()> {
    let mappings = with_retry(config, || registry.list_all()).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&mappings)?);
        return Ok(());
    }

    println!("{}", "📋 Aliases".bright_blue().bold());
    println!();

    if mappings.is_empty() {
        println!("{}", "  No aliases registered".yellow());
        println!();
        println!(
            "  Create one with: {} register <alias> <url>",
            "alias-registry".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<20} {}",
        "ID".bright_white().bold(),
        "Alias".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<4} {:<30} {:<20} {}",
            mapping.id.to_string().bright_black(),
            mapping.alias.cyan(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mapping.destination_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn check_store(registry: &AliasRegistry, json_output: bool) -> Result<()> {
    let healthy = registry.is_store_healthy().await;

    if json_output {
        println!("{}", json!({ "store_healthy": healthy }));
    } else if healthy {
        println!("{}", "✅ Store connection OK".green().bold());
    } else {
        println!("{}", "❌ Store did not answer".red().bold());
    }

    if !healthy {
        std::process::exit(1);
    }

    Ok(())
}

fn print_mapping(mapping: &AliasMapping) {
    println!("  Alias:       {}", mapping.alias.cyan());
    println!("  Destination: {}", mapping.destination_url.bright_white());
    println!(
        "  Created:     {}",
        mapping
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
}

fn report_registry_error(err: &RegistryError, json_output: bool) {
    if json_output {
        println!("{}", json!({ "error": err.to_error_info() }));
        return;
    }

    let label = match err {
        RegistryError::Validation { .. } => "Invalid input",
        RegistryError::Forbidden { .. } => "Forbidden",
        RegistryError::AliasConflict { .. } => "Conflict",
        RegistryError::NotFound { .. } => "Not found",
        RegistryError::StoreUnavailable { .. } => "Store unavailable",
    };

    eprintln!("{} {}", format!("❌ {}:", label).red().bold(), err);
    if !err.details().is_null() {
        eprintln!("   {}", err.details().to_string().bright_black());
    }
}

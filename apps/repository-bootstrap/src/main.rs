//! Repository bootstrap host.
//!
//! Loads the locator configuration, publishes the remote repository into a
//! process-local context and reports what it found.

mod config;
mod logging;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use repository_locator::{
    Component, ComponentRegistry, RepositoryBootstrapper, RepositoryContext, RepositoryPublisher,
};
use static_directory_plugin::{CONNECTOR_NAME, StaticDirectoryConnector};
use tracing::{error, info};

use crate::config::AppConfig;

/// Locate a remote repository and publish it locally.
#[derive(Parser, Debug)]
#[command(name = "repository-bootstrap", version)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase console verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.verbose);

    if cli.print_config {
        let yaml = config.to_yaml()?;
        std::io::stdout()
            .lock()
            .write_all(yaml.as_bytes())
            .context("Failed to write config to stdout")?;
        return Ok(());
    }

    logging::init_logging(&config.logging);

    run(&config)
        .await
        .inspect_err(|e| error!(error = %cause_chain(e), "Repository bootstrap failed"))
}

/// `outer: cause: root cause`, so the naming failure behind a bootstrap error is logged.
///
/// A cause already rendered at the end of its parent's message is not repeated.
fn cause_chain(err: &anyhow::Error) -> String {
    let mut chain = String::new();
    for cause in err.chain() {
        let message = cause.to_string();
        if chain.ends_with(&message) {
            continue;
        }
        if !chain.is_empty() {
            chain.push_str(": ");
        }
        chain.push_str(&message);
    }
    chain
}

async fn run(config: &AppConfig) -> Result<()> {
    let connector = StaticDirectoryConnector::from_config(&config.directory.static_directory)
        .context("Failed to build the static directory")?;

    let registry = Arc::new(
        ComponentRegistry::builder()
            .with_builtins()
            .register_instance(CONNECTOR_NAME, Component::DirectoryConnector(Arc::new(connector)))
            .build(),
    );
    let directory = registry
        .instantiate_connector(&config.directory.connector)
        .with_context(|| format!("Unknown directory connector: {}", config.directory.connector))?;

    let publisher = RepositoryPublisher::new(RepositoryBootstrapper::new(registry, directory));
    let context = RepositoryContext::new();

    let attribute = publisher.init(&config.init_parameters, &context).await?;
    if let Some(repository) = context.attribute(&attribute) {
        for key in repository.descriptor_keys().await? {
            let value = repository.descriptor(&key).await?.unwrap_or_default();
            info!(attribute = %attribute, key = %key, value = %value, "Repository descriptor");
        }
    }

    publisher.destroy(&config.init_parameters, &context);
    Ok(())
}

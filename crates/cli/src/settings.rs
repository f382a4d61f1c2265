//! Layered configuration: optional file, then `TAXINVOICE__*` environment.

use std::path::Path;

use anyhow::Context;
use config::{Config, Environment, File};

use taxinvoice_invoicing::InvoiceConfig;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "taxinvoice";
pub const ENV_PREFIX: &str = "TAXINVOICE";

/// Load and validate the invoice configuration.
///
/// An explicit `path` must exist; the default `taxinvoice.toml` is optional.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<InvoiceConfig> {
    load_with_env(path, Environment::with_prefix(ENV_PREFIX).separator("__"))
}

fn load_with_env(path: Option<&Path>, env: Environment) -> anyhow::Result<InvoiceConfig> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let config: InvoiceConfig = Config::builder()
        .add_source(file)
        .add_source(env)
        .build()
        .context("failed to read configuration")?
        .try_deserialize()
        .context("failed to parse configuration")?;

    config.validate().context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

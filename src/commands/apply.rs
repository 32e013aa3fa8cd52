//! The apply command: load configuration, resolve variables, provision.
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::ConfigError;
use crate::provision::Provisioner;
use crate::provision::fs::RealFilesystem;

/// Default configuration document, always attempted before any explicit
/// path. Its absence is tolerated.
pub const USER_CONFIG: &str = "user.xml";

/// Run the apply command.
///
/// Loads `user.xml` and every explicitly supplied path in order, runs the
/// variable resolution pass, and provisions every file record. Load failures
/// are reported and do not stop subsequent loads or provisioning, but any
/// failure — load or provision — makes the overall run fail.
///
/// # Errors
///
/// Returns an error if provisioning hit a fatal error or if any
/// configuration document failed to load.
pub fn run(args: &Cli) -> Result<()> {
    let version = option_env!("LINKSET_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    tracing::debug!("linkset {version}");

    let mut config = Config::new();
    let explicit_failures = load_all(&mut config, Path::new(USER_CONFIG), &args.configs);
    let load_failures = explicit_failures + config.include_failures();

    config.resolve_variables();
    tracing::debug!(
        "{} file record(s), {} variable(s)",
        config.records.len(),
        config.vars.len()
    );

    let fs = RealFilesystem;
    Provisioner::new(&config.vars, &fs).provision(&config.records)?;

    if load_failures > 0 {
        anyhow::bail!("{load_failures} configuration document(s) failed to load");
    }
    Ok(())
}

/// Load the default document (absence tolerated) and then every explicit
/// path, in order, into `config`.
///
/// Returns the number of documents that failed to load; include failures are
/// tracked separately on the [`Config`].
pub fn load_all(config: &mut Config, user_config: &Path, paths: &[PathBuf]) -> usize {
    let mut failures = 0;

    match config.load(user_config) {
        Ok(()) => {}
        Err(ConfigError::NotFound { .. }) => {
            tracing::debug!("no {} present, skipping", user_config.display());
        }
        Err(err) => {
            tracing::error!("{err}");
            failures += 1;
        }
    }

    for path in paths {
        if let Err(err) = config.load(path) {
            tracing::error!("{err}");
            failures += 1;
        }
    }

    failures
}

//! Configuration loading and variable resolution.
mod loader;
pub mod record;
pub mod subst;
pub mod vars;

use std::path::Path;

use crate::error::ConfigError;
use record::FileRecord;
use vars::VariableTable;

/// All state accumulated from configuration documents.
///
/// One `Config` is threaded through every load call and, after
/// [`resolve_variables`](Self::resolve_variables), consumed read-only by the
/// provisioner — there is no ambient global state.
#[derive(Debug)]
pub struct Config {
    /// Variable table shared by all loaded documents.
    pub vars: VariableTable,
    /// File records in document order, across all included documents.
    pub records: Vec<FileRecord>,
    include_failures: usize,
}

impl Config {
    /// Create an empty configuration with the seeded variable table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vars: VariableTable::new(),
            records: Vec::new(),
            include_failures: 0,
        }
    }

    /// Load the document at `path`, recursing into its includes.
    ///
    /// Include failures are reported and counted rather than propagated;
    /// the returned error describes the named document only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the document does not exist,
    /// [`ConfigError::Io`] if it cannot be read, [`ConfigError::Parse`] if it
    /// is malformed (state accumulated before the offending event is kept),
    /// and [`ConfigError::IncludeCycle`] if the document is already being
    /// loaded further up the include chain.
    pub fn load(&mut self, path: &Path) -> Result<(), ConfigError> {
        loader::Loader::new(self).load(path)
    }

    /// Run the one-time cross-substitution pass over the variable table.
    ///
    /// Must be called after every load and before provisioning.
    pub fn resolve_variables(&mut self) {
        self.vars.resolve_all();
    }

    /// Number of include documents that failed to load.
    #[must_use]
    pub fn include_failures(&self) -> usize {
        self.include_failures
    }

    pub(crate) fn note_load_failure(&mut self) {
        self.include_failures += 1;
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

//! File provisioning: executes resolved file records against the filesystem.
//!
//! Each record moves through `Pending → Resolved → {Linked | Copied |
//! Deleted | Failed}`: fields are expanded against the variable table, the
//! action is pinned to the closed action set, and the filesystem effect is
//! performed. The run is fail-fast — the first fatal error stops it with no
//! rollback of records already provisioned — and the only fallback is
//! link→copy.
pub mod fs;

use std::io;
use std::path::Path;

use crate::config::record::{Action, FileRecord};
use crate::config::vars::{OVERRIDE_ACTION_VAR, VariableTable};
use crate::error::ProvisionError;
use fs::Filesystem;

/// Executes file records in order against an injected [`Filesystem`].
#[derive(Debug)]
pub struct Provisioner<'a> {
    vars: &'a VariableTable,
    fs: &'a dyn Filesystem,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner over a fully resolved variable table.
    #[must_use]
    pub fn new(vars: &'a VariableTable, fs: &'a dyn Filesystem) -> Self {
        Self { vars, fs }
    }

    /// Provision every record, in list order, stopping at the first fatal
    /// error.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProvisionError`] encountered; records after the
    /// failing one are left untouched.
    pub fn provision(&self, records: &[FileRecord]) -> Result<(), ProvisionError> {
        for record in records {
            self.provision_record(record)?;
        }
        Ok(())
    }

    fn provision_record(&self, record: &FileRecord) -> Result<(), ProvisionError> {
        // Second resolution pass: record fields may reference variables even
        // though the table's own cross-resolution already ran.
        let source = self.vars.expand(&record.source);
        let target = self.vars.expand(&record.target);
        let declared = self.vars.expand(&record.action);

        let effective = match self.vars.get(OVERRIDE_ACTION_VAR) {
            Some(forced) => forced,
            None => declared.as_str(),
        };

        let action = Action::parse(effective).ok_or_else(|| ProvisionError::UnresolvedAction {
            target: target.clone(),
            action: effective.to_owned(),
        })?;

        match action {
            Action::Link => {
                self.delete_existing(&target)?;
                match self.fs.symlink(Path::new(&source), Path::new(&target)) {
                    Ok(()) => {
                        tracing::info!("linked {target} -> {source}");
                    }
                    Err(err) => {
                        tracing::warn!(
                            "cannot create symbolic link at '{target}': {err}; \
                             falling back to file copy"
                        );
                        self.copy(&source, &target)?;
                    }
                }
            }
            Action::Copy => {
                self.delete_existing(&target)?;
                self.copy(&source, &target)?;
            }
            Action::Delete => {
                self.delete_existing(&target)?;
                tracing::info!("deleted {target}");
            }
        }
        Ok(())
    }

    /// Delete whatever currently occupies `target`; an absent target is not
    /// an error.
    fn delete_existing(&self, target: &str) -> Result<(), ProvisionError> {
        match self.fs.remove_file(Path::new(target)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ProvisionError::Delete {
                target: target.to_owned(),
                source,
            }),
        }
    }

    fn copy(&self, source: &str, target: &str) -> Result<(), ProvisionError> {
        self.fs
            .copy_file(Path::new(source), Path::new(target))
            .map_err(|err| ProvisionError::Copy {
                from: source.to_owned(),
                target: target.to_owned(),
                source: err,
            })?;
        tracing::info!("copied {source} -> {target}");
        Ok(())
    }
}

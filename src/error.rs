//! Domain-specific error types for the provisioning engine.
//!
//! Internal modules return typed errors ([`ConfigError`], [`ProvisionError`])
//! while the command layer at the CLI boundary converts them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! The split matters for control flow: the command layer tolerates
//! [`ConfigError::NotFound`] for the default configuration document and
//! recovers from every other load failure, while any [`ProvisionError`] is
//! fatal and stops the run at the current record.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading configuration documents.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document does not exist. Distinguished from [`ConfigError::Io`] so
    /// the caller can treat an absent default configuration as non-fatal.
    #[error("configuration document not found: {}", path.display())]
    NotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// The document exists but could not be opened or read.
    #[error("cannot read configuration document {}: {source}", path.display())]
    Io {
        /// Path to the document that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The document is not well-formed; loading of this document stops at the
    /// offending event, keeping whatever was accumulated before it.
    #[error("malformed configuration document {path}: {message}")]
    Parse {
        /// Path to the malformed document.
        path: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The document is already being loaded further up the include chain.
    #[error("configuration include cycle at {}", path.display())]
    IncludeCycle {
        /// Path of the document that closed the cycle.
        path: PathBuf,
    },
}

/// Errors that arise while provisioning file records. All of them abort the
/// run at the current record.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The record's action did not resolve to `link`, `copy`, or `delete`.
    #[error("action '{action}' for target '{target}' is not one of link, copy, delete")]
    UnresolvedAction {
        /// Target path of the offending record.
        target: String,
        /// Action string after variable resolution.
        action: String,
    },

    /// An existing file at the target path could not be deleted (absence is
    /// tolerated and never reaches this variant).
    #[error("cannot delete existing file at '{target}': {source}")]
    Delete {
        /// Target path of the offending record.
        target: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The source could not be copied to the target, either for a `copy`
    /// action or as the fallback of a failed `link` action.
    #[error("cannot copy '{from}' to '{target}': {source}")]
    Copy {
        /// Resolved source path.
        from: String,
        /// Target path of the offending record.
        target: String,
        /// Underlying I/O error.
        source: io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_not_found_display() {
        let e = ConfigError::NotFound {
            path: PathBuf::from("/conf/user.xml"),
        };
        assert_eq!(
            e.to_string(),
            "configuration document not found: /conf/user.xml"
        );
    }

    #[test]
    fn config_error_io_display() {
        let e = ConfigError::Io {
            path: PathBuf::from("/conf/deploy.xml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/conf/deploy.xml"));
        assert!(e.to_string().contains("permission denied"));
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: PathBuf::from("/conf/deploy.xml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn config_error_parse_display() {
        let e = ConfigError::Parse {
            path: "deploy.xml".to_string(),
            message: "unexpected end of document".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "malformed configuration document deploy.xml: unexpected end of document"
        );
    }

    #[test]
    fn config_error_include_cycle_display() {
        let e = ConfigError::IncludeCycle {
            path: PathBuf::from("a.xml"),
        };
        assert_eq!(e.to_string(), "configuration include cycle at a.xml");
    }

    // -----------------------------------------------------------------------
    // ProvisionError
    // -----------------------------------------------------------------------

    #[test]
    fn provision_error_unresolved_action_display() {
        let e = ProvisionError::UnresolvedAction {
            target: "/opt/app/a.bin".to_string(),
            action: "$DefaultAction".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "action '$DefaultAction' for target '/opt/app/a.bin' is not one of link, copy, delete"
        );
    }

    #[test]
    fn provision_error_delete_display() {
        let e = ProvisionError::Delete {
            target: "/opt/app/a.bin".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/opt/app/a.bin"));
        assert!(e.to_string().contains("permission denied"));
    }

    #[test]
    fn provision_error_copy_display() {
        let e = ProvisionError::Copy {
            from: "/data/a.bin".to_string(),
            target: "/opt/app/a.bin".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/data/a.bin"));
        assert!(e.to_string().contains("/opt/app/a.bin"));
    }

    #[test]
    fn provision_error_has_source() {
        use std::error::Error as StdError;
        let e = ProvisionError::Delete {
            target: "/opt/app/a.bin".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
    }

    // -----------------------------------------------------------------------
    // Send + Sync bounds and anyhow conversion
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<ProvisionError>();
    }

    #[test]
    fn config_error_converts_to_anyhow() {
        let e = ConfigError::NotFound {
            path: PathBuf::from("user.xml"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }

    #[test]
    fn provision_error_converts_to_anyhow() {
        let e = ProvisionError::UnresolvedAction {
            target: "t".to_string(),
            action: "a".to_string(),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}

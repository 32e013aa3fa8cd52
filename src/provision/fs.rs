//! Filesystem capability behind the provisioner.
//!
//! The provisioner only ever touches the filesystem through this trait, so
//! its dispatch, tolerance, and fallback logic are testable against a
//! scripted double, and a platform that cannot create symbolic links simply
//! reports the failure through `symlink` and gets the copy fallback.
use std::fmt;
use std::io;
use std::path::Path;

/// Blocking filesystem operations the provisioner depends on.
pub trait Filesystem: fmt::Debug {
    /// Remove the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; callers distinguish
    /// [`io::ErrorKind::NotFound`], which the provisioner tolerates.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create a symbolic link at `link` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, including "unsupported" style
    /// failures on platforms or filesystems without symbolic links.
    fn symlink(&self, source: &Path, link: &Path) -> io::Result<()>;

    /// Copy `source` to `target`, overwriting an existing target.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn copy_file(&self, source: &Path, target: &Path) -> io::Result<()>;
}

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn symlink(&self, source: &Path, link: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(source, link)
        }

        #[cfg(windows)]
        {
            // Windows distinguishes file and directory symlinks; pick by
            // what the source currently is.
            if source.is_dir() {
                std::os::windows::fs::symlink_dir(source, link)
            } else {
                std::os::windows::fs::symlink_file(source, link)
            }
        }
    }

    fn copy_file(&self, source: &Path, target: &Path) -> io::Result<()> {
        std::fs::copy(source, target).map(|_| ())
    }
}

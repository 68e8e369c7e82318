//! Whole-file reads and writes.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a file's bytes.
///
/// Fails with [`Error::Io`] classified as `NotFound`, `PermissionDenied` or
/// `Other`.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|err| Error::io(path, err))
}

/// Replace a file's contents with `bytes`.
///
/// Fails with [`Error::Io`] classified as `PermissionDenied`, `DiskFull` or
/// `Other`; nothing is retried.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|err| Error::io(path, err))
}

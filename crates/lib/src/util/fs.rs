//! Filesystem helpers.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Replace `path` with `contents` via a temp file in the same directory, so
/// readers never observe a half-written file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
  let dir = path.parent().unwrap_or_else(|| Path::new("."));
  let mut tmp = NamedTempFile::new_in(dir)?;
  tmp.write_all(contents)?;
  tmp.flush()?;
  tmp.persist(path).map_err(|e| e.error)?;
  Ok(())
}

//! File access shared by every procedure.
//!
//! Reads classify I/O failures into [`SiteFixError`] variants with the path
//! attached. Writes go to a sibling temp file first and are renamed into
//! place, so an interrupted run never leaves half a file behind.

use crate::error::SiteFixError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a UTF-8 text file.
pub(crate) fn read_text(path: &Path) -> Result<String, SiteFixError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SiteFixError::from_read(path, e))?;
    debug!("Read {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

/// `page.tsx` → `page.tsx.tmp`
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomic write: write to temp, then rename.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), SiteFixError> {
    let write_err = |source| SiteFixError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = temp_sibling(path);
    std::fs::write(&tmp_path, bytes).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(write_err)?;

    debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_sibling_keeps_extension() {
        assert_eq!(
            temp_sibling(Path::new("src/pages/Page.tsx")),
            PathBuf::from("src/pages/Page.tsx.tmp")
        );
    }

    #[test]
    fn write_atomic_creates_parents_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public/nested/out.txt");
        write_atomic(&path, b"hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert!(!temp_sibling(&path).exists());
    }

    #[test]
    fn read_missing_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SiteFixError::FileNotFound { .. }));
    }
}

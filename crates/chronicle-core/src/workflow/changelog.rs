//! Changelog file workflow

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{ChangelogError, Result};

/// Write changelog to file.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it, so readers never observe a half-written changelog.
pub fn write_changelog(path: &Path, content: &str) -> Result<()> {
    info!(path = %path.display(), bytes = content.len(), "writing changelog");

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(ChangelogError::Io)?;

    let mut file = NamedTempFile::new_in(dir).map_err(ChangelogError::Io)?;
    file.write_all(content.as_bytes())
        .map_err(ChangelogError::Io)?;
    file.persist(path).map_err(|e| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.error.to_string(),
    })?;

    Ok(())
}

/// Read existing changelog content
pub fn read_changelog(path: &Path) -> Result<Option<String>> {
    if path.exists() {
        debug!(path = %path.display(), "reading existing changelog");
        let content = std::fs::read_to_string(path).map_err(ChangelogError::Io)?;
        Ok(Some(content))
    } else {
        debug!(path = %path.display(), "no existing changelog found");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_changelog() {
        let temp = TempDir::new().unwrap();
        let content = read_changelog(&temp.path().join("CHANGELOG.md")).unwrap();
        assert!(content.is_none());
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");

        write_changelog(&path, "\n## Unreleased \n").unwrap();
        assert_eq!(
            read_changelog(&path).unwrap().as_deref(),
            Some("\n## Unreleased \n")
        );
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");
        std::fs::write(&path, "old content that is longer than the new one").unwrap();

        write_changelog(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docs").join("CHANGELOG.md");

        write_changelog(&path, "content").unwrap();
        assert!(path.exists());
    }
}

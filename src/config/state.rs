use anyhow::{Context, Result};
use std::path::Path;

use crate::utils::paths;

/// Read the tracked container ID for a configuration.
///
/// An absent marker file or empty content means no container is tracked
/// as running.
pub fn read_container_id(name: &str) -> Result<Option<String>> {
    read_id(&paths::marker_file(name))
}

/// Record the ID of a freshly started container.
pub fn write_container_id(name: &str, container_id: &str) -> Result<()> {
    write_id(&paths::marker_file(name), container_id)
}

/// Reset the marker. An empty file is the documented "not running" state.
pub fn clear_container_id(name: &str) -> Result<()> {
    let path = paths::marker_file(name);
    std::fs::write(&path, "")
        .with_context(|| format!("Unable to reset the container ID: {}", path.display()))
}

fn read_id(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let mut content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read file: {}", path.display()))?;

    // The marker convention is a single trailing newline; strip exactly one.
    if content.ends_with('\n') {
        content.pop();
    }

    if content.is_empty() {
        Ok(None)
    } else {
        Ok(Some(content))
    }
}

fn write_id(path: &Path, container_id: &str) -> Result<()> {
    std::fs::write(path, format!("{}\n", container_id))
        .with_context(|| format!("Unable to save the container ID: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn marker(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("dev_master_id")
    }

    #[test]
    fn absent_file_means_not_running() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_id(&marker(&dir)).unwrap(), None);
    }

    #[test]
    fn empty_file_means_not_running() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(marker(&dir), "").unwrap();
        assert_eq!(read_id(&marker(&dir)).unwrap(), None);
    }

    #[test]
    fn newline_only_file_means_not_running() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(marker(&dir), "\n").unwrap();
        assert_eq!(read_id(&marker(&dir)).unwrap(), None);
    }

    #[test]
    fn exactly_one_trailing_newline_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(marker(&dir), "abc123\n").unwrap();
        assert_eq!(read_id(&marker(&dir)).unwrap(), Some("abc123".to_string()));
    }

    #[test]
    fn id_without_trailing_newline_is_read_as_is() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(marker(&dir), "abc123").unwrap();
        assert_eq!(read_id(&marker(&dir)).unwrap(), Some("abc123".to_string()));
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        write_id(&marker(&dir), "cafebabe").unwrap();
        assert_eq!(std::fs::read_to_string(marker(&dir)).unwrap(), "cafebabe\n");
        assert_eq!(
            read_id(&marker(&dir)).unwrap(),
            Some("cafebabe".to_string())
        );
    }
}

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the default configuration file (~/.dockman.yaml)
pub fn default_config_file() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".dockman.yaml"))
}

/// Marker file holding the tracked container ID for a configuration
pub fn marker_file(name: &str) -> PathBuf {
    PathBuf::from(format!("/tmp/{}_master_id", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_file_is_keyed_by_configuration_name() {
        assert_eq!(
            marker_file("myapp"),
            PathBuf::from("/tmp/myapp_master_id")
        );
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Validation errors for a parsed configuration record
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the '{0}' field is mandatory and must be a non-empty string")]
    MissingField(&'static str),
}

/// A host/container folder path pair mounted into the container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappedFolder {
    pub host: String,
    pub container: String,
}

/// Capabilities to add to / drop from the container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub add: Vec<String>,
    #[serde(default)]
    pub drop: Vec<String>,
}

/// One configuration record as written in the YAML file, before
/// defaulting and validation
#[derive(Debug, Deserialize)]
pub struct RawImageConfiguration {
    pub name: Option<String>,
    pub image: Option<String>,
    pub tag: Option<String>,
    pub save_tag: Option<String>,
    pub runtime: Option<String>,
    pub network: Option<String>,
    pub shell: Option<String>,
    pub extra_flags: Option<String>,
    #[serde(default)]
    pub autosave: bool,
    #[serde(default)]
    pub privileged: bool,
    #[serde(default)]
    pub gui: bool,
    #[serde(default)]
    pub folders: Vec<MappedFolder>,
    #[serde(default)]
    pub capabilities: Capabilities,
}

/// A validated profile describing how to launch one container image.
///
/// Held read-only after loading; defaults have already been applied.
#[derive(Debug, Clone, Serialize)]
pub struct ImageConfiguration {
    pub name: String,
    pub image: String,
    pub tag: String,
    pub save_tag: String,
    pub runtime: String,
    pub network: String,
    pub shell: String,
    pub extra_flags: String,
    pub autosave: bool,
    pub privileged: bool,
    pub gui: bool,
    pub folders: Vec<MappedFolder>,
    pub capabilities: Capabilities,
}

impl ImageConfiguration {
    /// Full image expression (e.g. `image:tag`)
    pub fn image_with_tag(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }

    /// Full image expression using the save tag (e.g. `image:save_tag`)
    pub fn image_with_save_tag(&self) -> String {
        format!("{}:{}", self.image, self.save_tag)
    }
}

/// Load every configuration from a YAML file.
///
/// Any unreadable or malformed file, or any record missing a mandatory
/// field, is fatal: no partial configuration set is ever returned.
pub fn load(path: &Path) -> Result<Vec<ImageConfiguration>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let raw: Vec<RawImageConfiguration> = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    let configurations = raw
        .into_iter()
        .map(normalize)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    Ok(configurations)
}

/// Turn a raw record into a validated configuration, applying defaults
/// exactly once. Returns a new value rather than patching the input.
pub fn normalize(raw: RawImageConfiguration) -> Result<ImageConfiguration, ConfigError> {
    // The name doubles as a file-name fragment and a positional argument,
    // so all whitespace is removed.
    let name: String = raw.name.unwrap_or_default().split_whitespace().collect();
    if name.is_empty() {
        return Err(ConfigError::MissingField("name"));
    }

    let image = raw
        .image
        .filter(|i| !i.is_empty())
        .ok_or(ConfigError::MissingField("image"))?;

    let tag = raw
        .tag
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "latest".to_string());
    let save_tag = raw
        .save_tag
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| tag.clone());
    let runtime = raw
        .runtime
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| "none".to_string());
    let network = raw
        .network
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "bridge".to_string());
    let shell = raw
        .shell
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "bash".to_string());

    Ok(ImageConfiguration {
        name,
        image,
        tag,
        save_tag,
        runtime,
        network,
        shell,
        extra_flags: raw.extra_flags.unwrap_or_default(),
        autosave: raw.autosave,
        privileged: raw.privileged,
        gui: raw.gui,
        folders: raw.folders,
        capabilities: raw.capabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse_one(yaml: &str) -> Result<ImageConfiguration, ConfigError> {
        let mut raw: Vec<RawImageConfiguration> = serde_yaml::from_str(yaml).unwrap();
        normalize(raw.remove(0))
    }

    #[test]
    fn defaults_applied_for_unset_optional_fields() {
        let config = parse_one("- name: dev\n  image: ubuntu\n").unwrap();
        assert_eq!(config.tag, "latest");
        assert_eq!(config.save_tag, "latest");
        assert_eq!(config.runtime, "none");
        assert_eq!(config.network, "bridge");
        assert_eq!(config.shell, "bash");
        assert!(config.extra_flags.is_empty());
        assert!(!config.autosave);
        assert!(!config.privileged);
        assert!(!config.gui);
        assert!(config.folders.is_empty());
        assert!(config.capabilities.add.is_empty());
        assert!(config.capabilities.drop.is_empty());
    }

    #[test]
    fn save_tag_defaults_to_the_explicit_tag() {
        let config = parse_one("- name: dev\n  image: ubuntu\n  tag: '22.04'\n").unwrap();
        assert_eq!(config.tag, "22.04");
        assert_eq!(config.save_tag, "22.04");
    }

    #[test]
    fn explicit_save_tag_is_kept() {
        let config =
            parse_one("- name: dev\n  image: ubuntu\n  tag: '22.04'\n  save_tag: backup\n")
                .unwrap();
        assert_eq!(config.save_tag, "backup");
    }

    #[test]
    fn missing_name_is_rejected() {
        let result = parse_one("- image: ubuntu\n");
        assert!(matches!(result, Err(ConfigError::MissingField("name"))));
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        let result = parse_one("- name: '   '\n  image: ubuntu\n");
        assert!(matches!(result, Err(ConfigError::MissingField("name"))));
    }

    #[test]
    fn missing_image_is_rejected() {
        let result = parse_one("- name: dev\n");
        assert!(matches!(result, Err(ConfigError::MissingField("image"))));
    }

    #[test]
    fn name_whitespace_is_fully_removed() {
        let config = parse_one("- name: my app\n  image: ubuntu\n").unwrap();
        assert_eq!(config.name, "myapp");

        let config = parse_one("- name: \"  a b\\tc  \"\n  image: ubuntu\n").unwrap();
        assert_eq!(config.name, "abc");
    }

    #[test]
    fn full_record_is_parsed() {
        let yaml = "\
- name: robot
  image: ros/ros
  tag: noetic
  runtime: nvidia
  network: host
  shell: zsh
  extra_flags: --ipc=host --pid=host
  autosave: true
  privileged: true
  gui: true
  folders:
    - host: /home/me/catkin_ws
      container: /catkin_ws
  capabilities:
    add: [SYS_PTRACE]
    drop: [NET_ADMIN]
";
        let config = parse_one(yaml).unwrap();
        assert_eq!(config.runtime, "nvidia");
        assert_eq!(config.network, "host");
        assert_eq!(config.shell, "zsh");
        assert_eq!(config.extra_flags, "--ipc=host --pid=host");
        assert!(config.autosave && config.privileged && config.gui);
        assert_eq!(config.folders.len(), 1);
        assert_eq!(config.folders[0].host, "/home/me/catkin_ws");
        assert_eq!(config.capabilities.add, ["SYS_PTRACE"]);
        assert_eq!(config.capabilities.drop, ["NET_ADMIN"]);
    }

    #[test]
    fn load_fails_for_missing_file() {
        assert!(load(Path::new("/nonexistent/dockman.yaml")).is_err());
    }

    #[test]
    fn load_fails_when_any_record_is_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "- name: ok\n  image: ubuntu\n- name: broken\n").unwrap();
        assert!(load(file.path()).is_err());
    }

    #[test]
    fn load_reads_every_record() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "- name: one\n  image: alpine\n- name: two\n  image: debian\n  tag: bookworm\n"
        )
        .unwrap();
        let configurations = load(file.path()).unwrap();
        assert_eq!(configurations.len(), 2);
        assert_eq!(configurations[0].image_with_tag(), "alpine:latest");
        assert_eq!(configurations[1].image_with_tag(), "debian:bookworm");
    }
}

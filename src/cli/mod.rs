pub mod actions;
pub mod menu;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::image::{self, ImageConfiguration};
use crate::utils::paths;

#[derive(Parser)]
#[command(name = "dockman")]
#[command(version)]
#[command(about = "Profile-driven manager for interactive Docker containers", long_about = None)]
pub struct Cli {
    /// Name of the configured image profile to act on
    name: Option<String>,

    /// Action to perform on the selected profile
    #[arg(value_enum)]
    action: Option<Action>,

    /// Path to the configuration file (defaults to ~/.dockman.yaml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output as JSON where supported (show)
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Start a detached container for the profile
    Start,
    /// Open an interactive shell inside the container
    Connect,
    /// Commit the container to image:save_tag
    Save,
    /// Kill the container (saving first if autosave is set)
    Stop,
    /// Display the profile's configuration
    Show,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Start,
        Action::Connect,
        Action::Save,
        Action::Stop,
        Action::Show,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Start => "Start",
            Action::Connect => "Connect",
            Action::Save => "Save",
            Action::Stop => "Stop",
            Action::Show => "Show",
        }
    }
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn execute(self) -> Result<()> {
        let config_path = match &self.config {
            Some(path) => path.clone(),
            None => paths::default_config_file()?,
        };

        let configurations = image::load(&config_path)?;
        if configurations.is_empty() {
            anyhow::bail!("No configurations defined in {}", config_path.display());
        }

        let selected = self.select_configuration(&configurations)?;
        let configuration = &configurations[selected];

        let action = match self.action {
            Some(action) => action,
            None => menu::select_action()?,
        };

        match action {
            Action::Start => actions::start(configuration),
            Action::Connect => actions::connect(configuration),
            Action::Save => actions::save(configuration),
            Action::Stop => actions::stop(configuration),
            Action::Show => actions::show(configuration, self.json),
        }
    }

    /// Resolve the positional name against the loaded configurations,
    /// falling back to the interactive menu when absent or unknown.
    fn select_configuration(&self, configurations: &[ImageConfiguration]) -> Result<usize> {
        if let Some(name) = &self.name {
            if let Some(index) = configurations.iter().position(|c| c.name == *name) {
                return Ok(index);
            }
            tracing::warn!("No configuration named '{}', falling back to the menu", name);
        }
        menu::select_image(configurations)
    }
}

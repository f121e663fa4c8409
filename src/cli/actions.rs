use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::image::ImageConfiguration;
use crate::config::state;
use crate::docker::command;
use crate::docker::runner::{self, DockerCli};

/// Start a detached container for the configuration, unless one is
/// already tracked.
pub fn start(configuration: &ImageConfiguration) -> Result<()> {
    if state::read_container_id(&configuration.name)?.is_some() {
        println!("{} The container is already started", "!".yellow().bold());
        return Ok(());
    }

    if configuration.gui {
        runner::xhost_allow()?;
    }

    let docker = DockerCli::locate()?;
    let argv = command::run_command(configuration);

    println!(
        "{} Starting the container {}",
        "=>".blue().bold(),
        configuration.image_with_tag().cyan()
    );
    docker.start(&argv)?;

    let container_id = docker.latest_container_id()?;
    state::write_container_id(&configuration.name, &container_id)?;

    println!(
        "{} Container started: {}",
        "✓".green().bold(),
        container_id.get(..12).unwrap_or(&container_id).cyan()
    );

    Ok(())
}

/// Open an interactive shell inside the tracked container, starting it
/// first if nothing is tracked. On success the current process is
/// replaced by the docker client and this function never returns.
pub fn connect(configuration: &ImageConfiguration) -> Result<()> {
    let container_id = match state::read_container_id(&configuration.name)? {
        Some(id) => id,
        None => {
            start(configuration)?;
            state::read_container_id(&configuration.name)?
                .context("No container ID was recorded after start")?
        }
    };

    let docker = DockerCli::locate()?;
    docker.exec_shell(&container_id, &configuration.shell)
}

/// Commit the tracked container to `image:save_tag`.
pub fn save(configuration: &ImageConfiguration) -> Result<()> {
    let Some(container_id) = state::read_container_id(&configuration.name)? else {
        println!("{} The container is not running", "!".yellow().bold());
        return Ok(());
    };

    let docker = DockerCli::locate()?;
    let target = configuration.image_with_save_tag();
    docker.commit(&container_id, &target)?;

    println!(
        "{} Saved container state to {}",
        "✓".green().bold(),
        target.cyan()
    );
    Ok(())
}

/// Stop the tracked container, saving first when autosave is enabled,
/// and clear the marker file.
pub fn stop(configuration: &ImageConfiguration) -> Result<()> {
    let Some(container_id) = state::read_container_id(&configuration.name)? else {
        println!("{} The container is not running", "!".yellow().bold());
        return Ok(());
    };

    if configuration.autosave {
        save(configuration)?;
    }

    let docker = DockerCli::locate()?;
    docker.kill(&container_id)?;
    state::clear_container_id(&configuration.name)?;

    if configuration.gui {
        runner::xhost_revoke()?;
    }

    println!("{} Container stopped", "✓".green().bold());
    Ok(())
}

/// Print every field of the configuration, or its JSON rendering.
pub fn show(configuration: &ImageConfiguration, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(configuration)?);
        return Ok(());
    }

    println!("Name: {}", configuration.name.cyan());
    println!("\tImage: {}", configuration.image);
    println!("\tTag: {}", configuration.tag);
    println!("\tSaveTag: {}", configuration.save_tag);
    println!("\tRuntime: {}", configuration.runtime);
    println!("\tNetwork: {}", configuration.network);
    println!("\tShell: {}", configuration.shell);
    println!("\tAutosave: {}", configuration.autosave);
    println!("\tPrivileged: {}", configuration.privileged);
    println!("\tGui: {}", configuration.gui);
    if configuration.folders.is_empty() {
        println!("\tFolders: (none)");
    } else {
        println!("\tFolders:");
        for folder in &configuration.folders {
            println!("\t\t{}:{}", folder.host, folder.container);
        }
    }
    println!("\tCapAdd: {}", configuration.capabilities.add.join(", "));
    println!("\tCapDrop: {}", configuration.capabilities.drop.join(", "));
    println!("\tExtraFlags: {}", configuration.extra_flags);

    Ok(())
}

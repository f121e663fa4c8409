use crate::config::image::ImageConfiguration;

// X11 display passthrough plus the camera device and X11 socket mounts,
// inserted as-is for gui-enabled configurations.
const GUI_TOKENS: [&str; 6] = [
    "--env",
    "DISPLAY",
    "--env",
    "QT_X11_NO_MITSHM=1",
    "--volume=/dev/video0:/dev/video0",
    "--volume=/tmp/.X11-unix:/tmp/.X11-unix:ro",
];

/// Build the full `docker run` argument vector for a configuration.
///
/// Token order is fixed. Folder paths, capability names, and extra flags
/// are passed through verbatim, without validation.
pub fn run_command(configuration: &ImageConfiguration) -> Vec<String> {
    let mut command: Vec<String> = ["docker", "run", "-ti", "-d"]
        .into_iter()
        .map(String::from)
        .collect();

    if configuration.runtime != "none" {
        command.push(format!("--runtime={}", configuration.runtime));
    }

    command.push(format!("--network={}", configuration.network));

    if configuration.privileged {
        command.push("--privileged".to_string());
    }

    if configuration.gui {
        command.extend(GUI_TOKENS.iter().map(|token| token.to_string()));
    }

    for folder in &configuration.folders {
        command.push(format!("--volume={}:{}", folder.host, folder.container));
    }

    for capability in &configuration.capabilities.add {
        command.push(format!("--cap-add={}", capability));
    }

    for capability in &configuration.capabilities.drop {
        command.push(format!("--cap-drop={}", capability));
    }

    command.extend(configuration.extra_flags.split_whitespace().map(String::from));

    command.push(configuration.image_with_tag());

    command
}

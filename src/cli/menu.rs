use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};

use crate::cli::Action;
use crate::config::image::ImageConfiguration;

/// Print the numbered image menu and read a selection, re-prompting until
/// the input is a number in range.
pub fn select_image(configurations: &[ImageConfiguration]) -> Result<usize> {
    println!("Please select an image:");
    for (index, configuration) in configurations.iter().enumerate() {
        println!("\t{}) {}", index + 1, configuration.name.cyan());
    }
    Ok(read_choice(configurations.len())? - 1)
}

/// Print the numbered action menu and read a selection.
pub fn select_action() -> Result<Action> {
    println!("Please select an action for this container:");
    for (index, action) in Action::ALL.iter().enumerate() {
        println!("\t{}) {}", index + 1, action.label());
    }
    Ok(Action::ALL[read_choice(Action::ALL.len())? - 1])
}

fn read_choice(max: usize) -> Result<usize> {
    let selection = Input::<usize>::with_theme(&ColorfulTheme::default())
        .with_prompt(">>>")
        .validate_with(move |value: &usize| {
            if (1..=max).contains(value) {
                Ok(())
            } else {
                Err(format!("enter a number between 1 and {}", max))
            }
        })
        .interact_text()?;
    Ok(selection)
}

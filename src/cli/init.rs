//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Config to start from. An unreadable file is reported, then replaced.
fn existing_config(path: Option<&str>) -> Config {
    match Config::load_at(path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!(
                "{} Existing config could not be read and will be overwritten: {}",
                "!".yellow(),
                err
            );
            Config::default()
        }
    }
}

/// Run the init command
///
/// Existing values are offered as defaults, so re-running init only changes
/// what the user types over.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let mut config = existing_config(opts.config_ref());
    let theme = ColorfulTheme::default();

    println!("{}", "Welcome to moveez!".bold().green());
    println!("Let's set up your TMDB and OMDb keys.\n");

    let tmdb_key: String = Password::with_theme(&theme)
        .with_prompt("TMDB API key (v3)")
        .allow_empty_password(config.tmdb_api_key.is_some())
        .interact()?;
    if !tmdb_key.trim().is_empty() {
        config.tmdb_api_key = Some(tmdb_key.trim().to_string());
    }

    let omdb_key: String = Password::with_theme(&theme)
        .with_prompt("OMDb API key (optional, enables IMDb ratings)")
        .allow_empty_password(true)
        .interact()?;
    if !omdb_key.trim().is_empty() {
        config.omdb_api_key = Some(omdb_key.trim().to_string());
    }

    let region: String = Input::with_theme(&theme)
        .with_prompt("Watch region")
        .default(config.region.clone())
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.len() == 2 && input.chars().all(|c| c.is_ascii_alphabetic()) {
                Ok(())
            } else {
                Err("Use a two-letter country code, e.g. US or GB")
            }
        })
        .interact_text()?;
    config.region = region.to_uppercase();

    let path = config.save_at(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Trending, top rated and popular", "moveez browse".cyan());
    println!("  {} - Find a movie", "moveez search <title>".cyan());

    Ok(())
}

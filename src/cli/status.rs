//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "moveez Configuration Status".bold());

    let path = Config::resolve_path(opts.config_ref())?;
    let exists = path.exists();
    let mut config = Config::load_at(opts.config_ref())?;
    config.apply(opts.overrides());

    if exists {
        println!("Config file: {}", path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            path.display().to_string().cyan(),
            "(not created yet)".dimmed()
        );
    }
    println!();

    if config.tmdb_api_key.is_some() {
        println!("{} TMDB API key configured", "✓".green());
    } else {
        println!("{} TMDB API key not configured", "✗".red());
        println!("  → Run 'moveez init' or set MOVEEZ_TMDB_KEY");
    }

    if config.omdb_api_key.is_some() {
        println!("{} OMDb API key configured", "✓".green());
    } else {
        println!(
            "{} OMDb API key not configured (ratings disabled)",
            "○".dimmed()
        );
    }

    println!("{} Region: {}", "✓".green(), config.region);
    println!("{} Language: {}", "✓".green(), config.language);

    if let Some(ref host) = config.tmdb_host {
        println!("{} Custom TMDB host: {}", "○".dimmed(), host.cyan());
    }
    if let Some(ref host) = config.omdb_host {
        println!("{} Custom OMDb host: {}", "○".dimmed(), host.cyan());
    }

    println!();
    Ok(())
}

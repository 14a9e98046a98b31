use clap::Parser;
use color_eyre::Result;
use tagcart::{
    cli::{self, Cli, Commands},
    logging, tui,
    utils::expand_path,
    Config, Profile,
};
use tracing::{info, warn};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // --config replaces the profile's config file; it is read but never created
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(&expand_path(path))?,
        None => Config::load_with_profile(profile)?,
    };

    if let Err(e) = logging::init_logging(profile, &config.log_level) {
        // Not fatal: the form works without a log file
        eprintln!("Logging disabled: {}", e);
    }
    info!(?profile, delimiter = %config.delimiter, "starting");

    match cli.command.unwrap_or_default() {
        Commands::Tui { tags, json } => {
            let mut app = tui::App::new(config, tags.as_deref())?;
            tui::run_event_loop(&mut app)?;
            info!(count = app.submissions.len(), "exiting");
            cli::print_submissions(&app.submissions, json)?;
        }
        Commands::Normalize { seed, add, remove, json } => {
            if add.is_empty() && remove.is_empty() && seed.is_none() {
                warn!("normalize called without input");
            }
            cli::handle_normalize(seed, add, remove, config.delimiter, json)?;
        }
    }

    Ok(())
}

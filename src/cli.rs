use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::tags::{AddOutcome, TagSet};
use crate::tui::SearchRequest;

#[derive(Parser)]
#[command(name = "tagcart")]
#[command(about = "Keyboard-driven tag entry for travel searches")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (separate config and log file)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive search form (default if no subcommand)
    Tui {
        /// Pre-existing value of the tags field
        #[arg(long)]
        tags: Option<String>,
        /// Print submitted searches as JSON on exit
        #[arg(long)]
        json: bool,
    },
    /// Normalize a tags field without a terminal
    Normalize {
        /// Pre-existing value of the tags field
        seed: Option<String>,
        /// Tag to add, applied in order
        #[arg(long = "add")]
        add: Vec<String>,
        /// Index to remove, applied in order after every add
        #[arg(long = "remove")]
        remove: Vec<usize>,
        /// Print the tags as a JSON array
        #[arg(long)]
        json: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Tui { tags: None, json: false }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to serialize output: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Run the tag state machine over `seed` and the requested edits.
/// Returns the serialized field, or the tags as JSON.
pub fn normalize(
    seed: Option<&str>,
    add: &[String],
    remove: &[usize],
    delimiter: char,
    json: bool,
) -> Result<String, CliError> {
    let mut tags = TagSet::parse(seed.unwrap_or_default(), delimiter);

    for raw in add {
        if let AddOutcome::Duplicate(tag) = tags.add(raw) {
            debug!(tag = %tag, "duplicate tag ignored");
        }
    }
    for &index in remove {
        if tags.remove(index).is_none() {
            debug!(index, len = tags.len(), "remove index out of range");
        }
    }

    if json {
        Ok(serde_json::to_string(tags.tags())?)
    } else {
        Ok(tags.serialize())
    }
}

pub fn handle_normalize(
    seed: Option<String>,
    add: Vec<String>,
    remove: Vec<usize>,
    delimiter: char,
    json: bool,
) -> Result<(), CliError> {
    println!("{}", normalize(seed.as_deref(), &add, &remove, delimiter, json)?);
    Ok(())
}

/// Submitted searches as printed after the form exits: one serialized field
/// per line, or a JSON array of requests
pub fn format_submissions(submissions: &[SearchRequest], json: bool) -> Result<String, CliError> {
    if json {
        return Ok(serde_json::to_string_pretty(submissions)?);
    }
    Ok(submissions
        .iter()
        .map(|request| request.tags.as_str())
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn print_submissions(submissions: &[SearchRequest], json: bool) -> Result<(), CliError> {
    if submissions.is_empty() && !json {
        return Ok(());
    }
    println!("{}", format_submissions(submissions, json)?);
    Ok(())
}

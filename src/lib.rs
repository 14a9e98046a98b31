pub mod cli;
pub mod config;
pub mod logging;
pub mod tags;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use tags::{normalize_tag, AddOutcome, TagSet};
pub use utils::Profile;

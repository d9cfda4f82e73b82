use std::path::PathBuf;

use clap::Parser;
use triefs::config::{CONFIG_FILE_NAME, ColorMode};

use crate::application::data::LogLevel;

/// Interactive in-memory file system shell
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// YAML file with shell settings; defaults apply when it does not exist
    #[clap(long, short, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Overrides the `color` setting of the config file
    #[clap(long, value_enum)]
    pub color: Option<ColorMode>,
}

use std::path::PathBuf;

use triefs::config::{ColorMode, ShellConfig};
use triefs::shell::ShellSettings;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub config_path: PathBuf,
    pub color_override: Option<ColorMode>,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            color_override: cli.color,
        }
    }
}

impl RuntimeConfig {
    /// Merges the file config with command-line overrides.
    pub fn shell_settings(&self, config: ShellConfig) -> ShellSettings {
        let color = self.color_override.unwrap_or(config.color);
        ShellSettings {
            prompt: config.prompt,
            banner: config.banner,
            color: color.enabled(),
        }
    }
}

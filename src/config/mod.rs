mod color_mode;
mod shell_config;

pub use color_mode::ColorMode;
pub use shell_config::{CONFIG_FILE_NAME, DEFAULT_PROMPT, ShellConfig, ShellConfigError};

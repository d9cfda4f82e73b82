use clap::ValueEnum;
use derive_more::Display;
use supports_color::Stream;

/// When to colorize session output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
pub enum ColorMode {
    #[default]
    #[display("auto")]
    Auto,
    #[display("always")]
    Always,
    #[display("never")]
    Never,
}

impl ColorMode {
    /// Case-insensitive lookup by the same names the CLI accepts.
    pub fn parse(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }

    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => supports_color::on(Stream::Stdout).is_some(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

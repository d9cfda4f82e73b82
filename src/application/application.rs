use std::io;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;
use triefs::config::{ShellConfig, ShellConfigError};
use triefs::filesystem::Namespace;
use triefs::shell::{Shell, ShellError};

use crate::application::RuntimeConfig;

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let config = ShellConfig::read(&app_config.config_path)
            .await
            .context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", config);

        let shell = Shell::new(app_config.shell_settings(config));
        let mut namespace = Namespace::new();
        shell
            .run(&mut namespace, io::stdin().lock(), io::stdout().lock())
            .context(SessionSnafu)?;

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ShellConfigError },
    #[snafu(display("Critical failure encountered during the interactive session"))]
    SessionError { source: ShellError },
}

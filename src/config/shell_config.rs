use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{borrow::Cow, io, path::Path};
use tracing::{debug, info};

use crate::config::ColorMode;

pub const CONFIG_FILE_NAME: &str = "triefs.yaml";
pub const DEFAULT_PROMPT: &str = "Enter command: ";

/// User-tunable presentation of the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub banner: bool,
    pub color: ColorMode,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            banner: true,
            color: ColorMode::default(),
        }
    }
}

impl ShellConfig {
    /// Reads the config at `path`, falling back to defaults when the file
    /// does not exist.
    pub async fn read(path: &Path) -> Result<Self, ShellConfigError> {
        debug!("Opening config file: {}", path.display());
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).context(ReadSnafu {
                    file_path: path.display().to_string(),
                });
            }
        };
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    fn from_mapping(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Self, ShellConfigError> {
        let defaults = Self::default();

        let prompt = string_field(top_level, "prompt")?.unwrap_or(defaults.prompt);
        let banner = bool_field(top_level, "banner")?.unwrap_or(defaults.banner);
        let color = match string_field(top_level, "color")? {
            Some(value) => ColorMode::parse(&value).context(UnknownColorModeSnafu { value })?,
            None => defaults.color,
        };

        Ok(Self {
            prompt,
            banner,
            color,
        })
    }
}

fn field<'a, 'input>(
    mapping: &'a LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    key: &'static str,
) -> Option<&'a Yaml<'input>> {
    mapping.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key))))
}

fn string_field(
    mapping: &LinkedHashMap<Yaml, Yaml>,
    key: &'static str,
) -> Result<Option<String>, ShellConfigError> {
    match field(mapping, key) {
        None => Ok(None),
        Some(Yaml::Value(Scalar::String(value))) => Ok(Some(value.to_string())),
        Some(_) => InvalidFieldTypeSnafu {
            key,
            expected: "string",
        }
        .fail(),
    }
}

fn bool_field(
    mapping: &LinkedHashMap<Yaml, Yaml>,
    key: &'static str,
) -> Result<Option<bool>, ShellConfigError> {
    match field(mapping, key) {
        None => Ok(None),
        Some(Yaml::Value(Scalar::Boolean(value))) => Ok(Some(*value)),
        Some(_) => InvalidFieldTypeSnafu {
            key,
            expected: "boolean",
        }
        .fail(),
    }
}

impl TryFrom<&str> for ShellConfig {
    type Error = ShellConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents)
            .map_err(|e| ShellConfigError::ParseError { source: e })?;
        let document = documents
            .first()
            .ok_or(ShellConfigError::MalformedConfig)?;
        let top_level = document
            .as_mapping()
            .ok_or(ShellConfigError::TopLevelNotMap)?;

        Self::from_mapping(top_level)
    }
}

#[derive(Debug, Snafu)]
pub enum ShellConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The config file is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key '{}' should be a {}", key, expected))]
    InvalidFieldType {
        key: &'static str,
        expected: &'static str,
    },
    #[snafu(display(
        "Unknown color mode '{}', expected one of: auto, always, never",
        value
    ))]
    UnknownColorMode { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[compio::test]
    async fn config_defaults_when_file_is_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let config = ShellConfig::read(&temp_dir.path().join(CONFIG_FILE_NAME))
            .await
            .expect("Missing config should fall back to defaults");

        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.prompt, DEFAULT_PROMPT);
        assert!(config.banner);
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[compio::test]
    async fn config_reads_values_from_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "prompt: \"triefs> \"\nbanner: false\ncolor: never\n")
            .expect("Failed to write to temp file");

        let config = ShellConfig::read(temp_file.path())
            .await
            .expect("Failed to read config");

        assert_eq!(
            config,
            ShellConfig {
                prompt: "triefs> ".to_string(),
                banner: false,
                color: ColorMode::Never,
            }
        );
    }

    #[compio::test]
    async fn config_returns_error_when_path_is_a_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let result = ShellConfig::read(temp_dir.path()).await;

        assert!(matches!(result, Err(ShellConfigError::ReadError { .. })));
    }

    #[compio::test]
    async fn config_returns_error_on_non_utf8_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(b"prompt: \xff\xfe\n")
            .expect("Failed to write to temp file");

        let result = ShellConfig::read(temp_file.path()).await;

        assert!(matches!(
            result,
            Err(ShellConfigError::EncodingError { .. })
        ));
    }

    #[test]
    fn config_returns_error_on_invalid_yaml() {
        let result: Result<ShellConfig, _> = "invalid: yaml: content: [unclosed".try_into();
        assert!(matches!(result, Err(ShellConfigError::ParseError { .. })));
    }

    #[test]
    fn config_returns_error_on_empty_file() {
        let result: Result<ShellConfig, _> = "".try_into();
        assert!(matches!(result, Err(ShellConfigError::MalformedConfig)));
    }

    #[rstest]
    #[case("- item1\n- item2")]
    #[case("just a string")]
    fn config_returns_error_when_top_level_is_not_map(#[case] contents: &str) {
        let result: Result<ShellConfig, _> = contents.try_into();
        assert!(matches!(result, Err(ShellConfigError::TopLevelNotMap)));
    }

    #[rstest]
    #[case("prompt: 42", "prompt")]
    #[case("prompt: [a, b]", "prompt")]
    #[case("banner: maybe", "banner")]
    #[case("color: true", "color")]
    fn config_returns_error_on_wrong_field_type(#[case] contents: &str, #[case] bad_key: &str) {
        let result: Result<ShellConfig, _> = contents.try_into();
        match result {
            Err(ShellConfigError::InvalidFieldType { key, .. }) => assert_eq!(key, bad_key),
            other => panic!("Expected InvalidFieldType, got {other:?}"),
        }
    }

    #[test]
    fn config_returns_error_on_unknown_color_mode() {
        let result: Result<ShellConfig, _> = "color: rainbow".try_into();
        let err = result.unwrap_err();
        assert!(matches!(err, ShellConfigError::UnknownColorMode { .. }));
        assert!(err.to_string().contains("rainbow"));
    }

    #[rstest]
    #[case("color: ALWAYS", ColorMode::Always)]
    #[case("color: auto", ColorMode::Auto)]
    #[case("other_setting: value", ColorMode::Auto)]
    fn config_parses_color_mode(#[case] contents: &str, #[case] expected: ColorMode) {
        let config: ShellConfig = contents.try_into().expect("Config should parse");
        assert_eq!(config.color, expected);
    }

    #[test]
    fn config_keeps_defaults_for_missing_keys() {
        let config: ShellConfig = "banner: false".try_into().expect("Config should parse");
        assert_eq!(config.prompt, DEFAULT_PROMPT);
        assert!(!config.banner);
    }
}

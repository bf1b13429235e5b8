use anyhow::{anyhow, Context};
use serde::Deserialize;
use serde_default::DefaultFromSerde;
use std::{fs, path::PathBuf};

use crate::config::defaults;

pub fn default_config() -> String {
    format!(
        r#"# The commented values are the defaults
[output]
# Name of the generated char pointer constant, must be a C identifier.
# symbol = "{}"
# Prepend a comment saying the file is generated, with its timestamp.
# header = {}
# Extension replacing the input one when no output path is given.
# extension = "{}"
"#,
        defaults::symbol(),
        defaults::header(),
        defaults::extension(),
    )
}

#[derive(Deserialize, DefaultFromSerde)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    #[serde(default = "defaults::symbol")]
    pub symbol: String,
    #[serde(default = "defaults::header")]
    pub header: bool,
    #[serde(default = "defaults::extension")]
    pub extension: String,
}

#[derive(Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub output: OutputConfig,
}

impl FileConfig {
    /// Without a path, the defaults are used and nothing is read from disk.
    pub fn new(config_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(config_path) = config_override else {
            return Ok(Self::default());
        };
        let config_path = if config_path.starts_with("~/") {
            dirs::home_dir()
                .ok_or(anyhow!("Home directory is not found"))?
                .join(config_path.strip_prefix("~/")?)
        } else {
            config_path
        };

        if fs::metadata(&config_path).is_err() {
            anyhow::bail!("Config file is not accessible at {}", config_path.display());
        }
        debug!("Reading config at {}", config_path.display());
        let config_content = fs::read_to_string(&config_path).with_context(|| {
            format!("Impossible to read config file {}", config_path.display())
        })?;

        toml::from_str(&config_content)
            .with_context(|| format!("Invalid config file {}", config_path.display()))
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Yaml,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Yaml => "yaml",
        }
    }
}

/// Optional `--config` file. Everything can also be given on the command line.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub type_libraries: Vec<PathBuf>,
    pub format: Option<OutputFormat>,
    pub allow_type_overrides: bool,
}

impl ConvertConfig {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        // library paths are relative to the config file
        if let Some(dir) = path.parent() {
            for library in &mut config.type_libraries {
                if library.is_relative() {
                    *library = dir.join(&*library);
                }
            }
        }
        Ok(config)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

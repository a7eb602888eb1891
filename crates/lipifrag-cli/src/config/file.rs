use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileCappingConfig {
    pub carbon_bond_length: Option<f64>,
    pub hydrogen_bond_length: Option<f64>,
    pub add_cap_hydrogens: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileExtractionConfig {
    pub single_fragments: Option<bool>,
    pub double_fragments: Option<bool>,
    pub dimers: Option<bool>,
}

/// The TOML configuration file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub capping: Option<FileCappingConfig>,
    pub extraction: Option<FileExtractionConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

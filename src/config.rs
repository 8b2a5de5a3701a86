use crate::csv::get_csv_files;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "plant-quiz.toml";
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    #[serde(rename = "source")]
    pub sources: Vec<SourceConfig>,
    pub columns: ColumnMap,
    pub range: RangeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            sources: Vec::new(),
            columns: ColumnMap::default(),
            range: RangeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub path: PathBuf,
    /// Note and image columns become mandatory.
    #[serde(default)]
    pub require_extras: bool,
    #[serde(default)]
    pub columns: Option<ColumnMap>,
}

/// Header names for each field of a plant row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub number: String,
    pub common_name: String,
    pub scientific_name: String,
    pub note: String,
    pub image: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            number: "Nummer".to_string(),
            common_name: "Nederlands".to_string(),
            scientific_name: "Wetenschappelijke naam".to_string(),
            note: "Extra info".to_string(),
            image: "Afbeelding".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// Number of plants in the starting range; the whole list when unset.
    pub initial_window: Option<usize>,
}

impl Config {
    /// Reads `path` when given, otherwise `plant-quiz.toml` if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::info!("no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path)?;
        let config = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            sources = config.sources.len(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Configured sources, or one per CSV file in `data_dir` when none are listed.
    pub fn resolve_sources(&self) -> Vec<SourceConfig> {
        if !self.sources.is_empty() {
            return self.sources.clone();
        }

        get_csv_files(&self.data_dir)
            .into_iter()
            .filter_map(|path| {
                let name = path.file_stem()?.to_string_lossy().to_string();
                Some(SourceConfig {
                    name,
                    path,
                    require_extras: false,
                    columns: None,
                })
            })
            .collect()
    }
}

use serde::Deserialize;
use squarecrop_core::SquareOptions;
use std::path::{Path, PathBuf};

const DEFAULT_SOURCE: &str = "media/textures/jade.jpg";
const DEFAULT_DESTINATION: &str = "media/textures/jade.png";
const DEFAULT_SIZE: i64 = 1024;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Signed so that a negative value in the file is reported, not a parse error.
    pub size: i64,
    /// `filter` and `apply_orientation` keys at the top level.
    #[serde(flatten)]
    pub options: SquareOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            size: DEFAULT_SIZE,
            options: SquareOptions::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

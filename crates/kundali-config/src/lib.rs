use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATHS: [&str; 2] = ["configs/kundali.toml", "../../configs/kundali.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct RectifyConfig {
    pub step_seconds: u32,
    pub top_n: usize,
    pub house_system: String,
    pub ayanamsa: String,
    pub ephemeris_path: Option<PathBuf>,
    pub workers: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

impl Default for RectifyConfig {
    fn default() -> Self {
        Self {
            step_seconds: default_step_seconds(),
            top_n: default_top_n(),
            house_system: default_house_system(),
            ayanamsa: default_ayanamsa(),
            ephemeris_path: None,
            workers: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RectifyToml {
    #[serde(default = "default_step_seconds")]
    step_seconds: u32,
    #[serde(default = "default_top_n")]
    top_n: usize,
    #[serde(default = "default_house_system")]
    house_system: String,
    #[serde(default = "default_ayanamsa")]
    ayanamsa: String,
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
    #[serde(default)]
    workers: Option<usize>,
    #[serde(default)]
    timeout_seconds: Option<u64>,
}

fn default_step_seconds() -> u32 {
    10
}

fn default_top_n() -> usize {
    30
}

fn default_house_system() -> String {
    "whole_sign".to_string()
}

fn default_ayanamsa() -> String {
    "lahiri".to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    rectify: Option<RectifyToml>,
}

/// Try the common relative paths for `configs/kundali.toml`.
pub fn read_kundali_toml_text() -> Option<String> {
    CONFIG_PATHS.iter().find_map(|p| fs::read_to_string(p).ok())
}

pub fn parse_rectify_config(text: &str) -> anyhow::Result<RectifyConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse kundali.toml: {e}"))?;
    let config = match root.rectify {
        Some(RectifyToml {
            step_seconds,
            top_n,
            house_system,
            ayanamsa,
            ephemeris_path,
            workers,
            timeout_seconds,
        }) => RectifyConfig {
            step_seconds,
            top_n,
            house_system,
            ayanamsa,
            ephemeris_path,
            workers,
            timeout_seconds,
        },
        None => RectifyConfig::default(),
    };
    validate_rectify_config(&config)?;
    Ok(config)
}

pub fn validate_rectify_config(config: &RectifyConfig) -> anyhow::Result<()> {
    if config.step_seconds == 0 {
        anyhow::bail!("rectify.step_seconds must be at least 1");
    }
    if config.top_n == 0 {
        anyhow::bail!("rectify.top_n must be at least 1");
    }
    if config.workers == Some(0) {
        anyhow::bail!("rectify.workers must be at least 1 when set");
    }
    if let Some(path) = &config.ephemeris_path {
        if !path.exists() {
            anyhow::bail!("rectify.ephemeris_path does not exist: {}", path.display());
        }
    }
    Ok(())
}

/// Load `[rectify]` from an explicit file, or from the common relative
/// paths when `path` is `None`. No file at the common paths means defaults.
pub fn load_rectify_config(path: Option<&Path>) -> anyhow::Result<RectifyConfig> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?,
        None => match read_kundali_toml_text() {
            Some(text) => text,
            None => return Ok(RectifyConfig::default()),
        },
    };
    parse_rectify_config(&text)
}

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub default_model: Option<String>,
    pub vision_model: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            groq_api_key: None,
            default_model: Some(models::DEFAULT_TEXT_MODEL.to_string()),
            vision_model: Some(models::VISION_MODEL.to_string()),
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn save_default_model(model: &str) -> Result<()> {
        let mut config = Self::load().unwrap_or_else(|_| Self::new());
        config.default_model = Some(model.to_string());
        config.save()
    }

    /// Resolve the Groq credential: the GROQ_KEY environment variable wins,
    /// then the config file. Absence is fatal at startup, before any core
    /// logic runs.
    pub fn resolve_api_key(&self) -> Result<String> {
        std::env::var("GROQ_KEY")
            .ok()
            .or_else(|| self.groq_api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("GROQ_KEY is not set; export it or add groq_api_key to the config file")
            })
    }

    pub fn default_model(&self) -> &str {
        self.default_model
            .as_deref()
            .unwrap_or(models::DEFAULT_TEXT_MODEL)
    }

    pub fn vision_model(&self) -> &str {
        self.vision_model.as_deref().unwrap_or(models::VISION_MODEL)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("splinter").join("config.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

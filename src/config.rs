use crate::error::{Result, SheetCheckError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";

const DEFAULT_API_VERSION: &str = "2024-06-01";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub endpoint: Option<String>,
    pub deployment: Option<String>,
    pub api_version: String,
    pub api_key: Option<String>,
    pub temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            deployment: None,
            api_version: DEFAULT_API_VERSION.into(),
            api_key: None,
            temperature: 0.0,
        }
    }
}

/// 解析后的模型连接参数
#[derive(Debug, Clone, PartialEq)]
pub struct AzureSettings {
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
    pub api_key: String,
    pub temperature: f32,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SheetCheckError::Config("找不到用户主目录".into()))?;
        Ok(home.join(".config").join("sheet-check").join("config.json"))
    }

    /// 环境变量优先解析连接参数
    pub fn resolve(&self) -> Result<AzureSettings> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(&self, env: F) -> Result<AzureSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |name: &'static str, file_value: Option<&String>| -> Result<String> {
            env(name)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file_value.filter(|v| !v.trim().is_empty()).cloned())
                .ok_or(SheetCheckError::MissingSetting(name))
        };

        let api_version = env(ENV_API_VERSION)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.api_version.clone());

        Ok(AzureSettings {
            endpoint: pick(ENV_ENDPOINT, self.endpoint.as_ref())?,
            deployment: pick(ENV_DEPLOYMENT, self.deployment.as_ref())?,
            api_version,
            api_key: pick(ENV_API_KEY, self.api_key.as_ref())?,
            temperature: self.temperature,
        })
    }
}

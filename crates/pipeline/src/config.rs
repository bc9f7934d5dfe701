use anyhow::{Context, Result};
use extract::{DedupConfig, LlmConfig};
use fetch::FetchConfig;
use graph::SynthesisConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MODEL: &str = "LongCat-Flash-Chat";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub dedup: DedupConfig,
    pub synthesis: SynthesisConfig,
    pub llm: LlmSettings,
}

/// Non-secret model settings. Endpoint and key come from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub model: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: None,
            request_timeout_secs: 120,
        }
    }
}

impl AppConfig {
    /// Reads a JSON config file; fields it leaves out keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid config file: {:?}", path))
    }
}

/// Loads `.env` if present, then resolves the endpoint and credential.
pub fn llm_config_from_env(settings: &LlmSettings) -> Result<LlmConfig> {
    dotenvy::dotenv().ok();
    llm_config_from_lookup(settings, |key| std::env::var(key).ok())
}

pub fn llm_config_from_lookup<F>(settings: &LlmSettings, lookup: F) -> Result<LlmConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let first = |keys: &[&str]| {
        keys.iter()
            .filter_map(|k| lookup(*k))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    };

    let api_base = first(&["LLM_API_BASE", "OPENAI_API_BASE"])
        .context("LLM_API_BASE (or OPENAI_API_BASE) must be set")?;
    let api_key = first(&["LLM_API_KEY", "OPENAI_API_KEY"])
        .context("LLM_API_KEY (or OPENAI_API_KEY) must be set")?;
    let model = first(&["LLM_MODEL"])
        .or_else(|| settings.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    Ok(LlmConfig {
        api_base,
        api_key,
        model,
        request_timeout_secs: settings.request_timeout_secs,
    })
}

/// One URL per line; blank lines and `#` comments are skipped.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

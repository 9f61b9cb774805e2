//! Runtime configuration for the generation service.
//!
//! Defaults cover the common case; a YAML config file can override the
//! model, base URL and output token budget, and CLI flags override the
//! file. The API credential is never read from the file — it comes from
//! the process environment (or an explicit flag) at startup, and its
//! absence is a fatal startup error handled by argument parsing.

use serde::Deserialize;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Model used when neither the CLI nor the config file names one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Google Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Output token budget used when no override is given.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Optional overrides loaded from a YAML config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Gemini model identifier.
    pub model: Option<String>,
    /// Alternate API base URL (e.g. a proxy).
    pub base_url: Option<String>,
    /// Output token budget for a single generation call.
    pub max_output_tokens: Option<u32>,
}

/// Load a [`FileConfig`] from a YAML file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn load_config(path: &str) -> Result<FileConfig, Box<dyn Error>> {
    let raw = fs::read_to_string(path).await?;
    let config: FileConfig = serde_yaml::from_str(&raw)?;
    info!("Loaded configuration file");
    Ok(config)
}

/// Resolved configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API credential, required at startup.
    pub api_key: String,
    /// API base URL, validated as a parseable URL.
    pub base_url: String,
    /// Model identifier, fixed for the lifetime of the process.
    pub model: String,
    /// Output token budget per generation call.
    pub max_output_tokens: u32,
}

impl GeminiConfig {
    /// Resolve the effective configuration.
    ///
    /// Precedence per field: CLI flag, then config file, then built-in
    /// default. The base URL is validated here so a typo fails at startup
    /// instead of on the first generation call.
    ///
    /// # Errors
    ///
    /// Fails when the credential is empty or the base URL does not parse.
    pub fn resolve(
        api_key: String,
        cli_model: Option<String>,
        cli_base_url: Option<String>,
        file: &FileConfig,
    ) -> Result<Self, Box<dyn Error>> {
        if api_key.trim().is_empty() {
            return Err("GEMINI_API_KEY está vacía; define la credencial antes de iniciar".into());
        }

        let base_url = cli_base_url
            .or_else(|| file.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| format!("URL base inválida \"{base_url}\": {e}"))?;

        let model = cli_model
            .or_else(|| file.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let max_output_tokens = file.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS);

        Ok(Self {
            api_key,
            base_url,
            model,
            max_output_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = GeminiConfig::resolve(
            "test-key".to_string(),
            None,
            None,
            &FileConfig::default(),
        )
        .unwrap();

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            model: Some("gemini-2.0-flash".to_string()),
            base_url: None,
            max_output_tokens: Some(512),
        };
        let config = GeminiConfig::resolve(
            "test-key".to_string(),
            Some("gemini-2.5-pro".to_string()),
            None,
            &file,
        )
        .unwrap();

        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.max_output_tokens, 512);
    }

    #[test]
    fn test_empty_credential_is_fatal() {
        let result =
            GeminiConfig::resolve("   ".to_string(), None, None, &FileConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_base_url_is_fatal() {
        let result = GeminiConfig::resolve(
            "test-key".to_string(),
            None,
            Some("no es una url".to_string()),
            &FileConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let config = GeminiConfig::resolve(
            "test-key".to_string(),
            None,
            Some("https://proxy.example/v1beta/".to_string()),
            &FileConfig::default(),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://proxy.example/v1beta");
    }

    #[test]
    fn test_file_config_parsing() {
        let yaml = "model: gemini-2.0-flash\nmax_output_tokens: 1024\n";
        let file: FileConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(file.max_output_tokens, Some(1024));
        assert!(file.base_url.is_none());
    }
}

//! Command-line interface definitions for the Alta Voz outline wizard.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The API credential can be provided via flag or the `GEMINI_API_KEY`
//! environment variable; argument parsing fails at startup when neither is
//! present, so the generator never initializes without a credential.

use clap::Parser;

/// Command-line arguments for the outline wizard.
///
/// # Examples
///
/// ```sh
/// # Basic usage, credential from the environment
/// GEMINI_API_KEY=... altavoz_pauta
///
/// # Custom output directory and model
/// altavoz_pauta -o ./mis_pautas --model gemini-2.5-pro
///
/// # With a config file for defaults
/// altavoz_pauta --config ./altavoz.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for generated PDF and JSON files
    #[arg(short, long, default_value = "./pautas")]
    pub output_dir: String,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Gemini model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Override for the generation API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Gemini API credential
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(&[
            "altavoz_pauta",
            "--output-dir",
            "./salida",
            "--api-key",
            "test-key",
        ]);

        assert_eq!(cli.output_dir, "./salida");
        assert_eq!(cli.api_key, "test-key");
        assert!(cli.config.is_none());
        assert!(cli.model.is_none());
    }

    #[test]
    fn test_cli_defaults_and_overrides() {
        let cli = Cli::parse_from(&[
            "altavoz_pauta",
            "--api-key",
            "test-key",
            "--model",
            "gemini-2.5-pro",
            "--base-url",
            "https://proxy.example/v1beta",
        ]);

        assert_eq!(cli.output_dir, "./pautas");
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(cli.base_url.as_deref(), Some("https://proxy.example/v1beta"));
    }

    #[test]
    fn test_missing_credential_is_a_parse_error() {
        // Guard against an ambient key leaking into the test.
        if std::env::var("GEMINI_API_KEY").is_ok() {
            return;
        }
        let result = Cli::try_parse_from(&["altavoz_pauta"]);
        assert!(result.is_err());
    }
}

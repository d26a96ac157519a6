#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::ReferenceLocation;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://selfsolve.apple.com/wcResults.do";
pub const DEFAULT_REFERENCE_LOCATION: &str =
    "https://raw.githubusercontent.com/stefanschmidt/warranty/master/asdcheck";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 600;
pub const DEFAULT_USER_AGENT: &str = concat!("warranty-check/", env!("CARGO_PKG_VERSION"));

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "warranty-check")]
#[command(about = "Look up hardware warranty coverage for one or more serial numbers")]
pub struct CliConfig {
    /// Serial numbers to look up (defaults to this machine's serial)
    pub serials: Vec<String>,

    /// Read serial numbers from a file, one per line
    #[arg(short, long)]
    pub input: Option<String>,

    /// Write CSV results to this file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also print results to the console when writing a file
    #[arg(short, long)]
    pub verbose: bool,

    /// Stop the whole run at the first invalid serial number
    #[arg(long)]
    pub quit_on_error: bool,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the warranty lookup endpoint
    #[arg(long)]
    pub lookup_endpoint: Option<String>,

    /// Override the ASD reference document (URL or local file)
    #[arg(long)]
    pub reference: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Settings for one run after defaults, the TOML file and CLI flags are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub lookup_endpoint: String,
    pub reference_location: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lookup_endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            reference_location: DEFAULT_REFERENCE_LOCATION.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    pub fn apply_toml(&mut self, file: &TomlConfig) {
        if let Some(lookup) = file.lookup_endpoint() {
            self.lookup_endpoint = lookup.to_string();
        }
        if let Some(reference) = file.reference_location() {
            self.reference_location = reference.to_string();
        }
        if let Some(timeout) = file.timeout_seconds() {
            self.timeout_seconds = timeout;
        }
        if let Some(user_agent) = file.user_agent() {
            self.user_agent = user_agent.to_string();
        }
    }

    pub fn apply_overrides(
        &mut self,
        lookup_endpoint: Option<&str>,
        reference_location: Option<&str>,
        timeout_seconds: Option<u64>,
    ) {
        if let Some(lookup) = lookup_endpoint {
            self.lookup_endpoint = lookup.to_string();
        }
        if let Some(reference) = reference_location {
            self.reference_location = reference.to_string();
        }
        if let Some(timeout) = timeout_seconds {
            self.timeout_seconds = timeout;
        }
    }

    pub fn reference(&self) -> ReferenceLocation {
        ReferenceLocation::from_config(self)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_http_url("endpoints.lookup", &self.lookup_endpoint)?;

        match self.reference() {
            ReferenceLocation::Remote(url) => {
                validation::validate_http_url("endpoints.reference", &url)?
            }
            ReferenceLocation::Local(path) if path.trim().is_empty() || path.contains('\0') => {
                return Err(validation::invalid_value(
                    "endpoints.reference",
                    &path,
                    "expected a URL or a readable file path",
                ));
            }
            ReferenceLocation::Local(_) => {}
        }

        validation::validate_range(
            "http.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validation::validate_non_empty_string("http.user_agent", &self.user_agent)?;
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn lookup_endpoint(&self) -> &str {
        &self.lookup_endpoint
    }

    fn reference_location(&self) -> &str {
        &self.reference_location
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges defaults, the optional TOML file and CLI flags, then validates.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            config.apply_toml(&TomlConfig::from_file(path)?);
        }

        config.apply_overrides(
            self.lookup_endpoint.as_deref(),
            self.reference.as_deref(),
            self.timeout,
        );
        config.validate()?;

        tracing::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    /// Verbose console output only matters alongside a file target.
    pub fn print_to_console(&self) -> bool {
        self.output.is_none() || self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::WarrantyError;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(matches!(config.reference(), ReferenceLocation::Remote(_)));
    }

    #[test]
    fn test_toml_then_overrides() {
        let file = TomlConfig::from_toml_str(
            "[endpoints]\nlookup = \"https://file.example.com\"\nreference = \"./asd.txt\"\n[http]\ntimeout_seconds = 12\nuser_agent = \"audit\"\n",
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.apply_toml(&file);
        config.apply_overrides(Some("https://cli.example.com"), None, Some(45));

        assert_eq!(config.lookup_endpoint, "https://cli.example.com");
        assert_eq!(config.reference_location, "./asd.txt");
        assert_eq!(config.timeout_seconds, 45);
        assert_eq!(config.user_agent, "audit");
        assert_eq!(config.reference(), ReferenceLocation::Local("./asd.txt".to_string()));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.lookup_endpoint = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(WarrantyError::InvalidConfigValueError { .. })
        ));

        let mut config = AppConfig::default();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.reference_location = String::new();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.reference_location = "bad\0path".to_string();
        assert!(matches!(
            config.validate(),
            Err(WarrantyError::InvalidConfigValueError { field, .. }) if field == "endpoints.reference"
        ));

        let mut config = AppConfig::default();
        config.reference_location = "https://".to_string();
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags() {
        let cli = CliConfig::parse_from([
            "warranty-check",
            "-i",
            "serials.txt",
            "-o",
            "out.csv",
            "--quit-on-error",
            "--reference",
            "./asd.txt",
            "--timeout",
            "5",
        ]);

        assert_eq!(cli.input.as_deref(), Some("serials.txt"));
        assert_eq!(cli.output.as_deref(), Some("out.csv"));
        assert!(cli.quit_on_error);
        assert!(!cli.print_to_console());

        let config = cli.resolve().unwrap();
        assert_eq!(config.reference_location, "./asd.txt");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.lookup_endpoint, DEFAULT_LOOKUP_ENDPOINT);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_positional_serials_and_console() {
        let cli = CliConfig::parse_from(["warranty-check", "C02AAA", "w80bbb"]);
        assert_eq!(cli.serials, vec!["C02AAA", "w80bbb"]);
        assert!(cli.print_to_console());

        let cli = CliConfig::parse_from(["warranty-check", "-o", "out.csv", "-v", "C02AAA"]);
        assert!(cli.print_to_console());
    }
}

// Adapters layer: concrete implementations for external systems (http, files, the local machine, output).

pub mod file;
pub mod http;
pub mod output;
pub mod system;

use crate::core::{ConfigProvider, ReferenceSource};
use reqwest::Client;

/// Where the ASD reference document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceLocation {
    Remote(String),
    Local(String),
}

impl ReferenceLocation {
    /// `http(s)://` locations are fetched, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ReferenceLocation::Remote(location.to_string())
        } else {
            ReferenceLocation::Local(location.to_string())
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::parse(config.reference_location())
    }

    pub fn into_source(self, client: Client) -> Box<dyn ReferenceSource> {
        match self {
            ReferenceLocation::Remote(url) => Box::new(http::HttpReferenceSource::new(client, url)),
            ReferenceLocation::Local(path) => Box::new(file::FileReferenceSource::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_reference_location_parse() {
        assert_eq!(
            ReferenceLocation::parse("https://example.com/asdcheck"),
            ReferenceLocation::Remote("https://example.com/asdcheck".to_string())
        );
        assert_eq!(
            ReferenceLocation::parse("HTTP://example.com/asdcheck"),
            ReferenceLocation::Remote("HTTP://example.com/asdcheck".to_string())
        );
        assert_eq!(
            ReferenceLocation::parse("./asdcheck.txt"),
            ReferenceLocation::Local("./asdcheck.txt".to_string())
        );
    }

    #[test]
    fn test_reference_location_from_config() {
        let config = AppConfig {
            reference_location: "/srv/asdcheck.txt".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            ReferenceLocation::from_config(&config),
            ReferenceLocation::Local("/srv/asdcheck.txt".to_string())
        );
        assert!(matches!(
            ReferenceLocation::from_config(&AppConfig::default()),
            ReferenceLocation::Remote(_)
        ));
    }
}

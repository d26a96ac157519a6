use crate::utils::error::{Result, WarrantyError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub endpoints: Option<EndpointsConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Vendor warranty lookup page.
    pub lookup: Option<String>,
    /// ASD reference document, URL or local path.
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WarrantyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WarrantyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ASD_REFERENCE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| WarrantyError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn lookup_endpoint(&self) -> Option<&str> {
        self.endpoints.as_ref()?.lookup.as_deref()
    }

    pub fn reference_location(&self) -> Option<&str> {
        self.endpoints.as_ref()?.reference.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.http.as_ref()?.timeout_seconds
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.http.as_ref()?.user_agent.as_deref()
    }
}

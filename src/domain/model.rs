use crate::utils::error::{Result, WarrantyError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Manufacturer serial used as the lookup key. Compared case-insensitively.
#[derive(Debug, Clone, Serialize)]
pub struct SerialNumber(String);

impl SerialNumber {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(WarrantyError::ValidationError {
                message: "serial number cannot be empty".to_string(),
            });
        }
        Ok(Self(raw))
    }

    /// The serial as it was supplied; this is what goes on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercased form used in reports.
    pub fn normalized(&self) -> String {
        self.0.to_uppercase()
    }
}

impl PartialEq for SerialNumber {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for SerialNumber {}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expiration {
    Date(NaiveDate),
    Expired,
    Unknown,
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiration::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Expiration::Expired => f.write_str("Expired"),
            Expiration::Unknown => Ok(()),
        }
    }
}

/// Fields scraped from a single lookup page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub invalid_serial: bool,
    pub model: String,
    pub expires: Expiration,
    pub status: String,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            invalid_serial: false,
            model: String::new(),
            expires: Expiration::Unknown,
            status: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantyRecord {
    pub serial: String,
    pub model: String,
    pub expires: Expiration,
    pub status: String,
    pub asd_version: String,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub records: Vec<WarrantyRecord>,
    pub invalid: Vec<SerialNumber>,
    /// Set when the run stopped at an invalid serial with quit-on-error.
    pub aborted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_rejects_blank() {
        assert!(SerialNumber::new("").is_err());
        assert!(SerialNumber::new("   ").is_err());
        assert!(SerialNumber::new("w80123abc").is_ok());
    }

    #[test]
    fn test_serial_serializes_as_plain_string() {
        let serial = SerialNumber::new("c02abc").unwrap();
        assert_eq!(serde_json::to_string(&serial).unwrap(), "\"c02abc\"");
    }

    #[test]
    fn test_serial_case_insensitive() {
        let lower = SerialNumber::new("c02abc").unwrap();
        let upper = SerialNumber::new("C02ABC").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.normalized(), "C02ABC");
        assert_eq!(lower.as_str(), "c02abc");
    }

    #[test]
    fn test_expiration_display() {
        let date = NaiveDate::from_ymd_opt(2014, 3, 11).unwrap();
        assert_eq!(Expiration::Date(date).to_string(), "2014-03-11");
        assert_eq!(Expiration::Expired.to_string(), "Expired");
        assert_eq!(Expiration::Unknown.to_string(), "");
    }
}

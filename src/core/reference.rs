use crate::domain::ports::ReferenceSource;
use crate::utils::error::{Result, WarrantyError};

pub const UNDETERMINED: &str = "Undetermined";

/// Partial model name → ASD version, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMap {
    entries: Vec<(String, String)>,
}

impl ReferenceMap {
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Accepts either a JSON object or `MODEL: VERSION` lines.
    pub fn parse(document: &str) -> Result<Self> {
        let trimmed = document.trim_start_matches('\u{feff}').trim();
        let map = if trimmed.starts_with('{') {
            Self::parse_json(trimmed)?
        } else {
            Self::parse_lines(trimmed)?
        };

        if map.is_empty() {
            return Err(WarrantyError::ReferenceDataError {
                message: "reference document contains no entries".to_string(),
            });
        }
        Ok(map)
    }

    fn parse_json(document: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(document)?;
        let mut entries = Vec::with_capacity(object.len());
        for (key, value) in object {
            let version = value
                .as_str()
                .ok_or_else(|| WarrantyError::ReferenceDataError {
                    message: format!("version for '{}' is not a string", key),
                })?;
            entries.push((key, version.to_string()));
        }
        Ok(Self { entries })
    }

    fn parse_lines(document: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (index, line) in document.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = || WarrantyError::ReferenceDataError {
                message: format!("line {} is not 'MODEL: VERSION': {:?}", index + 1, line),
            };
            let (model, version) = line.split_once(':').ok_or_else(malformed)?;
            let (model, version) = (model.trim(), version.trim());
            if model.is_empty() || version.is_empty() {
                return Err(malformed());
            }
            entries.push((model.to_string(), version.to_string()));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the ASD version whose key occurs in `model`, ignoring case.
    ///
    /// When several keys match, the longest key wins and equal lengths fall
    /// back to document order.
    pub fn asd_version_for(&self, model: &str) -> Option<&str> {
        let model = model.to_lowercase();
        let mut best: Option<&(String, String)> = None;

        for entry in &self.entries {
            if entry.0.is_empty() || !model.contains(&entry.0.to_lowercase()) {
                continue;
            }
            if best.map_or(true, |current| entry.0.len() > current.0.len()) {
                best = Some(entry);
            }
        }

        best.map(|(_, version)| version.as_str())
    }

    pub fn asd_version_or_default(&self, model: &str) -> String {
        self.asd_version_for(model).unwrap_or(UNDETERMINED).to_string()
    }
}

pub async fn load_reference_map(source: &dyn ReferenceSource) -> Result<ReferenceMap> {
    let document = source.fetch_reference_document().await?;
    let map = ReferenceMap::parse(&document)?;
    tracing::debug!("Loaded {} ASD reference entries", map.len());
    Ok(map)
}

use crate::domain::model::SerialNumber;
use crate::utils::error::{Result, WarrantyError};
use std::path::Path;

/// Where the serials of a run come from, in order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialInput<'a> {
    File(&'a Path),
    Arguments(&'a [String]),
    LocalMachine,
}

impl<'a> SerialInput<'a> {
    pub fn select(input_file: Option<&'a Path>, arguments: &'a [String]) -> Self {
        match input_file {
            Some(path) => SerialInput::File(path),
            None if !arguments.is_empty() => SerialInput::Arguments(arguments),
            None => SerialInput::LocalMachine,
        }
    }
}

/// Resolves the serial list; `local_serial` is only called for
/// [`SerialInput::LocalMachine`].
pub fn collect_serials<F>(input: SerialInput<'_>, local_serial: F) -> Result<Vec<SerialNumber>>
where
    F: FnOnce() -> Result<SerialNumber>,
{
    let serials = match input {
        SerialInput::File(path) => {
            tracing::debug!("Reading serial numbers from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let serials = parse_serial_lines(&content)?;
            if serials.is_empty() {
                return Err(WarrantyError::NoSerialError {
                    reason: format!("{} contains no serial numbers", path.display()),
                });
            }
            serials
        }
        SerialInput::Arguments(arguments) => arguments
            .iter()
            .map(|raw| SerialNumber::new(raw.as_str()))
            .collect::<Result<Vec<_>>>()?,
        SerialInput::LocalMachine => {
            tracing::debug!("No serial numbers given, querying the local machine");
            vec![local_serial()?]
        }
    };

    tracing::info!("Collected {} serial number(s)", serials.len());
    Ok(serials)
}

pub fn parse_serial_lines(content: &str) -> Result<Vec<SerialNumber>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(SerialNumber::new)
        .collect()
}

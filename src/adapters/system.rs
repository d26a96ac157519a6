//! Hardware serial of the machine the tool runs on.
//!
//! - macOS: `ioreg -c IOPlatformExpertDevice -d 2`
//! - Linux: `/sys/class/dmi/id/product_serial` (usually root-only)
//! - Windows: `wmic bios get serialnumber`

use crate::domain::model::SerialNumber;
use crate::utils::error::{Result, WarrantyError};
#[cfg(any(target_os = "macos", target_os = "windows"))]
use std::process::Command;

#[cfg(target_os = "linux")]
const DMI_SERIAL_PATH: &str = "/sys/class/dmi/id/product_serial";

pub fn local_serial_number() -> Result<SerialNumber> {
    let raw = query_platform_serial()?;
    tracing::debug!("Local hardware serial: {}", raw);
    SerialNumber::new(raw).map_err(|_| WarrantyError::NoSerialError {
        reason: "the local machine reported an empty serial number".to_string(),
    })
}

#[cfg(target_os = "macos")]
fn query_platform_serial() -> Result<String> {
    let output = Command::new("ioreg")
        .args(["-c", "IOPlatformExpertDevice", "-d", "2"])
        .output()
        .map_err(|e| no_serial(format!("failed to run ioreg: {}", e)))?;

    if !output.status.success() {
        return Err(no_serial(format!("ioreg exited with {}", output.status)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_ioreg_output(&stdout).ok_or_else(|| no_serial("IOPlatformSerialNumber not found".to_string()))
}

#[cfg(target_os = "linux")]
fn query_platform_serial() -> Result<String> {
    let content = std::fs::read_to_string(DMI_SERIAL_PATH)
        .map_err(|e| no_serial(format!("cannot read {}: {}", DMI_SERIAL_PATH, e)))?;
    Ok(content.trim().to_string())
}

#[cfg(target_os = "windows")]
fn query_platform_serial() -> Result<String> {
    let output = Command::new("wmic")
        .args(["bios", "get", "serialnumber"])
        .output()
        .map_err(|e| no_serial(format!("failed to run wmic: {}", e)))?;

    if !output.status.success() {
        return Err(no_serial(format!("wmic exited with {}", output.status)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_wmic_output(&stdout).ok_or_else(|| no_serial("wmic returned no serial number".to_string()))
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn query_platform_serial() -> Result<String> {
    Err(no_serial(format!(
        "reading the hardware serial is not supported on {}",
        std::env::consts::OS
    )))
}

fn no_serial(reason: String) -> WarrantyError {
    WarrantyError::NoSerialError { reason }
}

/// Pulls the value of `"IOPlatformSerialNumber" = "..."` out of ioreg output.
pub fn parse_ioreg_output(output: &str) -> Option<String> {
    output
        .lines()
        .filter(|line| line.contains("\"IOPlatformSerialNumber\""))
        .find_map(|line| {
            let (_, value) = line.split_once('=')?;
            let value = value.trim().trim_matches('"').trim();
            (!value.is_empty()).then(|| value.to_string())
        })
}

/// wmic prints a `SerialNumber` header followed by the value.
pub fn parse_wmic_output(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .nth(1)
        .map(str::to_string)
}

//! Field extraction from the vendor lookup page.
//!
//! The page is HTML with the interesting values embedded in inline JavaScript
//! calls. There is no stable schema, so every field is located by a marker
//! substring on a single line and cut out with fixed delimiters. A field whose
//! marker is missing simply comes back empty.

use crate::domain::model::{Expiration, PageInfo};
use chrono::{NaiveDate, NaiveDateTime};

pub const INVALID_SERIAL_PHRASE: &str = "serial number is not valid";
pub const NOT_ELIGIBLE_PHRASE: &str = "is not eligible";

const MODEL_TAG_PREFIXES: [&str; 2] = ["OBS,", "~VIN,"];

const DATE_FORMATS: [&str; 4] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// The whole marker line.
    Line,
    /// The n-th piece of the line split on `'` (0-based).
    QuotedToken(usize),
    /// Text after `start`, up to `end` or the end of the line.
    Between {
        start: &'static str,
        end: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpec {
    pub line_marker: &'static str,
    pub extraction: Extraction,
}

pub const PRODUCT_INFO: MarkerSpec = MarkerSpec {
    line_marker: "warrantyPage.warrantycheck.displayProductInfo",
    extraction: Extraction::QuotedToken(3),
};

pub const ELIGIBILITY_INFO: MarkerSpec = MarkerSpec {
    line_marker: "warrantyPage.warrantycheck.displayEligibilityInfo",
    extraction: Extraction::Line,
};

pub const COVERAGE_DATE: MarkerSpec = MarkerSpec {
    line_marker: "warrantyPage.warrantycheck.displayHWSupportInfo",
    extraction: Extraction::Between {
        start: "Date: ",
        end: "<br/",
    },
};

pub const COVERAGE_STATUS: MarkerSpec = MarkerSpec {
    line_marker: "warrantyPage.warrantycheck.displayHWSupportInfo",
    extraction: Extraction::Between {
        start: "Coverage: ",
        end: "',",
    },
};

/// Returns the first value `spec` yields from any line of `body`.
pub fn extract_field(body: &str, spec: &MarkerSpec) -> Option<String> {
    body.lines()
        .filter(|line| line.contains(spec.line_marker))
        .find_map(|line| extract_from_line(line, spec.extraction))
}

fn extract_from_line(line: &str, extraction: Extraction) -> Option<String> {
    match extraction {
        Extraction::Line => Some(line.to_string()),
        Extraction::QuotedToken(index) => line.split('\'').nth(index).map(str::to_string),
        Extraction::Between { start, end } => {
            let (_, rest) = line.split_once(start)?;
            let value = rest.split_once(end).map_or(rest, |(value, _)| value);
            Some(value.to_string())
        }
    }
}

pub fn strip_model_tags(model: &str) -> String {
    let mut model = model.trim();
    while let Some(rest) = MODEL_TAG_PREFIXES
        .iter()
        .find_map(|prefix| model.strip_prefix(prefix))
    {
        model = rest.trim_start();
    }
    model.to_string()
}

/// Parses a coverage date, dropping any time of day.
pub fn parse_coverage_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
}

pub fn is_invalid_serial_page(body: &str) -> bool {
    body.contains(INVALID_SERIAL_PHRASE)
}

/// Any eligibility line carrying the refusal phrase marks the unit ineligible,
/// not just the first line mentioning the marker.
pub fn is_eligible(body: &str) -> bool {
    !body
        .lines()
        .filter(|line| line.contains(ELIGIBILITY_INFO.line_marker))
        .filter_map(|line| extract_from_line(line, ELIGIBILITY_INFO.extraction))
        .any(|value| value.contains(NOT_ELIGIBLE_PHRASE))
}

pub fn parse_lookup_page(body: &str) -> PageInfo {
    let mut info = PageInfo {
        invalid_serial: is_invalid_serial_page(body),
        ..PageInfo::default()
    };

    if let Some(model) = extract_field(body, &PRODUCT_INFO) {
        info.model = strip_model_tags(&model);
    }

    if is_eligible(body) {
        if let Some(date) = extract_field(body, &COVERAGE_DATE) {
            match parse_coverage_date(&date) {
                Some(date) => info.expires = Expiration::Date(date),
                None => tracing::debug!("Unrecognised coverage date: {:?}", date),
            }
        }
        if let Some(status) = extract_field(body, &COVERAGE_STATUS) {
            info.status = status.trim().to_string();
        }
    } else {
        info.expires = Expiration::Expired;
        info.status = "Inactive".to_string();
    }

    info
}

use crate::adapters::output::{ConsoleSink, CsvFileSink};
use crate::config::CliConfig;
use crate::core::RecordSink;
use crate::utils::error::Result;
use std::path::Path;

/// Opens the sinks the CLI flags ask for: CSV when `-o` is given, the
/// console when there is no file or `-v` is set.
///
/// The CSV file is created (and its header written) here, before any lookup.
pub fn build_sinks(config: &CliConfig) -> Result<Vec<Box<dyn RecordSink>>> {
    let mut sinks: Vec<Box<dyn RecordSink>> = Vec::new();

    if let Some(output) = &config.output {
        sinks.push(Box::new(CsvFileSink::create(Path::new(output))?));
    }
    if config.print_to_console() {
        sinks.push(Box::new(ConsoleSink::stdout()));
    }

    Ok(sinks)
}

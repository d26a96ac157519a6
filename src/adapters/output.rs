use crate::core::{RecordSink, WarrantyRecord};
use crate::utils::error::Result;
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

pub const CSV_HEADER: &str = "Serial Number,Product Description,Expires,Status,ASD Version";

/// `SERIAL,"MODEL",DATE,STATUS,ASD_VERSION`, model always quoted.
pub fn csv_row(record: &WarrantyRecord) -> String {
    format!(
        "{},\"{}\",{},{},{}",
        record.serial,
        record.model.replace('"', "\"\""),
        record.expires,
        record.status,
        record.asd_version
    )
}

pub fn console_block(record: &WarrantyRecord) -> String {
    format!(
        "Serial Number: {}\nProduct Description: {}\nExpires: {}\nStatus: {}\nASD Version: {}\n",
        record.serial, record.model, record.expires, record.status, record.asd_version
    )
}

/// Appends CSV rows to a writer; the header goes out on construction.
pub struct CsvFileSink<W: Write> {
    writer: W,
    rows: usize,
}

impl CsvFileSink<BufWriter<File>> {
    /// Creates or truncates `path`.
    pub fn create(path: &Path) -> Result<Self> {
        tracing::debug!("Writing CSV results to {}", path.display());
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvFileSink<W> {
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{}", CSV_HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for CsvFileSink<W> {
    fn write_record(&mut self, record: &WarrantyRecord) -> Result<()> {
        writeln!(self.writer, "{}", csv_row(record))?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        tracing::debug!("Wrote {} CSV row(s)", self.rows);
        Ok(())
    }
}

/// Five labelled lines per record followed by a blank line.
pub struct ConsoleSink<W: Write> {
    writer: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for ConsoleSink<W> {
    fn write_record(&mut self, record: &WarrantyRecord) -> Result<()> {
        writeln!(self.writer, "{}", console_block(record))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

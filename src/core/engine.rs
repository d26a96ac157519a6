use crate::core::page::parse_lookup_page;
use crate::core::reference::ReferenceMap;
use crate::domain::model::{RunReport, SerialNumber, WarrantyRecord};
use crate::domain::ports::{RecordSink, WarrantySource};
use crate::utils::error::Result;

/// Outcome of looking up one serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Record(WarrantyRecord),
    /// Rejected by the lookup page, kept because the run is graceful.
    InvalidRecord(WarrantyRecord),
    /// Rejected by the lookup page and the run is not graceful.
    Abort,
}

pub struct WarrantyEngine<W: WarrantySource> {
    source: W,
    reference: ReferenceMap,
    graceful: bool,
}

impl<W: WarrantySource> WarrantyEngine<W> {
    pub fn new(source: W, reference: ReferenceMap, graceful: bool) -> Self {
        Self {
            source,
            reference,
            graceful,
        }
    }

    pub async fn lookup(&self, serial: &SerialNumber) -> Result<LookupOutcome> {
        tracing::debug!("Looking up warranty for {}", serial);
        let body = self.source.fetch_lookup_page(serial).await?;
        let info = parse_lookup_page(&body);

        if info.invalid_serial {
            eprintln!("ERROR: Invalid serial number: {}", serial);
            tracing::warn!("Lookup page rejected serial {}", serial);
            if !self.graceful {
                return Ok(LookupOutcome::Abort);
            }
        }

        let asd_version = self.reference.asd_version_or_default(&info.model);
        let record = WarrantyRecord {
            serial: serial.normalized(),
            model: info.model,
            expires: info.expires,
            status: info.status,
            asd_version,
        };

        Ok(if info.invalid_serial {
            LookupOutcome::InvalidRecord(record)
        } else {
            LookupOutcome::Record(record)
        })
    }

    /// Looks up every serial in order and hands each record to all sinks.
    ///
    /// Stops early, with `aborted` set, at the first invalid serial when the
    /// engine is not graceful. Sinks are finished either way.
    pub async fn run(
        &self,
        serials: &[SerialNumber],
        sinks: &mut [Box<dyn RecordSink>],
    ) -> Result<RunReport> {
        let mut report = RunReport::default();

        for serial in serials {
            let record = match self.lookup(serial).await? {
                LookupOutcome::Record(record) => record,
                LookupOutcome::InvalidRecord(record) => {
                    report.invalid.push(serial.clone());
                    record
                }
                LookupOutcome::Abort => {
                    report.invalid.push(serial.clone());
                    report.aborted = true;
                    break;
                }
            };

            for sink in sinks.iter_mut() {
                sink.write_record(&record)?;
            }
            report.records.push(record);
        }

        for sink in sinks.iter_mut() {
            sink.finish()?;
        }

        tracing::info!(
            "Processed {} of {} serial number(s), {} invalid",
            report.records.len(),
            serials.len(),
            report.invalid.len()
        );
        Ok(report)
    }
}

use crate::domain::model::{SerialNumber, WarrantyRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn lookup_endpoint(&self) -> &str;
    fn reference_location(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
}

/// Fetches the raw lookup page for one serial.
#[async_trait]
pub trait WarrantySource: Send + Sync {
    async fn fetch_lookup_page(&self, serial: &SerialNumber) -> Result<String>;
}

/// Fetches the raw model → ASD version document.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch_reference_document(&self) -> Result<String>;
}

pub trait RecordSink {
    fn write_record(&mut self, record: &WarrantyRecord) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

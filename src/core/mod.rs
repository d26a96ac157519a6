pub mod engine;
pub mod input;
pub mod page;
pub mod reference;

pub use crate::domain::model::{Expiration, PageInfo, RunReport, SerialNumber, WarrantyRecord};
pub use crate::domain::ports::{ConfigProvider, RecordSink, ReferenceSource, WarrantySource};
pub use crate::utils::error::Result;

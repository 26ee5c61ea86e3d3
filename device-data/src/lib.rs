pub mod domain;
pub mod table;

pub use domain::DeviceRecord;
pub use table::{DeviceDataTable, Metadata, TableError};

//! Flat-file storage adapters
//!
//! Delimited-text readers and writers implementing the ETL seams.

mod csv_file;

pub use csv_file::{CsvReader, CsvWriter, DELIMITER};

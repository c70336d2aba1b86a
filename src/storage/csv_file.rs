//! Delimited text file operations
//!
//! The purchases file is semicolon-delimited UTF-8 with a header row. The
//! writer emits the same layout back: same column set, no index column.

use crate::dataset::{Dataset, Record, Schema};
use crate::error::{Error, Result};
use crate::etl::{Extractor, Loader};
use std::path::{Path, PathBuf};

/// Field separator of the purchases file.
pub const DELIMITER: u8 = b';';

/// Read a delimited text file into a [`Dataset`].
pub struct CsvReader {
    path: PathBuf,
    schema: Option<Schema>,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            schema: None,
        }
    }

    /// Validate presence and numeric parseability right after parsing, so
    /// malformed input is reported from the extract phase.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Parse the file into a dataset.
    pub fn read(&self) -> Result<Dataset> {
        if !self.path.exists() {
            return Err(Error::InputNotFound {
                path: self.path.clone(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .flexible(false)
            .from_path(&self.path)
            .map_err(|e| Error::InputMalformed(format!("{}: {e}", self.path.display())))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::InputMalformed(format!("unreadable header row: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result
                .map_err(|e| Error::InputMalformed(format!("row {}: {e}", i + 1)))?;
            rows.push(Record::new(record.iter().map(str::to_string).collect()));
        }

        let dataset = Dataset::new(headers, rows)?;
        if let Some(schema) = &self.schema {
            schema.validate(&dataset)?;
        }

        let (row_count, col_count) = dataset.shape();
        log::info!(
            "Read {}: shape ({}, {})",
            self.path.display(),
            row_count,
            col_count
        );

        Ok(dataset)
    }
}

impl Extractor for CsvReader {
    type Item = Dataset;

    fn extract(&self) -> Result<Self::Item> {
        self.read()
    }
}

/// Write a [`Dataset`] back to delimited text.
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Serialize the dataset. Returns the number of records written.
    pub fn write(&self, dataset: &Dataset) -> Result<usize> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_path(&self.path)
            .map_err(|e| self.write_failed(e))?;

        writer
            .write_record(dataset.headers())
            .map_err(|e| self.write_failed(e))?;
        for row in dataset.rows() {
            writer
                .write_record(row.fields())
                .map_err(|e| self.write_failed(e))?;
        }
        writer.flush().map_err(|e| Error::WriteFailed {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(dataset.rows().len())
    }

    fn write_failed(&self, e: csv::Error) -> Error {
        Error::WriteFailed {
            path: self.path.clone(),
            source: std::io::Error::other(e),
        }
    }
}

impl Loader for CsvWriter {
    type Item = Dataset;

    fn load(&self, item: Self::Item) -> Result<usize> {
        self.write(&item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::columns;
    use tempfile::NamedTempFile;

    fn sample() -> Dataset {
        Dataset::new(
            vec!["UF".into(), "Nome do cliente".into()],
            vec![
                Record::from(vec!["RJ", "Maria"]),
                Record::from(vec!["CE", "João"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_write_then_read() {
        let temp = NamedTempFile::new().unwrap();
        let writer = CsvWriter::new(temp.path());
        let written = writer.write(&sample()).unwrap();
        assert_eq!(written, 2);

        let reader = CsvReader::new(temp.path());
        let read_back = reader.read().unwrap();
        assert_eq!(read_back, sample());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let reader = CsvReader::new("definitely/not/here.csv");
        let err = reader.read().unwrap_err();
        assert!(matches!(err, Error::InputNotFound { .. }));
    }

    #[test]
    fn test_schema_enforced_at_extract() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "UF;Município\nRJ;Rio de Janeiro\n").unwrap();

        let schema = Schema::new(vec![columns::TOTAL_PAID], vec![]);
        let reader = CsvReader::new(temp.path()).with_schema(schema);
        let err = reader.read().unwrap_err();
        assert!(matches!(err, Error::InputMalformed(_)));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "a;b\n1;2\n").unwrap();

        let dataset = CsvReader::new(temp.path()).read().unwrap();
        assert_eq!(dataset.headers(), &["a".to_string(), "b".to_string()]);
        assert_eq!(dataset.value(0, "b"), Some("2"));
    }

    #[test]
    fn test_utf8_content_roundtrip() {
        let temp = NamedTempFile::new().unwrap();
        let dataset = Dataset::new(
            vec!["Município".into()],
            vec![Record::from(vec!["São Paulo"])],
        )
        .unwrap();

        CsvWriter::new(temp.path()).write(&dataset).unwrap();
        let read_back = CsvReader::new(temp.path()).read().unwrap();
        assert_eq!(read_back.value(0, "Município"), Some("São Paulo"));
    }
}

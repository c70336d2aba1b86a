//! Tabular data model for the cleaning pipeline
//!
//! A [`Dataset`] is an ordered set of [`Record`]s sharing one header row. It
//! is the single item flowing through the ETL seams: extracted from a
//! delimited file, rewritten in place by each cleaning rule, and serialized
//! back out.

use crate::error::{Error, Result};

/// Column names of the customer purchases dataset.
pub mod columns {
    pub const LOCALITY_CODE: &str = "UF";
    pub const LOCALITY_NAME: &str = "Município";
    pub const UNIT_PRICE: &str = "Preço unitário";
    pub const QUANTITY: &str = "Quantidade comprada";
    pub const DELIVERY_FEE: &str = "Taxa de entrega";
    pub const TOTAL_PAID: &str = "Valor total pago";
    pub const CUSTOMER_ID: &str = "CPF do cliente";
    pub const CUSTOMER_NAME: &str = "Nome do cliente";
}

/// One row of the dataset. Field order matches the header row of the owning
/// [`Dataset`].
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn set(&mut self, index: usize, value: String) {
        if index < self.fields.len() {
            self.fields[index] = value;
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl From<Vec<&str>> for Record {
    fn from(fields: Vec<&str>) -> Self {
        Self::new(fields.into_iter().map(str::to_string).collect())
    }
}

/// Ordered sequence of records sharing one schema.
///
/// Cleaning rules mutate the dataset wholesale: each rule sees the complete
/// output of the previous rule and never a partially transformed set.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from a header row and records.
    ///
    /// # Errors
    /// Returns [`Error::InputMalformed`] if any record's width differs from
    /// the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Record>) -> Result<Self> {
        let width = headers.len();
        for (i, row) in rows.iter().enumerate() {
            if row.fields.len() != width {
                return Err(Error::InputMalformed(format!(
                    "row {} has {} fields, expected {}",
                    i + 1,
                    row.fields.len(),
                    width
                )));
            }
        }
        Ok(Self { headers, rows })
    }

    /// Shape as (rows, columns), matching the diagnostic the pipeline logs
    /// after each phase.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Value of a named column in one row, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// Rewrite one column across all rows. Returning `None` from the closure
    /// leaves that row's cell unchanged.
    pub fn update_column<F>(&mut self, column: &str, mut f: F)
    where
        F: FnMut(&Record, &str) -> Option<String>,
    {
        let Some(index) = self.column_index(column) else {
            return;
        };
        for row in &mut self.rows {
            let current = row.get(index).unwrap_or_default().to_string();
            if let Some(updated) = f(row, &current) {
                row.set(index, updated);
            }
        }
    }

    /// Keep only rows whose named column matches the predicate. Returns the
    /// retained row count.
    pub fn retain_rows<F>(&mut self, column: &str, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        if let Some(index) = self.column_index(column) {
            self.rows.retain(|row| keep(row.get(index).unwrap_or("")));
        }
        self.rows.len()
    }

    /// Headers joined into the single-string form attached to provenance
    /// entities (list values must be stringified before attachment).
    pub fn columns_string(&self) -> String {
        format!("['{}']", self.headers.join("', '"))
    }
}

/// Parse a currency/quantity cell. Empty cells are not numbers.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Presence and parseability checks applied right after extraction.
///
/// Missing required columns and unparseable numeric cells are reported as
/// [`Error::InputMalformed`] here, so the cleaning rules downstream can stay
/// total.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    required: Vec<String>,
    numeric: Vec<String>,
}

impl Schema {
    pub fn new(required: Vec<&str>, numeric: Vec<&str>) -> Self {
        Self {
            required: required.into_iter().map(str::to_string).collect(),
            numeric: numeric.into_iter().map(str::to_string).collect(),
        }
    }

    /// Schema of the customer purchases file.
    pub fn purchases() -> Self {
        Self::new(
            vec![
                columns::LOCALITY_CODE,
                columns::LOCALITY_NAME,
                columns::UNIT_PRICE,
                columns::QUANTITY,
                columns::DELIVERY_FEE,
                columns::TOTAL_PAID,
                columns::CUSTOMER_ID,
                columns::CUSTOMER_NAME,
            ],
            vec![
                columns::UNIT_PRICE,
                columns::QUANTITY,
                columns::DELIVERY_FEE,
            ],
        )
    }

    /// # Errors
    /// Returns [`Error::InputMalformed`] naming the first missing column or
    /// unparseable numeric cell.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        for column in &self.required {
            if dataset.column_index(column).is_none() {
                return Err(Error::InputMalformed(format!(
                    "missing required column '{column}'"
                )));
            }
        }

        for column in &self.numeric {
            let Some(index) = dataset.column_index(column) else {
                return Err(Error::InputMalformed(format!(
                    "missing required column '{column}'"
                )));
            };
            for (i, row) in dataset.rows().iter().enumerate() {
                let cell = row.get(index).unwrap_or("");
                if parse_number(cell).is_none() {
                    return Err(Error::InputMalformed(format!(
                        "row {}: unparseable value '{}' in numeric column '{}'",
                        i + 1,
                        cell,
                        column
                    )));
                }
            }
        }

        Ok(())
    }
}

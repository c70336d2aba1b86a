//! Required-field row filter

use crate::dataset::{Dataset, columns};
use crate::error::Result;
use crate::etl::Transformer;

/// Transformer that drops records whose named column is absent or empty.
///
/// The resulting shape is logged, matching the diagnostic the pipeline
/// reports after each filtering step.
///
/// # Example
/// ```
/// use dataprov::dataset::{Dataset, Record};
/// use dataprov::etl::Transformer;
/// use dataprov::transform::RequiredFieldFilter;
///
/// let dataset = Dataset::new(
///     vec!["CPF do cliente".into()],
///     vec![Record::from(vec!["111.222.333-44"]), Record::from(vec![""])],
/// ).unwrap();
///
/// let output = RequiredFieldFilter::customer_id().transform(dataset).unwrap();
/// assert_eq!(output.shape().0, 1);
/// ```
pub struct RequiredFieldFilter {
    column: String,
}

impl RequiredFieldFilter {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Filter on the customer-identifier column.
    pub fn customer_id() -> Self {
        Self::new(columns::CUSTOMER_ID)
    }

    /// Filter on the customer-name column.
    pub fn customer_name() -> Self {
        Self::new(columns::CUSTOMER_NAME)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Rule in its stringified form for the provenance rules entity.
    pub fn rule_string(&self) -> String {
        format!("{} not empty", self.column)
    }
}

impl Transformer for RequiredFieldFilter {
    type Input = Dataset;
    type Output = Dataset;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        log::debug!("Removing records with empty '{}'...", self.column);
        input.retain_rows(&self.column, |value| !value.trim().is_empty());
        let (rows, cols) = input.shape();
        log::info!("Shape after '{}' filter: ({}, {})", self.column, rows, cols);
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    #[test]
    fn test_drops_empty_and_whitespace() {
        let dataset = Dataset::new(
            vec!["Nome do cliente".into()],
            vec![
                Record::from(vec!["Maria"]),
                Record::from(vec![""]),
                Record::from(vec!["   "]),
            ],
        )
        .unwrap();

        let output = RequiredFieldFilter::customer_name()
            .transform(dataset)
            .unwrap();
        assert_eq!(output.shape().0, 1);
        assert_eq!(output.value(0, "Nome do cliente"), Some("Maria"));
    }

    #[test]
    fn test_missing_column_keeps_rows() {
        let dataset = Dataset::new(
            vec!["other".into()],
            vec![Record::from(vec!["x"]), Record::from(vec!["y"])],
        )
        .unwrap();

        let output = RequiredFieldFilter::customer_id()
            .transform(dataset)
            .unwrap();
        assert_eq!(output.shape().0, 2);
    }

    #[test]
    fn test_rule_string() {
        assert_eq!(
            RequiredFieldFilter::customer_id().rule_string(),
            "CPF do cliente not empty"
        );
    }
}

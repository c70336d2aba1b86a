//! Locality-code correction transformer
//!
//! Rewrites the locality-code column from an exact-match lookup on the
//! locality name, keeping the existing code when the name is unrecognized.

use crate::dataset::{Dataset, columns};
use crate::error::Result;
use crate::etl::Transformer;
use std::collections::HashMap;

/// Transformer that corrects the `UF` column from the `Município` column.
///
/// # Example
/// ```
/// use dataprov::dataset::{Dataset, Record};
/// use dataprov::etl::Transformer;
/// use dataprov::transform::LocalityCodeFixer;
///
/// let dataset = Dataset::new(
///     vec!["UF".into(), "Município".into()],
///     vec![Record::from(vec!["XX", "Fortaleza"])],
/// ).unwrap();
///
/// let fixed = LocalityCodeFixer::default_corrections().transform(dataset).unwrap();
/// assert_eq!(fixed.value(0, "UF"), Some("CE"));
/// ```
pub struct LocalityCodeFixer {
    corrections: HashMap<String, String>,
    name_column: String,
    code_column: String,
}

impl LocalityCodeFixer {
    pub fn new(corrections: HashMap<String, String>) -> Self {
        Self {
            corrections,
            name_column: columns::LOCALITY_NAME.to_string(),
            code_column: columns::LOCALITY_CODE.to_string(),
        }
    }

    /// Lookup table used by the cleaning run: Rio de Janeiro → RJ,
    /// Fortaleza → CE.
    pub fn default_corrections() -> Self {
        let mut corrections = HashMap::new();
        corrections.insert("Rio de Janeiro".to_string(), "RJ".to_string());
        corrections.insert("Fortaleza".to_string(), "CE".to_string());
        Self::new(corrections)
    }

    /// The table in its stringified form for the provenance rules entity.
    pub fn corrections_string(&self) -> String {
        let mut pairs: Vec<_> = self
            .corrections
            .iter()
            .map(|(k, v)| format!("'{k}': '{v}'"))
            .collect();
        pairs.sort();
        format!("{{{}}}", pairs.join(", "))
    }
}

impl Transformer for LocalityCodeFixer {
    type Input = Dataset;
    type Output = Dataset;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        log::debug!(
            "Correcting '{}' from '{}'...",
            self.code_column,
            self.name_column
        );
        let Some(name_index) = input.column_index(&self.name_column) else {
            return Ok(input);
        };
        let corrections = &self.corrections;
        input.update_column(&self.code_column, |row, _current| {
            let name = row.get(name_index).unwrap_or("");
            corrections.get(name).cloned()
        });
        Ok(input)
    }
}

//! Total-paid recomputation transformer

use crate::dataset::{Dataset, columns, parse_number};
use crate::error::{Error, Result};
use crate::etl::Transformer;

/// Transformer that overwrites the total-paid column with
/// `unit price × quantity + delivery fee`.
///
/// The schema check at extraction guarantees the three source columns parse
/// as numbers, so this rule never fails on validated input. Totals are
/// written with two decimals, the currency form the output file carries.
///
/// # Example
/// ```
/// use dataprov::dataset::{Dataset, Record};
/// use dataprov::etl::Transformer;
/// use dataprov::transform::TotalRecalculator;
///
/// let dataset = Dataset::new(
///     vec![
///         "Preço unitário".into(),
///         "Quantidade comprada".into(),
///         "Taxa de entrega".into(),
///         "Valor total pago".into(),
///     ],
///     vec![Record::from(vec!["10.00", "3", "2.50", "999.99"])],
/// ).unwrap();
///
/// let output = TotalRecalculator::new().transform(dataset).unwrap();
/// assert_eq!(output.value(0, "Valor total pago"), Some("32.50"));
/// ```
pub struct TotalRecalculator {
    price_column: String,
    quantity_column: String,
    fee_column: String,
    total_column: String,
}

impl Default for TotalRecalculator {
    fn default() -> Self {
        Self {
            price_column: columns::UNIT_PRICE.to_string(),
            quantity_column: columns::QUANTITY.to_string(),
            fee_column: columns::DELIVERY_FEE.to_string(),
            total_column: columns::TOTAL_PAID.to_string(),
        }
    }
}

impl TotalRecalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formula in its stringified form for the provenance rules entity.
    pub fn formula_string(&self) -> String {
        format!(
            "{} = {} * {} + {}",
            self.total_column, self.price_column, self.quantity_column, self.fee_column
        )
    }
}

impl Transformer for TotalRecalculator {
    type Input = Dataset;
    type Output = Dataset;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        log::debug!("Recomputing '{}'...", self.total_column);

        let indexes = (
            input.column_index(&self.price_column),
            input.column_index(&self.quantity_column),
            input.column_index(&self.fee_column),
        );
        let (Some(price), Some(quantity), Some(fee)) = indexes else {
            return Ok(input);
        };

        let mut defect: Option<Error> = None;
        input.update_column(&self.total_column, |row, _current| {
            let parsed = (
                parse_number(row.get(price).unwrap_or("")),
                parse_number(row.get(quantity).unwrap_or("")),
                parse_number(row.get(fee).unwrap_or("")),
            );
            match parsed {
                (Some(p), Some(q), Some(f)) => Some(format!("{:.2}", p * q + f)),
                _ => {
                    // Unreachable on schema-validated input
                    defect.get_or_insert_with(|| {
                        Error::InputMalformed(format!(
                            "non-numeric value reached '{}' recomputation",
                            self.total_column
                        ))
                    });
                    None
                }
            }
        });

        match defect {
            Some(err) => Err(err),
            None => Ok(input),
        }
    }
}

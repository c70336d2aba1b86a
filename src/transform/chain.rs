//! Ordered chain of cleaning rules

use super::{LocalityCodeFixer, RequiredFieldFilter, TotalRecalculator};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::etl::Transformer;

/// Applies dataset transformers in a fixed order.
///
/// Each step runs over the whole dataset before the next step starts, so no
/// step ever observes a later step's output.
pub struct TransformChain {
    steps: Vec<(String, Box<dyn Transformer<Input = Dataset, Output = Dataset>>)>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn push(
        mut self,
        name: impl Into<String>,
        step: impl Transformer<Input = Dataset, Output = Dataset> + 'static,
    ) -> Self {
        self.steps.push((name.into(), Box::new(step)));
        self
    }

    /// The cleaning run's fixed rule order: locality-code correction, total
    /// recomputation, customer-id filter, customer-name filter.
    pub fn default_cleaning() -> Self {
        Self::new()
            .push("locality_code", LocalityCodeFixer::default_corrections())
            .push("total_paid", TotalRecalculator::new())
            .push("customer_id_filter", RequiredFieldFilter::customer_id())
            .push("customer_name_filter", RequiredFieldFilter::customer_name())
    }

    /// Step names in application order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Default for TransformChain {
    fn default() -> Self {
        Self::default_cleaning()
    }
}

impl Transformer for TransformChain {
    type Input = Dataset;
    type Output = Dataset;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let mut dataset = input;
        for (name, step) in &self.steps {
            log::debug!("Applying transform step '{}'", name);
            dataset = step.transform(dataset)?;
        }
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    fn purchases() -> Dataset {
        Dataset::new(
            vec![
                "UF".into(),
                "Município".into(),
                "Preço unitário".into(),
                "Quantidade comprada".into(),
                "Taxa de entrega".into(),
                "Valor total pago".into(),
                "CPF do cliente".into(),
                "Nome do cliente".into(),
            ],
            vec![
                Record::from(vec![
                    "XX",
                    "Fortaleza",
                    "10.00",
                    "3",
                    "2.50",
                    "0.00",
                    "111.222.333-44",
                    "Maria",
                ]),
                Record::from(vec![
                    "SP", "Campinas", "1.00", "1", "0.00", "9.99", "", "João",
                ]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_default_cleaning_order() {
        let chain = TransformChain::default_cleaning();
        assert_eq!(
            chain.step_names(),
            vec![
                "locality_code",
                "total_paid",
                "customer_id_filter",
                "customer_name_filter"
            ]
        );
    }

    #[test]
    fn test_full_cleaning_run() {
        let output = TransformChain::default_cleaning()
            .transform(purchases())
            .unwrap();

        // The row with an empty customer id is gone
        assert_eq!(output.shape(), (1, 8));
        assert_eq!(output.value(0, "UF"), Some("CE"));
        assert_eq!(output.value(0, "Valor total pago"), Some("32.50"));
    }

    #[test]
    fn test_row_count_never_grows() {
        let input = purchases();
        let before = input.shape().0;
        let output = TransformChain::default_cleaning().transform(input).unwrap();
        assert!(output.shape().0 <= before);
    }
}

//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use crate::error::Result;

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Item)
/// - `L`: Loader type (must load T::Output)
///
/// The three phases run strictly in sequence; a failure in any phase stops
/// the run before the next phase starts.
///
/// # Example
/// ```no_run
/// use dataprov::etl::Pipeline;
/// # use dataprov::etl::{Extractor, Transformer, Loader};
/// # use dataprov::error::Result;
/// # struct MyExtractor;
/// # impl Extractor for MyExtractor {
/// #     type Item = i32;
/// #     fn extract(&self) -> Result<Self::Item> { Ok(0) }
/// # }
/// # struct MyTransformer;
/// # impl Transformer for MyTransformer {
/// #     type Input = i32;
/// #     type Output = i32;
/// #     fn transform(&self, input: Self::Input) -> Result<Self::Output> { Ok(input) }
/// # }
/// # struct MyLoader;
/// # impl Loader for MyLoader {
/// #     type Item = i32;
/// #     fn load(&self, _item: Self::Item) -> Result<usize> { Ok(0) }
/// # }
///
/// # fn example() -> Result<()> {
/// let pipeline = Pipeline::new(
///     MyExtractor,
///     MyTransformer,
///     MyLoader,
/// );
///
/// let count = pipeline.run()?;
/// println!("Wrote {} records", count);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract the dataset from the source
    /// 2. Transform it
    /// 3. Load it to the destination
    ///
    /// Returns the number of records written
    ///
    /// # Errors
    /// Returns an error if any stage fails
    pub fn run(&self) -> Result<usize> {
        log::info!("Starting ETL pipeline");

        log::debug!("Extracting from source...");
        let item = self.extractor.extract()?;

        log::debug!("Transforming dataset...");
        let transformed = self.transformer.transform(item)?;

        log::debug!("Loading to destination...");
        let count = self.loader.load(transformed)?;
        log::info!("Loaded {} record(s)", count);

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct MockExtractor(Vec<i32>);

    impl Extractor for MockExtractor {
        type Item = Vec<i32>;
        fn extract(&self) -> Result<Self::Item> {
            Ok(self.0.clone())
        }
    }

    struct DoubleTransformer;

    impl Transformer for DoubleTransformer {
        type Input = Vec<i32>;
        type Output = Vec<i32>;
        fn transform(&self, input: Self::Input) -> Result<Self::Output> {
            Ok(input.into_iter().map(|i| i * 2).collect())
        }
    }

    struct SumLoader(Arc<Mutex<i32>>);

    impl Loader for SumLoader {
        type Item = Vec<i32>;
        fn load(&self, item: Self::Item) -> Result<usize> {
            let sum: i32 = item.iter().sum();
            *self.0.lock().unwrap() = sum;
            Ok(item.len())
        }
    }

    #[test]
    fn test_pipeline() {
        let result = Arc::new(Mutex::new(0));

        let pipeline = Pipeline::new(
            MockExtractor(vec![1, 2, 3]),
            DoubleTransformer,
            SumLoader(result.clone()),
        );

        let count = pipeline.run().unwrap();
        assert_eq!(count, 3);
        assert_eq!(*result.lock().unwrap(), 12); // (1+2+3)*2 = 12
    }

    #[test]
    fn test_empty_pipeline() {
        let result = Arc::new(Mutex::new(0));

        let pipeline = Pipeline::new(
            MockExtractor(vec![]),
            DoubleTransformer,
            SumLoader(result.clone()),
        );

        let count = pipeline.run().unwrap();
        assert_eq!(count, 0);
    }
}

//! Transformer trait for data transformation

use crate::error::Result;

/// Transformer trait for rewriting the pipeline item.
///
/// Implementors define one cleaning rule: a column remap, a recomputation,
/// or a row filter. A rule consumes the whole item and returns the whole
/// item, so its effect is only visible to the next rule.
///
/// # Example
/// ```
/// use dataprov::etl::Transformer;
/// use dataprov::error::Result;
///
/// struct Doubler;
///
/// impl Transformer for Doubler {
///     type Input = i32;
///     type Output = i32;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input * 2)
///     }
/// }
///
/// assert_eq!(Doubler.transform(21).unwrap(), 42);
/// ```
pub trait Transformer {
    /// Input item type
    type Input;

    /// Output item type after transformation
    type Output;

    /// Transform the item.
    ///
    /// # Errors
    /// Cleaning rules are total and do not fail at runtime; an error here
    /// indicates a defect upstream (e.g. a value the schema check should
    /// have rejected).
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;
}

/// Identity transformer that passes the item through unchanged.
///
/// Use this when a pipeline needs a transformer slot but no rewriting.
pub struct IdentityTransformer<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for IdentityTransformer<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> IdentityTransformer<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Transformer for IdentityTransformer<T> {
    type Input = T;
    type Output = T;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(input)
    }
}

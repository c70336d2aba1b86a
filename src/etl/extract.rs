//! Extractor trait for reading a dataset from a source

use crate::error::Result;

/// Extractor trait for producing the pipeline's input item.
///
/// Implementors define how to read a dataset from sources like delimited
/// text files. Extraction is synchronous; the only resource involved is a
/// file handle scoped to the call.
///
/// # Example
/// ```no_run
/// use dataprov::etl::Extractor;
/// use dataprov::error::Result;
/// use std::path::PathBuf;
///
/// struct LineCounter {
///     path: PathBuf,
/// }
///
/// impl Extractor for LineCounter {
///     type Item = usize;
///
///     fn extract(&self) -> Result<Self::Item> {
///         // Open the file and count lines
///         Ok(0)
///     }
/// }
/// ```
pub trait Extractor {
    /// The type of item extracted.
    type Item;

    /// Extract the item from the source.
    ///
    /// # Errors
    /// Returns an error if extraction fails (missing file, parse failure,
    /// schema violation).
    fn extract(&self) -> Result<Self::Item>;
}

//! Loader trait for writing the transformed dataset to a destination

use crate::error::Result;

/// Loader trait for writing the pipeline item to a destination.
///
/// Implementors define how to serialize the item to destinations like
/// delimited text files. Returns the number of records written.
///
/// # Example
/// ```no_run
/// use dataprov::etl::Loader;
/// use dataprov::error::Result;
/// use std::path::PathBuf;
///
/// struct NullLoader;
///
/// impl Loader for NullLoader {
///     type Item = Vec<String>;
///
///     fn load(&self, item: Self::Item) -> Result<usize> {
///         Ok(item.len())
///     }
/// }
/// ```
pub trait Loader {
    /// The type of item to load.
    type Item;

    /// Load the item to the destination.
    ///
    /// Returns the number of records written. There is no partial-file
    /// guarantee on failure.
    ///
    /// # Errors
    /// Returns an error if the destination is unwritable.
    fn load(&self, item: Self::Item) -> Result<usize>;
}

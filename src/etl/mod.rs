//! Core ETL (Extract, Transform, Load) abstractions
//!
//! Trait seams for the cleaning pipeline: extract one dataset from a source,
//! run it through a transformer, and load it to a destination. Everything is
//! synchronous and single-threaded; no phase overlaps another.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::{IdentityTransformer, Transformer};

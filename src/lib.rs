//! Data Provenance Pipeline
//!
//! An ETL tool that cleans a customer purchases dataset and captures the
//! run as a provenance graph, serializable in two vocabularies.

pub mod cli;
pub mod client;
pub mod dataset;
pub mod error;
pub mod etl;
pub mod instrument;
pub mod provenance;
pub mod storage;
pub mod transform;

// Re-exports for convenience
pub use client::GeminiClient;
pub use dataset::{Dataset, Record, Schema};
pub use error::{Error, Result};
pub use etl::{Extractor, IdentityTransformer, Loader, Pipeline, Transformer};
pub use provenance::{
    DataflowSerializer, GraphSerializer, ProvJsonSerializer, ProvenanceGraph,
};
pub use storage::{CsvReader, CsvWriter};
pub use transform::TransformChain;

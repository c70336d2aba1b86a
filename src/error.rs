//! Error taxonomy for pipeline and instrumentation failures
//!
//! Extraction and load failures are caught at the phase boundary and end the
//! run cleanly. Transform steps are total and are not expected to surface
//! errors at runtime.

use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds surfaced by the pipeline, the provenance builder and the
/// instrumentation tool.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file does not exist or could not be opened.
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// The input file exists but is not a usable dataset (missing required
    /// column, unparseable numeric value, bad delimiter layout).
    #[error("malformed input: {0}")]
    InputMalformed(String),

    /// The destination could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The provenance graph could not be serialized. Attribute values are
    /// scalar by construction, so reaching this is a defect in the builder.
    #[error("provenance serialization failed: {0}")]
    SerializationFailed(String),

    /// The generative-AI service failed, timed out or returned unusable
    /// content. Terminal for the current run; no retry.
    #[error("generative service error: {0}")]
    ExternalService(String),

    /// A required credential or environment value is absent.
    #[error("missing configuration: {0}")]
    ConfigMissing(String),
}

pub type Result<T> = std::result::Result<T, Error>;

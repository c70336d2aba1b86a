//! Serialization strategy seam for the provenance graph

use super::graph::ProvenanceGraph;
use crate::error::Result;

/// Strategy turning the internal graph into one serialized document.
///
/// Both vocabularies read the same node/edge store; picking one is a
/// run-time choice, not a different pipeline.
pub trait GraphSerializer {
    /// Short label used in logs and the `--format` flag.
    fn format_name(&self) -> &'static str;

    /// Build the JSON document for the whole graph.
    ///
    /// # Errors
    /// Attribute values are scalar by construction, so a failure here is a
    /// builder defect, not a runtime condition to handle.
    fn to_document(&self, graph: &ProvenanceGraph) -> Result<serde_json::Value>;
}

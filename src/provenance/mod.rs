//! Provenance graph construction
//!
//! One internal graph representation (agents, activities, entities, typed
//! edges) built through an explicit handle, with two serialization
//! vocabularies over it: a W3C-PROV-style activity/entity document and a
//! dataflow-style task/dataset document.
//!
//! Lifecycle: [`ProvenanceGraph::begin_run`] opens the graph and creates the
//! singleton agent; [`ProvenanceGraph::record_phase`] appends one activity
//! and its generated entity per pipeline phase; the consuming
//! [`ProvenanceGraph::finish_run`] serializes exactly once and closes the
//! graph (no operation can follow, the handle is gone).

mod dataflow;
mod graph;
mod prov_json;
mod serialize;
mod value;

pub use dataflow::DataflowSerializer;
pub use graph::{
    Attributes, Edge, EdgeKind, EntitySource, FileArtifact, Node, NodeId, NodeKind,
    ProvenanceGraph,
};
pub use prov_json::ProvJsonSerializer;
pub use serialize::GraphSerializer;
pub use value::ScalarValue;

//! The provenance graph handle
//!
//! Nodes and edges are appended through the handle; an edge can only point
//! at nodes that already exist, so the graph is acyclic by construction and
//! topological order of creation matches edge direction.

use super::serialize::GraphSerializer;
use super::value::ScalarValue;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Attribute map of one node, in insertion order.
pub type Attributes = Vec<(String, ScalarValue)>;

/// Identifier of a node within one graph. Ids are issued in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// The executing program; one per run.
    Agent,
    /// One pipeline phase execution.
    Activity,
    /// One data artifact (file, dataset snapshot, parameter record).
    Entity,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub attributes: Attributes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// Activity → Agent
    WasAssociatedWith,
    /// Activity → Entity
    Used,
    /// Entity → Activity
    WasGeneratedBy,
    /// Activity → previous Activity (process-level chain)
    Dependency,
}

#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub kind: EdgeKind,
    pub from: NodeId,
    pub to: NodeId,
}

/// Something a phase produced that can be wrapped in an entity node.
///
/// Implementations return scalar attributes only; collection-shaped facts
/// (like a column list) are stringified here, before attachment.
pub trait EntitySource {
    fn attributes(&self) -> Attributes;
}

impl EntitySource for Dataset {
    fn attributes(&self) -> Attributes {
        let (rows, cols) = self.shape();
        vec![
            ("shape".to_string(), format!("({rows}, {cols})").into()),
            ("columns".to_string(), self.columns_string().into()),
        ]
    }
}

/// A file on disk referenced by the run (pipeline input or output).
pub struct FileArtifact {
    path: PathBuf,
    pub records_written: Option<usize>,
}

impl FileArtifact {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            records_written: None,
        }
    }

    pub fn written(path: impl AsRef<Path>, records: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            records_written: Some(records),
        }
    }
}

impl EntitySource for FileArtifact {
    fn attributes(&self) -> Attributes {
        let mut attrs: Attributes = vec![(
            "location".to_string(),
            self.path.display().to_string().into(),
        )];
        if let Some(records) = self.records_written {
            attrs.push(("records".to_string(), records.into()));
        }
        attrs
    }
}

/// The graph handle threaded through a run.
///
/// Created OPEN by [`ProvenanceGraph::begin_run`]; appended to by
/// [`ProvenanceGraph::entity`] and [`ProvenanceGraph::record_phase`]; closed
/// by the consuming [`ProvenanceGraph::finish_run`]. There is no way to
/// operate on a closed graph or to record a phase before a run begins.
pub struct ProvenanceGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    agent: NodeId,
    last_activity: Option<NodeId>,
}

impl ProvenanceGraph {
    /// Open a graph for one run, creating the singleton agent node.
    pub fn begin_run(agent_name: impl Into<String>) -> Self {
        let agent_name = agent_name.into();
        log::debug!("Provenance run started for agent '{}'", agent_name);
        let agent = Node {
            id: NodeId(0),
            kind: NodeKind::Agent,
            name: agent_name,
            attributes: vec![("type".to_string(), "SoftwareAgent".into())],
        };
        Self {
            nodes: vec![agent],
            edges: Vec::new(),
            agent: NodeId(0),
            last_activity: None,
        }
    }

    pub fn agent(&self) -> NodeId {
        self.agent
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Register a data artifact that exists independently of any phase
    /// (the input file, a parameter record).
    pub fn entity(&mut self, name: impl Into<String>, attributes: Attributes) -> NodeId {
        self.push_node(NodeKind::Entity, name.into(), attributes)
    }

    /// Record one pipeline phase.
    ///
    /// Creates the activity node tagged `phase_name`, associates it with the
    /// agent, links each input entity with a `used` edge, chains a
    /// `dependency` edge to the previous phase's activity, then invokes the
    /// producer. Its result is wrapped in a fresh entity named
    /// `output_name`, linked `wasGeneratedBy`, and returned together with
    /// the produced value so the caller can feed it to the next phase.
    ///
    /// If the producer fails, the activity and its input edges stay in the
    /// graph (the partial trace is worth serializing) and the error is
    /// propagated.
    ///
    /// # Errors
    /// Returns [`Error::SerializationFailed`] if an input id does not name
    /// an entity of this graph, or the producer's error.
    pub fn record_phase<T, F>(
        &mut self,
        phase_name: &str,
        inputs: &[NodeId],
        output_name: &str,
        produce: F,
    ) -> Result<(T, NodeId)>
    where
        T: EntitySource,
        F: FnOnce() -> Result<T>,
    {
        for input in inputs {
            self.expect_entity(*input)?;
        }

        let activity = self.push_node(NodeKind::Activity, phase_name.to_string(), Vec::new());
        self.edges.push(Edge {
            kind: EdgeKind::WasAssociatedWith,
            from: activity,
            to: self.agent,
        });
        for input in inputs {
            self.edges.push(Edge {
                kind: EdgeKind::Used,
                from: activity,
                to: *input,
            });
        }
        if let Some(previous) = self.last_activity {
            self.edges.push(Edge {
                kind: EdgeKind::Dependency,
                from: activity,
                to: previous,
            });
        }
        self.last_activity = Some(activity);

        let value = produce()?;

        let entity = self.push_node(NodeKind::Entity, output_name.to_string(), value.attributes());
        self.edges.push(Edge {
            kind: EdgeKind::WasGeneratedBy,
            from: entity,
            to: activity,
        });

        log::debug!(
            "Recorded phase '{}' generating entity '{}'",
            phase_name,
            output_name
        );
        Ok((value, entity))
    }

    /// Serialize the graph once and close it. The handle is consumed, so no
    /// further mutation or second serialization is possible.
    ///
    /// # Errors
    /// [`Error::SerializationFailed`] if the document cannot be built,
    /// [`Error::WriteFailed`] if the artifact cannot be written.
    pub fn finish_run(
        self,
        serializer: &dyn GraphSerializer,
        out_path: impl AsRef<Path>,
    ) -> Result<()> {
        let out_path = out_path.as_ref();
        let document = serializer.to_document(&self)?;
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| Error::SerializationFailed(e.to_string()))?;
        std::fs::write(out_path, json).map_err(|e| Error::WriteFailed {
            path: out_path.to_path_buf(),
            source: e,
        })?;
        log::info!(
            "Provenance graph ({}) saved to {}",
            serializer.format_name(),
            out_path.display()
        );
        Ok(())
    }

    fn push_node(&mut self, kind: NodeKind, name: String, attributes: Attributes) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            kind,
            name,
            attributes,
        });
        id
    }

    fn expect_entity(&self, id: NodeId) -> Result<()> {
        match self.nodes.get(id.0) {
            Some(node) if node.kind == NodeKind::Entity => Ok(()),
            Some(node) => Err(Error::SerializationFailed(format!(
                "node '{}' is not an entity and cannot be a phase input",
                node.name
            ))),
            None => Err(Error::SerializationFailed(
                "phase input references a node outside this graph".to_string(),
            )),
        }
    }
}

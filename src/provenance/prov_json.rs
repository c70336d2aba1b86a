//! W3C-PROV-style JSON vocabulary
//!
//! Emits a PROV-JSON-shaped document: `agent`/`activity`/`entity` maps keyed
//! by `ex:`-qualified identifiers, and one map per relation kind. The
//! chained phase dependency is expressed as `wasInformedBy`.

use super::graph::{EdgeKind, NodeKind, ProvenanceGraph};
use super::serialize::GraphSerializer;
use crate::error::Result;
use serde_json::{Map, Value, json};

const NAMESPACE_PREFIX: &str = "ex";
const NAMESPACE_URI: &str = "http://example.org/";

#[derive(Default)]
pub struct ProvJsonSerializer;

impl ProvJsonSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl GraphSerializer for ProvJsonSerializer {
    fn format_name(&self) -> &'static str {
        "prov"
    }

    fn to_document(&self, graph: &ProvenanceGraph) -> Result<Value> {
        let ids = qualified_ids(graph);

        let mut agents = Map::new();
        let mut activities = Map::new();
        let mut entities = Map::new();

        for node in graph.nodes() {
            let mut attrs = Map::new();
            for (key, value) in &node.attributes {
                attrs.insert(qualified_key(key), value.as_json());
            }
            if node.kind == NodeKind::Agent {
                // prov:type expects a qualified value
                attrs.insert("prov:type".to_string(), json!("prov:SoftwareAgent"));
                attrs.remove("ex:type");
            }
            let bucket = match node.kind {
                NodeKind::Agent => &mut agents,
                NodeKind::Activity => &mut activities,
                NodeKind::Entity => &mut entities,
            };
            bucket.insert(ids[node.id.index()].clone(), Value::Object(attrs));
        }

        let mut was_associated_with = Map::new();
        let mut used = Map::new();
        let mut was_generated_by = Map::new();
        let mut was_informed_by = Map::new();

        for (i, edge) in graph.edges().iter().enumerate() {
            let from = &ids[edge.from.index()];
            let to = &ids[edge.to.index()];
            match edge.kind {
                EdgeKind::WasAssociatedWith => {
                    was_associated_with.insert(
                        format!("_:wAW{}", i + 1),
                        json!({"prov:activity": from, "prov:agent": to}),
                    );
                }
                EdgeKind::Used => {
                    used.insert(
                        format!("_:u{}", i + 1),
                        json!({"prov:activity": from, "prov:entity": to}),
                    );
                }
                EdgeKind::WasGeneratedBy => {
                    was_generated_by.insert(
                        format!("_:wGB{}", i + 1),
                        json!({"prov:entity": from, "prov:activity": to}),
                    );
                }
                EdgeKind::Dependency => {
                    was_informed_by.insert(
                        format!("_:wIB{}", i + 1),
                        json!({"prov:informed": from, "prov:informant": to}),
                    );
                }
            }
        }

        let mut document = Map::new();
        document.insert(
            "prefix".to_string(),
            json!({NAMESPACE_PREFIX: NAMESPACE_URI}),
        );
        document.insert("agent".to_string(), Value::Object(agents));
        document.insert("activity".to_string(), Value::Object(activities));
        document.insert("entity".to_string(), Value::Object(entities));
        if !was_associated_with.is_empty() {
            document.insert(
                "wasAssociatedWith".to_string(),
                Value::Object(was_associated_with),
            );
        }
        if !used.is_empty() {
            document.insert("used".to_string(), Value::Object(used));
        }
        if !was_generated_by.is_empty() {
            document.insert("wasGeneratedBy".to_string(), Value::Object(was_generated_by));
        }
        if !was_informed_by.is_empty() {
            document.insert("wasInformedBy".to_string(), Value::Object(was_informed_by));
        }

        Ok(Value::Object(document))
    }
}

/// One qualified identifier per node, unique within the document.
fn qualified_ids(graph: &ProvenanceGraph) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    graph
        .nodes()
        .iter()
        .map(|node| {
            let base = format!("{NAMESPACE_PREFIX}:{}", sanitize(&node.name));
            let id = if seen.contains(&base) {
                format!("{base}_{}", node.id.index())
            } else {
                base
            };
            seen.push(id.clone());
            id
        })
        .collect()
}

fn qualified_key(key: &str) -> String {
    match key {
        "location" => "prov:location".to_string(),
        other => format!("{NAMESPACE_PREFIX}:{other}"),
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

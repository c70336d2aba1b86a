//! Dataflow-style task/dataset vocabulary
//!
//! The same graph rendered as a flat dataflow document: activities become
//! tasks with ordinal ids and a `dependency` pointer to the prior task,
//! entities become datasets whose attributes form one element each.

use super::graph::{EdgeKind, NodeId, NodeKind, ProvenanceGraph};
use super::serialize::GraphSerializer;
use crate::error::Result;
use serde_json::{Map, Value, json};

#[derive(Default)]
pub struct DataflowSerializer;

impl DataflowSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl GraphSerializer for DataflowSerializer {
    fn format_name(&self) -> &'static str {
        "dataflow"
    }

    fn to_document(&self, graph: &ProvenanceGraph) -> Result<Value> {
        // Task ids are ordinals in activity creation order, starting at 1.
        let mut ordinals: Vec<Option<usize>> = vec![None; graph.nodes().len()];
        let mut next = 1;
        for node in graph.nodes() {
            if node.kind == NodeKind::Activity {
                ordinals[node.id.index()] = Some(next);
                next += 1;
            }
        }

        let mut tasks = Vec::new();
        for node in graph.nodes() {
            if node.kind != NodeKind::Activity {
                continue;
            }
            let mut used = Vec::new();
            let mut dependency = Value::Null;
            for edge in graph.edges() {
                match edge.kind {
                    EdgeKind::Used if edge.from == node.id => {
                        used.push(node_name(graph, edge.to));
                    }
                    EdgeKind::Dependency if edge.from == node.id => {
                        if let Some(ordinal) = ordinals[edge.to.index()] {
                            dependency = json!(ordinal);
                        }
                    }
                    _ => {}
                }
            }
            let generated: Vec<Value> = graph
                .edges()
                .iter()
                .filter(|e| e.kind == EdgeKind::WasGeneratedBy && e.to == node.id)
                .map(|e| node_name(graph, e.from))
                .collect();

            tasks.push(json!({
                "id": ordinals[node.id.index()],
                "tag": node.name,
                "dependency": dependency,
                "used": used,
                "generated": generated,
            }));
        }

        let datasets: Vec<Value> = graph
            .nodes()
            .iter()
            .filter(|n| n.kind == NodeKind::Entity)
            .map(|node| {
                let mut element = Map::new();
                for (key, value) in &node.attributes {
                    element.insert(key.clone(), value.as_json());
                }
                json!({"tag": node.name, "elements": [element]})
            })
            .collect();

        let agent = graph
            .node(graph.agent())
            .map(|n| n.name.clone())
            .unwrap_or_default();

        Ok(json!({
            "dataflow": {"tag": agent},
            "tasks": tasks,
            "datasets": datasets,
        }))
    }
}

fn node_name(graph: &ProvenanceGraph, id: NodeId) -> Value {
    graph
        .node(id)
        .map(|n| json!(n.name))
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provenance::graph::{Attributes, EntitySource};

    struct Marker;

    impl EntitySource for Marker {
        fn attributes(&self) -> Attributes {
            vec![("shape".to_string(), "(2, 8)".into())]
        }
    }

    fn sample_graph() -> ProvenanceGraph {
        let mut graph = ProvenanceGraph::begin_run("etl_script");
        let input = graph.entity("input_file", vec![("location".into(), "in.csv".into())]);
        let (_, raw) = graph
            .record_phase("extract", &[input], "raw_dataset", || Ok(Marker))
            .unwrap();
        graph
            .record_phase("transform", &[raw], "clean_dataset", || Ok(Marker))
            .unwrap();
        graph
    }

    #[test]
    fn test_dataflow_tag_is_agent_name() {
        let document = DataflowSerializer::new()
            .to_document(&sample_graph())
            .unwrap();
        assert_eq!(document["dataflow"]["tag"], "etl_script");
    }

    #[test]
    fn test_task_ordinals_and_dependencies() {
        let document = DataflowSerializer::new()
            .to_document(&sample_graph())
            .unwrap();

        let tasks = document["tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 2);

        assert_eq!(tasks[0]["id"], 1);
        assert_eq!(tasks[0]["tag"], "extract");
        assert_eq!(tasks[0]["dependency"], Value::Null);
        assert_eq!(tasks[0]["used"], json!(["input_file"]));
        assert_eq!(tasks[0]["generated"], json!(["raw_dataset"]));

        assert_eq!(tasks[1]["id"], 2);
        assert_eq!(tasks[1]["tag"], "transform");
        assert_eq!(tasks[1]["dependency"], 1);
        assert_eq!(tasks[1]["used"], json!(["raw_dataset"]));
        assert_eq!(tasks[1]["generated"], json!(["clean_dataset"]));
    }

    #[test]
    fn test_datasets_carry_attribute_elements() {
        let document = DataflowSerializer::new()
            .to_document(&sample_graph())
            .unwrap();

        let datasets = document["datasets"].as_array().unwrap();
        assert_eq!(datasets.len(), 3);
        assert_eq!(datasets[0]["tag"], "input_file");
        assert_eq!(datasets[0]["elements"][0]["location"], "in.csv");
        assert_eq!(datasets[1]["tag"], "raw_dataset");
        assert_eq!(datasets[1]["elements"][0]["shape"], "(2, 8)");
    }

    #[test]
    fn test_failed_phase_leaves_task_without_output() {
        use crate::error::Error;
        use crate::provenance::graph::NodeId;

        let mut graph = ProvenanceGraph::begin_run("etl_script");
        let result: crate::error::Result<(Marker, NodeId)> =
            graph.record_phase("extract", &[], "raw", || {
                Err(Error::InputMalformed("boom".into()))
            });
        assert!(result.is_err());

        let document = DataflowSerializer::new().to_document(&graph).unwrap();
        let tasks = document["tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["generated"], json!([]));
    }
}

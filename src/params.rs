use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::errors::{PlannerError, Result};
use crate::graph::{EdgeSpec, Graph, WaypointId, WaypointSpec};

/// Start waypoint when none is configured
pub const DEFAULT_START: WaypointId = 0;
/// Goal waypoint when none is configured
pub const DEFAULT_GOAL: WaypointId = 4;

const GRAPH_NAMESPACE: &str = "graph";
const WAYPOINTS_KEY: &str = "waypoints";
const EDGES_KEY: &str = "edges";


/// Waypoint and edge lists resolved from a parameter document
#[derive(Clone, Debug, PartialEq)]
pub struct GraphParams {
    pub waypoints: Vec<WaypointSpec>,
    pub edges: Vec<EdgeSpec>,
    pub start: Option<WaypointId>,
    pub goal: Option<WaypointId>,
}

impl GraphParams {

    /// Read and resolve a parameter file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        debug!(path = %path.display(), "reading graph parameters");
        Self::from_yaml(&text)
    }

    /// Resolve a parameter document
    /// `waypoints` and `edges` lists sit at the top level or under `graph`
    ///
    /// Fails with [`PlannerError::MissingInput`] when either list is absent
    /// or is not a list.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(text)?;
        let root = root.as_mapping().cloned().unwrap_or_default();
        let namespace = match root.get(GRAPH_NAMESPACE) {
            Some(Value::Mapping(graph)) => graph,
            _ => &root,
        };

        let waypoints = serde_yaml::from_value(required_list(namespace, WAYPOINTS_KEY)?)?;
        let edges = serde_yaml::from_value(required_list(namespace, EDGES_KEY)?)?;

        Ok(Self {
            waypoints,
            edges,
            start: endpoint(&root, namespace, "start_id")?,
            goal: endpoint(&root, namespace, "goal_id")?,
        })
    }

    /// Build the graph from the resolved lists
    pub fn load_graph(&self) -> Graph {
        Graph::load(self.waypoints.iter().copied(), self.edges.iter().copied())
    }
}


fn required_list(namespace: &Mapping, key: &'static str) -> Result<Value> {
    match namespace.get(key) {
        Some(list @ Value::Sequence(_)) => Ok(list.clone()),
        Some(_) => Err(PlannerError::MissingInput { key, problem: "is not a list" }),
        None => Err(PlannerError::MissingInput { key, problem: "is missing" }),
    }
}

/// Optional endpoint id, looked up in the graph namespace first
fn endpoint(root: &Mapping, namespace: &Mapping, key: &str) -> Result<Option<WaypointId>> {
    match namespace.get(key).or_else(|| root.get(key)) {
        Some(value) => Ok(Some(serde_yaml::from_value(value.clone())?)),
        None => Ok(None),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_document() {
        let params = GraphParams::from_yaml(
            "graph:\n  waypoints:\n    - {id: 1, x: 0.0, y: 0.0}\n    - {id: 2, x: 3, y: 4}\n  edges:\n    - {from: 1, to: 2}\n    - {from: 2, to: 1, cost: 1.5}\n",
        ).unwrap();

        assert_eq!(params.waypoints[1], WaypointSpec { id: 2, x: 3.0, y: 4.0 });
        assert_eq!(params.edges, vec![EdgeSpec::new(1, 2), EdgeSpec::with_cost(2, 1, 1.5)]);
        assert_eq!(params.start, None);
        assert_eq!(params.goal, None);
    }

    #[test]
    fn test_top_level_document_with_endpoints() {
        let params = GraphParams::from_yaml(
            "waypoints: [{id: 0, x: 0, y: 0}]\nedges: []\nstart_id: 0\ngoal_id: 7\n",
        ).unwrap();

        assert_eq!(params.waypoints.len(), 1);
        assert!(params.edges.is_empty());
        assert_eq!(params.start, Some(0));
        assert_eq!(params.goal, Some(7));
    }

    #[test]
    fn test_missing_edges() {
        let err = GraphParams::from_yaml("waypoints: []\n").unwrap_err();
        assert!(matches!(err, PlannerError::MissingInput { key: "edges", problem: "is missing" }));
    }

    #[test]
    fn test_waypoints_not_a_list() {
        let err = GraphParams::from_yaml("graph:\n  waypoints: {id: 0}\n  edges: []\n").unwrap_err();
        assert!(matches!(err, PlannerError::MissingInput { key: "waypoints", problem: "is not a list" }));
    }

    #[test]
    fn test_empty_document_is_missing_input() {
        let err = GraphParams::from_yaml("").unwrap_err();
        assert!(matches!(err, PlannerError::MissingInput { key: "waypoints", .. }));
    }

    #[test]
    fn test_malformed_entry_is_parse_error() {
        let err = GraphParams::from_yaml("waypoints: [{id: 0, x: 1}]\nedges: []\n").unwrap_err();
        assert!(matches!(err, PlannerError::Parse(_)));
    }
}

mod loader;

use serde::{Deserialize, Serialize};

use crate::collections::FxIndexMap;
use crate::geometry::Point;

/// Integer identifier of a waypoint
pub type WaypointId = i64;


/// Waypoint as supplied by the parameter document
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaypointSpec {
    pub id: WaypointId,
    pub x: f64,
    pub y: f64,
}

/// Edge as supplied by the parameter document
/// Without an explicit cost the weight is the straight-line distance
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: WaypointId,
    pub to: WaypointId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl EdgeSpec {
    pub fn new(from: WaypointId, to: WaypointId) -> Self {
        Self { from, to, cost: None }
    }

    pub fn with_cost(from: WaypointId, to: WaypointId, cost: f64) -> Self {
        Self { from, to, cost: Some(cost) }
    }
}


/// Loaded waypoint
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    pub id: WaypointId,
    pub position: Point,
}


/// Why an input edge was left out of the graph
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropReason {
    /// Endpoint id is not a loaded waypoint
    DanglingEdge { missing: WaypointId },
    /// Explicit cost is negative or not finite
    InvalidCost { cost: f64 },
}

/// Input edge discarded during load
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DroppedEdge {
    pub edge: EdgeSpec,
    pub reason: DropReason,
}


/// Undirected weighted waypoint graph
/// - every id in adjacency is a waypoint
/// - u -> v with weight w implies v -> u with weight w
/// - weights are non-negative
#[derive(Clone, Debug, Default)]
pub struct Graph {
    waypoints: FxIndexMap<WaypointId, Waypoint>,
    adjacency: FxIndexMap<WaypointId, Vec<(WaypointId, f64)>>,
    dropped: Vec<DroppedEdge>,
    edge_count: usize,
}

impl Graph {

    /// Waypoint by id
    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(&id)
    }

    pub fn contains(&self, id: WaypointId) -> bool {
        self.waypoints.contains_key(&id)
    }

    /// Neighbors of a waypoint with edge weights, in edge insertion order
    /// Unknown ids and isolated waypoints have no neighbors
    pub fn neighbors(&self, id: WaypointId) -> &[(WaypointId, f64)] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Waypoint ids in first-insertion order
    pub fn ids(&self) -> impl Iterator<Item = WaypointId> + '_ {
        self.waypoints.keys().copied()
    }

    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.values()
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Number of undirected edges kept
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Input edges left out during load
    pub fn dropped_edges(&self) -> &[DroppedEdge] {
        &self.dropped
    }
}

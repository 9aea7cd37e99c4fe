use tracing::{debug, warn};

use super::{DropReason, DroppedEdge, EdgeSpec, Graph, Waypoint, WaypointSpec};
use crate::collections::fx_index_map;
use crate::geometry::Point;


impl Graph {

    /// Build a graph from unordered waypoint and edge lists
    ///
    /// Waypoints are inserted first, in input order. A repeated id replaces
    /// the earlier waypoint (last write wins). Edges are then added in both
    /// directions. An edge whose endpoint is not a waypoint, or whose explicit
    /// cost is negative or not finite, is skipped and recorded in
    /// [`Graph::dropped_edges`]. Empty inputs give an empty graph.
    pub fn load<W, E>(waypoints: W, edges: E) -> Self
    where
        W: IntoIterator<Item = WaypointSpec>,
        E: IntoIterator<Item = EdgeSpec>,
    {
        let waypoints = waypoints.into_iter();
        let mut graph = Graph {
            waypoints: fx_index_map(waypoints.size_hint().0),
            ..Graph::default()
        };

        for WaypointSpec { id, x, y } in waypoints {
            let replaced = graph.waypoints.insert(id, Waypoint { id, position: Point::new(x, y) });
            if replaced.is_some() {
                debug!(id, "duplicate waypoint id, keeping the later entry");
            }
        }

        for edge in edges {
            match graph.edge_weight(&edge) {
                Ok(weight) => graph.connect(edge, weight),
                Err(reason) => {
                    match reason {
                        DropReason::DanglingEdge { missing } => warn!(
                            from = edge.from, to = edge.to, missing,
                            "edge references unknown waypoint, skipping"
                        ),
                        DropReason::InvalidCost { cost } => warn!(
                            from = edge.from, to = edge.to, cost,
                            "edge cost is negative or not finite, skipping"
                        ),
                    }
                    graph.dropped.push(DroppedEdge { edge, reason });
                }
            }
        }

        debug!(
            waypoints = graph.waypoints.len(),
            edges = graph.edge_count,
            dropped = graph.dropped.len(),
            "graph loaded"
        );

        graph
    }

    /// Explicit cost when present, straight-line distance otherwise
    fn edge_weight(&self, edge: &EdgeSpec) -> Result<f64, DropReason> {
        let from = self.waypoints.get(&edge.from)
            .ok_or(DropReason::DanglingEdge { missing: edge.from })?;
        let to = self.waypoints.get(&edge.to)
            .ok_or(DropReason::DanglingEdge { missing: edge.to })?;

        match edge.cost {
            Some(cost) if cost.is_finite() && cost >= 0.0 => Ok(cost),
            Some(cost) => Err(DropReason::InvalidCost { cost }),
            None => Ok(from.position.distance(&to.position)),
        }
    }

    /// Insert both directions of an undirected edge
    fn connect(&mut self, edge: EdgeSpec, weight: f64) {
        self.adjacency.entry(edge.from).or_default().push((edge.to, weight));
        self.adjacency.entry(edge.to).or_default().push((edge.from, weight));
        self.edge_count += 1;
    }
}

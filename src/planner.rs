use std::fmt;

use tracing::debug;

use crate::errors::{PlannerError, Result};
use crate::graph::{Graph, WaypointId};
use crate::graph_algos::dijkstra::{dijkstra, dijkstra_costs};


/// Minimum-cost route from start to goal
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Waypoint ids from start to goal, inclusive
    pub waypoints: Vec<WaypointId>,
    /// Sum of the traversed edge weights
    pub cost: f64,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.waypoints.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}


/// Outcome of a solve with valid endpoints
#[derive(Clone, Debug, PartialEq)]
pub enum PathResult {
    Found(Route),
    /// Start and goal lie in different connected components
    NoPath,
}

impl PathResult {
    pub fn route(&self) -> Option<&Route> {
        match self {
            PathResult::Found(route) => Some(route),
            PathResult::NoPath => None,
        }
    }
}


impl Graph {

    /// Minimum-cost route between two waypoints
    ///
    /// Fails with [`PlannerError::UnknownEndpoint`] before any search when
    /// either id is not a waypoint. A goal that cannot be reached is the
    /// regular [`PathResult::NoPath`] outcome.
    pub fn shortest_path(&self, start: WaypointId, goal: WaypointId) -> Result<PathResult> {
        self.check_endpoints(start, goal)?;

        let graph: &Graph = self;
        let found = dijkstra(
            start,
            move |&id: &WaypointId| graph.neighbors(id).iter().copied(),
            |&id: &WaypointId| id == goal,
        );

        Ok(match found {
            Some((waypoints, cost)) => {
                debug!(start, goal, cost, hops = waypoints.len() - 1, "route found");
                PathResult::Found(Route { waypoints, cost })
            }
            None => {
                debug!(start, goal, "no route");
                PathResult::NoPath
            }
        })
    }

    /// Final cost from start to every waypoint it can reach, start included
    pub fn reachable_costs(&self, start: WaypointId) -> Result<Vec<(WaypointId, f64)>> {
        self.check_endpoints(start, start)?;

        let graph: &Graph = self;
        Ok(dijkstra_costs(start, move |&id: &WaypointId| graph.neighbors(id).iter().copied()))
    }

    fn check_endpoints(&self, start: WaypointId, goal: WaypointId) -> Result<()> {
        if self.contains(start) && self.contains(goal) {
            Ok(())
        } else {
            Err(PlannerError::UnknownEndpoint { start, goal })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeSpec, WaypointSpec};

    fn triangle(edges: &[EdgeSpec]) -> Graph {
        Graph::load(
            [
                WaypointSpec { id: 1, x: 0.0, y: 0.0 },
                WaypointSpec { id: 2, x: 3.0, y: 0.0 },
                WaypointSpec { id: 3, x: 3.0, y: 4.0 },
            ],
            edges.iter().copied(),
        )
    }

    #[test]
    fn test_route_follows_euclidean_edges() {
        let graph = triangle(&[EdgeSpec::new(1, 2), EdgeSpec::new(2, 3)]);

        let result = graph.shortest_path(1, 3).unwrap();

        assert_eq!(result, PathResult::Found(Route { waypoints: vec![1, 2, 3], cost: 7.0 }));
    }

    #[test]
    fn test_explicit_shortcut_wins() {
        let graph = triangle(&[EdgeSpec::new(1, 2), EdgeSpec::new(2, 3), EdgeSpec::with_cost(1, 3, 1.0)]);

        let route = graph.shortest_path(1, 3).unwrap().route().cloned().unwrap();

        assert_eq!(route.waypoints, vec![1, 3]);
        assert_eq!(route.cost, 1.0);
    }

    #[test]
    fn test_unknown_endpoint_is_an_error() {
        let graph = triangle(&[EdgeSpec::new(1, 2)]);

        assert!(matches!(
            graph.shortest_path(42, 1),
            Err(PlannerError::UnknownEndpoint { start: 42, goal: 1 })
        ));
        assert!(matches!(graph.shortest_path(1, 42), Err(PlannerError::UnknownEndpoint { .. })));
        assert!(matches!(graph.reachable_costs(42), Err(PlannerError::UnknownEndpoint { .. })));
    }

    #[test]
    fn test_disconnected_goal_is_no_path() {
        let graph = triangle(&[EdgeSpec::new(1, 2)]);

        assert_eq!(graph.shortest_path(1, 3).unwrap(), PathResult::NoPath);
        assert_eq!(graph.shortest_path(3, 1).unwrap(), PathResult::NoPath);
    }

    #[test]
    fn test_start_equals_goal() {
        let graph = triangle(&[]);

        let result = graph.shortest_path(2, 2).unwrap();

        assert_eq!(result, PathResult::Found(Route { waypoints: vec![2], cost: 0.0 }));
    }

    #[test]
    fn test_overflowing_costs_are_no_path() {
        let graph = Graph::load(
            [
                WaypointSpec { id: 1, x: 0.0, y: 0.0 },
                WaypointSpec { id: 2, x: 1.0, y: 0.0 },
                WaypointSpec { id: 3, x: 2.0, y: 0.0 },
            ],
            [EdgeSpec::with_cost(1, 2, 1e308), EdgeSpec::with_cost(2, 3, 1e308)],
        );
        assert_eq!(graph.shortest_path(1, 3).unwrap(), PathResult::NoPath);

        // straight-line distance between these overflows to infinity
        let graph = Graph::load(
            [WaypointSpec { id: 1, x: -1e200, y: 0.0 }, WaypointSpec { id: 2, x: 1e200, y: 0.0 }],
            [EdgeSpec::new(1, 2)],
        );
        assert_eq!(graph.shortest_path(1, 2).unwrap(), PathResult::NoPath);
        assert_eq!(graph.reachable_costs(1).unwrap(), vec![(1, 0.0)]);
    }

    #[test]
    fn test_reachable_costs() {
        let graph = triangle(&[EdgeSpec::new(1, 2)]);

        let costs = graph.reachable_costs(1).unwrap();

        assert_eq!(costs, vec![(1, 0.0), (2, 3.0)]);
    }

    #[test]
    fn test_route_display() {
        let route = Route { waypoints: vec![0, 2, 4], cost: 3.5 };
        assert_eq!(route.to_string(), "0 -> 2 -> 4");
    }
}

//! Route planning over small 2D waypoint graphs.

mod collections;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod grid;
pub mod params;
pub mod planner;

pub use errors::{PlannerError, Result};
pub use graph::{DropReason, DroppedEdge, EdgeSpec, Graph, Waypoint, WaypointId, WaypointSpec};
pub use params::GraphParams;
pub use planner::{PathResult, Route};

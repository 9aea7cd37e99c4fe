use thiserror::Error;

use crate::graph::WaypointId;


/// Failures that stop planning before any result is produced
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Waypoint or edge collection absent, or not a list
    #[error("missing input: {key} {problem}")]
    MissingInput { key: &'static str, problem: &'static str },

    /// Start or goal is not a loaded waypoint
    #[error("start or goal id not found in waypoints. start={start} goal={goal}")]
    UnknownEndpoint { start: WaypointId, goal: WaypointId },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

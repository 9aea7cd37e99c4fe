use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::Result;
use crate::geometry::Point;

/// Default minimum spacing between two logged summaries, in seconds
pub const DEFAULT_REPORT_PERIOD: f64 = 2.0;

const UNKNOWN: i8 = -1;
const FREE: i8 = 0;
const OCCUPIED_THRESHOLD: i8 = 50;


/// Grid geometry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridInfo {
    pub width: u32,
    pub height: u32,
    /// Cell edge length in meters
    pub resolution: f32,
    /// World position of cell (0, 0)
    pub origin: Point,
}

/// One occupancy grid message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    #[serde(default)]
    pub frame_id: String,
    /// Message time in seconds
    #[serde(default)]
    pub stamp: f64,
    pub info: GridInfo,
    /// Row-major cell values
    pub data: Vec<i8>,
}

impl OccupancyGrid {

    /// Read a grid message from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }

    pub fn counts(&self) -> CellCounts {
        CellCounts::from_cells(&self.data)
    }
}


/// Cell occupancy: -1 unknown, 0 free, 50 and up occupied, semi otherwise
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Unknown,
    Free,
    /// Partially occupied, 1..=49 or an unexpected negative
    Semi,
    Occupied,
}

impl CellState {
    pub fn classify(value: i8) -> Self {
        match value {
            UNKNOWN => CellState::Unknown,
            FREE => CellState::Free,
            v if v >= OCCUPIED_THRESHOLD => CellState::Occupied,
            _ => CellState::Semi,
        }
    }
}


/// Cell tallies per state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    pub free: usize,
    pub occupied: usize,
    pub semi: usize,
    pub unknown: usize,
}

impl CellCounts {

    pub fn from_cells(cells: &[i8]) -> Self {
        let mut counts = Self::default();
        for &cell in cells {
            counts.record(CellState::classify(cell));
        }
        counts
    }

    pub fn record(&mut self, state: CellState) {
        match state {
            CellState::Unknown => self.unknown += 1,
            CellState::Free => self.free += 1,
            CellState::Semi => self.semi += 1,
            CellState::Occupied => self.occupied += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.free + self.occupied + self.semi + self.unknown
    }
}


/// Logs a summary per grid message, at most once per period of message time
#[derive(Debug)]
pub struct GridReporter {
    period: f64,
    last_logged: Option<f64>,
}

impl Default for GridReporter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_PERIOD)
    }
}

impl GridReporter {

    pub fn new(period: f64) -> Self {
        Self { period, last_logged: None }
    }

    /// Tally the grid and log the summary unless throttled
    /// Returns the counts along with whether a line was logged
    pub fn observe(&mut self, grid: &OccupancyGrid) -> (CellCounts, bool) {
        let counts = grid.counts();

        let due = match self.last_logged {
            Some(last) => grid.stamp - last >= self.period,
            None => true,
        };
        if due {
            self.last_logged = Some(grid.stamp);
            info!(
                frame = %grid.frame_id,
                time = grid.stamp,
                width = grid.info.width,
                height = grid.info.height,
                resolution = grid.info.resolution,
                origin_x = grid.info.origin.x,
                origin_y = grid.info.origin.y,
                free = counts.free,
                occ = counts.occupied,
                semi = counts.semi,
                unk = counts.unknown,
                "map"
            );
        }

        (counts, due)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn grid(stamp: f64, data: Vec<i8>) -> OccupancyGrid {
        OccupancyGrid {
            frame_id: "map".to_string(),
            stamp,
            info: GridInfo { width: 3, height: 2, resolution: 0.05, origin: Point::new(-1.0, -2.0) },
            data,
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(CellState::classify(-1), CellState::Unknown);
        assert_eq!(CellState::classify(0), CellState::Free);
        assert_eq!(CellState::classify(1), CellState::Semi);
        assert_eq!(CellState::classify(49), CellState::Semi);
        assert_eq!(CellState::classify(50), CellState::Occupied);
        assert_eq!(CellState::classify(100), CellState::Occupied);
        assert_eq!(CellState::classify(-5), CellState::Semi);
    }

    #[test]
    fn test_counts() {
        let counts = grid(0.0, vec![-1, 0, 0, 25, 50, 100]).counts();

        assert_eq!(counts, CellCounts { free: 2, occupied: 2, semi: 1, unknown: 1 });
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_reporter_throttles_by_stamp() {
        let mut reporter = GridReporter::default();

        assert!(reporter.observe(&grid(10.0, vec![0; 6])).1);
        assert!(!reporter.observe(&grid(11.0, vec![0; 6])).1);
        assert!(!reporter.observe(&grid(11.9, vec![0; 6])).1);
        assert!(reporter.observe(&grid(12.0, vec![0; 6])).1);
    }

    #[test]
    fn test_grid_from_yaml() {
        let grid: OccupancyGrid = serde_yaml::from_str(
            "info: {width: 2, height: 1, resolution: 0.1, origin: {x: 0, y: 0}}\ndata: [-1, 75]\n",
        ).unwrap();

        assert_eq!(grid.frame_id, "");
        assert_eq!(grid.counts(), CellCounts { free: 0, occupied: 1, semi: 0, unknown: 1 });
    }
}

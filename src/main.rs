use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use waypoint_nav::geometry::Point;
use waypoint_nav::grid::{GridReporter, OccupancyGrid, DEFAULT_REPORT_PERIOD};
use waypoint_nav::params::{DEFAULT_GOAL, DEFAULT_START};
use waypoint_nav::{GraphParams, PathResult, Result, WaypointId};

#[derive(Parser)]
#[command(name = "waypoint-nav")]
#[command(about = "Waypoint graph route planner and occupancy grid reporter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the cheapest route between two waypoints
    Plan {
        /// Path to the waypoint/edge parameter YAML file
        params_path: PathBuf,
        /// Start waypoint id (overrides start_id in the file, default 0)
        #[arg(long)]
        start: Option<WaypointId>,
        /// Goal waypoint id (overrides goal_id in the file, default 4)
        #[arg(long)]
        goal: Option<WaypointId>,
        /// Also print the cost to every waypoint reachable from start
        #[arg(long)]
        all: bool,
    },
    /// Report cell statistics for occupancy grid files
    Grid {
        /// Grid message YAML files, processed in order
        #[arg(required = true)]
        grid_paths: Vec<PathBuf>,
        /// Minimum seconds of message time between logged summaries
        #[arg(long, default_value_t = DEFAULT_REPORT_PERIOD, value_parser = parse_period)]
        period: f64,
    },
}

/// Report period in seconds, finite and not negative
fn parse_period(s: &str) -> std::result::Result<f64, String> {
    let period: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if period.is_finite() && period >= 0.0 {
        Ok(period)
    } else {
        Err(format!("period must be a finite number of seconds >= 0, got {s}"))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan {
            params_path,
            start,
            goal,
            all,
        } => cmd_plan(&params_path, start, goal, all),
        Commands::Grid { grid_paths, period } => cmd_grid(&grid_paths, period),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_plan(
    params_path: &Path,
    start: Option<WaypointId>,
    goal: Option<WaypointId>,
    all: bool,
) -> Result<ExitCode> {
    let params = GraphParams::from_path(params_path)?;
    let start = start.or(params.start).unwrap_or(DEFAULT_START);
    let goal = goal.or(params.goal).unwrap_or(DEFAULT_GOAL);

    let graph = params.load_graph();

    match graph.shortest_path(start, goal)? {
        PathResult::Found(route) => {
            println!("Planned path {start} -> {goal}: {route}");
            println!("Total cost: {} meters", route.cost);
        }
        PathResult::NoPath => {
            error!("No path found from {start} to {goal}");
            return Ok(ExitCode::FAILURE);
        }
    }

    if all {
        let costs: HashMap<WaypointId, f64> = graph.reachable_costs(start)?.into_iter().collect();
        println!("Costs from {start}:");
        for waypoint in graph.waypoints() {
            let Point { x, y } = waypoint.position;
            match costs.get(&waypoint.id) {
                Some(cost) => println!("  {} ({x}, {y}): {cost}", waypoint.id),
                None => println!("  {} ({x}, {y}): unreachable", waypoint.id),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_grid(grid_paths: &[PathBuf], period: f64) -> Result<ExitCode> {
    let mut reporter = GridReporter::new(period);

    for path in grid_paths {
        let grid = OccupancyGrid::from_path(path)?;
        let (counts, _) = reporter.observe(&grid);
        println!(
            "{}: free={} occ={} semi={} unk={}",
            path.display(),
            counts.free,
            counts.occupied,
            counts.semi,
            counts.unknown
        );
    }

    Ok(ExitCode::SUCCESS)
}

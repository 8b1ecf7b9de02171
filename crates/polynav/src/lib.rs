//! Deterministic 2D visibility-graph pathfinding over polygon walkable regions.
//!
//! A query runs three stages, fresh every time:
//!
//! ```text
//! region + start/goal ──► VisibilityGraph ──► ShortestPathTree ──► waypoints
//!        (path-clear sampling)      (Dijkstra)          (predecessor walk)
//! ```
//!
//! [`VisibilityPlanner`] wires the stages together behind the [`PathPlanner`] trait and degrades
//! to a direct-to-goal route whenever the graph cannot connect the two ends.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod extract;
pub mod math;
pub mod obstacles;
pub mod planner;
pub mod region;
pub mod solver;
pub mod visibility;

pub use config::{PlannerConfig, MIN_STEP};
pub use error::{NavError, Result};
pub use extract::{extract_path, waypoints_from_indices};
pub use math::{Vec2, Vec3};
pub use obstacles::{AgentId, AgentObstacles, ObstacleHole};
pub use planner::{DirectPlanner, PathPlanner, PathResult, PathStatus, VisibilityPlanner};
pub use region::{OpenSurface, SurfaceProbe, WalkableRegion};
pub use solver::{shortest_path_tree, ShortestPathTree, WeightMatrix};
pub use visibility::{is_path_clear, nearest_point_on_mesh, VisibilityGraph, GOAL_NODE, START_NODE};

use crate::extract::{extract_path, waypoints_from_indices};
use crate::solver::shortest_path_tree;
use crate::visibility::{is_path_clear, nearest_point_on_mesh, GOAL_NODE, START_NODE};
use crate::{
    AgentId, AgentObstacles, NavError, PlannerConfig, Result, SurfaceProbe, Vec2, Vec3,
    VisibilityGraph, WalkableRegion,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a [`PathResult`] was produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathStatus {
    /// Start and goal could see each other; no graph was built.
    Direct,
    /// Route found through the visibility graph.
    Routed,
    /// No graph route; the result heads straight for the goal. Carries the reason.
    Fallback(NavError),
}

/// Ordered waypoints from (but excluding) the start to the goal. Never empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathResult {
    waypoints: Vec<Vec3>,
    status: PathStatus,
}

impl PathResult {
    pub fn direct(goal: Vec3) -> Self {
        Self {
            waypoints: vec![goal],
            status: PathStatus::Direct,
        }
    }

    pub fn fallback(goal: Vec3, reason: NavError) -> Self {
        Self {
            waypoints: vec![goal],
            status: PathStatus::Fallback(reason),
        }
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn into_waypoints(self) -> Vec<Vec3> {
        self.waypoints
    }

    pub fn status(&self) -> &PathStatus {
        &self.status
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.status, PathStatus::Fallback(_))
    }

    pub fn fallback_reason(&self) -> Option<&NavError> {
        match &self.status {
            PathStatus::Fallback(reason) => Some(reason),
            _ => None,
        }
    }

    /// Planar length of the route when walked from `start`.
    pub fn length_from(&self, start: Vec2) -> f32 {
        let mut length = 0.0;
        let mut prev = start;
        for p in &self.waypoints {
            let p = p.truncate();
            length += prev.distance(p);
            prev = p;
        }
        length
    }
}

/// A path-finding strategy selectable per scene.
///
/// Callers hold a `&dyn PathPlanner` and never need to know which strategy answers.
pub trait PathPlanner {
    /// Plan against `region`, asking `probe` whether ground is walkable.
    fn plan_with_probe(
        &self,
        region: &WalkableRegion,
        probe: &dyn SurfaceProbe,
        start: Vec3,
        goal: Vec3,
    ) -> PathResult;

    /// Plan against `region`, using its own outlines as the walkable surface.
    fn plan(&self, region: &WalkableRegion, start: Vec3, goal: Vec3) -> PathResult {
        self.plan_with_probe(region, region, start, goal)
    }

    /// Plan for `agent`, treating every other agent's footprint as a hole.
    ///
    /// The holes live only in a snapshot built for this call; `region` is not modified, so
    /// queries for different agents cannot see each other's holes.
    fn plan_for_agent(
        &self,
        region: &WalkableRegion,
        obstacles: &AgentObstacles,
        agent: AgentId,
        start: Vec3,
        goal: Vec3,
    ) -> PathResult {
        let snapshot = region.with_holes(obstacles.holes_excluding(agent));
        self.plan(&snapshot, start, goal)
    }

    /// Name of the scene helper asset this strategy expects, or `""` if it needs none.
    fn helper_name(&self) -> &'static str {
        ""
    }
}

/// Walks straight at the goal. Used for scenes without navigation data.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPlanner;

impl PathPlanner for DirectPlanner {
    fn plan_with_probe(
        &self,
        _region: &WalkableRegion,
        _probe: &dyn SurfaceProbe,
        _start: Vec3,
        goal: Vec3,
    ) -> PathResult {
        PathResult::direct(goal)
    }
}

/// Shortest routes over the visibility graph of a polygonal walkable region.
#[derive(Debug, Clone, Default)]
pub struct VisibilityPlanner {
    config: PlannerConfig,
}

impl VisibilityPlanner {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Snap both ends onto the mesh and build the visibility graph between them.
    pub fn build_graph(
        &self,
        region: &WalkableRegion,
        probe: &dyn SurfaceProbe,
        start: Vec2,
        goal: Vec2,
    ) -> VisibilityGraph {
        let start = nearest_point_on_mesh(region, probe, start, &self.config);
        let goal = nearest_point_on_mesh(region, probe, goal, &self.config);
        VisibilityGraph::build(region.vertices(), start, goal, probe, &self.config)
    }

    fn route(&self, graph: &VisibilityGraph) -> Result<Vec<usize>> {
        let tree = shortest_path_tree(graph.weights(), START_NODE, GOAL_NODE)?;
        extract_path(&tree.predecessors, START_NODE, GOAL_NODE)
    }
}

impl PathPlanner for VisibilityPlanner {
    fn plan_with_probe(
        &self,
        region: &WalkableRegion,
        probe: &dyn SurfaceProbe,
        start: Vec3,
        goal: Vec3,
    ) -> PathResult {
        if is_path_clear(probe, start.truncate(), goal.truncate(), &self.config) {
            tracing::debug!("goal in line of sight, skipping graph");
            return PathResult::direct(goal);
        }

        let graph = self.build_graph(region, probe, start.truncate(), goal.truncate());
        match self.route(&graph) {
            Ok(route) => {
                tracing::debug!(waypoints = route.len(), "routed through visibility graph");
                PathResult {
                    waypoints: waypoints_from_indices(graph.nodes(), &route, start.z),
                    status: PathStatus::Routed,
                }
            }
            Err(err @ NavError::Unreachable { .. }) => {
                tracing::warn!(
                    error = %err,
                    ?start,
                    ?goal,
                    "goal unreachable on navmesh, heading straight for it"
                );
                PathResult::fallback(goal, err)
            }
            Err(err) => {
                tracing::error!(error = %err, "path extraction failed, heading straight for goal");
                PathResult::fallback(goal, err)
            }
        }
    }

    fn helper_name(&self) -> &'static str {
        "NavMesh2D"
    }
}

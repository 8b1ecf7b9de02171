//! Scene file loading: walkable region, agent footprints and planner tolerances.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use polynav::{
    AgentId, AgentObstacles, ObstacleHole, PlannerConfig, Vec2, VisibilityPlanner, WalkableRegion,
};

/// A scene as written on disk (YAML).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    /// Sampling tolerances; missing fields take the library defaults.
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Walkable area
    #[serde(default)]
    pub region: RegionSpec,

    /// Agents currently standing in the scene
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionSpec {
    /// Outer boundary. Empty means the scene has no navigation data.
    #[serde(default)]
    pub boundary: Vec<[f32; 2]>,

    /// Permanent holes cut into the boundary
    #[serde(default)]
    pub holes: Vec<Vec<[f32; 2]>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    pub id: u64,
    pub footprint: FootprintSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum FootprintSpec {
    Rect {
        center: [f32; 2],
        half_extents: [f32; 2],
    },
    Polygon { points: Vec<[f32; 2]> },
}

impl FootprintSpec {
    pub fn to_hole(&self) -> Result<ObstacleHole> {
        match self {
            FootprintSpec::Rect {
                center,
                half_extents,
            } => Ok(ObstacleHole::rect(
                Vec2::from(*center),
                Vec2::from(*half_extents),
            )),
            FootprintSpec::Polygon { points } => Ok(ObstacleHole::polygon(to_points(points))?),
        }
    }
}

fn to_points(points: &[[f32; 2]]) -> Vec<Vec2> {
    points.iter().copied().map(Vec2::from).collect()
}

impl SceneFile {
    /// Load a scene from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene from {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse scene from {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let scene: Self = serde_yaml::from_str(content)?;
        Ok(scene)
    }

    /// Permanent walkable region (boundary plus holes), without agent footprints.
    pub fn region(&self) -> Result<WalkableRegion> {
        if self.region.boundary.is_empty() {
            anyhow::ensure!(
                self.region.holes.is_empty(),
                "scene declares holes but no boundary"
            );
            return Ok(WalkableRegion::empty());
        }

        let outlines = std::iter::once(&self.region.boundary)
            .chain(self.region.holes.iter())
            .map(|outline| to_points(outline))
            .collect();
        WalkableRegion::from_outlines(outlines).context("Invalid region outline")
    }

    pub fn obstacles(&self) -> Result<AgentObstacles> {
        let mut obstacles = AgentObstacles::new();
        for agent in &self.agents {
            let hole = agent
                .footprint
                .to_hole()
                .with_context(|| format!("Invalid footprint for agent {}", agent.id))?;
            if obstacles.insert(AgentId(agent.id), hole).is_some() {
                anyhow::bail!("agent {} is declared more than once", agent.id);
            }
        }
        Ok(obstacles)
    }

    pub fn planner(&self) -> Result<VisibilityPlanner> {
        VisibilityPlanner::new(self.planner).context("Invalid planner settings")
    }
}

/// Written by `polynav init`.
pub const STARTER_SCENE: &str = r#"# polynav scene
#
# Coordinates are scene units. The boundary is the walkable outline; holes and
# agent footprints are cut out of it.

planner:
  clearance_step: 0.025
  probe_radius_ratio: 0.02
  snap_step: 0.1
  on_mesh_tolerance: 0.005

region:
  boundary:
    - [0, 0]
    - [10, 0]
    - [10, 4]
    - [4, 4]
    - [4, 10]
    - [0, 10]
  holes: []

agents:
  - id: 1
    footprint:
      shape: rect
      center: [2, 2]
      half_extents: [0.4, 0.4]
  - id: 2
    footprint:
      shape: polygon
      points:
        - [7, 1]
        - [8, 1]
        - [8, 2]
"#;

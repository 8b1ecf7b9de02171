use std::collections::BTreeMap;

use crate::{NavError, Result, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable agent identifier. Ordering is what makes hole application deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentId(pub u64);

/// A temporary polygonal exclusion cut into the walkable region, usually an agent's footprint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Vec2>", into = "Vec<Vec2>"))]
pub struct ObstacleHole {
    outline: Vec<Vec2>,
}

impl TryFrom<Vec<Vec2>> for ObstacleHole {
    type Error = NavError;

    fn try_from(outline: Vec<Vec2>) -> Result<Self> {
        Self::polygon(outline)
    }
}

impl From<ObstacleHole> for Vec<Vec2> {
    fn from(hole: ObstacleHole) -> Self {
        hole.outline
    }
}

impl ObstacleHole {
    pub fn polygon(outline: Vec<Vec2>) -> Result<Self> {
        if outline.len() < 3 {
            return Err(NavError::DegenerateOutline {
                index: 0,
                len: outline.len(),
            });
        }
        Ok(Self { outline })
    }

    /// Axis-aligned rectangle, wound counter-clockwise from the bottom-left corner.
    pub fn rect(center: Vec2, half_extents: Vec2) -> Self {
        let (hx, hy) = (half_extents.x.abs(), half_extents.y.abs());
        Self {
            outline: vec![
                Vec2::new(center.x - hx, center.y - hy),
                Vec2::new(center.x + hx, center.y - hy),
                Vec2::new(center.x + hx, center.y + hy),
                Vec2::new(center.x - hx, center.y + hy),
            ],
        }
    }

    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }
}

/// Footprints of the agents currently standing in a scene.
///
/// A query made on behalf of one agent must avoid everyone else's footprint but not its own.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentObstacles {
    footprints: BTreeMap<AgentId, ObstacleHole>,
}

impl AgentObstacles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an agent's footprint, returning the previous one.
    pub fn insert(&mut self, agent: AgentId, footprint: ObstacleHole) -> Option<ObstacleHole> {
        self.footprints.insert(agent, footprint)
    }

    pub fn remove(&mut self, agent: AgentId) -> Option<ObstacleHole> {
        self.footprints.remove(&agent)
    }

    pub fn get(&self, agent: AgentId) -> Option<&ObstacleHole> {
        self.footprints.get(&agent)
    }

    pub fn len(&self) -> usize {
        self.footprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.footprints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &ObstacleHole)> + '_ {
        self.footprints.iter().map(|(id, hole)| (*id, hole))
    }

    /// Every footprint except `agent`'s own, in ascending agent-id order.
    pub fn holes_excluding(&self, agent: AgentId) -> impl Iterator<Item = &ObstacleHole> + '_ {
        self.footprints
            .iter()
            .filter(move |(id, _)| **id != agent)
            .map(|(_, hole)| hole)
    }
}

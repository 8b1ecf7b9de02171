use crate::math::{closest_point_on_segment, distance_to_segment};
use crate::{NavError, ObstacleHole, Result, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Scene-side overlap query used by the path-clear test and mesh snapping.
///
/// Implementations answer whether a disk touches walkable ground. [`WalkableRegion`] answers it
/// from its own outlines; engines with a physics layer can answer it from colliders instead.
pub trait SurfaceProbe {
    fn overlaps_disk(&self, center: Vec2, radius: f32) -> bool;
}

/// A scene with no collision geometry: every disk overlaps walkable ground.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSurface;

impl SurfaceProbe for OpenSurface {
    fn overlaps_disk(&self, _center: Vec2, _radius: f32) -> bool {
        true
    }
}

/// Points this close to an outline count as lying on it.
const EDGE_TOLERANCE: f32 = 1e-5;

/// Immutable snapshot of the walkable area.
///
/// The first outline is the outer boundary; every further outline is a hole. A point is walkable
/// when it lies inside or on the boundary and strictly inside no hole, so holes only ever remove
/// ground: overlapping holes stay blocked and a hole crossing the boundary cuts that stretch of
/// boundary away.
///
/// Temporary holes are applied by building a new snapshot with [`WalkableRegion::with_holes`],
/// so a query never observes another query's holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WalkableRegion {
    outlines: Vec<Vec<Vec2>>,
}

impl WalkableRegion {
    /// A region with no outlines. Nothing is walkable and the vertex list is empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(boundary: Vec<Vec2>) -> Result<Self> {
        Self::from_outlines(vec![boundary])
    }

    /// Boundary first, then holes.
    pub fn from_outlines(outlines: Vec<Vec<Vec2>>) -> Result<Self> {
        for (index, outline) in outlines.iter().enumerate() {
            if outline.len() < 3 {
                return Err(NavError::DegenerateOutline {
                    index,
                    len: outline.len(),
                });
            }
        }
        Ok(Self { outlines })
    }

    /// Append an outline: the boundary if the region is empty, a hole otherwise.
    pub fn add_outline(&mut self, outline: Vec<Vec2>) -> Result<()> {
        if outline.len() < 3 {
            return Err(NavError::DegenerateOutline {
                index: self.outlines.len(),
                len: outline.len(),
            });
        }
        self.outlines.push(outline);
        Ok(())
    }

    /// Snapshot of this region with `holes` cut out. `self` is left untouched.
    pub fn with_holes<'a>(&self, holes: impl IntoIterator<Item = &'a ObstacleHole>) -> Self {
        let mut region = self.clone();
        region
            .outlines
            .extend(holes.into_iter().map(|hole| hole.outline().to_vec()));
        region
    }

    pub fn outlines(&self) -> &[Vec<Vec2>] {
        &self.outlines
    }

    pub fn boundary(&self) -> Option<&[Vec2]> {
        self.outlines.first().map(Vec::as_slice)
    }

    pub fn holes(&self) -> &[Vec<Vec2>] {
        self.outlines.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    /// Every outline vertex, boundary first, in declaration order.
    pub fn vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.outlines.iter().flatten().copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.outlines.iter().map(Vec::len).sum()
    }

    /// Every closed outline edge `(v[i], v[i + 1])`, wrapping back to each outline's first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.outlines
            .iter()
            .flat_map(|outline| outline_edges(outline))
    }

    /// Whether `p` is walkable: inside or on the boundary, and strictly inside no hole.
    pub fn contains(&self, p: Vec2) -> bool {
        let Some(boundary) = self.boundary() else {
            return false;
        };
        let in_boundary = crossing_parity(boundary, p) || distance_to(boundary, p) <= EDGE_TOLERANCE;
        in_boundary && !self.holes().iter().any(|hole| strictly_inside(hole, p))
    }
}

impl SurfaceProbe for WalkableRegion {
    /// The disk overlaps when its centre is walkable, or when the closest point of some outline
    /// edge lies within `radius` and is itself walkable. Edge stretches covered by a hole, or
    /// hole edges outside the boundary, do not count.
    fn overlaps_disk(&self, center: Vec2, radius: f32) -> bool {
        if self.contains(center) {
            return true;
        }
        self.edges().any(|(a, b)| {
            let q = closest_point_on_segment(center, a, b);
            center.distance(q) <= radius && self.contains(q)
        })
    }
}

fn outline_edges(outline: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    outline
        .iter()
        .copied()
        .zip(outline.iter().copied().cycle().skip(1))
}

/// Even-odd ray cast against a single outline.
fn crossing_parity(outline: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    for (a, b) in outline_edges(outline) {
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

fn distance_to(outline: &[Vec2], p: Vec2) -> f32 {
    outline_edges(outline)
        .map(|(a, b)| distance_to_segment(p, a, b))
        .fold(f32::INFINITY, f32::min)
}

fn strictly_inside(outline: &[Vec2], p: Vec2) -> bool {
    crossing_parity(outline, p) && distance_to(outline, p) > EDGE_TOLERANCE
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct WalkableRegionSerde {
    outlines: Vec<Vec<Vec2>>,
}

#[cfg(feature = "serde")]
impl Serialize for WalkableRegion {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WalkableRegionSerde {
            outlines: self.outlines.clone(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for WalkableRegion {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = WalkableRegionSerde::deserialize(deserializer)?;
        WalkableRegion::from_outlines(data.outlines).map_err(serde::de::Error::custom)
    }
}

//! Visibility-graph construction and the sampling-based geometry queries behind it.

use core::cmp::Ordering;

use crate::{PlannerConfig, SurfaceProbe, Vec2, WalkableRegion, WeightMatrix};

/// Index of the (snapped) query start in every [`VisibilityGraph`].
pub const START_NODE: usize = 0;
/// Index of the (snapped) query goal in every [`VisibilityGraph`].
pub const GOAL_NODE: usize = 1;

/// Whether the straight segment between `a` and `b` stays on walkable ground.
///
/// The segment is sampled every `clearance_step` of its length, endpoints included, and a disk of
/// radius `probe_radius_ratio * length` must overlap the surface at every sample. Short segments
/// therefore use proportionally smaller probes.
///
/// This is an approximation, not polygon clipping: thin obstacles narrower than the probe can be
/// stepped over, and near-degenerate geometry can report a clear line as blocked. Endpoints are
/// put in a canonical order first, so `is_path_clear(a, b)` and `is_path_clear(b, a)` always agree.
pub fn is_path_clear(probe: &dyn SurfaceProbe, a: Vec2, b: Vec2, config: &PlannerConfig) -> bool {
    let (from, to) = match a.total_cmp(&b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    };

    let radius = from.distance(to) * config.probe_radius_ratio;
    let samples = config.clearance_samples();
    (0..=samples).all(|k| {
        let t = k as f32 / samples as f32;
        probe.overlaps_disk(from.lerp(to, t), radius)
    })
}

/// Project `p` onto the region if it is not already on walkable ground.
///
/// Every outline edge is sampled every `snap_step` of its length and the first closest sample
/// wins. Points already on the surface (within `on_mesh_tolerance`) and queries against a region
/// without outlines return `p` unchanged.
pub fn nearest_point_on_mesh(
    region: &WalkableRegion,
    probe: &dyn SurfaceProbe,
    p: Vec2,
    config: &PlannerConfig,
) -> Vec2 {
    if probe.overlaps_disk(p, config.on_mesh_tolerance) {
        return p;
    }

    let samples = config.snap_samples();
    let mut best: Option<(f32, Vec2)> = None;
    for (a, b) in region.edges() {
        for k in 0..samples {
            let q = a.lerp(b, k as f32 / samples as f32);
            let d = p.distance(q);
            match best {
                Some((best_d, _)) if d >= best_d => {}
                _ => best = Some((d, q)),
            }
        }
    }
    best.map_or(p, |(_, q)| q)
}

/// Complete graph over the query ends and the region's vertices, pruned to visible pairs.
///
/// Node [`START_NODE`] is the start and node [`GOAL_NODE`] the goal; region vertices follow in
/// their declaration order, minus any vertex equal to either end.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityGraph {
    nodes: Vec<Vec2>,
    weights: WeightMatrix,
}

impl VisibilityGraph {
    pub fn build(
        vertices: impl IntoIterator<Item = Vec2>,
        start: Vec2,
        goal: Vec2,
        probe: &dyn SurfaceProbe,
        config: &PlannerConfig,
    ) -> Self {
        let mut nodes = vec![start, goal];
        nodes.extend(
            vertices
                .into_iter()
                .filter(|v| *v != start && *v != goal),
        );

        let mut weights = WeightMatrix::new(nodes.len());
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if is_path_clear(probe, nodes[i], nodes[j], config) {
                    weights.set_edge(i, j, Some(nodes[i].distance(nodes[j])));
                }
            }
        }

        tracing::debug!(
            nodes = nodes.len(),
            edges = weights.edge_count(),
            "built visibility graph"
        );

        Self { nodes, weights }
    }

    pub fn nodes(&self) -> &[Vec2] {
        &self.nodes
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Visible pairs `(i, j, distance)` with `i < j`, in index order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        (0..self.nodes.len()).flat_map(move |i| {
            self.weights
                .neighbors(i)
                .filter(move |(j, _)| *j > i)
                .map(move |(j, w)| (i, j, w))
        })
    }
}

use crate::{NavError, Result, Vec2, Vec3};

/// Walk predecessor links from `destination` back to `source` and return the route in travel
/// order, without `source` itself (the agent already stands there).
///
/// When `source == destination` the route is `[source]`. The walk is bounded by the node count;
/// a missing link or a cycle is reported as [`NavError::BrokenPredecessorChain`].
pub fn extract_path(
    predecessors: &[Option<usize>],
    source: usize,
    destination: usize,
) -> Result<Vec<usize>> {
    let limit = predecessors.len();
    for index in [source, destination] {
        if index >= limit {
            return Err(NavError::NodeOutOfRange { index, len: limit });
        }
    }
    if source == destination {
        return Ok(vec![source]);
    }

    let broken = NavError::BrokenPredecessorChain {
        origin: source,
        destination,
        limit,
    };

    let mut route = vec![destination];
    let mut current = destination;
    loop {
        let Some(prev) = predecessors[current] else {
            return Err(broken);
        };
        if prev == source {
            break;
        }
        if prev >= limit || route.len() >= limit {
            return Err(broken);
        }
        route.push(prev);
        current = prev;
    }

    route.reverse();
    Ok(route)
}

/// Map node indices to scene positions, carrying `height` through as every waypoint's `z`.
///
/// # Panics
///
/// Panics if an index is out of range for `nodes`.
pub fn waypoints_from_indices(nodes: &[Vec2], route: &[usize], height: f32) -> Vec<Vec3> {
    route.iter().map(|&i| nodes[i].extend(height)).collect()
}

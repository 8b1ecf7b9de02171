//! Dense single-source shortest paths over a visibility graph.

use crate::{NavError, Result};

/// Symmetric pairwise edge weights with an explicit "no edge" state.
///
/// Stored densely: visibility graphs are complete graphs before pruning, so a flat `n * n` table
/// is both the natural shape and the cheapest one to fill.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    len: usize,
    weights: Vec<Option<f32>>,
}

impl WeightMatrix {
    /// Sentinel accepted by [`WeightMatrix::from_rows`] for a missing edge.
    pub const NO_EDGE: f32 = -1.0;

    /// `len` nodes and no edges.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            weights: vec![None; len * len],
        }
    }

    /// Build from a square table where any negative or NaN entry means "no edge".
    ///
    /// The diagonal is ignored: a node never has an edge to itself.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is not square.
    pub fn from_rows(rows: &[Vec<f32>]) -> Self {
        let len = rows.len();
        let mut matrix = Self::new(len);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), len, "weight table must be square");
            for (j, &w) in row.iter().enumerate() {
                if i != j && w >= 0.0 {
                    matrix.weights[i * len + j] = Some(w);
                }
            }
        }
        matrix
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Weight of the edge `i -> j`, or `None` if the pair is not traversable.
    pub fn weight(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.len || j >= self.len {
            return None;
        }
        self.weights[i * self.len + j]
    }

    /// Set (or clear, with `None`) the undirected edge between `i` and `j`.
    ///
    /// Self-edges and out-of-range indices are ignored; negative or NaN weights clear the edge.
    pub fn set_edge(&mut self, i: usize, j: usize, weight: Option<f32>) {
        if i == j || i >= self.len || j >= self.len {
            return;
        }
        let weight = weight.filter(|w| *w >= 0.0);
        self.weights[i * self.len + j] = weight;
        self.weights[j * self.len + i] = weight;
    }

    pub fn edge_count(&self) -> usize {
        self.weights.iter().filter(|w| w.is_some()).count() / 2
    }

    /// Neighbours of `i` with their edge weights, in index order.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        let row: &[Option<f32>] = if i < self.len {
            &self.weights[i * self.len..(i + 1) * self.len]
        } else {
            &[]
        };
        row.iter()
            .enumerate()
            .filter_map(|(j, w)| w.map(|w| (j, w)))
    }
}

/// Result of a successful search: the shortest-path tree explored up to `destination`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    pub source: usize,
    pub destination: usize,
    /// `predecessors[v]` is the node preceding `v` on its best known path from `source`.
    pub predecessors: Vec<Option<usize>>,
    /// Tentative distances; exact for every node settled before the search stopped.
    pub distances: Vec<f32>,
}

impl ShortestPathTree {
    pub fn distance_to_destination(&self) -> f32 {
        self.distances[self.destination]
    }
}

/// Dijkstra from `source`, stopping as soon as `destination` is settled.
///
/// Selection scans nodes in index order and only replaces the candidate on a strictly smaller
/// distance, so ties go to the lowest index. Returns [`NavError::Unreachable`] when the frontier
/// runs dry before `destination` is reached.
pub fn shortest_path_tree(
    weights: &WeightMatrix,
    source: usize,
    destination: usize,
) -> Result<ShortestPathTree> {
    let n = weights.len();
    for index in [source, destination] {
        if index >= n {
            return Err(NavError::NodeOutOfRange { index, len: n });
        }
    }

    let mut visited = vec![false; n];
    let mut distances = vec![f32::INFINITY; n];
    let mut predecessors: Vec<Option<usize>> = vec![None; n];
    distances[source] = 0.0;

    let mut current = source;
    while current != destination {
        visited[current] = true;
        let base = distances[current];

        for (next, w) in weights.neighbors(current) {
            if visited[next] {
                continue;
            }
            let candidate = base + w;
            if candidate < distances[next] {
                distances[next] = candidate;
                predecessors[next] = Some(current);
            }
        }

        let mut best: Option<(usize, f32)> = None;
        for (i, &d) in distances.iter().enumerate() {
            if visited[i] || !d.is_finite() {
                continue;
            }
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }

        match best {
            Some((next, _)) => current = next,
            None => {
                return Err(NavError::Unreachable {
                    origin: source,
                    destination,
                })
            }
        }
    }

    Ok(ShortestPathTree {
        source,
        destination,
        predecessors,
        distances,
    })
}

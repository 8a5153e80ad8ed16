//! All-pairs shortest-path matrices.
//!
//! [`PathMatrix::build`] runs the triple-nested relaxation (Floyd-Warshall)
//! over a location set and its directed edges, producing the distance matrix
//! and the next-hop matrix together. The two are only ever exposed as a
//! finished pair; a build that fails validation publishes nothing.
//!
//! Unreachable distances and absent next hops are `None` rather than a
//! floating-point infinity, so reachability is always checked explicitly.

use std::time::Instant;

use tracing::debug;

use crate::campus::{Edge, Location, LocationId};
use crate::error::{Error, Result};
use crate::graph::LocationIndex;

/// Distance and next-hop matrices over a dense location indexing.
///
/// Both matrices are stored row-major in flat vectors of `n * n` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatrix {
    index: LocationIndex,
    distances: Vec<Option<f64>>,
    next_hops: Vec<Option<usize>>,
}

impl PathMatrix {
    /// Build the matrix pair for a graph.
    ///
    /// Fails with [`Error::DuplicateLocation`] when a location id repeats,
    /// [`Error::InvalidEdge`] when an edge references an id outside the
    /// location set, [`Error::InvalidWeight`] for negative or non-finite
    /// weights and [`Error::DistanceOverflow`] when a path sum leaves the
    /// finite `f64` range.
    pub fn build(locations: &[Location], edges: &[Edge]) -> Result<Self> {
        let started = Instant::now();
        let index = LocationIndex::build(locations)?;
        let n = index.len();

        let mut distances = vec![None; n * n];
        let mut next_hops = vec![None; n * n];
        for i in 0..n {
            distances[i * n + i] = Some(0.0);
        }

        for edge in edges {
            let (from, to) = resolve_edge(&index, edge)?;
            if !edge.distance.is_finite() || edge.distance < 0.0 {
                return Err(Error::InvalidWeight {
                    source_id: edge.source,
                    target_id: edge.target,
                    weight: edge.distance,
                });
            }
            if from == to {
                // D[i][i] is already 0 and no edge can beat it.
                continue;
            }

            let cell = from * n + to;
            let keep_existing = matches!(distances[cell], Some(existing) if existing <= edge.distance);
            if !keep_existing {
                distances[cell] = Some(edge.distance);
                next_hops[cell] = Some(to);
            }
        }

        relax(&index, &mut distances, &mut next_hops)?;

        debug!(
            locations = n,
            edges = edges.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "built path matrix"
        );

        Ok(Self {
            index,
            distances,
            next_hops,
        })
    }

    /// Number of locations covered by the matrix.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Id ↔ index mapping used by this matrix.
    pub fn index(&self) -> &LocationIndex {
        &self.index
    }

    /// Shortest distance between two dense indices, `None` when unreachable.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        self.distances[self.cell(from, to)]
    }

    /// Index of the location following `from` on a shortest route to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn next_hop(&self, from: usize, to: usize) -> Option<usize> {
        self.next_hops[self.cell(from, to)]
    }

    /// Shortest distance between two location ids.
    ///
    /// `Ok(None)` means both ids are known but no route connects them.
    pub fn distance_between(&self, start: LocationId, end: LocationId) -> Result<Option<f64>> {
        let from = self.resolve(start)?;
        let to = self.resolve(end)?;
        Ok(self.distance(from, to))
    }

    /// One row of the distance matrix.
    ///
    /// # Panics
    ///
    /// Panics if `from` is out of bounds.
    pub fn distance_row(&self, from: usize) -> &[Option<f64>] {
        let n = self.len();
        assert!(from < n, "matrix index out of bounds");
        &self.distances[from * n..(from + 1) * n]
    }

    pub(crate) fn resolve(&self, id: LocationId) -> Result<usize> {
        self.index
            .index_of(id)
            .ok_or(Error::UnknownLocation { id })
    }

    fn cell(&self, from: usize, to: usize) -> usize {
        let n = self.len();
        assert!(from < n && to < n, "matrix index out of bounds");
        from * n + to
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        index: LocationIndex,
        distances: Vec<Option<f64>>,
        next_hops: Vec<Option<usize>>,
    ) -> Self {
        Self {
            index,
            distances,
            next_hops,
        }
    }
}

fn resolve_edge(index: &LocationIndex, edge: &Edge) -> Result<(usize, usize)> {
    let invalid = |missing| Error::InvalidEdge {
        source_id: edge.source,
        target_id: edge.target,
        missing,
    };
    let from = index.index_of(edge.source).ok_or_else(|| invalid(edge.source))?;
    let to = index.index_of(edge.target).ok_or_else(|| invalid(edge.target))?;
    Ok((from, to))
}

fn relax(
    index: &LocationIndex,
    distances: &mut [Option<f64>],
    next_hops: &mut [Option<usize>],
) -> Result<()> {
    let n = index.len();
    for k in 0..n {
        for i in 0..n {
            let Some(via_k) = distances[i * n + k] else {
                continue;
            };
            for j in 0..n {
                let Some(k_to_j) = distances[k * n + j] else {
                    continue;
                };
                let candidate = via_k + k_to_j;
                if !candidate.is_finite() {
                    let id = |position| index.id_at(position).unwrap_or_default();
                    return Err(Error::DistanceOverflow {
                        start: id(i),
                        end: id(j),
                    });
                }
                let cell = i * n + j;
                let improves = match distances[cell] {
                    Some(current) => candidate < current,
                    None => true,
                };
                if improves {
                    distances[cell] = Some(candidate);
                    next_hops[cell] = next_hops[i * n + k];
                }
            }
        }
    }
    Ok(())
}

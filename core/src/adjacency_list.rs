use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::trace;

use crate::store::{canonical_pair, Degrees, EdgeKind, GraphStore, VertexId};

/// Adjacency-list backend: one ordered out-neighbor list per vertex.
///
/// O(1) amortized edge insertion, O(degree) neighbor lookup. Vertex removal
/// scans every other list to strip the vertex — O(V·degree), acceptable at
/// the scale this crate targets. Symmetric edges are stored in both
/// directions; the canonical pair set remembers which pairs are symmetric
/// so removal and degree computation can tell them apart from two
/// independent directed edges.
#[derive(Debug, Clone)]
pub struct AdjacencyListGraph<V: VertexId> {
    adjacency: IndexMap<V, Vec<V>>,
    symmetric: HashSet<(V, V)>,
}

impl<V: VertexId> Default for AdjacencyListGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexId> AdjacencyListGraph<V> {
    pub fn new() -> Self {
        Self {
            adjacency: IndexMap::new(),
            symmetric: HashSet::new(),
        }
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            adjacency: IndexMap::with_capacity(vertex_count),
            symmetric: HashSet::new(),
        }
    }

    /// Appends `to` to `from`'s list unless already present. Callers insert
    /// both endpoints first.
    fn link(&mut self, from: &V, to: &V) -> bool {
        match self.adjacency.get_mut(from) {
            Some(list) if !list.contains(to) => {
                list.push(to.clone());
                true
            }
            _ => false,
        }
    }

    /// Removes `to` from `from`'s list if present.
    fn unlink(&mut self, from: &V, to: &V) -> bool {
        match self.adjacency.get_mut(from) {
            Some(list) => match list.iter().position(|n| n == to) {
                Some(pos) => {
                    list.remove(pos);
                    true
                }
                None => false,
            },
            None => false,
        }
    }
}

impl<V: VertexId> GraphStore for AdjacencyListGraph<V> {
    type Vertex = V;

    fn insert_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, Vec::new());
        true
    }

    fn insert_edge(&mut self, origin: V, destination: V, kind: EdgeKind) -> bool {
        self.insert_vertex(origin.clone());
        self.insert_vertex(destination.clone());

        match kind {
            EdgeKind::Directed => {
                if self.edge_exists(&origin, &destination) {
                    return false;
                }
                self.link(&origin, &destination)
            }
            EdgeKind::Symmetric => {
                let pair = canonical_pair(&origin, &destination);
                if self.symmetric.contains(&pair) {
                    return false;
                }
                self.link(&origin, &destination);
                if origin != destination {
                    self.link(&destination, &origin);
                }
                // Tagging an existing directed pair as symmetric is a state
                // change even when both directions were already present.
                self.symmetric.insert(pair);
                true
            }
        }
    }

    fn remove_edge(&mut self, origin: &V, destination: &V) -> bool {
        let pair = canonical_pair(origin, destination);
        if self.symmetric.remove(&pair) {
            self.unlink(origin, destination);
            self.unlink(destination, origin);
            return true;
        }
        self.unlink(origin, destination)
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        if !self.adjacency.contains_key(vertex) {
            return false;
        }
        for list in self.adjacency.values_mut() {
            list.retain(|n| n != vertex);
        }
        self.adjacency.shift_remove(vertex);
        self.symmetric.retain(|(a, b)| a != vertex && b != vertex);
        trace!(?vertex, "removed vertex and incident edges");
        true
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    fn edge_exists(&self, origin: &V, destination: &V) -> bool {
        self.adjacency
            .get(origin)
            .is_some_and(|list| list.contains(destination))
    }

    fn neighbors(&self, vertex: &V) -> Vec<V> {
        self.adjacency.get(vertex).cloned().unwrap_or_default()
    }

    fn vertices(&self) -> Vec<V> {
        self.adjacency.keys().cloned().collect()
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        let records: usize = self.adjacency.values().map(Vec::len).sum();
        // Each non-loop symmetric pair occupies two list entries but is one edge.
        let doubled = self.symmetric.iter().filter(|(a, b)| a != b).count();
        records - doubled
    }

    fn vertex_degrees(&self) -> HashMap<V, Degrees> {
        let mut degrees: HashMap<V, Degrees> = self
            .adjacency
            .keys()
            .map(|v| (v.clone(), Degrees::default()))
            .collect();

        for (vertex, list) in &self.adjacency {
            if let Some(entry) = degrees.get_mut(vertex) {
                entry.outgoing = list.len();
            }
            for neighbor in list {
                if let Some(entry) = degrees.get_mut(neighbor) {
                    entry.incoming += 1;
                }
            }
        }
        for entry in degrees.values_mut() {
            entry.total = entry.incoming + entry.outgoing;
        }
        // A symmetric edge is one edge: drop its double-counted half from
        // each endpoint's total.
        for (a, b) in &self.symmetric {
            if let Some(entry) = degrees.get_mut(a) {
                entry.total -= 1;
            }
            if a != b {
                if let Some(entry) = degrees.get_mut(b) {
                    entry.total -= 1;
                }
            }
        }
        degrees
    }
}

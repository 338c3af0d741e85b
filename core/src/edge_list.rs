use std::collections::HashMap;

use indexmap::IndexSet;
use tracing::trace;

use crate::store::{canonical_pair, Degrees, EdgeKind, GraphStore, VertexId};

/// One stored edge. Symmetric records are kept in canonical endpoint order
/// so duplicate undirected inserts collapse onto the same record.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EdgeRecord<V> {
    origin: V,
    destination: V,
    kind: EdgeKind,
}

impl<V: VertexId> EdgeRecord<V> {
    /// Whether this record carries the directed relation origin→destination.
    fn covers(&self, origin: &V, destination: &V) -> bool {
        (self.origin == *origin && self.destination == *destination)
            || (self.kind == EdgeKind::Symmetric
                && self.origin == *destination
                && self.destination == *origin)
    }

    fn touches(&self, vertex: &V) -> bool {
        self.origin == *vertex || self.destination == *vertex
    }
}

/// Edge-list backend: an ordered vertex set plus a flat sequence of tagged
/// edge records.
///
/// Every query walks the whole edge sequence — O(E) neighbor lookup is the
/// backend's defining cost. Because each record carries its own kind, mixed
/// directed/symmetric graphs are representable without any per-graph mode.
#[derive(Debug, Clone)]
pub struct EdgeListGraph<V: VertexId> {
    vertices: IndexSet<V>,
    edges: Vec<EdgeRecord<V>>,
}

impl<V: VertexId> Default for EdgeListGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexId> EdgeListGraph<V> {
    pub fn new() -> Self {
        Self {
            vertices: IndexSet::new(),
            edges: Vec::new(),
        }
    }

    /// Pre-allocate for known vertex and edge counts.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            vertices: IndexSet::with_capacity(vertex_count),
            edges: Vec::with_capacity(edge_count),
        }
    }
}

impl<V: VertexId> GraphStore for EdgeListGraph<V> {
    type Vertex = V;

    fn insert_vertex(&mut self, vertex: V) -> bool {
        self.vertices.insert(vertex)
    }

    fn insert_edge(&mut self, origin: V, destination: V, kind: EdgeKind) -> bool {
        self.insert_vertex(origin.clone());
        self.insert_vertex(destination.clone());

        match kind {
            EdgeKind::Directed => {
                if self.edge_exists(&origin, &destination) {
                    return false;
                }
                self.edges.push(EdgeRecord {
                    origin,
                    destination,
                    kind,
                });
                true
            }
            EdgeKind::Symmetric => {
                let (first, second) = canonical_pair(&origin, &destination);
                let already = self.edges.iter().any(|e| {
                    e.kind == EdgeKind::Symmetric
                        && e.origin == first
                        && e.destination == second
                });
                if already {
                    return false;
                }
                // Upgrade: any directed record between the pair is subsumed
                // by the symmetric one.
                self.edges.retain(|e| {
                    !((e.origin == first && e.destination == second)
                        || (e.origin == second && e.destination == first))
                });
                self.edges.push(EdgeRecord {
                    origin: first,
                    destination: second,
                    kind,
                });
                true
            }
        }
    }

    fn remove_edge(&mut self, origin: &V, destination: &V) -> bool {
        match self.edges.iter().position(|e| e.covers(origin, destination)) {
            Some(index) => {
                self.edges.remove(index);
                true
            }
            None => false,
        }
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        if !self.vertices.shift_remove(vertex) {
            return false;
        }
        self.edges.retain(|e| !e.touches(vertex));
        trace!(?vertex, "removed vertex and incident edge records");
        true
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    fn edge_exists(&self, origin: &V, destination: &V) -> bool {
        self.edges.iter().any(|e| e.covers(origin, destination))
    }

    fn neighbors(&self, vertex: &V) -> Vec<V> {
        let mut found = Vec::new();
        for edge in &self.edges {
            if edge.origin == *vertex {
                found.push(edge.destination.clone());
            } else if edge.kind == EdgeKind::Symmetric && edge.destination == *vertex {
                found.push(edge.origin.clone());
            }
        }
        found
    }

    fn vertices(&self) -> Vec<V> {
        self.vertices.iter().cloned().collect()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn vertex_degrees(&self) -> HashMap<V, Degrees> {
        let mut directed_out: HashMap<&V, usize> = HashMap::new();
        let mut directed_in: HashMap<&V, usize> = HashMap::new();
        let mut symmetric: HashMap<&V, usize> = HashMap::new();

        for edge in &self.edges {
            match edge.kind {
                EdgeKind::Directed => {
                    *directed_out.entry(&edge.origin).or_default() += 1;
                    *directed_in.entry(&edge.destination).or_default() += 1;
                }
                EdgeKind::Symmetric => {
                    *symmetric.entry(&edge.origin).or_default() += 1;
                    if edge.origin != edge.destination {
                        *symmetric.entry(&edge.destination).or_default() += 1;
                    }
                }
            }
        }

        self.vertices
            .iter()
            .map(|vertex| {
                let d_out = directed_out.get(vertex).copied().unwrap_or(0);
                let d_in = directed_in.get(vertex).copied().unwrap_or(0);
                let s = symmetric.get(vertex).copied().unwrap_or(0);
                (
                    vertex.clone(),
                    Degrees {
                        incoming: d_in + s,
                        outgoing: d_out + s,
                        total: d_out + d_in + s,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_inserts_collapse_on_canonical_order() {
        let mut g = EdgeListGraph::new();
        assert!(g.insert_edge("B", "A", EdgeKind::Symmetric));
        assert!(!g.insert_edge("A", "B", EdgeKind::Symmetric));
        assert_eq!(g.edge_count(), 1);
        assert!(g.edge_exists(&"A", &"B"));
        assert!(g.edge_exists(&"B", &"A"));
    }

    #[test]
    fn directed_edges_stay_one_way() {
        let mut g = EdgeListGraph::new();
        g.insert_edge(1, 2, EdgeKind::Directed);
        assert!(g.edge_exists(&1, &2));
        assert!(!g.edge_exists(&2, &1));
        // The reverse direction is a distinct edge.
        assert!(g.insert_edge(2, 1, EdgeKind::Directed));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn symmetric_upgrade_subsumes_directed_records() {
        let mut g = EdgeListGraph::new();
        g.insert_edge("A", "B", EdgeKind::Directed);
        assert!(g.insert_edge("B", "A", EdgeKind::Symmetric));
        assert_eq!(g.edge_count(), 1);
        assert!(g.edge_exists(&"A", &"B"));
        assert!(g.edge_exists(&"B", &"A"));
        assert!(g.remove_edge(&"A", &"B"));
        assert_eq!(g.edge_count(), 0);
        assert!(!g.edge_exists(&"B", &"A"));
    }

    #[test]
    fn neighbors_scan_in_discovery_order() {
        let mut g = EdgeListGraph::new();
        g.insert_edge("A", "B", EdgeKind::Symmetric);
        g.insert_edge("C", "A", EdgeKind::Symmetric);
        g.insert_edge("A", "D", EdgeKind::Directed);
        // Symmetric (C,A) is stored canonically as (A,C) with A as origin.
        assert_eq!(g.neighbors(&"A"), vec!["B", "C", "D"]);
        assert_eq!(g.neighbors(&"D"), Vec::<&str>::new());
        assert!(g.neighbors(&"missing").is_empty());
    }

    #[test]
    fn remove_vertex_retains_unrelated_edges() {
        let mut g = EdgeListGraph::new();
        g.insert_edge(1, 2, EdgeKind::Directed);
        g.insert_edge(2, 3, EdgeKind::Symmetric);
        g.insert_edge(3, 4, EdgeKind::Directed);
        assert!(g.remove_vertex(&2));
        assert_eq!(g.edge_count(), 1);
        assert!(g.edge_exists(&3, &4));
        assert!(!g.contains_vertex(&2));
        assert!(!g.remove_vertex(&2));
    }

    #[test]
    fn degrees_mixed_kinds() {
        let mut g = EdgeListGraph::new();
        g.insert_edge("A", "B", EdgeKind::Directed);
        g.insert_edge("B", "C", EdgeKind::Symmetric);
        let degrees = g.vertex_degrees();
        assert_eq!(
            degrees[&"B"],
            Degrees {
                incoming: 2,
                outgoing: 1,
                total: 2
            }
        );
        assert_eq!(
            degrees[&"C"],
            Degrees {
                incoming: 1,
                outgoing: 1,
                total: 1
            }
        );
    }

    #[test]
    fn degrees_pure_undirected_collapse() {
        let mut g = EdgeListGraph::new();
        g.insert_edge(1, 2, EdgeKind::Symmetric);
        g.insert_edge(2, 3, EdgeKind::Symmetric);
        g.insert_edge(2, 4, EdgeKind::Symmetric);
        let d = g.vertex_degrees();
        assert_eq!(d[&2].incoming, 3);
        assert_eq!(d[&2].outgoing, 3);
        assert_eq!(d[&2].total, 3);
    }

    #[test]
    fn removing_absent_edge_is_noop() {
        let mut g = EdgeListGraph::new();
        g.insert_edge("A", "B", EdgeKind::Directed);
        assert!(!g.remove_edge(&"B", &"A"));
        assert!(!g.remove_edge(&"A", &"missing"));
        assert_eq!(g.edge_count(), 1);
    }
}

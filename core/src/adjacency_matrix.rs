use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use tracing::trace;

use crate::store::{canonical_pair, Degrees, EdgeKind, GraphStore, VertexId};

/// Adjacency-matrix backend: a dense 0/1 presence matrix indexed by vertex
/// position in the insertion-ordered vertex set.
///
/// O(1) edge lookup. The defining cost sits on the vertex side: insertion
/// grows every row by one column plus a fresh row (O(V)), and removal strips
/// a row and a column from everything that remains (O(V²) worst case).
/// Neighbor queries come back ordered by vertex insertion index, i.e. by
/// matrix column.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrixGraph<V: VertexId> {
    vertices: IndexSet<V>,
    matrix: Vec<Vec<u8>>,
    symmetric: HashSet<(V, V)>,
}

impl<V: VertexId> Default for AdjacencyMatrixGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexId> AdjacencyMatrixGraph<V> {
    pub fn new() -> Self {
        Self {
            vertices: IndexSet::new(),
            matrix: Vec::new(),
            symmetric: HashSet::new(),
        }
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: IndexSet::with_capacity(vertex_count),
            matrix: Vec::with_capacity(vertex_count),
            symmetric: HashSet::new(),
        }
    }

    fn cell(&self, origin: &V, destination: &V) -> Option<(usize, usize)> {
        let row = self.vertices.get_index_of(origin)?;
        let column = self.vertices.get_index_of(destination)?;
        Some((row, column))
    }
}

impl<V: VertexId> GraphStore for AdjacencyMatrixGraph<V> {
    type Vertex = V;

    fn insert_vertex(&mut self, vertex: V) -> bool {
        if !self.vertices.insert(vertex) {
            return false;
        }
        // Grow by one zero-filled column, then one zero-filled row,
        // preserving every existing entry.
        for row in &mut self.matrix {
            row.push(0);
        }
        self.matrix.push(vec![0; self.vertices.len()]);
        true
    }

    fn insert_edge(&mut self, origin: V, destination: V, kind: EdgeKind) -> bool {
        self.insert_vertex(origin.clone());
        self.insert_vertex(destination.clone());
        let Some((row, column)) = self.cell(&origin, &destination) else {
            return false;
        };

        match kind {
            EdgeKind::Directed => {
                if self.matrix[row][column] == 1 {
                    return false;
                }
                self.matrix[row][column] = 1;
                true
            }
            EdgeKind::Symmetric => {
                let pair = canonical_pair(&origin, &destination);
                if self.symmetric.contains(&pair) {
                    return false;
                }
                self.matrix[row][column] = 1;
                self.matrix[column][row] = 1;
                self.symmetric.insert(pair);
                true
            }
        }
    }

    fn remove_edge(&mut self, origin: &V, destination: &V) -> bool {
        let Some((row, column)) = self.cell(origin, destination) else {
            return false;
        };
        let pair = canonical_pair(origin, destination);
        if self.symmetric.remove(&pair) {
            self.matrix[row][column] = 0;
            self.matrix[column][row] = 0;
            return true;
        }
        if self.matrix[row][column] == 1 {
            self.matrix[row][column] = 0;
            return true;
        }
        false
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(index) = self.vertices.get_index_of(vertex) else {
            return false;
        };
        // shift_remove keeps the remaining vertices aligned with the
        // shifted matrix indices.
        self.vertices.shift_remove_index(index);
        self.matrix.remove(index);
        for row in &mut self.matrix {
            row.remove(index);
        }
        self.symmetric.retain(|(a, b)| a != vertex && b != vertex);
        trace!(?vertex, "removed vertex row and column");
        true
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    fn edge_exists(&self, origin: &V, destination: &V) -> bool {
        self.cell(origin, destination)
            .is_some_and(|(row, column)| self.matrix[row][column] == 1)
    }

    fn neighbors(&self, vertex: &V) -> Vec<V> {
        let Some(row) = self.vertices.get_index_of(vertex) else {
            return Vec::new();
        };
        self.matrix[row]
            .iter()
            .enumerate()
            .filter_map(|(column, &cell)| {
                if cell == 1 {
                    self.vertices.get_index(column).cloned()
                } else {
                    None
                }
            })
            .collect()
    }

    fn vertices(&self) -> Vec<V> {
        self.vertices.iter().cloned().collect()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        let ones: usize = self
            .matrix
            .iter()
            .map(|row| row.iter().map(|&c| c as usize).sum::<usize>())
            .sum();
        // Each non-loop symmetric pair sets two cells but is one edge.
        let doubled = self.symmetric.iter().filter(|(a, b)| a != b).count();
        ones - doubled
    }

    fn vertex_degrees(&self) -> HashMap<V, Degrees> {
        let mut degrees = HashMap::with_capacity(self.vertices.len());
        for (index, vertex) in self.vertices.iter().enumerate() {
            let outgoing: usize = self.matrix[index].iter().map(|&c| c as usize).sum();
            let incoming: usize = self.matrix.iter().map(|row| row[index] as usize).sum();
            degrees.insert(
                vertex.clone(),
                Degrees {
                    incoming,
                    outgoing,
                    total: incoming + outgoing,
                },
            );
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_insert_grows_matrix() {
        let mut g = AdjacencyMatrixGraph::new();
        assert!(g.insert_vertex("A"));
        assert!(g.insert_vertex("B"));
        assert!(!g.insert_vertex("A"));
        assert_eq!(g.vertex_count(), 2);
        assert!(g.neighbors(&"A").is_empty());
    }

    #[test]
    fn edge_insert_preserves_existing_entries() {
        let mut g = AdjacencyMatrixGraph::new();
        g.insert_edge(1, 2, EdgeKind::Directed);
        g.insert_vertex(3);
        assert!(g.edge_exists(&1, &2));
        assert!(!g.edge_exists(&2, &1));
        g.insert_edge(3, 1, EdgeKind::Symmetric);
        assert!(g.edge_exists(&1, &3));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn neighbors_ordered_by_insertion_index() {
        let mut g = AdjacencyMatrixGraph::new();
        g.insert_vertex("C");
        g.insert_vertex("A");
        g.insert_vertex("B");
        g.insert_edge("A", "B", EdgeKind::Directed);
        g.insert_edge("A", "C", EdgeKind::Directed);
        // Column order, not label order or edge-insertion order.
        assert_eq!(g.neighbors(&"A"), vec!["C", "B"]);
    }

    #[test]
    fn remove_vertex_shifts_indices() {
        let mut g = AdjacencyMatrixGraph::new();
        g.insert_edge("A", "B", EdgeKind::Directed);
        g.insert_edge("B", "C", EdgeKind::Directed);
        g.insert_edge("C", "D", EdgeKind::Directed);
        assert!(g.remove_vertex(&"B"));
        assert_eq!(g.vertex_count(), 3);
        // Surviving edge must still line up after the row/column strip.
        assert!(g.edge_exists(&"C", &"D"));
        assert!(!g.edge_exists(&"A", &"B"));
        assert!(g.neighbors(&"A").is_empty());
        assert!(!g.remove_vertex(&"B"));
    }

    #[test]
    fn symmetric_edge_sets_both_cells() {
        let mut g = AdjacencyMatrixGraph::new();
        g.insert_edge("X", "Y", EdgeKind::Symmetric);
        assert!(g.edge_exists(&"X", &"Y"));
        assert!(g.edge_exists(&"Y", &"X"));
        assert!(g.remove_edge(&"Y", &"X"));
        assert!(!g.edge_exists(&"X", &"Y"));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn duplicate_edges_are_noops() {
        let mut g = AdjacencyMatrixGraph::new();
        assert!(g.insert_edge(1, 2, EdgeKind::Symmetric));
        assert!(!g.insert_edge(2, 1, EdgeKind::Symmetric));
        assert!(!g.insert_edge(1, 2, EdgeKind::Directed));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn degrees_directed() {
        let mut g = AdjacencyMatrixGraph::new();
        g.insert_edge(0, 1, EdgeKind::Directed);
        g.insert_edge(2, 1, EdgeKind::Directed);
        let degrees = g.vertex_degrees();
        assert_eq!(
            degrees[&1],
            Degrees {
                incoming: 2,
                outgoing: 0,
                total: 2
            }
        );
        assert_eq!(degrees[&0].outgoing, 1);
    }

    #[test]
    fn degrees_undirected_collapse() {
        let mut g = AdjacencyMatrixGraph::new();
        g.insert_edge("A", "B", EdgeKind::Symmetric);
        g.insert_edge("A", "C", EdgeKind::Symmetric);
        let degrees = g.vertex_degrees();
        assert_eq!(
            degrees[&"A"],
            Degrees {
                incoming: 2,
                outgoing: 2,
                total: 2
            }
        );
    }

    #[test]
    fn removing_missing_edge_is_noop() {
        let mut g = AdjacencyMatrixGraph::new();
        g.insert_vertex("A");
        assert!(!g.remove_edge(&"A", &"A"));
        assert!(!g.remove_edge(&"A", &"nope"));
    }
}

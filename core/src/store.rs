use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Requirements on a vertex identifier.
///
/// `Ord` lets the edge-list backend normalize symmetric pairs into a
/// canonical order; `Hash + Eq` drive set and map membership everywhere
/// else. Blanket-implemented, so any suitable type (integers, strings,
/// interned IDs) works as-is.
pub trait VertexId: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> VertexId for T {}

/// Directedness of a single edge.
///
/// `Symmetric` records the reverse relation alongside the forward one, so an
/// undirected graph is a graph whose edges are all symmetric. The tag lives
/// on the edge, not on the graph — the same instance can mix both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeKind {
    Directed,
    Symmetric,
}

/// Degree triple for one vertex, computed fresh from the current edge set.
///
/// With `d_out`/`d_in` the counts of directed records touching the vertex
/// and `s` its count of incident symmetric edges:
/// `outgoing = d_out + s`, `incoming = d_in + s`, `total = d_out + d_in + s`.
/// A purely directed graph therefore satisfies `total == incoming + outgoing`
/// and a purely undirected one `incoming == outgoing == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Degrees {
    pub incoming: usize,
    pub outgoing: usize,
    pub total: usize,
}

/// The graph ADT contract shared by every backend.
///
/// All operations are total: bad input is a no-op or an empty/negative
/// answer, never an error. Mutators return whether the graph changed.
pub trait GraphStore {
    type Vertex: VertexId;

    /// Adds a vertex if absent. Idempotent.
    fn insert_vertex(&mut self, vertex: Self::Vertex) -> bool;

    /// Records an edge, auto-inserting missing endpoints.
    ///
    /// A `Symmetric` edge records the reverse relation as well.
    /// Re-inserting an existing edge is a no-op, as is a `Directed` insert
    /// already covered by a stored symmetric edge. A `Symmetric` insert over
    /// an existing directed edge upgrades it in place (the missing reverse
    /// direction appears, no duplicate pair results).
    fn insert_edge(
        &mut self,
        origin: Self::Vertex,
        destination: Self::Vertex,
        kind: EdgeKind,
    ) -> bool;

    /// Removes the stored edge origin→destination if present. If that edge
    /// is symmetric, the reverse relation goes with it — the stored tag
    /// decides, there is no per-call flag.
    fn remove_edge(&mut self, origin: &Self::Vertex, destination: &Self::Vertex) -> bool;

    /// Removes a vertex and every edge incident to it, in either direction.
    fn remove_vertex(&mut self, vertex: &Self::Vertex) -> bool;

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// True iff the directed relation origin→destination is recorded,
    /// explicitly or through a symmetric edge. False when either endpoint
    /// is absent.
    fn edge_exists(&self, origin: &Self::Vertex, destination: &Self::Vertex) -> bool;

    /// Vertices reachable from `vertex` via one outgoing relation. Empty
    /// when the vertex is absent. The matrix backend orders the result by
    /// vertex insertion index; the list and edge-list backends return
    /// discovery order.
    fn neighbors(&self, vertex: &Self::Vertex) -> Vec<Self::Vertex>;

    /// All vertices, in insertion order.
    fn vertices(&self) -> Vec<Self::Vertex>;

    fn vertex_count(&self) -> usize;

    /// Number of stored edges; a symmetric edge counts once.
    fn edge_count(&self) -> usize;

    /// Degree triple per vertex, derived from the current edges on each call.
    fn vertex_degrees(&self) -> HashMap<Self::Vertex, Degrees>;

    /// True iff the sequence is trivial (fewer than two vertices) or every
    /// consecutive pair is a stored directed relation.
    fn is_valid_path(&self, path: &[Self::Vertex]) -> bool {
        path.windows(2)
            .all(|pair| self.edge_exists(&pair[0], &pair[1]))
    }
}

/// Canonical ordering for a symmetric pair, so (a, b) and (b, a) collapse
/// onto one key.
pub(crate) fn canonical_pair<V: VertexId>(a: &V, b: &V) -> (V, V) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

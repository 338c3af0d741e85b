use std::time::Instant;

use graphrep_core::{
    breadth_first, rank_by_degree, shortest_path, AdjacencyListGraph, AdjacencyMatrixGraph,
    EdgeKind, EdgeListGraph, GraphStore,
};
use tracing_subscriber::EnvFilter;

/// Dense-matrix storage is O(V²); cap it so "all" stays runnable.
const MATRIX_NODE_CAP: u32 = 2_000;
/// Edge-list queries are O(E) each; cap the vertex count accordingly.
const EDGE_LIST_NODE_CAP: u32 = 20_000;

type Generator = fn(&mut dyn GraphStore<Vertex = u32>, u32, u64);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: graphrep-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all     Run every topology (default)");
        println!("  chain   Single directed path (deep traversal)");
        println!("  star    One hub with undirected spokes (wide frontier)");
        println!("  ring    Ring lattice with shortcut rewiring (small-world)");
        println!("  random  Uniform random directed edges");
        println!();
        println!("Default node_count: 10000 (matrix capped at {MATRIX_NODE_CAP},");
        println!("edge list capped at {EDGE_LIST_NODE_CAP}).");
        return;
    }

    if node_count == 0 {
        eprintln!("node_count must be at least 1");
        return;
    }

    let generators: Vec<(&str, Generator)> = match mode {
        "chain" => vec![("Chain", gen_chain)],
        "star" => vec![("Star", gen_star)],
        "ring" => vec![("Ring lattice", gen_ring)],
        "random" => vec![("Uniform random", gen_random)],
        "all" => vec![
            ("Chain", gen_chain as Generator),
            ("Star", gen_star),
            ("Ring lattice", gen_ring),
            ("Uniform random", gen_random),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    println!("graphrep-bench");
    println!("==============");
    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: Generator, node_count: u32) {
    println!();
    println!("--- {} ---", name);
    println!(
        "{:>16} {:>9} {:>9} {:>11} {:>11} {:>11} {:>11}",
        "backend", "nodes", "edges", "populate", "bfs", "path", "degrees"
    );

    let mut list = AdjacencyListGraph::with_capacity(node_count as usize);
    measure("adjacency-list", &mut list, generator, node_count);

    let matrix_nodes = node_count.min(MATRIX_NODE_CAP);
    let mut matrix = AdjacencyMatrixGraph::with_capacity(matrix_nodes as usize);
    measure("adjacency-matrix", &mut matrix, generator, matrix_nodes);

    let edge_list_nodes = node_count.min(EDGE_LIST_NODE_CAP);
    let mut edge_list = EdgeListGraph::with_capacity(edge_list_nodes as usize, 0);
    measure("edge-list", &mut edge_list, generator, edge_list_nodes);
}

fn measure(
    label: &str,
    graph: &mut dyn GraphStore<Vertex = u32>,
    generator: Generator,
    node_count: u32,
) {
    let t = Instant::now();
    generator(graph, node_count, 42);
    let populate = t.elapsed();

    let t = Instant::now();
    let order = breadth_first(graph, &0);
    let bfs = t.elapsed();

    let far = node_count.saturating_sub(1);
    let t = Instant::now();
    let path = shortest_path(graph, &0, &far);
    let path_elapsed = t.elapsed();

    let t = Instant::now();
    let _ranked = rank_by_degree(graph, 5);
    let degrees = t.elapsed();

    println!(
        "{:>16} {:>9} {:>9} {:>9.1}ms {:>9.1}ms {:>9.1}ms {:>9.1}ms   reached {} / path {}",
        label,
        graph.vertex_count(),
        graph.edge_count(),
        populate.as_secs_f64() * 1000.0,
        bfs.as_secs_f64() * 1000.0,
        path_elapsed.as_secs_f64() * 1000.0,
        degrees.as_secs_f64() * 1000.0,
        order.len(),
        path.map_or_else(|| "none".to_string(), |p| format!("{} hops", p.len() - 1)),
    );
}

// ---------------------------------------------------------------------------
// Generators — deterministic, parameterized only by node count and seed
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Single directed path 0→1→…→n−1. Deepest possible BFS, longest path.
fn gen_chain(graph: &mut dyn GraphStore<Vertex = u32>, node_count: u32, _seed: u64) {
    for i in 0..node_count.saturating_sub(1) {
        graph.insert_edge(i, i + 1, EdgeKind::Directed);
    }
}

/// Hub 0 with undirected spokes to every other vertex. One-hop frontier of
/// maximum width.
fn gen_star(graph: &mut dyn GraphStore<Vertex = u32>, node_count: u32, _seed: u64) {
    for leaf in 1..node_count {
        graph.insert_edge(0, leaf, EdgeKind::Symmetric);
    }
}

/// Ring lattice: each vertex linked to its 4 nearest forward neighbors,
/// with 5% of links rewired to a random vertex. Small-world topology —
/// high clustering, short paths.
fn gen_ring(graph: &mut dyn GraphStore<Vertex = u32>, node_count: u32, seed: u64) {
    let mut rng = FastRng::new(seed);
    let k = 4u32;
    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            if rng.next_f64() < 0.05 {
                let rewired = rng.next(node_count as u64) as u32;
                if rewired != i {
                    graph.insert_edge(i, rewired, EdgeKind::Symmetric);
                    continue;
                }
            }
            if neighbor != i {
                graph.insert_edge(i, neighbor, EdgeKind::Symmetric);
            }
        }
    }
}

/// Uniform random directed edges, ~4 per vertex. No structure; baseline.
fn gen_random(graph: &mut dyn GraphStore<Vertex = u32>, node_count: u32, seed: u64) {
    let mut rng = FastRng::new(seed);
    // Insert vertices up front so isolated ones exist too.
    for i in 0..node_count {
        graph.insert_vertex(i);
    }
    for _ in 0..node_count as u64 * 4 {
        let from = rng.next(node_count as u64) as u32;
        let to = rng.next(node_count as u64) as u32;
        if from != to {
            graph.insert_edge(from, to, EdgeKind::Directed);
        }
    }
}

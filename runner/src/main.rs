extern crate route_graph;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use route_graph::{Graph, GraphConfig, GraphError};
use std::time::Instant;

const VERTICES: u32 = 5_000;
const EDGES_PER_VERTEX: u32 = 6;
const QUERIES: usize = 2_000;
const MAX_WEIGHT: f64 = 100.0;

fn generate_graph(rng: &mut StdRng) -> Result<Graph<u32>, GraphError> {
    let mut graph = Graph::with_config(GraphConfig::default())?;
    for label in 0..VERTICES {
        graph.add_vertex(label)?;
    }
    for begin in 0..VERTICES {
        for _ in 0..EDGES_PER_VERTEX {
            let end = rng.gen_range(0..VERTICES);
            graph.add_edge(&begin, &end, rng.gen_range(0.0..MAX_WEIGHT))?;
        }
    }
    Ok(graph)
}

fn main() -> Result<(), GraphError> {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(2025);

    let now = Instant::now();
    let graph = generate_graph(&mut rng)?;
    let build_time = now.elapsed();
    log::info!(
        "built graph with {} vertices and {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );

    let queries: Vec<(u32, u32)> = (0..QUERIES)
        .map(|_| (rng.gen_range(0..VERTICES), rng.gen_range(0..VERTICES)))
        .collect();

    let now = Instant::now();
    let mut reachable = 0;
    for (begin, end) in &queries {
        if graph.cheapest_route(begin, end)?.is_some() {
            reachable += 1;
        }
    }
    let sequential_time = now.elapsed();

    let now = Instant::now();
    let parallel = graph.cheapest_routes(&queries)?;
    let parallel_time = now.elapsed();
    let parallel_reachable = parallel
        .into_iter()
        .filter_map(|result| result.transpose())
        .collect::<Result<Vec<_>, _>>()?
        .len();

    println!("Build time: {:.6}s", build_time.as_secs_f64());
    println!(
        "Sequential: {} queries, {} reachable, {:.6}s",
        queries.len(),
        reachable,
        sequential_time.as_secs_f64()
    );
    println!(
        "Parallel: {} queries, {} reachable, {:.6}s",
        queries.len(),
        parallel_reachable,
        parallel_time.as_secs_f64()
    );
    Ok(())
}

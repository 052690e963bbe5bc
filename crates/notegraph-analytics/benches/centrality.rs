use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use notegraph_analytics::KnowledgeGraph;
use notegraph_analytics::community::{CommunityConfig, detect_communities};
use notegraph_analytics::metrics::{
    betweenness::betweenness_centrality,
    closeness::closeness_centrality,
    pagerank::{PageRankConfig, pagerank},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [100, 500, 2_000];

/// Random link graph with about `avg_links` outgoing links per note.
fn generate_graph(nodes: usize, avg_links: usize, seed: u64) -> KnowledgeGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = (0..nodes).map(|i| format!("notes/{i:05}")).collect();
    let edges: Vec<(&str, &str)> = (0..nodes * avg_links)
        .map(|_| {
            let a = rng.gen_range(0..nodes);
            let b = rng.gen_range(0..nodes);
            (names[a].as_str(), names[b].as_str())
        })
        .collect();
    let ids: Vec<&str> = names.iter().map(String::as_str).collect();
    KnowledgeGraph::from_edges(&ids, &edges)
}

fn bench_centrality(c: &mut Criterion) {
    let mut group = c.benchmark_group("centrality");
    group.sample_size(10);

    for size in SIZES {
        let graph = generate_graph(size, 4, 0x5EED_u64 + size as u64);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("pagerank", size), &graph, |b, g| {
            b.iter(|| black_box(pagerank(g, &PageRankConfig::default())));
        });

        group.bench_with_input(BenchmarkId::new("betweenness", size), &graph, |b, g| {
            b.iter(|| black_box(betweenness_centrality(g)));
        });

        group.bench_with_input(BenchmarkId::new("closeness", size), &graph, |b, g| {
            b.iter(|| black_box(closeness_centrality(g)));
        });

        group.bench_with_input(BenchmarkId::new("louvain", size), &graph, |b, g| {
            b.iter(|| black_box(detect_communities(g, &CommunityConfig::default())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_centrality);
criterion_main!(benches);

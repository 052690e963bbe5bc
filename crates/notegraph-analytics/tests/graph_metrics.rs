//! Known-topology regression tests for the analytics engines.
//!
//! Each test uses a hand-crafted graph whose metric values can be worked
//! out on paper. Expected values are hardcoded, so any algorithm change
//! that shifts them is caught.

use notegraph_analytics::KnowledgeGraph;
use notegraph_analytics::community::{CommunityConfig, detect_communities, modularity};
use notegraph_analytics::graph::{GraphProperties, connected_components};
use notegraph_analytics::metrics::betweenness::betweenness_centrality;
use notegraph_analytics::metrics::closeness::{closeness_centrality, harmonic_centrality};
use notegraph_analytics::metrics::clustering::clustering_coefficients;
use notegraph_analytics::metrics::degree::degree_centrality;
use notegraph_analytics::metrics::pagerank::{PageRankConfig, pagerank};
use notegraph_analytics::paths::{path_diversity, shortest_path};
use notegraph_core::config::CommunityMethod;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_graph(edges: &[(&str, &str)]) -> KnowledgeGraph {
    KnowledgeGraph::from_edges(&[], edges)
}

fn build_graph_with_isolated(nodes: &[&str], edges: &[(&str, &str)]) -> KnowledgeGraph {
    KnowledgeGraph::from_edges(nodes, edges)
}

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| (*s).to_string()).collect()
}

// ===========================================================================
// Path graph A–B–C–D–E
// ===========================================================================

fn path5() -> KnowledgeGraph {
    build_graph(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")])
}

#[test]
fn path_betweenness_peaks_in_the_middle() {
    let bc = betweenness_centrality(&path5());

    assert!((bc["A"] - 0.0).abs() < 1e-10);
    assert!((bc["E"] - 0.0).abs() < 1e-10);
    assert!((bc["B"] - bc["D"]).abs() < 1e-10);
    assert!(bc["B"] > 0.0);
    assert!(bc["C"] > bc["B"]);

    // B: 3 pairs × 2 directions = 6, C: 4 pairs × 2 = 8, over (N-1)(N-2) = 12
    assert!((bc["B"] - 0.5).abs() < 1e-10, "B = {}", bc["B"]);
    assert!((bc["C"] - 8.0 / 12.0).abs() < 1e-10, "C = {}", bc["C"]);
}

#[test]
fn path_closeness_decreases_outward() {
    let cc = closeness_centrality(&path5());
    assert!(cc["C"] > cc["B"]);
    assert!(cc["B"] > cc["A"]);
    assert!(cc["C"] > cc["D"]);
    assert!(cc["D"] > cc["E"]);
}

#[test]
fn path_diameter_and_average() {
    let props = GraphProperties::compute(&path5());
    assert_eq!(props.diameter, 4);
    // Ordered pairs: 2 × (4·1 + 3·2 + 2·3 + 1·4) / 20 = 40 / 20
    assert!((props.average_path_length - 2.0).abs() < 1e-10);
    assert!(props.is_connected());
    assert!((props.density - 4.0 / 20.0).abs() < 1e-10);
}

// ===========================================================================
// Directed 3-cycle A→B→C→A plus isolated D
// ===========================================================================

fn cycle_plus_isolated() -> KnowledgeGraph {
    build_graph_with_isolated(&["D"], &[("A", "B"), ("B", "C"), ("C", "A")])
}

#[test]
fn cycle_scenario_components() {
    let g = cycle_plus_isolated();
    let comps = connected_components(&g);
    assert_eq!(comps.len(), 2);
    assert_eq!(comps[0], ids(&["A", "B", "C"]));
    assert_eq!(comps[1], ids(&["D"]));
}

#[test]
fn cycle_scenario_isolated_pagerank_is_teleport_only() {
    let g = cycle_plus_isolated();
    let expected = (1.0 - 0.85) / 4.0;
    for max_iter in [1, 2, 10, 100] {
        let config = PageRankConfig {
            max_iter,
            ..PageRankConfig::default()
        };
        let pr = pagerank(&g, &config);
        assert!(
            (pr.scores["D"] - expected).abs() < 1e-12,
            "max_iter {max_iter}: {}",
            pr.scores["D"]
        );
    }
}

#[test]
fn cycle_scenario_diameter_is_one() {
    let props = GraphProperties::compute(&cycle_plus_isolated());
    assert_eq!(props.diameter, 1);
    assert_eq!(props.component_count, 2);
    assert_eq!(props.largest_component, 3);
    assert_eq!(props.isolated_node_count, 1);
}

#[test]
fn cycle_scenario_pagerank_leaks_through_isolated_node() {
    let pr = pagerank(&cycle_plus_isolated(), &PageRankConfig::default());
    assert!(pr.total() < 1.0);
    assert!(pr.scores["A"] > pr.scores["D"]);
}

// ===========================================================================
// Triangle and star
// ===========================================================================

#[test]
fn triangle_clustering_is_one() {
    let g = build_graph(&[("A", "B"), ("B", "C"), ("A", "C")]);
    let cc = clustering_coefficients(&g);
    for id in ["A", "B", "C"] {
        assert!((cc.local[id] - 1.0).abs() < 1e-10, "{id}");
    }
}

#[test]
fn star_clustering_is_zero() {
    let g = build_graph(&[("C", "L1"), ("C", "L2"), ("C", "L3"), ("L4", "C")]);
    let cc = clustering_coefficients(&g);
    for id in ["C", "L1", "L2", "L3", "L4"] {
        assert!((cc.local[id] - 0.0).abs() < f64::EPSILON, "{id}");
    }
    assert!((cc.global - 0.0).abs() < f64::EPSILON);
}

#[test]
fn star_degrees() {
    let g = build_graph(&[("C", "L1"), ("C", "L2"), ("L3", "C")]);
    let dc = degree_centrality(&g);
    assert_eq!(dc.out_degree["C"], 2);
    assert_eq!(dc.in_degree["C"], 1);
    assert_eq!(dc.total_degree["C"], 3);
}

// ===========================================================================
// Two triangles joined by a bridge
// ===========================================================================

fn bridged_triangles() -> KnowledgeGraph {
    build_graph(&[
        ("a", "b"),
        ("b", "c"),
        ("c", "a"),
        ("c", "d"),
        ("d", "e"),
        ("e", "f"),
        ("f", "d"),
    ])
}

#[test]
fn bridge_endpoints_share_top_betweenness() {
    let bc = betweenness_centrality(&bridged_triangles());
    // c sits on {a,b}×{d,e,f}, d on {a,b,c}×{e,f}: 6 pairs × 2 / (5·4)
    assert!((bc["c"] - 0.6).abs() < 1e-10, "c = {}", bc["c"]);
    assert!((bc["d"] - 0.6).abs() < 1e-10, "d = {}", bc["d"]);
    assert!((bc["a"] - 0.0).abs() < 1e-10);
}

#[test]
fn split_partition_beats_single_community() {
    let g = bridged_triangles();
    let split = modularity(&g, &[ids(&["a", "b", "c"]), ids(&["d", "e", "f"])]);
    let whole = modularity(&g, &[ids(&["a", "b", "c", "d", "e", "f"])]);
    // m = 7; each side: L = 3, d = 7 → 2 × (3/7 - (7/14)²)
    assert!((split - 2.0 * (3.0 / 7.0 - 0.25)).abs() < 1e-12, "split = {split}");
    assert!(whole.abs() < 1e-12);
    assert!(split > whole);
}

#[test]
fn detected_partitions_cover_every_node() {
    let g = bridged_triangles();
    for method in [CommunityMethod::Louvain, CommunityMethod::LabelPropagation] {
        let config = CommunityConfig {
            method,
            ..CommunityConfig::default()
        };
        let p = detect_communities(&g, &config);
        let mut all = p.communities.concat();
        all.sort();
        assert_eq!(all, ids(&["a", "b", "c", "d", "e", "f"]), "{method:?}");
        assert!(p.converged, "{method:?}");
    }
}

#[test]
fn harmonic_across_the_bridge() {
    let hc = harmonic_centrality(&bridged_triangles());
    // c: a, b, d at 1; e, f at 2 → 3 + 1
    assert!((hc["c"] - 4.0).abs() < 1e-10);
    // a: b, c at 1; d at 2; e, f at 3 → 2 + 0.5 + 2/3
    assert!((hc["a"] - (2.5 + 2.0 / 3.0)).abs() < 1e-10);
}

#[test]
fn paths_cross_the_bridge() {
    let g = bridged_triangles();
    assert_eq!(shortest_path(&g, "a", "f"), Some(ids(&["a", "c", "d", "f"])));
    let div = path_diversity(&g, "a", "f", 5);
    // a→{c | b→c}→d→{f | e→f}
    assert_eq!(div.path_count, 4);
    assert_eq!(div.min_length, 3);
    assert_eq!(div.max_length, 5);
    assert_eq!(div.distinct_nodes, 6);
}

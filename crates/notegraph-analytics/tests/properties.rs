//! Property tests over randomly generated link graphs.

use std::collections::BTreeSet;

use notegraph_analytics::KnowledgeGraph;
use notegraph_analytics::community::{CommunityConfig, detect_communities, modularity};
use notegraph_analytics::graph::connected_components;
use notegraph_analytics::metrics::clustering::clustering_coefficients;
use notegraph_analytics::metrics::pagerank::{PageRankConfig, pagerank};
use notegraph_analytics::paths::{distance, shortest_path};
use proptest::prelude::*;

/// Up to 12 nodes `n00..n11` and up to 30 random links among them.
fn arb_graph() -> impl Strategy<Value = KnowledgeGraph> {
    (1usize..12).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..30).prop_map(move |pairs| {
            let names: Vec<String> = (0..n).map(|i| format!("n{i:02}")).collect();
            let nodes: Vec<&str> = names.iter().map(String::as_str).collect();
            let edges: Vec<(&str, &str)> = pairs
                .iter()
                .map(|&(a, b)| (names[a].as_str(), names[b].as_str()))
                .collect();
            KnowledgeGraph::from_edges(&nodes, &edges)
        })
    })
}

proptest! {
    #[test]
    fn prop_local_clustering_in_unit_interval(g in arb_graph()) {
        let cc = clustering_coefficients(&g);
        for (id, v) in &cc.local {
            prop_assert!((0.0..=1.0).contains(v), "{} = {}", id, v);
        }
        prop_assert!((0.0..=1.0).contains(&cc.global));
    }

    #[test]
    fn prop_single_community_modularity_is_zero(g in arb_graph()) {
        let all: Vec<String> = g.ids().map(str::to_string).collect();
        let q = modularity(&g, &[all]);
        prop_assert!(q.abs() < 1e-9, "Q = {}", q);
    }

    #[test]
    fn prop_components_partition_nodes(g in arb_graph()) {
        let comps = connected_components(&g);
        let mut seen = BTreeSet::new();
        for comp in &comps {
            prop_assert!(!comp.is_empty());
            for id in comp {
                prop_assert!(seen.insert(id.clone()), "{} in two components", id);
            }
        }
        let all: BTreeSet<String> = g.ids().map(str::to_string).collect();
        prop_assert_eq!(seen, all);
    }

    #[test]
    fn prop_detected_communities_partition_nodes(g in arb_graph()) {
        let p = detect_communities(&g, &CommunityConfig::default());
        let mut members: Vec<String> = p.communities.concat();
        members.sort();
        let all: Vec<String> = g.ids().map(str::to_string).collect();
        prop_assert_eq!(members, all);
    }

    #[test]
    fn prop_distance_symmetry_and_triangle_inequality(g in arb_graph()) {
        let ids: Vec<&str> = g.ids().collect();
        for &a in &ids {
            prop_assert_eq!(shortest_path(&g, a, a), Some(vec![a.to_string()]));
            for &b in &ids {
                let ab = distance(&g, a, b);
                prop_assert_eq!(ab, distance(&g, b, a));
                if let Some(d) = ab {
                    let path = shortest_path(&g, a, b);
                    prop_assert_eq!(path.map(|p| p.len() - 1), Some(d));
                } else {
                    prop_assert_eq!(shortest_path(&g, a, b), None);
                }
                for &c in &ids {
                    if let (Some(ac), Some(ab), Some(bc)) =
                        (distance(&g, a, c), ab, distance(&g, b, c))
                    {
                        prop_assert!(ac <= ab + bc);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_pagerank_mass_bounded(g in arb_graph()) {
        let pr = pagerank(&g, &PageRankConfig::default());
        let total = pr.total();
        prop_assert!(total <= 1.0 + 1e-9, "total {}", total);

        let has_dangling = (0..g.node_count()).any(|i| g.out_degree(i) == 0);
        if !has_dangling && pr.converged {
            prop_assert!((total - 1.0).abs() < 1e-4, "total {}", total);
        }
    }
}

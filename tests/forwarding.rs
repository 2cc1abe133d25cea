//! End-to-end tests: topology description -> graph -> forwarding table.

use link_state_routing::{
    build_forwarding_table, build_forwarding_table_parallel, shortest_paths, ForwardingEntry,
    Graph, GraphMode, RoutingConfig, RoutingError, Topology,
};

fn s(name: &str) -> String {
    name.to_string()
}

fn entries(pairs: &[(&str, &str)]) -> Vec<ForwardingEntry<String>> {
    pairs
        .iter()
        .map(|&(destination, next_hop)| ForwardingEntry {
            destination: s(destination),
            next_hop: s(next_hop),
        })
        .collect()
}

#[test]
fn directed_chain_beats_direct_link() {
    let topology = Topology::parse_edge_list("A B 1\nB C 2\nA C 5\n").unwrap();
    let graph = Graph::from_topology(&topology, GraphMode::Directed);

    let paths = shortest_paths(&graph, &s("A")).unwrap();
    assert_eq!(paths.distance(&s("B")), Some(1));
    assert_eq!(paths.distance(&s("C")), Some(3));
    assert_eq!(paths.first_hop(&s("C")), Some(&s("B")));

    let table = build_forwarding_table(&graph).unwrap();
    assert_eq!(table.entries(&s("A")).unwrap(), entries(&[("B", "B"), ("C", "B")]));
    assert_eq!(table.entries(&s("B")).unwrap(), entries(&[("C", "C")]));
    assert!(table.entries(&s("C")).unwrap().is_empty());
}

#[test]
fn undirected_triangle_with_equal_weights() {
    let topology = Topology::parse_edge_list("3 3\nA B 1\nB C 1\nA C 1\n").unwrap();
    let graph = Graph::from_topology(&topology, GraphMode::Undirected);

    let table = build_forwarding_table(&graph).unwrap();
    assert_eq!(table.entries(&s("A")).unwrap(), entries(&[("B", "B"), ("C", "C")]));
    assert_eq!(table.entries(&s("B")).unwrap(), entries(&[("A", "A"), ("C", "C")]));
    assert_eq!(table.entries(&s("C")).unwrap(), entries(&[("A", "A"), ("B", "B")]));
}

#[test]
fn isolated_node_from_config() {
    let config: RoutingConfig =
        serde_json::from_str(r#"{"mode":"directed","topology":[{"node":"lonely"}]}"#).unwrap();
    let graph = config.build_graph();

    let table = build_forwarding_table(&graph).unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.entries(&s("lonely")).unwrap().is_empty());
}

#[test]
fn two_node_cycle() {
    let topology = Topology::parse_edge_list("A B 1\nB A 1\n").unwrap();
    let graph = Graph::from_topology(&topology, GraphMode::Directed);

    let table = build_forwarding_table(&graph).unwrap();
    assert_eq!(table.entries(&s("A")).unwrap(), entries(&[("B", "B")]));
    assert_eq!(table.entries(&s("B")).unwrap(), entries(&[("A", "A")]));
}

#[test]
fn disconnected_components_stay_separate() {
    let topology = Topology::parse_edge_list("A B 2\nC D 3\n").unwrap();
    let graph = Graph::from_topology(&topology, GraphMode::Undirected);

    let paths = shortest_paths(&graph, &s("A")).unwrap();
    assert_eq!(paths.distance(&s("C")), None);
    assert_eq!(paths.len(), 1);

    let table = build_forwarding_table(&graph).unwrap();
    assert_eq!(table.entries(&s("A")).unwrap(), entries(&[("B", "B")]));
    assert_eq!(table.entries(&s("D")).unwrap(), entries(&[("C", "C")]));
    assert_eq!(table.next_hop(&s("A"), &s("D")), None);
}

#[test]
fn first_hop_propagates_through_long_paths() {
    // R1 - R2 - R3 - R4 - R5 with a costly shortcut R1 - R5
    let text = "R1 R2 1\nR2 R3 1\nR3 R4 1\nR4 R5 1\nR1 R5 10\n";
    let graph = Graph::from_topology(&text.parse().unwrap(), GraphMode::Undirected);

    let table = build_forwarding_table(&graph).unwrap();
    assert_eq!(table.next_hop(&s("R1"), &s("R5")), Some(&s("R2")));
    assert_eq!(table.next_hop(&s("R5"), &s("R1")), Some(&s("R4")));
    assert_eq!(table.next_hop(&s("R3"), &s("R1")), Some(&s("R2")));

    let paths = shortest_paths(&graph, &s("R1")).unwrap();
    assert_eq!(
        paths.path(&s("R5")),
        Some(vec![s("R1"), s("R2"), s("R3"), s("R4"), s("R5")])
    );
}

#[test]
fn parallel_builder_agrees_on_larger_mesh() {
    let mut topology = Topology::new();
    for i in 0..12u32 {
        for j in (i + 1)..12 {
            if (i * 7 + j * 3) % 4 == 0 {
                topology.insert_link(&format!("n{i}"), &format!("n{j}"), (i + j) % 5 + 1);
            }
        }
    }
    let graph = Graph::from_topology(&topology, GraphMode::Undirected);

    let sequential = build_forwarding_table(&graph).unwrap();
    let parallel = build_forwarding_table_parallel(&graph).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn unknown_source_is_reported() {
    let graph = Graph::from_topology(&"A B 1".parse().unwrap(), GraphMode::Directed);
    let err = shortest_paths(&graph, &s("Q")).unwrap_err();

    assert!(matches!(err, RoutingError::NodeNotFound { .. }));
    assert!(err.to_string().contains("Q"));
}

#[test]
fn malformed_topology_is_reported() {
    let err = Topology::parse_edge_list("A B 1\nA C x\n").unwrap_err();
    assert_eq!(err.to_string(), "invalid topology at line 2: invalid weight 'x' for link A -> C");
}

/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Quantified invariants checked over a handful of hand-built planner
//! graphs, not an exhaustive round-trip grid.

use match_planner::{
    config::PlannerConfig,
    graph::{vertex::VertexKind, PlannerGraph},
    plan::solve_and_decode,
    properties::{ThingProperties, VertexProperties},
    schema::{EdgeKind, InMemorySchemaGraph},
    Identifier,
};

fn assert_vertex_invariants(graph: &PlannerGraph) {
    for vertex in graph.vertices() {
        let common = vertex.common();
        // 1. starting XOR incoming.
        assert_eq!(
            common.value_is_starting() as u8 + common.value_has_incoming() as u8,
            1,
            "vertex {:?} violated the entry invariant",
            common.identifier()
        );
        // 2. ending XOR outgoing.
        assert_eq!(
            common.value_is_ending() as u8 + common.value_has_outgoing() as u8,
            1,
            "vertex {:?} violated the exit invariant",
            common.identifier()
        );
        // 3. flow conservation.
        assert_eq!(
            common.value_is_starting() as i64 + common.value_has_incoming() as i64,
            common.value_is_ending() as i64 + common.value_has_outgoing() as i64,
            "vertex {:?} violated flow conservation",
            common.identifier()
        );
        // 4. non-indexed vertices never start.
        if !common.has_index() {
            assert!(!common.value_is_starting(), "non-indexed vertex {:?} was chosen as a start", common.identifier());
        }
    }
}

fn assert_at_most_one_direction_selected(graph: &PlannerGraph) {
    let mut seen_pairs: Vec<(Identifier, Identifier)> = Vec::new();
    for edge in graph.edges() {
        if !edge.value_is_selected() {
            continue;
        }
        let (a, b) = if edge.from() < edge.to() { (edge.from(), edge.to()) } else { (edge.to(), edge.from()) };
        assert!(!seen_pairs.contains(&(a, b)), "both directions of one pattern edge were selected");
        seen_pairs.push((a, b));
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).try_init();
}

fn thing(iid: Option<u8>) -> VertexProperties {
    let props = match iid {
        Some(byte) => ThingProperties::new().with_iid(vec![byte]),
        None => ThingProperties::new(),
    };
    VertexProperties::Thing(props)
}

#[test]
fn star_pattern_satisfies_invariants() {
    init_tracing();
    let mut graph = PlannerGraph::new();
    let center = Identifier::new(0);
    graph.add_vertex(center, VertexKind::Thing).unwrap();
    graph.set_properties(center, thing(Some(0x01))).unwrap();

    for i in 1..=3u8 {
        let leaf = Identifier::new(i as usize);
        graph.add_vertex(leaf, VertexKind::Thing).unwrap();
        graph.set_properties(leaf, thing(None)).unwrap();
        graph.add_edge(center, leaf, "role", EdgeKind::Links { role: "role".into() }).unwrap();
    }

    let schema = InMemorySchemaGraph::new();
    let plan_result = solve_and_decode(&mut graph, &schema, &PlannerConfig::default()).unwrap();

    assert_eq!(plan_result.roots, vec![center]);
    assert_vertex_invariants(&graph);
    assert_at_most_one_direction_selected(&graph);
}

#[test]
fn chain_pattern_satisfies_invariants() {
    init_tracing();
    let mut graph = PlannerGraph::new();
    let ids: Vec<Identifier> = (0..4usize).map(Identifier::new).collect();
    for (i, &id) in ids.iter().enumerate() {
        graph.add_vertex(id, VertexKind::Thing).unwrap();
        graph.set_properties(id, thing(if i == 0 { Some(0xFF) } else { None })).unwrap();
    }
    for pair in ids.windows(2) {
        graph.add_edge(pair[0], pair[1], "role", EdgeKind::Links { role: "role".into() }).unwrap();
    }

    let schema = InMemorySchemaGraph::new();
    let plan_result = solve_and_decode(&mut graph, &schema, &PlannerConfig::default()).unwrap();

    assert_eq!(plan_result.roots, vec![ids[0]]);
    assert_eq!(plan_result.order, ids);
    assert_vertex_invariants(&graph);
    assert_at_most_one_direction_selected(&graph);
}

#[test]
fn disconnected_union_satisfies_invariants() {
    init_tracing();
    let mut graph = PlannerGraph::new();
    let a = Identifier::new(0);
    let b = Identifier::new(1);
    graph.add_vertex(a, VertexKind::Thing).unwrap();
    graph.set_properties(a, thing(Some(0x01))).unwrap();
    graph.add_vertex(b, VertexKind::Thing).unwrap();
    graph.set_properties(b, thing(Some(0x02))).unwrap();

    let schema = InMemorySchemaGraph::new();
    let plan_result = solve_and_decode(&mut graph, &schema, &PlannerConfig::default()).unwrap();

    let mut roots = plan_result.roots.clone();
    roots.sort();
    assert_eq!(roots, vec![a, b]);
    assert_vertex_invariants(&graph);
}

#[test]
fn isa_edge_satisfies_invariants() {
    init_tracing();
    let mut graph = PlannerGraph::new();
    let p = Identifier::new(0);
    let t = Identifier::new(1);
    graph.add_vertex(p, VertexKind::Thing).unwrap();
    graph.set_properties(p, VertexProperties::Thing(ThingProperties::new().with_type("person"))).unwrap();
    graph.add_vertex(t, VertexKind::Type).unwrap();
    graph
        .set_properties(t, VertexProperties::Type(match_planner::properties::TypeProperties::new().with_label("person")))
        .unwrap();
    graph.add_edge(p, t, "isa", EdgeKind::Isa).unwrap();

    let schema = InMemorySchemaGraph::new().with_instance_count("person", 500);
    solve_and_decode(&mut graph, &schema, &PlannerConfig::default()).unwrap();

    assert_vertex_invariants(&graph);
    assert_at_most_one_direction_selected(&graph);
}

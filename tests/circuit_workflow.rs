// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use orthowire::config::RouteConfig;
use orthowire::model::{Circuit, ComponentId, Point, TerminalId, WireId};
use orthowire::ops::{apply_ops, ObjectRef, Op};
use orthowire::query::violations;
use orthowire::session::RoutingSession;
use orthowire::store::{from_json, load_circuit, save_circuit, to_json, History};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join("circuits").join(name)
}

fn load_fixture(name: &str) -> Circuit {
    let path = fixture_path(name);
    load_circuit(&path).unwrap_or_else(|err| panic!("failed to load {path:?}: {err}"))
}

fn component(id: &str) -> ComponentId {
    ComponentId::new(id).expect("component id")
}

fn terminal(id: &str) -> TerminalId {
    TerminalId::new(id).expect("terminal id")
}

fn wire(id: &str) -> WireId {
    WireId::new(id).expect("wire id")
}

fn path_of(circuit: &Circuit, wire_id: &WireId) -> Vec<Point> {
    circuit.wire(wire_id).expect("wire").path().to_vec()
}

fn assert_valid(circuit: &Circuit) {
    let found = violations(circuit);
    assert!(found.is_empty(), "unexpected violations: {found:?}");
}

#[test]
fn draws_corner_and_finishes_on_cell_terminal() {
    let mut circuit = from_json(
        r#"{ "components": [{ "id": "c:1", "kind": "liion_cell", "position": { "x": 85, "y": 80 } }] }"#,
    )
    .expect("load");
    let mut session = RoutingSession::new();

    session.begin_or_continue(&mut circuit, Point::new(0.0, 0.0));
    let wire_id = session.active_wire().cloned().expect("drawing");
    session.begin_or_continue(&mut circuit, Point::new(120.0, 5.0));
    session.update_preview(&mut circuit, Point::new(119.0, 60.0));
    session.begin_or_continue(&mut circuit, Point::new(121.0, 83.0));

    assert!(!session.is_drawing());
    assert_eq!(
        path_of(&circuit, &wire_id),
        vec![Point::new(0.0, 0.0), Point::new(120.0, 0.0), Point::new(120.0, 80.0)]
    );
    let finished = circuit.wire(&wire_id).expect("wire");
    assert_eq!(finished.end_connected_to(), Some(&terminal("c:1:pos")));
    assert_valid(&circuit);
}

#[test]
fn crossing_fixture_reroutes_only_the_wire_through_a_body() {
    let mut circuit = load_fixture("crossing.json");
    assert_eq!(circuit.rev(), 4);
    assert_valid(&circuit);

    let result = apply_ops(
        &mut circuit,
        4,
        &[Op::RerouteWire { wire_id: wire("w:1") }, Op::RerouteWire { wire_id: wire("w:2") }],
        &RouteConfig::default(),
    )
    .expect("reroute");

    assert_eq!(result.new_rev, 5);
    assert_eq!(result.delta.updated, vec![ObjectRef::Wire(wire("w:1"))]);
    assert_eq!(
        path_of(&circuit, &wire("w:1")),
        vec![Point::new(15.0, -35.0), Point::new(234.0, -35.0), Point::new(234.0, 30.0)]
    );
    assert_eq!(
        path_of(&circuit, &wire("w:2")),
        vec![Point::new(246.0, 30.0), Point::new(246.0, 160.0), Point::new(155.0, 160.0)]
    );
    assert_valid(&circuit);
}

#[test]
fn moving_a_component_keeps_both_wires_attached() {
    let mut circuit = load_fixture("crossing.json");
    let result = apply_ops(
        &mut circuit,
        4,
        &[
            Op::RerouteWire { wire_id: wire("w:1") },
            Op::MoveComponent { component_id: component("c:2"), position: Point::new(260.0, 0.0) },
        ],
        &RouteConfig::default(),
    )
    .expect("apply");

    assert_eq!(
        result.delta.updated,
        vec![
            ObjectRef::Component(component("c:2")),
            ObjectRef::Wire(wire("w:1")),
            ObjectRef::Wire(wire("w:2")),
        ]
    );
    assert_eq!(
        path_of(&circuit, &wire("w:1")),
        vec![Point::new(15.0, -35.0), Point::new(254.0, -35.0), Point::new(254.0, 30.0)]
    );
    assert_eq!(
        path_of(&circuit, &wire("w:2")),
        vec![Point::new(266.0, 30.0), Point::new(266.0, 160.0), Point::new(155.0, 160.0)]
    );
    assert_valid(&circuit);
}

#[test]
fn drawing_onto_a_loaded_circuit_then_saving_and_undoing() {
    let mut circuit = load_fixture("crossing.json");
    let mut history = History::new();
    let mut session = RoutingSession::new();

    history.record(&circuit);
    for (x, y) in [(-15.0, -35.0), (-14.0, -90.0), (-120.0, -91.0), (-121.0, 200.0), (88.0, 161.0)] {
        session.begin_or_continue(&mut circuit, Point::new(x, y));
    }
    assert!(!session.is_drawing());

    let drawn = circuit
        .wires()
        .iter()
        .find(|w| w.id() != &wire("w:1") && w.id() != &wire("w:2"))
        .map(|w| w.id().clone())
        .expect("new wire");
    assert_eq!(
        path_of(&circuit, &drawn),
        vec![
            Point::new(-15.0, -35.0),
            Point::new(-15.0, -90.0),
            Point::new(-120.0, -90.0),
            Point::new(-120.0, 160.0),
            Point::new(87.0, 160.0),
        ]
    );
    assert_eq!(circuit.terminal(&terminal("c:1:pos")).and_then(|t| t.connected_wire()), Some(&drawn));
    assert_eq!(circuit.terminal(&terminal("c:3:neg")).and_then(|t| t.connected_wire()), Some(&drawn));
    assert_valid(&circuit);

    let dir = std::env::temp_dir().join(format!("orthowire-workflow-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let saved = dir.join("drawn.json");
    save_circuit(&saved, &circuit).expect("save");
    let reloaded = load_circuit(&saved).expect("reload");
    let _ = std::fs::remove_dir_all(&dir);
    assert_eq!(to_json(&reloaded).expect("encode"), to_json(&circuit).expect("encode"));

    assert!(history.undo(&mut circuit));
    assert_eq!(circuit.wires().len(), 2);
    assert_eq!(circuit.terminal(&terminal("c:1:pos")).and_then(|t| t.connected_wire()), None);
}

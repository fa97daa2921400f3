// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::config::RouteConfig;
use crate::model::fixtures::{battery_and_led, battery_led_wired, cid, tid, wid};
use crate::model::{Circuit, ComponentKind, Point};

use super::{apply_ops, ApplyError, ObjectKind, ObjectRef, Op};

fn apply(circuit: &mut Circuit, ops: &[Op]) -> Result<super::ApplyResult, ApplyError> {
    apply_ops(circuit, circuit.rev(), ops, &RouteConfig::default())
}

#[test]
fn place_component_bumps_rev_and_reports_added() {
    let mut circuit = Circuit::new("place");
    let ops = [Op::PlaceComponent {
        component_id: cid("c:battery"),
        kind: ComponentKind::Battery,
        position: Point::new(40.0, 40.0),
    }];

    let result = apply(&mut circuit, &ops).expect("apply");
    assert_eq!(result.new_rev, 1);
    assert_eq!(circuit.rev(), 1);
    assert_eq!(result.applied, 1);
    assert_eq!(result.delta.added, vec![ObjectRef::Component(cid("c:battery"))]);
    assert!(result.delta.removed.is_empty());
    assert!(result.delta.updated.is_empty());

    let terminal = circuit.terminal(&tid("c:battery:pos")).expect("terminal");
    assert_eq!(terminal.position(), Point::new(25.0, 5.0));
}

#[test]
fn stale_base_rev_is_rejected() {
    let mut circuit = battery_and_led();
    circuit.bump_rev();

    let err = apply_ops(&mut circuit, 0, &[], &RouteConfig::default()).unwrap_err();
    assert_eq!(err, ApplyError::Conflict { base_rev: 0, current_rev: 1 });
    assert_eq!(err.to_string(), "stale base_rev (base_rev=0, current_rev=1)");
}

#[test]
fn empty_batch_keeps_rev() {
    let mut circuit = battery_and_led();
    let result = apply(&mut circuit, &[]).expect("apply");
    assert_eq!(result.new_rev, 0);
    assert_eq!(result.applied, 0);
}

#[test]
fn failing_op_leaves_circuit_untouched() {
    let mut circuit = battery_led_wired();
    let before = circuit.clone();

    let ops = [
        Op::MoveComponent { component_id: cid("c:2"), position: Point::new(300.0, 0.0) },
        Op::RemoveWire { wire_id: wid("w:404") },
    ];
    let err = apply(&mut circuit, &ops).unwrap_err();
    assert_eq!(err, ApplyError::NotFound { kind: ObjectKind::Wire, object_id: "w:404".to_owned() });
    assert_eq!(circuit, before);
}

#[test]
fn duplicate_component_id_is_rejected() {
    let mut circuit = battery_and_led();
    let ops = [Op::PlaceComponent {
        component_id: cid("c:1"),
        kind: ComponentKind::Led,
        position: Point::new(0.0, 0.0),
    }];
    let err = apply(&mut circuit, &ops).unwrap_err();
    assert_eq!(
        err,
        ApplyError::AlreadyExists { kind: ObjectKind::Component, object_id: "c:1".to_owned() }
    );
}

#[test]
fn moving_a_component_reanchors_attached_wires() {
    let mut circuit = battery_led_wired();
    let ops = [Op::MoveComponent { component_id: cid("c:2"), position: Point::new(260.0, 40.0) }];

    let result = apply(&mut circuit, &ops).expect("apply");
    assert_eq!(result.delta.updated, vec![
        ObjectRef::Component(cid("c:2")),
        ObjectRef::Wire(wid("w:1"))
    ]);

    let wire = circuit.wire(&wid("w:1")).expect("wire");
    assert_eq!(wire.path().last(), Some(&Point::new(254.0, 70.0)));
    assert!(wire.is_orthogonal());
}

#[test]
fn rotating_a_component_reanchors_attached_wires() {
    let mut circuit = battery_led_wired();
    let ops = [Op::RotateComponent { component_id: cid("c:1"), degrees: 90.0 }];

    let result = apply(&mut circuit, &ops).expect("apply");
    assert!(result.delta.updated.contains(&ObjectRef::Wire(wid("w:1"))));

    let expected = circuit.terminal(&tid("c:1:neg")).expect("terminal").position();
    let wire = circuit.wire(&wid("w:1")).expect("wire");
    assert_eq!(wire.path().first(), Some(&expected));
    assert!(wire.is_orthogonal());
}

#[test]
fn removing_a_component_cascades_to_its_wires() {
    let mut circuit = battery_led_wired();
    let ops = [Op::RemoveComponent { component_id: cid("c:1") }];

    let result = apply(&mut circuit, &ops).expect("apply");
    assert_eq!(result.delta.removed, vec![
        ObjectRef::Component(cid("c:1")),
        ObjectRef::Wire(wid("w:1"))
    ]);
    assert!(circuit.wires().is_empty());
    assert_eq!(circuit.terminal(&tid("c:2:pos")).expect("terminal").connected_wire(), None);
}

#[test]
fn place_then_remove_in_one_batch_reports_nothing() {
    let mut circuit = Circuit::new("transient");
    let ops = [
        Op::PlaceComponent {
            component_id: cid("c:tmp"),
            kind: ComponentKind::Led,
            position: Point::new(0.0, 0.0),
        },
        Op::RemoveComponent { component_id: cid("c:tmp") },
    ];

    let result = apply(&mut circuit, &ops).expect("apply");
    assert!(result.delta.added.is_empty());
    assert!(result.delta.removed.is_empty());
    assert_eq!(result.new_rev, 1);
}

#[test]
fn reroute_wire_reports_update_only_when_the_path_changes() {
    let mut circuit = battery_led_wired();
    let ops = [Op::RerouteWire { wire_id: wid("w:1") }];

    let result = apply(&mut circuit, &ops).expect("apply");
    assert_eq!(result.delta.updated, vec![ObjectRef::Wire(wid("w:1"))]);
    let wire = circuit.wire(&wid("w:1")).expect("wire");
    assert_eq!(wire.path().first(), Some(&Point::new(15.0, -35.0)));
    assert_eq!(wire.path().last(), Some(&Point::new(194.0, 30.0)));
    assert!(wire.is_orthogonal());

    let again = apply(&mut circuit, &ops).expect("apply");
    assert!(again.delta.updated.is_empty());

    let missing = [Op::RerouteWire { wire_id: wid("w:404") }];
    assert!(matches!(
        apply(&mut circuit, &missing),
        Err(ApplyError::NotFound { kind: ObjectKind::Wire, .. })
    ));
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::circuit::Circuit;
use super::component::ComponentKind;
use super::geometry::Point;
use super::ids::{ComponentId, TerminalId, WireId};

pub(crate) fn cid(value: &str) -> ComponentId {
    ComponentId::new(value).expect("component id")
}

pub(crate) fn tid(value: &str) -> TerminalId {
    TerminalId::new(value).expect("terminal id")
}

pub(crate) fn wid(value: &str) -> WireId {
    WireId::new(value).expect("wire id")
}

/// Battery `c:1` at the origin and LED `c:2` at (200, 0), no wires.
///
/// Terminals: `c:1:pos` (-15,-35), `c:1:neg` (15,-35), `c:2:pos` (194,30),
/// `c:2:neg` (206,30).
pub(crate) fn battery_and_led() -> Circuit {
    let mut circuit = Circuit::new("battery-led");
    circuit.add_component(ComponentKind::Battery, Point::new(0.0, 0.0));
    circuit.add_component(ComponentKind::Led, Point::new(200.0, 0.0));
    circuit
}

/// [`battery_and_led`] plus a committed wire `w:1` from `c:1:neg` to `c:2:pos`
/// with four interior corners.
pub(crate) fn battery_led_wired() -> Circuit {
    let mut circuit = battery_and_led();
    let wire_id = circuit.add_wire();
    let start = tid("c:1:neg");
    let end = tid("c:2:pos");

    let wire = circuit.wire_mut(&wire_id).expect("wire");
    wire.set_path(vec![
        Point::new(15.0, -35.0),
        Point::new(15.0, -60.0),
        Point::new(100.0, -60.0),
        Point::new(100.0, 60.0),
        Point::new(194.0, 60.0),
        Point::new(194.0, 30.0),
    ]);
    wire.set_start(Point::new(15.0, -35.0));
    wire.set_end(Point::new(194.0, 30.0));
    wire.set_start_connected_to(Some(start.clone()));
    wire.set_end_connected_to(Some(end.clone()));

    assert!(circuit.connect_terminal(&start, &wire_id));
    assert!(circuit.connect_terminal(&end, &wire_id));
    circuit
}

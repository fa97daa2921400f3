// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in demo circuit, drawn click by click through a [`RoutingSession`].

use crate::model::{Circuit, ComponentKind, Point};
use crate::session::RoutingSession;

/// Battery at the origin and an LED to its right, closed into a loop by two
/// hand-drawn wires (battery `+` to anode, cathode to battery `-`).
pub fn demo_circuit() -> Circuit {
    let mut circuit = Circuit::new("demo");
    circuit.add_component(ComponentKind::Battery, Point::new(0.0, 0.0));
    circuit.add_component(ComponentKind::Led, Point::new(240.0, 0.0));

    let mut session = RoutingSession::new();
    let clicks: [&[(f64, f64)]; 2] = [
        &[(-15.0, -35.0), (-14.0, -80.0), (120.0, -78.0), (121.0, 80.0), (234.0, 82.0), (235.0, 32.0)],
        &[(247.0, 31.0), (246.0, 120.0), (-80.0, 121.0), (-79.0, -60.0), (15.0, -61.0), (15.0, -37.0)],
    ];
    for wire_clicks in clicks {
        for &(x, y) in wire_clicks {
            session.begin_or_continue(&mut circuit, Point::new(x, y));
        }
    }
    circuit
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orthogonal path planning.
//!
//! The planner is pure: it sees points, rectangles and segments, never the
//! circuit. [`reroute_wire`] is the bridge that feeds a circuit into it.

pub mod planner;

pub use planner::{compute_path, compute_path_with, plan_route, PlannedRoute, RouteTier};

use crate::config::RouteConfig;
use crate::model::{Circuit, WireId};

/// Recomputes the path of a committed wire, keeping both endpoints.
///
/// Obstacles and the segments of every other wire are read fresh from the
/// circuit. Returns `false` when the wire is unknown, has fewer than two points,
/// or already follows the planned path.
pub fn reroute_wire(circuit: &mut Circuit, wire_id: &WireId, config: &RouteConfig) -> bool {
    let Some(wire) = circuit.wire(wire_id) else {
        return false;
    };
    let (start, end) = match wire.path() {
        [first, .., last] => (*first, *last),
        _ => return false,
    };

    let obstacles = circuit.obstacles();
    let existing = circuit.wire_segments(Some(wire_id));
    let points = compute_path_with(config, start, end, &obstacles, &existing);

    let Some(wire) = circuit.wire_mut(wire_id) else {
        return false;
    };
    if wire.path() == points.as_slice() {
        return false;
    }
    wire.set_start(start);
    wire.set_end(end);
    wire.set_path(points);
    true
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a circuit.

use std::fmt;

use crate::config::SessionConfig;
use crate::model::{Circuit, ComponentId, Point, TerminalId, WireId};
use crate::session::find_corner_at;

/// Pointer distance at which a wire segment counts as hit.
pub const WIRE_HIT_DISTANCE: f64 = 10.0;

/// What lies under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// A draggable interior corner.
    Corner { wire_id: WireId, index: usize },
    Component(ComponentId),
    Wire(WireId),
}

impl Hit {
    /// The wire behind a corner or segment hit.
    pub fn wire_id(&self) -> Option<&WireId> {
        match self {
            Self::Corner { wire_id, .. } | Self::Wire(wire_id) => Some(wire_id),
            Self::Component(_) => None,
        }
    }
}

pub fn object_at(circuit: &Circuit, point: Point) -> Option<Hit> {
    object_at_with(circuit, point, &SessionConfig::default())
}

/// Hit-tests in priority order: corner handles, component bodies, wire segments.
///
/// Corners win so they stay grabbable where a wire crosses a body. Within each
/// tier the earliest object in the circuit wins.
pub fn object_at_with(circuit: &Circuit, point: Point, config: &SessionConfig) -> Option<Hit> {
    if let Some((wire_id, index)) = find_corner_at(circuit, point, config.corner_hit_radius) {
        return Some(Hit::Corner { wire_id, index });
    }

    if let Some(component) = circuit.components().iter().find(|c| c.contains_point(point)) {
        return Some(Hit::Component(component.id().clone()));
    }

    circuit
        .wires()
        .iter()
        .find(|wire| wire.segments().any(|segment| segment.distance_to(point) <= WIRE_HIT_DISTANCE))
        .map(|wire| Hit::Wire(wire.id().clone()))
}

/// Which end of a wire a [`Violation`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEnd {
    Start,
    End,
}

impl WireEnd {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// A broken wire invariant found by [`violations`].
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Fewer than two path points.
    Degenerate { wire_id: WireId, points: usize },
    /// Segment `index` is neither horizontal nor vertical.
    Diagonal { wire_id: WireId, index: usize, from: Point, to: Point },
    /// The wire claims a terminal that is not in the circuit.
    UnknownTerminal { wire_id: WireId, end: WireEnd, terminal_id: TerminalId },
    /// The path endpoint is not at its connected terminal.
    Detached { wire_id: WireId, end: WireEnd, terminal_id: TerminalId },
    /// The terminal's back-reference names another wire, or no wire at all.
    Unlinked { wire_id: WireId, end: WireEnd, terminal_id: TerminalId, holder: Option<WireId> },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degenerate { wire_id, points } => {
                write!(f, "wire {wire_id} has {points} path point(s)")
            }
            Self::Diagonal { wire_id, index, from, to } => write!(
                f,
                "wire {wire_id} segment {index} is diagonal ({}, {}) -> ({}, {})",
                from.x, from.y, to.x, to.y
            ),
            Self::UnknownTerminal { wire_id, end, terminal_id } => {
                write!(f, "wire {wire_id} {} references unknown terminal {terminal_id}", end.as_str())
            }
            Self::Detached { wire_id, end, terminal_id } => {
                write!(f, "wire {wire_id} {} is not at terminal {terminal_id}", end.as_str())
            }
            Self::Unlinked { wire_id, end, terminal_id, holder } => {
                write!(f, "wire {wire_id} {} claims terminal {terminal_id} ", end.as_str())?;
                match holder {
                    Some(holder) => write!(f, "held by wire {holder}"),
                    None => f.write_str("held by no wire"),
                }
            }
        }
    }
}

/// Checks every wire for orthogonality and terminal attachment.
///
/// Back-references are only checked for wires that ended on a terminal; a
/// wire still being drawn has not linked its start terminal yet.
pub fn violations(circuit: &Circuit) -> Vec<Violation> {
    let mut found = Vec::new();
    for wire in circuit.wires() {
        let path = wire.path();
        if path.len() < 2 {
            found.push(Violation::Degenerate { wire_id: wire.id().clone(), points: path.len() });
            continue;
        }

        for (index, pair) in path.windows(2).enumerate() {
            if !pair[0].is_axis_aligned_with(pair[1]) {
                found.push(Violation::Diagonal {
                    wire_id: wire.id().clone(),
                    index,
                    from: pair[0],
                    to: pair[1],
                });
            }
        }

        let ends = [
            (WireEnd::Start, wire.start_connected_to(), path[0]),
            (WireEnd::End, wire.end_connected_to(), path[path.len() - 1]),
        ];
        for (end, terminal_id, point) in ends {
            let Some(terminal_id) = terminal_id else {
                continue;
            };
            match circuit.terminal(terminal_id) {
                None => found.push(Violation::UnknownTerminal {
                    wire_id: wire.id().clone(),
                    end,
                    terminal_id: terminal_id.clone(),
                }),
                Some(terminal) if !terminal.position().approx_eq(point) => {
                    found.push(Violation::Detached {
                        wire_id: wire.id().clone(),
                        end,
                        terminal_id: terminal_id.clone(),
                    })
                }
                Some(terminal)
                    if wire.end_connected_to().is_some()
                        && terminal.connected_wire() != Some(wire.id()) =>
                {
                    found.push(Violation::Unlinked {
                        wire_id: wire.id().clone(),
                        end,
                        terminal_id: terminal_id.clone(),
                        holder: terminal.connected_wire().cloned(),
                    })
                }
                Some(_) => {}
            }
        }
    }
    found
}

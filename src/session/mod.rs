// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive wire editing.
//!
//! A [`RoutingSession`] turns discrete pointer events into wire edits on a
//! [`Circuit`] it does not own. Every operation is total: calls that make no
//! sense in the current state are no-ops, and each operation reports whether it
//! changed anything.

use crate::config::SessionConfig;
use crate::model::{
    simplify_collinear, Circuit, NearestTerminal, Orientation, Point, Terminal, WireId, EPSILON,
};

/// What the session is currently editing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveEdit {
    #[default]
    Idle,
    /// A wire is being drawn; its path holds the committed vertices.
    Drawing { wire_id: WireId },
    /// An interior corner is held. `reference` is the alternation reference
    /// ([`Orientation::of_path`]) at the moment the corner was grabbed.
    DraggingCorner { wire_id: WireId, index: usize, reference: Orientation },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutingSession {
    config: SessionConfig,
    active: ActiveEdit,
}

impl RoutingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self { config, active: ActiveEdit::Idle }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn active(&self) -> &ActiveEdit {
        &self.active
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.active, ActiveEdit::Drawing { .. })
    }

    pub fn is_dragging_corner(&self) -> bool {
        matches!(self.active, ActiveEdit::DraggingCorner { .. })
    }

    /// The wire being drawn or reshaped, if any.
    pub fn active_wire(&self) -> Option<&WireId> {
        match &self.active {
            ActiveEdit::Idle => None,
            ActiveEdit::Drawing { wire_id } | ActiveEdit::DraggingCorner { wire_id, .. } => {
                Some(wire_id)
            }
        }
    }

    /// Pointer click while drawing (or to start drawing).
    ///
    /// Idle: starts a wire, snapped to a terminal within the snap radius.
    /// Drawing: finishes at a terminal within the snap radius, otherwise adds an
    /// orthogonally snapped corner. Ignored while a corner is held.
    ///
    /// A terminal already holding another wire is never snapped to; the click
    /// is treated as if that terminal were not there.
    pub fn begin_or_continue(&mut self, circuit: &mut Circuit, point: Point) -> bool {
        match &self.active {
            ActiveEdit::DraggingCorner { .. } => false,
            ActiveEdit::Idle => {
                self.begin(circuit, point);
                true
            }
            ActiveEdit::Drawing { wire_id } => {
                let wire_id = wire_id.clone();
                self.continue_drawing(circuit, &wire_id, point)
            }
        }
    }

    fn begin(&mut self, circuit: &mut Circuit, point: Point) {
        let nearest = circuit.find_nearest_free_terminal(point, self.config.snap_radius, None);
        let (start, terminal_id) = match nearest {
            Some(NearestTerminal { terminal_id, position, .. }) => (position, Some(terminal_id)),
            None => (point, None),
        };

        let wire_id = circuit.add_wire();
        if let Some(wire) = circuit.wire_mut(&wire_id) {
            wire.set_path(vec![start]);
            wire.set_start(start);
            wire.set_end(start);
            wire.set_start_connected_to(terminal_id);
        }
        self.active = ActiveEdit::Drawing { wire_id };
    }

    fn continue_drawing(&mut self, circuit: &mut Circuit, wire_id: &WireId, point: Point) -> bool {
        let Some(wire) = circuit.wire(wire_id) else {
            // Removed behind our back.
            self.active = ActiveEdit::Idle;
            return false;
        };

        match circuit.find_nearest_free_terminal(point, self.config.snap_radius, Some(wire_id)) {
            Some(nearest) => {
                // A wire never closes on the terminal it started from.
                if wire.start_connected_to() == Some(&nearest.terminal_id) {
                    return false;
                }
                let finished = finish_at_terminal(circuit, wire_id, nearest);
                if finished {
                    self.active = ActiveEdit::Idle;
                }
                finished
            }
            None => add_corner(circuit, wire_id, point),
        }
    }

    /// Moves the dashed preview end; the committed path is not touched.
    pub fn update_preview(&mut self, circuit: &mut Circuit, point: Point) -> bool {
        let ActiveEdit::Drawing { wire_id } = &self.active else {
            return false;
        };
        let nearest =
            circuit.find_nearest_free_terminal(point, self.config.snap_radius, Some(wire_id));
        let preview = match nearest {
            Some(nearest) => nearest.position,
            None => {
                let Some(last) = circuit.wire(wire_id).and_then(|wire| wire.path().last()) else {
                    return false;
                };
                point.snap_orthogonal(*last)
            }
        };

        let Some(wire) = circuit.wire_mut(wire_id) else {
            return false;
        };
        if wire.end() == preview {
            return false;
        }
        wire.set_end(preview);
        true
    }

    /// Abandons the wire being drawn and removes it from the circuit.
    pub fn cancel(&mut self, circuit: &mut Circuit) -> bool {
        let ActiveEdit::Drawing { wire_id } = &self.active else {
            return false;
        };
        circuit.remove_wire(wire_id);
        self.active = ActiveEdit::Idle;
        true
    }

    /// Grabs the interior corner closest to `point` within the hit radius.
    pub fn hit_test_corner(&mut self, circuit: &Circuit, point: Point) -> bool {
        if self.is_drawing() {
            return false;
        }
        let Some((wire_id, index)) = find_corner_at(circuit, point, self.config.corner_hit_radius)
        else {
            return false;
        };
        let Some(wire) = circuit.wire(&wire_id) else {
            return false;
        };

        let reference = Orientation::of_first_segment(wire.path());
        self.active = ActiveEdit::DraggingCorner { wire_id, index, reference };
        true
    }

    /// Moves the held corner towards `point`, keeping every segment orthogonal.
    pub fn drag_corner(&mut self, circuit: &mut Circuit, point: Point) -> bool {
        let ActiveEdit::DraggingCorner { wire_id, index, reference } = &self.active else {
            return false;
        };
        let Some(wire) = circuit.wire_mut(wire_id) else {
            return false;
        };
        move_corner(wire.path_mut(), *index, *reference, point)
    }

    pub fn finish_corner_drag(&mut self) -> bool {
        if !self.is_dragging_corner() {
            return false;
        }
        self.active = ActiveEdit::Idle;
        true
    }

    /// Glues wires back onto `terminals` after their component moved or rotated.
    pub fn on_component_moved(&mut self, circuit: &mut Circuit, terminals: &[Terminal]) -> bool {
        reanchor_wires(circuit, terminals)
    }
}

fn add_corner(circuit: &mut Circuit, wire_id: &WireId, point: Point) -> bool {
    let Some(wire) = circuit.wire_mut(wire_id) else {
        return false;
    };
    let path = wire.path_mut();
    let Some(&last) = path.last() else {
        return false;
    };

    let corner = point.snap_orthogonal(last);
    if corner.approx_eq(last) {
        return false;
    }

    let len = path.len();
    let extends_run = len >= 2
        && Orientation::of_segment(path[len - 2], last) == Orientation::of_segment(last, corner);
    if extends_run {
        let prev = path[len - 2];
        if corner.approx_eq(prev) {
            // Walked back onto the previous vertex.
            path.pop();
        } else {
            path[len - 1] = corner;
        }
    } else {
        path.push(corner);
    }

    wire.set_end(corner);
    true
}

fn finish_at_terminal(circuit: &mut Circuit, wire_id: &WireId, nearest: NearestTerminal) -> bool {
    let Some(wire) = circuit.wire_mut(wire_id) else {
        return false;
    };
    let target = nearest.position;
    let mut path = wire.path().to_vec();

    let len = path.len();
    let Some(&last) = path.last() else {
        return false;
    };
    let dx = (target.x - last.x).abs();
    let dy = (target.y - last.y).abs();
    if dx > EPSILON && dy > EPSILON {
        if len == 1 {
            // The start stays on its anchor; bend on the axis of smaller displacement.
            let corner =
                if dx < dy { Point::new(last.x, target.y) } else { Point::new(target.x, last.y) };
            path.push(corner);
        } else {
            match Orientation::of_segment(path[len - 2], last) {
                Some(Orientation::Horizontal) => path[len - 1].x = target.x,
                Some(Orientation::Vertical) => path[len - 1].y = target.y,
                None if dx < dy => path[len - 1].x = target.x,
                None => path[len - 1].y = target.y,
            }
        }
    }
    path.push(target);

    let mut simplified = simplify_collinear(&path);
    if simplified.len() < 2 {
        simplified = vec![path[0], target];
    }

    let start_terminal = wire.start_connected_to().cloned();
    wire.set_path(simplified);
    wire.set_end(target);
    wire.set_end_connected_to(Some(nearest.terminal_id.clone()));

    circuit.connect_terminal(&nearest.terminal_id, wire_id);
    if let Some(start_terminal) = start_terminal {
        circuit.connect_terminal(&start_terminal, wire_id);
    }
    true
}

/// Finds the interior corner closest to `point` within `radius` (inclusive).
///
/// Endpoints are never returned. Ties resolve to the earliest wire, then the
/// earliest corner.
pub fn find_corner_at(circuit: &Circuit, point: Point, radius: f64) -> Option<(WireId, usize)> {
    let mut best: Option<(f64, &WireId, usize)> = None;
    for wire in circuit.wires() {
        for (index, corner) in wire.corners() {
            let distance = corner.distance(point);
            if distance > radius {
                continue;
            }
            if best.is_some_and(|(best_distance, _, _)| distance >= best_distance) {
                continue;
            }
            best = Some((distance, wire.id(), index));
        }
    }
    best.map(|(_, wire_id, index)| (wire_id.clone(), index))
}

/// Moves interior vertex `index` towards `pointer` and repairs its neighbours.
///
/// Segment orientations alternate from `reference`. With a single corner the
/// pointer picks between the two L-shapes. The last interior corner slides along
/// the final segment and drags earlier corners with it; any other corner slides
/// along its incoming segment and drags later corners. Endpoints never move.
pub fn move_corner(
    path: &mut [Point],
    index: usize,
    reference: Orientation,
    pointer: Point,
) -> bool {
    let len = path.len();
    if index == 0 || index + 1 >= len {
        return false;
    }

    let original = path.to_vec();
    let prev = path[index - 1];
    let next = path[index + 1];
    let is_last_corner = index == len - 2;

    if index == 1 && is_last_corner {
        let dx = (pointer.x - prev.x).abs();
        let dy = (pointer.y - prev.y).abs();
        path[index] =
            if dx < dy { Point::new(prev.x, next.y) } else { Point::new(next.x, prev.y) };
    } else if is_last_corner {
        path[index] = match reference.at(index) {
            Orientation::Horizontal => Point::new(pointer.x, next.y),
            Orientation::Vertical => Point::new(next.x, pointer.y),
        };
        for i in (1..index).rev() {
            let follow = path[i + 1];
            match reference.at(i) {
                Orientation::Horizontal => path[i].y = follow.y,
                Orientation::Vertical => path[i].x = follow.x,
            }
        }
    } else {
        path[index] = match reference.at(index - 1) {
            Orientation::Horizontal => Point::new(pointer.x, prev.y),
            Orientation::Vertical => Point::new(prev.x, pointer.y),
        };
        for i in index + 1..len - 1 {
            let lead = path[i - 1];
            match reference.at(i - 1) {
                Orientation::Horizontal => path[i].y = lead.y,
                Orientation::Vertical => path[i].x = lead.x,
            }
        }
    }

    path != original.as_slice()
}

/// Re-attaches every wire end connected to one of `terminals`.
///
/// The endpoint jumps to the terminal's position and the adjacent vertex is
/// re-snapped so the first (or last) segment is orthogonal again. Two-point
/// wires gain an L corner instead of dragging their far end off its anchor.
/// Repeating the call with unchanged terminals changes nothing.
pub fn reanchor_wires(circuit: &mut Circuit, terminals: &[Terminal]) -> bool {
    let mut changed = false;
    for terminal in terminals {
        for wire in circuit.wires_mut() {
            if wire.start_connected_to() == Some(terminal.id()) {
                let mut path = wire.path().to_vec();
                path.reverse();
                let moved = reanchor_tail(&mut path, terminal.position());
                path.reverse();
                if moved {
                    wire.set_path(path);
                    changed = true;
                }
                wire.set_start(terminal.position());
            }
            if wire.end_connected_to() == Some(terminal.id()) {
                let mut path = wire.path().to_vec();
                if reanchor_tail(&mut path, terminal.position()) {
                    wire.set_path(path);
                    changed = true;
                }
                wire.set_end(terminal.position());
            }
        }
    }
    changed
}

/// Moves the last point of `path` to `anchor` and repairs the segment before it.
fn reanchor_tail(path: &mut Vec<Point>, anchor: Point) -> bool {
    let len = path.len();
    let Some(&tail) = path.last() else {
        return false;
    };
    if tail == anchor {
        return false;
    }

    match len {
        1 => path[0] = anchor,
        2 => {
            let fixed = path[0];
            path[1] = anchor;
            let dx = (anchor.x - fixed.x).abs();
            let dy = (anchor.y - fixed.y).abs();
            if dx > EPSILON && dy > EPSILON {
                let corner = if dx > dy {
                    Point::new(anchor.x, fixed.y)
                } else {
                    Point::new(fixed.x, anchor.y)
                };
                path.insert(1, corner);
            }
        }
        _ => {
            path[len - 1] = anchor;
            let inner = path[len - 3];
            let adjacent = path[len - 2];
            // A zero-length inner segment takes the axis the rest of the path
            // alternates into; failing that, the axis away from the anchor.
            let inward = Orientation::of_segment(inner, adjacent)
                .or_else(|| Orientation::of_path(&path[..len - 1]).map(|o| o.at(len - 3)))
                .unwrap_or_else(|| {
                    let dx = (anchor.x - adjacent.x).abs();
                    let dy = (anchor.y - adjacent.y).abs();
                    if dx > dy {
                        Orientation::Vertical
                    } else {
                        Orientation::Horizontal
                    }
                });
            match inward {
                Orientation::Horizontal => path[len - 2].x = anchor.x,
                Orientation::Vertical => path[len - 2].y = anchor.y,
            }
        }
    }
    true
}

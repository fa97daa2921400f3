// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Component-level mutations.
//!
//! Ops are applied atomically with optimistic concurrency (revision checks) and
//! produce a delta of touched components and wires. Moving or rotating a
//! component re-anchors the wires attached to it in the same step.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::RouteConfig;
use crate::model::{Circuit, Component, ComponentId, ComponentKind, Point, Terminal, WireId};
use crate::route::reroute_wire;
use crate::session::reanchor_wires;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    PlaceComponent { component_id: ComponentId, kind: ComponentKind, position: Point },
    MoveComponent { component_id: ComponentId, position: Point },
    RotateComponent { component_id: ComponentId, degrees: f64 },
    RemoveComponent { component_id: ComponentId },
    RemoveWire { wire_id: WireId },
    RerouteWire { wire_id: WireId },
}

/// A changed object, as reported in a [`Delta`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRef {
    Component(ComponentId),
    Wire(WireId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Coarse description of what an op batch touched, sorted components first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<ObjectRef>,
    pub removed: Vec<ObjectRef>,
    pub updated: Vec<ObjectRef>,
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<ObjectRef>,
    removed: BTreeSet<ObjectRef>,
    updated: BTreeSet<ObjectRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, object_ref: ObjectRef) {
        self.removed.remove(&object_ref);
        self.updated.remove(&object_ref);
        self.added.insert(object_ref);
    }

    fn record_removed(&mut self, object_ref: ObjectRef) {
        // Added and removed within one batch: it never existed.
        if self.added.remove(&object_ref) {
            self.updated.remove(&object_ref);
            return;
        }
        self.updated.remove(&object_ref);
        self.removed.insert(object_ref);
    }

    fn record_updated(&mut self, object_ref: ObjectRef) {
        if self.added.contains(&object_ref) || self.removed.contains(&object_ref) {
            return;
        }
        self.updated.insert(object_ref);
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
        }
    }
}

/// Applies `ops` in order; on any error the circuit is left untouched.
pub fn apply_ops(
    circuit: &mut Circuit,
    base_rev: u64,
    ops: &[Op],
    route_config: &RouteConfig,
) -> Result<ApplyResult, ApplyError> {
    let current_rev = circuit.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict { base_rev, current_rev });
    }

    if ops.is_empty() {
        return Ok(ApplyResult { new_rev: current_rev, applied: 0, delta: Delta::default() });
    }

    let mut next = circuit.clone();
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_op(&mut next, op, route_config, &mut delta)?;
    }

    next.bump_rev();
    let new_rev = next.rev();
    *circuit = next;

    Ok(ApplyResult { new_rev, applied: ops.len(), delta: delta.finish() })
}

fn apply_op(
    circuit: &mut Circuit,
    op: &Op,
    route_config: &RouteConfig,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        Op::PlaceComponent { component_id, kind, position } => {
            let component = Component::new(component_id.clone(), *kind, *position);
            if !circuit.insert_component(component) {
                return Err(ApplyError::AlreadyExists {
                    kind: ObjectKind::Component,
                    object_id: component_id.to_string(),
                });
            }
            delta.record_added(ObjectRef::Component(component_id.clone()));
        }
        Op::MoveComponent { component_id, position } => {
            let terminals = circuit
                .move_component(component_id, *position)
                .ok_or_else(|| component_not_found(component_id))?;
            delta.record_updated(ObjectRef::Component(component_id.clone()));
            reanchor_and_record(circuit, &terminals, delta);
        }
        Op::RotateComponent { component_id, degrees } => {
            let terminals = circuit
                .rotate_component(component_id, *degrees)
                .ok_or_else(|| component_not_found(component_id))?;
            delta.record_updated(ObjectRef::Component(component_id.clone()));
            reanchor_and_record(circuit, &terminals, delta);
        }
        Op::RemoveComponent { component_id } => {
            let removed_wires = circuit
                .remove_component(component_id)
                .ok_or_else(|| component_not_found(component_id))?;
            delta.record_removed(ObjectRef::Component(component_id.clone()));
            for wire_id in removed_wires {
                delta.record_removed(ObjectRef::Wire(wire_id));
            }
        }
        Op::RemoveWire { wire_id } => {
            if !circuit.remove_wire(wire_id) {
                return Err(wire_not_found(wire_id));
            }
            delta.record_removed(ObjectRef::Wire(wire_id.clone()));
        }
        Op::RerouteWire { wire_id } => {
            if circuit.wire(wire_id).is_none() {
                return Err(wire_not_found(wire_id));
            }
            if reroute_wire(circuit, wire_id, route_config) {
                delta.record_updated(ObjectRef::Wire(wire_id.clone()));
            }
        }
    }
    Ok(())
}

fn reanchor_and_record(circuit: &mut Circuit, terminals: &[Terminal], delta: &mut DeltaBuilder) {
    let before = circuit
        .wires()
        .iter()
        .filter(|wire| terminals.iter().any(|terminal| wire.is_connected_to(terminal.id())))
        .map(|wire| (wire.id().clone(), wire.path().to_vec()))
        .collect::<Vec<_>>();

    if !reanchor_wires(circuit, terminals) {
        return;
    }

    for (wire_id, path) in before {
        let changed = circuit.wire(&wire_id).is_some_and(|wire| wire.path() != path.as_slice());
        if changed {
            delta.record_updated(ObjectRef::Wire(wire_id));
        }
    }
}

fn component_not_found(component_id: &ComponentId) -> ApplyError {
    ApplyError::NotFound { kind: ObjectKind::Component, object_id: component_id.to_string() }
}

fn wire_not_found(wire_id: &WireId) -> ApplyError {
    ApplyError::NotFound { kind: ObjectKind::Wire, object_id: wire_id.to_string() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Component,
    Wire,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    Conflict { base_rev: u64, current_rev: u64 },
    AlreadyExists { kind: ObjectKind, object_id: String },
    NotFound { kind: ObjectKind, object_id: String },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { base_rev, current_rev } => {
                write!(f, "stale base_rev (base_rev={base_rev}, current_rev={current_rev})")
            }
            Self::AlreadyExists { kind, object_id } => {
                write!(f, "object already exists ({kind:?}, id={object_id})")
            }
            Self::NotFound { kind, object_id } => {
                write!(f, "object not found ({kind:?}, id={object_id})")
            }
        }
    }
}

impl std::error::Error for ApplyError {}

#[cfg(test)]
mod tests;

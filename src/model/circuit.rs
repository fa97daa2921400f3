// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::component::{Component, ComponentKind, Terminal, Terminals};
use super::geometry::{Point, Rect, Segment};
use super::ids::{ComponentId, TerminalId, WireId};
use super::wire::Wire;

/// The canvas contents: components and the wires between their terminals.
///
/// Components and wires keep insertion order; lookups that can tie (nearest
/// terminal, corner hit-testing) resolve to the earliest entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circuit {
    name: String,
    rev: u64,
    components: Vec<Component>,
    wires: Vec<Wire>,
    next_component_seq: u64,
    next_wire_seq: u64,
}

/// Result of a terminal proximity lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestTerminal {
    pub terminal_id: TerminalId,
    pub position: Point,
    pub component_id: ComponentId,
}

impl Circuit {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub(crate) fn set_rev(&mut self, rev: u64) {
        self.rev = rev;
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn component(&self, component_id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|component| component.id() == component_id)
    }

    pub fn component_mut(&mut self, component_id: &ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|component| component.id() == component_id)
    }

    pub fn wire(&self, wire_id: &WireId) -> Option<&Wire> {
        self.wires.iter().find(|wire| wire.id() == wire_id)
    }

    pub fn wire_mut(&mut self, wire_id: &WireId) -> Option<&mut Wire> {
        self.wires.iter_mut().find(|wire| wire.id() == wire_id)
    }

    pub fn wires_mut(&mut self) -> &mut [Wire] {
        &mut self.wires
    }

    pub fn terminal(&self, terminal_id: &TerminalId) -> Option<&Terminal> {
        self.components.iter().find_map(|component| component.terminal(terminal_id))
    }

    fn terminal_mut(&mut self, terminal_id: &TerminalId) -> Option<&mut Terminal> {
        self.components
            .iter_mut()
            .flat_map(|component| component.terminals_mut().iter_mut())
            .find(|terminal| terminal.id() == terminal_id)
    }

    /// Places a new catalog part and returns its freshly allocated id.
    pub fn add_component(&mut self, kind: ComponentKind, position: Point) -> ComponentId {
        let component_id = loop {
            self.next_component_seq += 1;
            let candidate = ComponentId::nth(self.next_component_seq);
            if self.component(&candidate).is_none() {
                break candidate;
            }
        };

        self.components.push(Component::new(component_id.clone(), kind, position));
        component_id
    }

    /// Inserts a component with a caller-chosen id; returns `false` on an id clash.
    pub fn insert_component(&mut self, component: Component) -> bool {
        if self.component(component.id()).is_some() {
            return false;
        }
        self.components.push(component);
        true
    }

    /// Moves a component and returns a snapshot of its terminals at their new positions.
    pub fn move_component(
        &mut self,
        component_id: &ComponentId,
        position: Point,
    ) -> Option<Terminals> {
        let component = self.component_mut(component_id)?;
        component.set_position(position);
        Some(component.terminals().iter().cloned().collect())
    }

    pub fn rotate_component(
        &mut self,
        component_id: &ComponentId,
        degrees: f64,
    ) -> Option<Terminals> {
        let component = self.component_mut(component_id)?;
        component.rotate_by(degrees);
        Some(component.terminals().iter().cloned().collect())
    }

    /// Removes a component together with every wire attached to one of its terminals.
    ///
    /// Returns the ids of the removed wires, or `None` when the component is unknown.
    pub fn remove_component(&mut self, component_id: &ComponentId) -> Option<Vec<WireId>> {
        let idx = self.components.iter().position(|component| component.id() == component_id)?;
        let component = self.components.remove(idx);

        let attached = self
            .wires
            .iter()
            .filter(|wire| {
                component.terminals().iter().any(|terminal| wire.is_connected_to(terminal.id()))
            })
            .map(|wire| wire.id().clone())
            .collect::<Vec<_>>();

        for wire_id in &attached {
            self.remove_wire(wire_id);
        }
        Some(attached)
    }

    /// Allocates a new, empty wire and appends it to the wire collection.
    pub fn add_wire(&mut self) -> WireId {
        let wire_id = loop {
            self.next_wire_seq += 1;
            let candidate = WireId::nth(self.next_wire_seq);
            if self.wire(&candidate).is_none() {
                break candidate;
            }
        };

        self.wires.push(Wire::new(wire_id.clone()));
        wire_id
    }

    pub(crate) fn insert_wire(&mut self, wire: Wire) -> bool {
        if self.wire(wire.id()).is_some() {
            return false;
        }
        self.wires.push(wire);
        true
    }

    /// Removes a wire and clears every terminal back-reference pointing at it.
    pub fn remove_wire(&mut self, wire_id: &WireId) -> bool {
        let Some(idx) = self.wires.iter().position(|wire| wire.id() == wire_id) else {
            return false;
        };
        self.wires.remove(idx);

        for component in &mut self.components {
            for terminal in component.terminals_mut() {
                if terminal.connected_wire() == Some(wire_id) {
                    terminal.set_connected_wire(None);
                }
            }
        }
        true
    }

    /// Records `wire_id` as the wire attached to `terminal_id`.
    pub fn connect_terminal(&mut self, terminal_id: &TerminalId, wire_id: &WireId) -> bool {
        let Some(terminal) = self.terminal_mut(terminal_id) else {
            return false;
        };
        terminal.set_connected_wire(Some(wire_id.clone()));
        true
    }

    pub(crate) fn disconnect_terminal(&mut self, terminal_id: &TerminalId) {
        if let Some(terminal) = self.terminal_mut(terminal_id) {
            terminal.set_connected_wire(None);
        }
    }

    /// Finds the terminal closest to `point` within `max_distance` (inclusive).
    pub fn find_nearest_terminal(
        &self,
        point: Point,
        max_distance: f64,
    ) -> Option<NearestTerminal> {
        self.find_nearest_terminal_where(point, max_distance, |_| true)
    }

    /// Like [`Circuit::find_nearest_terminal`], but only terminals free for
    /// `wire_id`: unconnected, or already connected to that wire.
    pub fn find_nearest_free_terminal(
        &self,
        point: Point,
        max_distance: f64,
        wire_id: Option<&WireId>,
    ) -> Option<NearestTerminal> {
        self.find_nearest_terminal_where(point, max_distance, |terminal| {
            terminal.connected_wire().map_or(true, |connected| Some(connected) == wire_id)
        })
    }

    fn find_nearest_terminal_where(
        &self,
        point: Point,
        max_distance: f64,
        accept: impl Fn(&Terminal) -> bool,
    ) -> Option<NearestTerminal> {
        let mut best: Option<(f64, NearestTerminal)> = None;

        for component in &self.components {
            for terminal in component.terminals().iter().filter(|terminal| accept(terminal)) {
                let distance = terminal.position().distance(point);
                if distance > max_distance {
                    continue;
                }
                if best.as_ref().is_some_and(|(best_distance, _)| distance >= *best_distance) {
                    continue;
                }
                best = Some((
                    distance,
                    NearestTerminal {
                        terminal_id: terminal.id().clone(),
                        position: terminal.position(),
                        component_id: component.id().clone(),
                    },
                ));
            }
        }

        best.map(|(_, nearest)| nearest)
    }

    /// Padded component footprints, computed fresh from current positions.
    pub fn obstacles(&self) -> Vec<Rect> {
        self.components.iter().map(Component::obstacle).collect()
    }

    /// Segments of every wire, optionally skipping one (usually the wire being routed).
    pub fn wire_segments(&self, excluding: Option<&WireId>) -> Vec<Segment> {
        self.wires
            .iter()
            .filter(|wire| Some(wire.id()) != excluding)
            .flat_map(|wire| wire.segments())
            .collect()
    }

    /// Bounding box of all components and wire vertices.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self
            .components
            .iter()
            .flat_map(|component| {
                let b = component.bounds();
                [Point::new(b.min_x, b.min_y), Point::new(b.max_x, b.max_y)]
            })
            .chain(self.wires.iter().flat_map(|wire| wire.path().iter().copied()));

        let first = points.next()?;
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        for p in points {
            rect.min_x = rect.min_x.min(p.x);
            rect.min_y = rect.min_y.min(p.y);
            rect.max_x = rect.max_x.max(p.x);
            rect.max_y = rect.max_y.max(p.y);
        }
        Some(rect)
    }
}

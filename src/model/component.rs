// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use super::geometry::{Point, Rect};
use super::ids::{ComponentId, TerminalId, WireId};

/// Margin added around a component body when it is used as a routing obstacle.
pub const OBSTACLE_PADDING: f64 = 10.0;

/// The catalog of placeable parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Battery,
    LiIonCell,
    Led,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::LiIonCell => "liion_cell",
            Self::Led => "led",
        }
    }

    /// Half-width and half-height of the body, before rotation.
    pub fn half_size(self) -> (f64, f64) {
        match self {
            Self::Battery => (40.0, 20.0),
            Self::LiIonCell => (30.0, 10.0),
            Self::Led => (15.0, 30.0),
        }
    }

    /// Terminal layout relative to the body centre, before rotation.
    pub fn terminal_layout(self) -> [(Polarity, Point); 2] {
        match self {
            // Snap terminals protrude from the top.
            Self::Battery => [
                (Polarity::Positive, Point::new(-15.0, -35.0)),
                (Polarity::Negative, Point::new(15.0, -35.0)),
            ],
            Self::LiIonCell => [
                (Polarity::Positive, Point::new(35.0, 0.0)),
                (Polarity::Negative, Point::new(-33.0, 0.0)),
            ],
            // Anode and cathode leads at the bottom.
            Self::Led => [
                (Polarity::Positive, Point::new(-6.0, 30.0)),
                (Polarity::Negative, Point::new(6.0, 30.0)),
            ],
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseComponentKindError {
    value: String,
}

impl fmt::Display for ParseComponentKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown component kind '{}'", self.value)
    }
}

impl std::error::Error for ParseComponentKindError {}

impl FromStr for ComponentKind {
    type Err = ParseComponentKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "battery" => Ok(Self::Battery),
            "liion_cell" => Ok(Self::LiIonCell),
            "led" => Ok(Self::Led),
            _ => Err(ParseComponentKindError { value: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }

    fn id_suffix(self) -> &'static str {
        match self {
            Self::Positive => "pos",
            Self::Negative => "neg",
        }
    }
}

/// A connection point owned by exactly one component.
///
/// `connected_wire` is a back-reference kept in sync by the routing session;
/// the terminal never owns the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    id: TerminalId,
    position: Point,
    polarity: Polarity,
    connected_wire: Option<WireId>,
}

impl Terminal {
    pub fn new(id: TerminalId, polarity: Polarity, position: Point) -> Self {
        Self { id, position, polarity, connected_wire: None }
    }

    pub fn id(&self) -> &TerminalId {
        &self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn connected_wire(&self) -> Option<&WireId> {
        self.connected_wire.as_ref()
    }

    pub fn set_connected_wire(&mut self, wire_id: Option<WireId>) {
        self.connected_wire = wire_id;
    }
}

/// Terminals of one component; every catalog part has exactly two.
pub type Terminals = SmallVec<[Terminal; 2]>;

#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    id: ComponentId,
    kind: ComponentKind,
    position: Point,
    rotation: f64,
    terminals: Terminals,
}

impl Component {
    /// Creates a component with terminal ids derived from its own id
    /// (`<component>:pos`, `<component>:neg`).
    pub fn new(id: ComponentId, kind: ComponentKind, position: Point) -> Self {
        let terminals = kind
            .terminal_layout()
            .iter()
            .map(|(polarity, _)| {
                Terminal::new(id.terminal_id(polarity.id_suffix()), *polarity, position)
            })
            .collect::<Terminals>();

        let mut component = Self { id, kind, position, rotation: 0.0, terminals };
        component.update_terminal_positions();
        component
    }

    pub(crate) fn from_parts(
        id: ComponentId,
        kind: ComponentKind,
        position: Point,
        rotation: f64,
        terminals: Terminals,
    ) -> Self {
        let mut component =
            Self { id, kind, position, rotation: normalize_degrees(rotation), terminals };
        component.update_terminal_positions();
        component
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Rotation in degrees, normalized to `[0, 360)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    pub fn terminals_mut(&mut self) -> &mut [Terminal] {
        &mut self.terminals
    }

    pub fn terminal(&self, terminal_id: &TerminalId) -> Option<&Terminal> {
        self.terminals.iter().find(|terminal| terminal.id() == terminal_id)
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.update_terminal_positions();
    }

    pub fn rotate_by(&mut self, degrees: f64) {
        self.rotation = normalize_degrees(self.rotation + degrees);
        self.update_terminal_positions();
    }

    /// Axis-aligned bounds of the rotated body (terminals excluded).
    pub fn bounds(&self) -> Rect {
        let (hx, hy) = self.kind.half_size();
        let corners = [(-hx, -hy), (hx, -hy), (hx, hy), (-hx, hy)];

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for (lx, ly) in corners {
            let p = self.to_world(Point::new(lx, ly));
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Rect::new(min_x, min_y, max_x, max_y)
    }

    pub fn obstacle(&self) -> Rect {
        self.bounds().expand(OBSTACLE_PADDING)
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    fn to_world(&self, local: Point) -> Point {
        let (sin_a, cos_a) = self.rotation.to_radians().sin_cos();
        let x = local.x * cos_a - local.y * sin_a;
        let y = local.x * sin_a + local.y * cos_a;
        Point::new(self.position.x + snap_tiny(x), self.position.y + snap_tiny(y))
    }

    fn update_terminal_positions(&mut self) {
        let layout = self.kind.terminal_layout();
        for idx in 0..self.terminals.len() {
            let polarity = self.terminals[idx].polarity;
            if let Some((_, local)) = layout.iter().find(|(p, _)| *p == polarity) {
                let world = self.to_world(*local);
                self.terminals[idx].position = world;
            }
        }
    }
}

fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    if normalized.is_finite() {
        normalized
    } else {
        0.0
    }
}

// Quarter-turn rotations should land on exact coordinates, not 1e-15 residue.
fn snap_tiny(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-9 {
        rounded
    } else {
        value
    }
}

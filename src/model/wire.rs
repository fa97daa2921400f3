// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::geometry::{is_orthogonal_path, Point, Segment};
use super::ids::{TerminalId, WireId};

/// A wire between two terminals.
///
/// While a wire is being drawn `path` holds the committed vertices (at least the
/// start) and `end` is the live preview position. Once committed, `path` has at
/// least two points and every segment is horizontal or vertical.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    id: WireId,
    path: Vec<Point>,
    start: Point,
    end: Point,
    start_connected_to: Option<TerminalId>,
    end_connected_to: Option<TerminalId>,
}

impl Wire {
    pub fn new(id: WireId) -> Self {
        Self {
            id,
            path: Vec::new(),
            start: Point::default(),
            end: Point::default(),
            start_connected_to: None,
            end_connected_to: None,
        }
    }

    pub fn id(&self) -> &WireId {
        &self.id
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn path_mut(&mut self) -> &mut Vec<Point> {
        &mut self.path
    }

    pub fn set_path(&mut self, path: Vec<Point>) {
        self.path = path;
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn set_start(&mut self, start: Point) {
        self.start = start;
    }

    /// Final position once committed; the preview position while drawing.
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn set_end(&mut self, end: Point) {
        self.end = end;
    }

    pub fn start_connected_to(&self) -> Option<&TerminalId> {
        self.start_connected_to.as_ref()
    }

    pub fn set_start_connected_to(&mut self, terminal_id: Option<TerminalId>) {
        self.start_connected_to = terminal_id;
    }

    pub fn end_connected_to(&self) -> Option<&TerminalId> {
        self.end_connected_to.as_ref()
    }

    pub fn set_end_connected_to(&mut self, terminal_id: Option<TerminalId>) {
        self.end_connected_to = terminal_id;
    }

    pub fn is_connected_to(&self, terminal_id: &TerminalId) -> bool {
        self.start_connected_to.as_ref() == Some(terminal_id)
            || self.end_connected_to.as_ref() == Some(terminal_id)
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.path.windows(2).map(|pair| Segment::new(pair[0], pair[1]))
    }

    /// Interior vertices, i.e. the draggable corners.
    pub fn corners(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        let last = self.path.len().saturating_sub(1);
        self.path
            .iter()
            .copied()
            .enumerate()
            .filter(move |(idx, _)| *idx != 0 && *idx != last)
    }

    pub fn is_orthogonal(&self) -> bool {
        is_orthogonal_path(&self.path)
    }
}

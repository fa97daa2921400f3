// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use orthowire::model::{Circuit, ComponentId, ComponentKind, Point, Polarity};
use orthowire::session::RoutingSession;

pub const SPACING: f64 = 160.0;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("orthowire_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Dense,
}

impl Case {
    pub fn dims(self) -> (usize, usize) {
        match self {
            Self::Small => (2, 3),
            Self::Medium => (4, 6),
            Self::Dense => (8, 10),
        }
    }
}

pub fn fixture(case: Case) -> Circuit {
    let (rows, cols) = case.dims();
    grid_circuit(rows, cols)
}

/// `rows x cols` components on a square lattice, alternating batteries and LEDs.
///
/// Each row is chained `neg -> pos` left to right with wires drawn through a
/// [`RoutingSession`], two clicks per wire.
pub fn grid_circuit(rows: usize, cols: usize) -> Circuit {
    let mut circuit = Circuit::new(format!("grid-{rows}x{cols}"));
    let mut session = RoutingSession::new();

    for row in 0..rows {
        let mut row_ids = Vec::with_capacity(cols);
        for col in 0..cols {
            let kind = if (row + col) % 2 == 0 { ComponentKind::Battery } else { ComponentKind::Led };
            let position = Point::new(col as f64 * SPACING, row as f64 * SPACING);
            row_ids.push(circuit.add_component(kind, position));
        }

        for pair in row_ids.windows(2) {
            let from = terminal_position(&circuit, &pair[0], Polarity::Negative);
            let to = terminal_position(&circuit, &pair[1], Polarity::Positive);
            session.begin_or_continue(&mut circuit, from);
            session.begin_or_continue(&mut circuit, to);
        }
    }

    circuit
}

pub fn terminal_position(circuit: &Circuit, component_id: &ComponentId, polarity: Polarity) -> Point {
    circuit
        .component(component_id)
        .and_then(|component| component.terminals().iter().find(|t| t.polarity() == polarity))
        .map(|terminal| terminal.position())
        .expect("terminal")
}

/// Endpoints in the column gaps next to the first and last component of
/// opposite rows, so that both L-shapes cut through components and the grid
/// search has to run.
pub fn search_endpoints(case: Case) -> (Point, Point) {
    let (rows, cols) = case.dims();
    let start = Point::new(SPACING / 2.0 + 3.0, 7.0);
    let end = Point::new((cols as f64 - 1.5) * SPACING - 3.0, (rows - 1) as f64 * SPACING - 7.0);
    (start, end)
}

pub fn checksum_circuit(circuit: &Circuit) -> u64 {
    let mut acc = 0u64;
    for wire in circuit.wires() {
        acc = acc.wrapping_mul(131).wrapping_add(wire.path().len() as u64);
        for point in wire.path() {
            acc = acc.wrapping_add(point.x.abs() as u64);
            acc = acc.wrapping_add(point.y.abs() as u64);
        }
    }
    for component in circuit.components() {
        acc = acc.wrapping_mul(131).wrapping_add(component.position().x.abs() as u64);
    }
    acc
}

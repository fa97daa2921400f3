// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence and undo history for circuits.
//!
//! Circuits are stored as a single JSON document. Model types stay serde-free;
//! this module owns the on-disk shape and validates ids on the way in.

pub mod history;

pub use history::{History, DEFAULT_HISTORY_LIMIT};

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::{
    Circuit, Component, ComponentId, ComponentKind, IdError, Point, Polarity, Terminal,
    TerminalId, Terminals, Wire, WireId,
};

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    /// `path` is `None` for in-memory encoding and decoding.
    Json { path: Option<PathBuf>, source: serde_json::Error },
    InvalidId { field: &'static str, value: String, source: Box<IdError> },
    DuplicateId { field: &'static str, value: String },
    DanglingReference { wire_id: WireId, terminal_id: TerminalId },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path: Some(path), source } => write!(f, "json error at {path:?}: {source}"),
            Self::Json { path: None, source } => write!(f, "json error: {source}"),
            Self::InvalidId { field, value, source } => {
                write!(f, "invalid id for {field}: {value:?}: {source}")
            }
            Self::DuplicateId { field, value } => write!(f, "duplicate id for {field}: {value:?}"),
            Self::DanglingReference { wire_id, terminal_id } => {
                write!(f, "wire {wire_id} references unknown terminal {terminal_id}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::DuplicateId { .. } | Self::DanglingReference { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CircuitJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    rev: u64,
    #[serde(default)]
    components: Vec<ComponentJson>,
    #[serde(default)]
    wires: Vec<WireJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ComponentJson {
    id: String,
    kind: ComponentKindJson,
    position: PointJson,
    #[serde(default)]
    rotation: f64,
    #[serde(default)]
    terminals: Vec<TerminalJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TerminalJson {
    id: String,
    polarity: PolarityJson,
    #[serde(default)]
    connected_wire: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireJson {
    id: String,
    #[serde(default)]
    path: Vec<PointJson>,
    #[serde(default)]
    start_connected_to: Option<String>,
    #[serde(default)]
    end_connected_to: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PointJson {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ComponentKindJson {
    Battery,
    #[serde(rename = "liion_cell")]
    LiIonCell,
    Led,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PolarityJson {
    Positive,
    Negative,
}

impl From<Point> for PointJson {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointJson> for Point {
    fn from(p: PointJson) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<ComponentKind> for ComponentKindJson {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Battery => Self::Battery,
            ComponentKind::LiIonCell => Self::LiIonCell,
            ComponentKind::Led => Self::Led,
        }
    }
}

impl From<ComponentKindJson> for ComponentKind {
    fn from(kind: ComponentKindJson) -> Self {
        match kind {
            ComponentKindJson::Battery => Self::Battery,
            ComponentKindJson::LiIonCell => Self::LiIonCell,
            ComponentKindJson::Led => Self::Led,
        }
    }
}

impl From<Polarity> for PolarityJson {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Positive => Self::Positive,
            Polarity::Negative => Self::Negative,
        }
    }
}

impl From<PolarityJson> for Polarity {
    fn from(polarity: PolarityJson) -> Self {
        match polarity {
            PolarityJson::Positive => Self::Positive,
            PolarityJson::Negative => Self::Negative,
        }
    }
}

fn circuit_to_json(circuit: &Circuit) -> CircuitJson {
    CircuitJson {
        name: circuit.name().to_owned(),
        rev: circuit.rev(),
        components: circuit
            .components()
            .iter()
            .map(|component| ComponentJson {
                id: component.id().to_string(),
                kind: component.kind().into(),
                position: component.position().into(),
                rotation: component.rotation(),
                terminals: component
                    .terminals()
                    .iter()
                    .map(|terminal| TerminalJson {
                        id: terminal.id().to_string(),
                        polarity: terminal.polarity().into(),
                        connected_wire: terminal.connected_wire().map(ToString::to_string),
                    })
                    .collect(),
            })
            .collect(),
        wires: circuit
            .wires()
            .iter()
            .map(|wire| WireJson {
                id: wire.id().to_string(),
                path: wire.path().iter().copied().map(PointJson::from).collect(),
                start_connected_to: wire.start_connected_to().map(ToString::to_string),
                end_connected_to: wire.end_connected_to().map(ToString::to_string),
            })
            .collect(),
    }
}

fn parse_id<T>(field: &'static str, value: &str) -> Result<crate::model::Id<T>, StoreError> {
    crate::model::Id::new(value).map_err(|source| StoreError::InvalidId {
        field,
        value: value.to_owned(),
        source: Box::new(source),
    })
}

fn parse_optional_id<T>(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<crate::model::Id<T>>, StoreError> {
    value.map(|value| parse_id(field, value)).transpose()
}

fn circuit_from_json(json: CircuitJson) -> Result<Circuit, StoreError> {
    let mut circuit = Circuit::new(json.name);
    circuit.set_rev(json.rev);

    for component_json in json.components {
        let component_id: ComponentId = parse_id("component.id", &component_json.id)?;
        let kind = ComponentKind::from(component_json.kind);
        let position = Point::from(component_json.position);

        let component = if component_json.terminals.is_empty() {
            let mut component = Component::new(component_id.clone(), kind, position);
            component.rotate_by(component_json.rotation);
            component
        } else {
            let mut terminals = Terminals::new();
            for terminal_json in component_json.terminals {
                let terminal_id: TerminalId = parse_id("terminal.id", &terminal_json.id)?;
                let mut terminal =
                    Terminal::new(terminal_id, terminal_json.polarity.into(), position);
                terminal.set_connected_wire(parse_optional_id(
                    "terminal.connected_wire",
                    terminal_json.connected_wire.as_deref(),
                )?);
                terminals.push(terminal);
            }
            Component::from_parts(
                component_id.clone(),
                kind,
                position,
                component_json.rotation,
                terminals,
            )
        };

        if !circuit.insert_component(component) {
            return Err(StoreError::DuplicateId {
                field: "component.id",
                value: component_id.into_string(),
            });
        }
    }

    for wire_json in json.wires {
        let wire_id: WireId = parse_id("wire.id", &wire_json.id)?;
        let start_connected_to: Option<TerminalId> =
            parse_optional_id("wire.start_connected_to", wire_json.start_connected_to.as_deref())?;
        let end_connected_to: Option<TerminalId> =
            parse_optional_id("wire.end_connected_to", wire_json.end_connected_to.as_deref())?;

        for terminal_id in start_connected_to.iter().chain(end_connected_to.iter()) {
            if circuit.terminal(terminal_id).is_none() {
                return Err(StoreError::DanglingReference {
                    wire_id,
                    terminal_id: terminal_id.clone(),
                });
            }
        }

        let path = wire_json.path.into_iter().map(Point::from).collect::<Vec<_>>();
        let mut wire = Wire::new(wire_id.clone());
        if let (Some(&start), Some(&end)) = (path.first(), path.last()) {
            wire.set_start(start);
            wire.set_end(end);
        }
        wire.set_path(path);
        wire.set_start_connected_to(start_connected_to);
        wire.set_end_connected_to(end_connected_to);

        if !circuit.insert_wire(wire) {
            return Err(StoreError::DuplicateId { field: "wire.id", value: wire_id.into_string() });
        }
    }

    reconcile_back_references(&mut circuit);
    Ok(circuit)
}

/// Wires are authoritative: terminals point at the wire that names them, and
/// stale terminal back-references are dropped.
///
/// A terminal holds one wire. When several wires name it, a back-reference one
/// of them confirms wins, otherwise the first such wire in file order; the other
/// wires lose their claim on that terminal.
fn reconcile_back_references(circuit: &mut Circuit) {
    let stale = circuit
        .components()
        .iter()
        .flat_map(|component| component.terminals())
        .filter(|terminal| {
            terminal.connected_wire().is_some_and(|wire_id| {
                !circuit.wire(wire_id).is_some_and(|wire| wire.is_connected_to(terminal.id()))
            })
        })
        .map(|terminal| terminal.id().clone())
        .collect::<Vec<_>>();
    for terminal_id in &stale {
        circuit.disconnect_terminal(terminal_id);
    }

    let links = circuit
        .wires()
        .iter()
        .flat_map(|wire| {
            [wire.start_connected_to(), wire.end_connected_to()]
                .into_iter()
                .flatten()
                .map(move |terminal_id| (terminal_id.clone(), wire.id().clone()))
        })
        .collect::<Vec<_>>();
    for (terminal_id, wire_id) in links {
        let unlinked = circuit
            .terminal(&terminal_id)
            .is_some_and(|terminal| terminal.connected_wire().is_none());
        if unlinked {
            circuit.connect_terminal(&terminal_id, &wire_id);
        }
    }

    let mut displaced = Vec::new();
    for wire in circuit.wires() {
        let owned_elsewhere = |terminal_id: &TerminalId| {
            circuit
                .terminal(terminal_id)
                .is_some_and(|terminal| terminal.connected_wire() != Some(wire.id()))
        };
        let start = wire.start_connected_to().is_some_and(owned_elsewhere);
        let end = wire.end_connected_to().is_some_and(owned_elsewhere);
        if start || end {
            displaced.push((wire.id().clone(), start, end));
        }
    }
    for (wire_id, start, end) in displaced {
        if let Some(wire) = circuit.wire_mut(&wire_id) {
            if start {
                wire.set_start_connected_to(None);
            }
            if end {
                wire.set_end_connected_to(None);
            }
        }
    }
}

pub fn to_json(circuit: &Circuit) -> Result<String, StoreError> {
    serde_json::to_string_pretty(&circuit_to_json(circuit))
        .map_err(|source| StoreError::Json { path: None, source })
}

pub fn from_json(json: &str) -> Result<Circuit, StoreError> {
    let parsed: CircuitJson =
        serde_json::from_str(json).map_err(|source| StoreError::Json { path: None, source })?;
    circuit_from_json(parsed)
}

pub fn load_circuit(path: &Path) -> Result<Circuit, StoreError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    let parsed: CircuitJson = serde_json::from_str(&contents)
        .map_err(|source| StoreError::Json { path: Some(path.to_path_buf()), source })?;
    circuit_from_json(parsed)
}

/// Writes `circuit` to `path` through a temporary sibling file and a rename, so a
/// crash never leaves a half-written document behind.
pub fn save_circuit(path: &Path, circuit: &Circuit) -> Result<(), StoreError> {
    let mut contents = serde_json::to_string_pretty(&circuit_to_json(circuit))
        .map_err(|source| StoreError::Json { path: Some(path.to_path_buf()), source })?;
    contents.push('\n');

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        });
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path =
        parent.join(format!(".orthowire.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
    file.write_all(contents.as_bytes())
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }
    Ok(())
}

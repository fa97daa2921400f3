// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A circuit holds components (each owning its terminals) and the wires drawn
//! between terminals. Geometry types are shared with the planner.

pub mod circuit;
pub mod component;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod ids;
pub mod wire;

pub use circuit::{Circuit, NearestTerminal};
pub use component::{
    Component, ComponentKind, ParseComponentKindError, Polarity, Terminal, Terminals,
    OBSTACLE_PADDING,
};
pub use geometry::{
    is_orthogonal_path, point_to_segment_distance, simplify_collinear, Orientation, Point, Rect,
    Segment, EPSILON,
};
pub use ids::{ComponentId, Id, IdError, TerminalId, WireId};
pub use wire::Wire;

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tunables for the planner and the interactive session.
//!
//! Defaults are the values the canvas was designed around; the CLI can override
//! the routing ones per invocation.

pub const DEFAULT_GRID_SIZE: f64 = 20.0;
pub const DEFAULT_TURN_PENALTY: u32 = 50;
pub const DEFAULT_PROXIMITY_PENALTY: u32 = 40;
pub const DEFAULT_PROXIMITY_CELLS: f64 = 2.0;
pub const DEFAULT_MAX_EXPANSIONS: usize = 5000;

pub const DEFAULT_SNAP_RADIUS: f64 = 20.0;
pub const DEFAULT_CORNER_HIT_RADIUS: f64 = 12.0;
pub const DEFAULT_ALIGN_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteConfig {
    /// Search grid resolution in canvas units; also the cost of one step.
    pub grid_size: f64,
    /// Extra cost whenever the search changes direction.
    pub turn_penalty: u32,
    /// Cost added for a cell lying on an existing wire, fading to zero at
    /// `proximity_cells` grid cells away.
    pub proximity_penalty: u32,
    pub proximity_cells: f64,
    /// Upper bound on A* node expansions before falling back to an L-shape.
    pub max_expansions: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            turn_penalty: DEFAULT_TURN_PENALTY,
            proximity_penalty: DEFAULT_PROXIMITY_PENALTY,
            proximity_cells: DEFAULT_PROXIMITY_CELLS,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

impl RouteConfig {
    /// Grid size usable as a divisor; non-positive or non-finite values fall back to the default.
    pub(crate) fn effective_grid_size(&self) -> f64 {
        if self.grid_size.is_finite() && self.grid_size > 0.0 {
            self.grid_size
        } else {
            DEFAULT_GRID_SIZE
        }
    }

    pub(crate) fn proximity_threshold(&self) -> f64 {
        self.proximity_cells.max(0.0) * self.effective_grid_size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Distance at which a pointer counts as "at" a terminal.
    pub snap_radius: f64,
    /// Distance at which a pointer grabs an interior corner.
    pub corner_hit_radius: f64,
    /// Below this offset on both axes a corner counts as aligned with the terminal
    /// it is being connected to.
    pub align_tolerance: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            snap_radius: DEFAULT_SNAP_RADIUS,
            corner_hit_radius: DEFAULT_CORNER_HIT_RADIUS,
            align_tolerance: DEFAULT_ALIGN_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RouteConfig;

    #[test]
    fn degenerate_grid_size_falls_back_to_default() {
        let config = RouteConfig { grid_size: 0.0, ..RouteConfig::default() };
        assert_eq!(config.effective_grid_size(), 20.0);
        assert_eq!(config.proximity_threshold(), 40.0);

        let config = RouteConfig { grid_size: f64::NAN, ..RouteConfig::default() };
        assert_eq!(config.effective_grid_size(), 20.0);
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::config::RouteConfig;
use crate::model::geometry::{simplify_collinear, Orientation, Point, Rect, Segment};

/// Which tier of the planner produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTier {
    /// Straight line or unobstructed L-shape.
    Direct,
    /// Grid A* around obstacles.
    Search,
    /// Search gave up; L-shape ignoring obstacles.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    pub points: Vec<Point>,
    pub tier: RouteTier,
}

/// Routes `start -> end` with default tuning. See [`plan_route`].
pub fn compute_path(
    start: Point,
    end: Point,
    obstacles: &[Rect],
    existing_segments: &[Segment],
) -> Vec<Point> {
    compute_path_with(&RouteConfig::default(), start, end, obstacles, existing_segments)
}

pub fn compute_path_with(
    config: &RouteConfig,
    start: Point,
    end: Point,
    obstacles: &[Rect],
    existing_segments: &[Segment],
) -> Vec<Point> {
    plan_route(config, start, end, obstacles, existing_segments).points
}

/// Computes an orthogonal route between two points.
///
/// Tries the vertical-first L-shape, then the horizontal-first one, and only
/// runs the grid search when both cross an obstacle. Obstacles that contain
/// `start` or `end` are ignored: a wire has to be able to leave the padded box of
/// the component it is attached to. Never fails; the last resort is the
/// vertical-first L-shape regardless of obstacles.
pub fn plan_route(
    config: &RouteConfig,
    start: Point,
    end: Point,
    obstacles: &[Rect],
    existing_segments: &[Segment],
) -> PlannedRoute {
    let blocking = obstacles
        .iter()
        .copied()
        .filter(|rect| !rect.contains(start) && !rect.contains(end))
        .collect::<Vec<_>>();

    for first in [Orientation::Vertical, Orientation::Horizontal] {
        let candidate = l_shape(start, end, first);
        if !crosses_any(&candidate, &blocking) {
            return PlannedRoute { points: candidate, tier: RouteTier::Direct };
        }
    }

    if let Some(points) = search_route(config, start, end, &blocking, existing_segments) {
        return PlannedRoute { points, tier: RouteTier::Search };
    }

    PlannedRoute { points: l_shape(start, end, Orientation::Vertical), tier: RouteTier::Fallback }
}

/// Two-segment route whose first leg runs along `first`; collapses to a
/// straight line when the endpoints already share an axis.
fn l_shape(start: Point, end: Point, first: Orientation) -> Vec<Point> {
    let corner = match first {
        Orientation::Vertical => Point::new(start.x, end.y),
        Orientation::Horizontal => Point::new(end.x, start.y),
    };

    let mut points = Vec::with_capacity(3);
    points.push(start);
    if !corner.approx_eq(start) && !corner.approx_eq(end) {
        points.push(corner);
    }
    points.push(end);
    points
}

fn crosses_any(path: &[Point], obstacles: &[Rect]) -> bool {
    path.windows(2)
        .any(|pair| obstacles.iter().any(|rect| rect.intersects_segment(pair[0], pair[1])))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct GridCell {
    x: i32,
    y: i32,
}

impl GridCell {
    fn snap(p: Point, grid: f64) -> Self {
        Self { x: (p.x / grid).round() as i32, y: (p.y / grid).round() as i32 }
    }

    fn to_point(self, grid: f64) -> Point {
        Point::new(f64::from(self.x) * grid, f64::from(self.y) * grid)
    }

    fn step(self, dir: Dir) -> Self {
        let (dx, dy) = dir.delta();
        Self { x: self.x.saturating_add(dx), y: self.y.saturating_add(dy) }
    }

    fn manhattan(self, other: GridCell) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Search node: a cell plus the direction it was entered from, so turn
/// penalties are charged exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct StateKey {
    cell: GridCell,
    incoming: Option<Dir>,
}

fn dirs_towards(current: GridCell, goal: GridCell) -> [Dir; 4] {
    let primary_x = match goal.x.cmp(&current.x) {
        std::cmp::Ordering::Greater => Some(Dir::Right),
        std::cmp::Ordering::Less => Some(Dir::Left),
        std::cmp::Ordering::Equal => None,
    };
    let primary_y = match goal.y.cmp(&current.y) {
        std::cmp::Ordering::Greater => Some(Dir::Down),
        std::cmp::Ordering::Less => Some(Dir::Up),
        std::cmp::Ordering::Equal => None,
    };

    let mut out = [Dir::Down; 4];
    let mut idx = 0usize;
    for dir in [primary_y, primary_x].into_iter().flatten() {
        out[idx] = dir;
        idx += 1;
    }
    // Remaining directions in a fixed order: vertical detours first.
    for dir in [Dir::Down, Dir::Up, Dir::Right, Dir::Left] {
        if primary_x == Some(dir) || primary_y == Some(dir) {
            continue;
        }
        out[idx] = dir;
        idx += 1;
    }

    debug_assert_eq!(idx, 4);
    out
}

struct SearchSpace<'a> {
    grid: f64,
    step_cost: u32,
    goal: GridCell,
    obstacles: &'a [Rect],
    existing_segments: &'a [Segment],
    config: &'a RouteConfig,
}

impl SearchSpace<'_> {
    fn heuristic(&self, cell: GridCell) -> u32 {
        cell.manhattan(self.goal).saturating_mul(self.step_cost)
    }

    /// A step is infeasible when it lands inside an obstacle or its straight
    /// run crosses one. The goal cell is always enterable.
    fn is_feasible_step(&self, from: GridCell, to: GridCell) -> bool {
        if to == self.goal {
            return true;
        }
        let a = from.to_point(self.grid);
        let b = to.to_point(self.grid);
        self.obstacles.iter().all(|rect| {
            if rect.contains(b) {
                return false;
            }
            // The start cell may sit inside a padded box; let it walk out.
            rect.contains(a) || !rect.intersects_segment(a, b)
        })
    }

    /// Linear fall-off from the full penalty on top of a wire to zero at the threshold.
    fn proximity_cost(&self, cell: GridCell) -> u32 {
        let threshold = self.config.proximity_threshold();
        if threshold <= 0.0 || self.config.proximity_penalty == 0 {
            return 0;
        }

        let p = cell.to_point(self.grid);
        let nearest = self
            .existing_segments
            .iter()
            .map(|segment| segment.distance_to(p))
            .fold(f64::INFINITY, f64::min);
        if nearest >= threshold {
            return 0;
        }

        let scale = 1.0 - nearest / threshold;
        (f64::from(self.config.proximity_penalty) * scale).round() as u32
    }
}

fn search_route(
    config: &RouteConfig,
    start: Point,
    end: Point,
    obstacles: &[Rect],
    existing_segments: &[Segment],
) -> Option<Vec<Point>> {
    let grid = config.effective_grid_size();
    let start_cell = GridCell::snap(start, grid);
    let goal_cell = GridCell::snap(end, grid);
    if start_cell == goal_cell {
        return None;
    }

    let space = SearchSpace {
        grid,
        step_cost: (grid.round() as u32).max(1),
        goal: goal_cell,
        obstacles,
        existing_segments,
        config,
    };

    let start_key = StateKey { cell: start_cell, incoming: None };
    let mut best_cost = HashMap::<StateKey, u32>::new();
    let mut came_from = HashMap::<StateKey, StateKey>::new();
    let mut open = BinaryHeap::<Reverse<(u32, u32, u32, StateKey)>>::new();

    best_cost.insert(start_key, 0);
    open.push(Reverse((space.heuristic(start_cell), 0, 0, start_key)));

    let mut tie_seq = 1u32;
    let mut expansions = 0usize;

    while let Some(Reverse((_f_cost, g_cost, _tie, key))) = open.pop() {
        if best_cost.get(&key) != Some(&g_cost) {
            continue;
        }

        expansions += 1;
        if expansions > config.max_expansions {
            return None;
        }

        if key.cell.manhattan(goal_cell) <= 1 {
            let cells = reconstruct_cells(key, &came_from, goal_cell);
            return Some(attach_endpoints(start, end, &cells, grid));
        }

        for dir in dirs_towards(key.cell, goal_cell) {
            let next = key.cell.step(dir);
            if !space.is_feasible_step(key.cell, next) {
                continue;
            }

            let turn = match key.incoming {
                Some(incoming) if incoming != dir => config.turn_penalty,
                _ => 0,
            };
            let next_cost = g_cost
                .saturating_add(space.step_cost)
                .saturating_add(turn)
                .saturating_add(space.proximity_cost(next));

            let next_key = StateKey { cell: next, incoming: Some(dir) };
            if next_cost < best_cost.get(&next_key).copied().unwrap_or(u32::MAX) {
                best_cost.insert(next_key, next_cost);
                came_from.insert(next_key, key);
                let f_cost = next_cost.saturating_add(space.heuristic(next));
                open.push(Reverse((f_cost, next_cost, tie_seq, next_key)));
                tie_seq = tie_seq.wrapping_add(1);
            }
        }
    }

    None
}

fn reconstruct_cells(
    reached: StateKey,
    came_from: &HashMap<StateKey, StateKey>,
    goal: GridCell,
) -> Vec<GridCell> {
    let mut cells = vec![reached.cell];
    let mut cursor = reached;
    while let Some(prev) = came_from.get(&cursor) {
        cells.push(prev.cell);
        cursor = *prev;
    }
    cells.reverse();
    if reached.cell != goal {
        cells.push(goal);
    }
    cells
}

/// Swaps the snapped first/last cells for the exact endpoints.
///
/// When an exact endpoint is off the axis of the neighbouring grid run, one jog
/// vertex keeps the connection orthogonal; the result is then simplified.
fn attach_endpoints(start: Point, end: Point, cells: &[GridCell], grid: f64) -> Vec<Point> {
    let grid_points = cells.iter().map(|cell| cell.to_point(grid)).collect::<Vec<_>>();
    let (Some(&first), Some(&last)) = (grid_points.first(), grid_points.last()) else {
        return vec![start, end];
    };

    let mut path = Vec::with_capacity(grid_points.len() + 4);
    path.push(start);
    match grid_points.get(1) {
        Some(&second) if (second.x - first.x).abs() < f64::EPSILON => {
            path.push(Point::new(first.x, start.y));
        }
        Some(_) => path.push(Point::new(start.x, first.y)),
        None => {}
    }

    path.extend_from_slice(&grid_points);

    match grid_points.len().checked_sub(2).and_then(|idx| grid_points.get(idx)) {
        Some(&before_last) if (before_last.x - last.x).abs() < f64::EPSILON => {
            path.push(Point::new(last.x, end.y));
        }
        Some(_) => path.push(Point::new(end.x, last.y)),
        None => {}
    }
    path.push(end);

    simplify_collinear(&path)
}

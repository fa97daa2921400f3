// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas geometry shared by the planner, the session and hit-testing.

/// Coordinates closer than this are treated as equal.
pub const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn approx_eq(self, other: Point) -> bool {
        (self.x - other.x).abs() <= EPSILON && (self.y - other.y).abs() <= EPSILON
    }

    /// True when `self -> other` is purely horizontal, purely vertical or zero-length.
    pub fn is_axis_aligned_with(self, other: Point) -> bool {
        (self.x - other.x).abs() <= EPSILON || (self.y - other.y).abs() <= EPSILON
    }

    /// Snaps `self` onto the axis of greatest motion away from `reference`.
    ///
    /// The coordinate with the smaller displacement is pinned to the reference;
    /// ties keep the x of the reference (vertical move).
    pub fn snap_orthogonal(self, reference: Point) -> Point {
        let dx = (self.x - reference.x).abs();
        let dy = (self.y - reference.y).abs();
        if dx > dy {
            Point::new(self.x, reference.y)
        } else {
            Point::new(reference.x, self.y)
        }
    }
}

/// Axis-aligned rectangle `(min_x, min_y, max_x, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Inclusive containment: points on the border are inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Whether the straight segment `a -> b` touches the rectangle.
    ///
    /// Exact for horizontal and vertical segments; for anything else this is the
    /// conservative bounding-box test.
    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        let min_x = a.x.min(b.x);
        let max_x = a.x.max(b.x);
        let min_y = a.y.min(b.y);
        let max_y = a.y.max(b.y);
        !(max_x < self.min_x || min_x > self.max_x || max_y < self.min_y || min_y > self.max_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn distance_to(&self, p: Point) -> f64 {
        point_to_segment_distance(p, self.a, self.b)
    }
}

/// Euclidean distance from `p` to the closed segment `a -> b`.
pub fn point_to_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= EPSILON * EPSILON {
        return p.distance(a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Orientation segment 0 must have for the segments of `path` to alternate.
    ///
    /// Zero-length segments fit either axis, so the first segment with a length
    /// decides and its index parity is undone. `None` when every segment is
    /// zero-length or the path has fewer than two points.
    pub fn of_path(path: &[Point]) -> Option<Self> {
        path.windows(2)
            .enumerate()
            .find_map(|(idx, pair)| Self::of_segment(pair[0], pair[1]).map(|o| o.at(idx)))
    }

    /// [`Orientation::of_path`], defaulting to horizontal for paths without a
    /// non-degenerate segment.
    pub fn of_first_segment(path: &[Point]) -> Self {
        Self::of_path(path).unwrap_or(Self::Horizontal)
    }

    /// Orientation required for segment `idx` when segments alternate from `self`.
    pub fn at(self, idx: usize) -> Self {
        if idx % 2 == 0 {
            self
        } else {
            self.flip()
        }
    }

    /// Observed orientation of `a -> b`, `None` for a zero-length segment.
    ///
    /// Exactly flat segments win over the displacement comparison so that a
    /// segment shrunk to a single axis keeps its classification.
    pub fn of_segment(a: Point, b: Point) -> Option<Self> {
        let dx = (b.x - a.x).abs();
        let dy = (b.y - a.y).abs();
        if dx <= EPSILON && dy <= EPSILON {
            return None;
        }
        if dy <= EPSILON {
            return Some(Self::Horizontal);
        }
        if dx <= EPSILON {
            return Some(Self::Vertical);
        }
        Some(if dx >= dy { Self::Horizontal } else { Self::Vertical })
    }
}

/// Every consecutive pair differs in at most one coordinate.
pub fn is_orthogonal_path(path: &[Point]) -> bool {
    path.windows(2).all(|pair| pair[0].is_axis_aligned_with(pair[1]))
}

/// Drops repeated points and interior points collinear with both neighbours.
///
/// The first and last point are always kept. Removing a point whose neighbours
/// share its x (or its y) cannot break orthogonality, so an orthogonal input
/// stays orthogonal and its segments strictly alternate afterwards.
pub fn simplify_collinear(path: &[Point]) -> Vec<Point> {
    let mut deduped = Vec::<Point>::with_capacity(path.len());
    for (idx, p) in path.iter().copied().enumerate() {
        match deduped.last() {
            Some(last) if last.approx_eq(p) => {
                if idx + 1 == path.len() {
                    // Keep the exact final point.
                    if let Some(slot) = deduped.last_mut() {
                        *slot = p;
                    }
                }
            }
            _ => deduped.push(p),
        }
    }

    if deduped.len() <= 2 {
        return deduped;
    }

    let mut out = Vec::<Point>::with_capacity(deduped.len());
    out.push(deduped[0]);
    for idx in 1..deduped.len() - 1 {
        let Some(&prev) = out.last() else {
            continue;
        };
        let cur = deduped[idx];
        let next = deduped[idx + 1];
        let same_x = (prev.x - cur.x).abs() <= EPSILON && (cur.x - next.x).abs() <= EPSILON;
        let same_y = (prev.y - cur.y).abs() <= EPSILON && (cur.y - next.y).abs() <= EPSILON;
        if same_x || same_y {
            continue;
        }
        out.push(cur);
    }
    out.push(deduped[deduped.len() - 1]);

    // Dropping a collinear point can expose a zero-length run; collapse again.
    if out.len() < deduped.len() {
        return simplify_collinear(&out);
    }
    out
}

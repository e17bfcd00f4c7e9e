//! Top-down shot lattice
//!
//! The lattice covers the boundary's bounding box at cell centres and keeps
//! only points strictly inside the boundary. When a lattice holds fewer
//! points than the package asks for, spacing shrinks and the lattice is
//! rebuilt, for a bounded number of attempts.

use std::collections::BTreeSet;

use crate::coverage::Spacing;
use crate::geometry::{Bounds, LatLng, contains, to_polygon};

use super::sampling::pick_even_indices;

/// Largest lattice (rows x cols) ever generated
pub const MAX_GRID_POINTS: usize = 40_000;

/// Spacing multiplier applied between refinement attempts
pub const REFINE_FACTOR: f64 = 0.85;

pub const MAX_REFINE_ATTEMPTS: u32 = 5;

/// Lattice points inside a boundary, grouped by row (south to north)
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<LatLng>>,
    pub spacing: Spacing,
    /// Lattice size before the point-in-polygon filter
    pub candidates: usize,
}

impl Grid {
    pub fn point_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &LatLng> {
        self.rows.iter().flatten()
    }
}

/// Result of adaptive grid fitting
#[derive(Debug, Clone, PartialEq)]
pub struct GridFit {
    pub grid: Grid,
    /// Lattices generated, including the accepted one
    pub attempts: u32,
    pub reached_target: bool,
}

/// Shots picked from a grid plus the flight lines that connect them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSelection {
    pub points: Vec<LatLng>,
    /// One line per row holding at least two selected points
    pub lines: Vec<Vec<LatLng>>,
}

/// Build the lattice for `ring` at `spacing`
///
/// Rows are `front` apart and points within a row are `side` apart.
///
/// # Returns
/// * `None` if the ring has no finite bounding box, the spacing is unusable
///   or the lattice would exceed [`MAX_GRID_POINTS`]
pub fn build_grid(ring: &[LatLng], spacing: Spacing) -> Option<Grid> {
    if ring.len() < 3 || !spacing.is_valid() {
        return None;
    }
    let bounds = Bounds::from_points(ring)?;
    if !bounds.lat_span().is_finite() || !bounds.lng_span().is_finite() {
        return None;
    }

    let row_count = (bounds.height_meters() / spacing.front).ceil().max(1.0);
    let col_count = (bounds.width_meters() / spacing.side).ceil().max(1.0);
    if !(row_count * col_count <= MAX_GRID_POINTS as f64) {
        tracing::debug!(
            rows = row_count,
            cols = col_count,
            cap = MAX_GRID_POINTS,
            "lattice exceeds point cap"
        );
        return None;
    }
    let row_count = row_count as usize;
    let col_count = col_count as usize;

    let lat_step = bounds.lat_span() / row_count as f64;
    let lng_step = bounds.lng_span() / col_count as f64;
    let polygon = to_polygon(ring);

    let rows: Vec<Vec<LatLng>> = (0..row_count)
        .map(|r| {
            let lat = bounds.min_lat + (r as f64 + 0.5) * lat_step;
            (0..col_count)
                .map(|c| LatLng::new(lat, bounds.min_lng + (c as f64 + 0.5) * lng_step))
                .filter(|p| contains(&polygon, *p))
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    Some(Grid {
        rows,
        spacing,
        candidates: row_count * col_count,
    })
}

/// Fit a lattice holding at least `target` points, shrinking spacing by
/// [`REFINE_FACTOR`] for up to [`MAX_REFINE_ATTEMPTS`] attempts
///
/// # Returns
/// * `None` if the first lattice is unusable or any attempt lands no point
///   inside the boundary
/// * The largest lattice seen with `reached_target = false` when attempts run
///   out or a refined lattice hits the point cap
pub fn fit_grid(ring: &[LatLng], spacing: Spacing, target: usize) -> Option<GridFit> {
    let mut current = spacing;
    let mut best: Option<Grid> = None;
    let mut attempts = 0;

    while attempts < MAX_REFINE_ATTEMPTS {
        let Some(grid) = build_grid(ring, current) else {
            if best.is_none() {
                return None;
            }
            break;
        };
        attempts += 1;

        let count = grid.point_count();
        if count == 0 {
            tracing::debug!(attempt = attempts, "lattice has no points inside boundary");
            return None;
        }
        tracing::debug!(
            attempt = attempts,
            points = count,
            target,
            front = current.front,
            side = current.side,
            "grid attempt"
        );

        if count >= target {
            return Some(GridFit {
                grid,
                attempts,
                reached_target: true,
            });
        }
        if best.as_ref().is_none_or(|b| count > b.point_count()) {
            best = Some(grid);
        }
        current = current.scaled(REFINE_FACTOR);
    }

    best.map(|grid| GridFit {
        grid,
        attempts,
        reached_target: false,
    })
}

/// Pick `count` points spread evenly over the grid in row-major order
pub fn select_evenly(grid: &Grid, count: usize) -> GridSelection {
    let chosen: BTreeSet<usize> = pick_even_indices(grid.point_count(), count)
        .into_iter()
        .collect();

    let mut selection = GridSelection::default();
    let mut index = 0;
    for row in &grid.rows {
        let mut line = Vec::new();
        for point in row {
            if chosen.contains(&index) {
                selection.points.push(*point);
                line.push(*point);
            }
            index += 1;
        }
        if line.len() >= 2 {
            selection.lines.push(line);
        }
    }
    selection
}

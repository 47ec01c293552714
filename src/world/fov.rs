//! Field of View calculation
//!
//! Uses recursive shadowcasting over a light-resistance grid.

use super::GameMap;
use crate::ecs::Position;

/// Fills a light grid from a resistance grid.
///
/// `resistance` and `light` are row-major, `width * height` long.
/// Cells with resistance >= 1.0 block light but are lit themselves.
pub trait VisibilityProvider {
    fn compute(
        &mut self,
        resistance: &[f64],
        light: &mut [f64],
        width: i32,
        height: i32,
        origin: Position,
        radius: i32,
    );
}

/// Eight-octant recursive shadowcasting
#[derive(Debug, Clone, Copy, Default)]
pub struct Shadowcaster;

impl VisibilityProvider for Shadowcaster {
    fn compute(
        &mut self,
        resistance: &[f64],
        light: &mut [f64],
        width: i32,
        height: i32,
        origin: Position,
        radius: i32,
    ) {
        compute_fov(resistance, light, width, height, origin, radius);
    }
}

struct LightGrid<'a> {
    resistance: &'a [f64],
    light: &'a mut [f64],
    width: i32,
    height: i32,
}

impl LightGrid<'_> {
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn is_opaque(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.resistance[(y * self.width + x) as usize] >= 1.0
    }

    fn set_light(&mut self, x: i32, y: i32, value: f64) {
        if self.in_bounds(x, y) {
            let idx = (y * self.width + x) as usize;
            if value > self.light[idx] {
                self.light[idx] = value;
            }
        }
    }
}

/// Compute field of view from a position with given radius.
///
/// Overwrites `light` in place: 1.0 at the origin, falling off linearly
/// with distance, 0.0 where nothing is seen.
pub fn compute_fov(
    resistance: &[f64],
    light: &mut [f64],
    width: i32,
    height: i32,
    origin: Position,
    radius: i32,
) {
    debug_assert_eq!(resistance.len(), (width * height) as usize);
    debug_assert_eq!(light.len(), resistance.len());

    light.iter_mut().for_each(|l| *l = 0.0);

    let mut grid = LightGrid {
        resistance,
        light,
        width,
        height,
    };

    if !grid.in_bounds(origin.x, origin.y) {
        return;
    }

    // Origin is always visible
    grid.set_light(origin.x, origin.y, 1.0);

    if radius <= 0 {
        return;
    }

    for octant in 0..8 {
        cast_light(&mut grid, origin, radius, 1, 1.0, 0.0, octant);
    }
}

/// Recursive shadowcasting for a single octant
fn cast_light(
    grid: &mut LightGrid<'_>,
    origin: Position,
    radius: i32,
    row: i32,
    mut start_slope: f64,
    end_slope: f64,
    octant: u8,
) {
    if start_slope < end_slope {
        return;
    }

    let mut next_start_slope = start_slope;

    for j in row..=radius {
        let mut blocked = false;

        let dy = -j;
        for dx in dy..=0 {
            let (map_x, map_y) = transform_octant(dx, dy, octant);
            let cur_x = origin.x + map_x;
            let cur_y = origin.y + map_y;

            let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

            if start_slope < right_slope {
                continue;
            }
            if end_slope > left_slope {
                break;
            }

            let distance_squared = dx * dx + dy * dy;
            if distance_squared <= radius * radius {
                let distance = (distance_squared as f64).sqrt();
                grid.set_light(cur_x, cur_y, 1.0 - distance / (radius as f64 + 1.0));
            }

            if blocked {
                if grid.is_opaque(cur_x, cur_y) {
                    next_start_slope = right_slope;
                } else {
                    blocked = false;
                    start_slope = next_start_slope;
                }
            } else if grid.is_opaque(cur_x, cur_y) && j < radius {
                blocked = true;
                cast_light(grid, origin, radius, j + 1, start_slope, left_slope, octant);
                next_start_slope = right_slope;
            }
        }

        if blocked {
            break;
        }
    }
}

/// Transform coordinates based on octant
fn transform_octant(col: i32, row: i32, octant: u8) -> (i32, i32) {
    match octant {
        0 => (col, row),
        1 => (row, col),
        2 => (row, -col),
        3 => (col, -row),
        4 => (-col, -row),
        5 => (-row, -col),
        6 => (-row, col),
        7 => (-col, row),
        _ => (col, row),
    }
}

/// Per-session light field, keyed to one map's resistance grid
#[derive(Debug, Clone)]
pub struct VisibilityField {
    width: i32,
    height: i32,
    resistance: Vec<f64>,
    light: Vec<f64>,
}

impl VisibilityField {
    /// Snapshot the map's walls; nothing is lit until the first recompute
    pub fn from_map(map: &GameMap) -> Self {
        let resistance = map.resistance_grid();
        let light = vec![0.0; resistance.len()];
        Self {
            width: map.width(),
            height: map.height(),
            resistance,
            light,
        }
    }

    /// Overwrite the light values from a new origin
    pub fn recompute(&mut self, provider: &mut dyn VisibilityProvider, origin: Position, radius: i32) {
        provider.compute(
            &self.resistance,
            &mut self.light,
            self.width,
            self.height,
            origin,
            radius,
        );
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Light value at a cell; 0.0 out of bounds
    pub fn light(&self, x: i32, y: i32) -> f64 {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return 0.0;
        }
        self.light[(y * self.width + x) as usize]
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.light(x, y) > 0.0
    }

    /// Every lit cell, row-major
    pub fn visible_positions(&self) -> Vec<Position> {
        self.light
            .iter()
            .enumerate()
            .filter(|(_, &l)| l > 0.0)
            .map(|(idx, _)| {
                let idx = idx as i32;
                Position::new(idx % self.width, idx / self.width)
            })
            .collect()
    }
}

// outer box -> interior envelope, all in meters
use bevy::log::warn;

use crate::config::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarcassDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub half_width: f32,
    pub half_height: f32,
    pub half_depth: f32,
    pub interior_width: f32,
    pub interior_height: f32,
    pub interior_depth: f32,
    /// Y of the interior floor, relative to the cabinet center
    pub interior_bottom: f32,
    pub column_count: usize,
    pub column_width: f32,
    pub thickness: f32,
}

impl CarcassDimensions {
    /// Resolves the envelope from outer dimensions given in centimeters.
    pub fn from_cm(width: f32, height: f32, depth: f32, column_count: usize) -> Self {
        Self::resolve(
            width / CM_PER_METER,
            height / CM_PER_METER,
            depth / CM_PER_METER,
            BOARD_THICKNESS,
            column_count,
        )
    }

    pub fn resolve(width: f32, height: f32, depth: f32, thickness: f32, column_count: usize) -> Self {
        let half_height = height / 2.0;
        let floor = thickness * MIN_INTERIOR_FACTOR;

        let interior_width = floored("width", width - thickness * 2.0, floor);
        let interior_depth = floored("depth", depth - thickness * INTERIOR_DEPTH_FACTOR, floor);
        let interior_height = floored("height", height - thickness * 2.0, floor);

        // a zero count is a caller bug, treat it as a single column
        let columns = column_count.max(1);

        Self {
            width,
            height,
            depth,
            half_width: width / 2.0,
            half_height,
            half_depth: depth / 2.0,
            interior_width,
            interior_height,
            interior_depth,
            interior_bottom: -half_height + thickness * INTERIOR_BOTTOM_FACTOR,
            column_count: columns,
            column_width: interior_width / columns as f32,
            thickness,
        }
    }

    /// X of the center of column `index`, columns tile the interior left to right.
    pub fn column_center(&self, index: usize) -> f32 {
        -self.interior_width / 2.0 + self.column_width / 2.0 + index as f32 * self.column_width
    }

    /// X of the boundary between column `index` and `index + 1`.
    pub fn column_boundary(&self, index: usize) -> f32 {
        -self.interior_width / 2.0 + self.column_width * (index + 1) as f32
    }

    /// Depth available to column contents, behind the door plane.
    pub fn column_depth(&self) -> f32 {
        (self.interior_depth - COLUMN_DEPTH_CLEARANCE).max(MIN_COLUMN_DEPTH)
    }

    /// Column index under a cabinet-local X, if it falls inside the interior.
    pub fn column_at(&self, x: f32) -> Option<usize> {
        let offset = x + self.interior_width / 2.0;
        if offset < 0.0 || offset >= self.interior_width {
            return None;
        }
        Some(((offset / self.column_width) as usize).min(self.column_count - 1))
    }
}

fn floored(axis: &str, value: f32, floor: f32) -> f32 {
    if value < floor {
        warn!("interior {} {:.3} m below floor, clamping to {:.3} m", axis, value, floor);
        floor
    } else {
        value
    }
}

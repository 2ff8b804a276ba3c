//! Grid and course snapping.
//!
//! Pure functions: raw coordinates in, snapped coordinates out. All values
//! are centimeters.

use glam::DVec3;
use shared::Dimensions;

/// Smallest horizontal snap increment (cm)
pub const MIN_SNAP_INCREMENT: f64 = 0.1;

/// Horizontal increment used when the joint thickness is zero
pub const FALLBACK_SNAP_INCREMENT: f64 = 1.0;

/// What the pointer ray landed on, as far as snapping is concerned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    Ground,
    /// Top face of a placed element, at `top_y`
    ElementTop { top_y: f64 },
}

/// Intersection point plus the surface it belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub point: DVec3,
    pub surface: Surface,
}

impl SurfaceHit {
    pub fn ground(x: f64, z: f64) -> Self {
        Self {
            point: DVec3::new(x, 0.0, z),
            surface: Surface::Ground,
        }
    }

    /// Y of the surface the new element rests on
    pub fn top_y_below(&self) -> f64 {
        match self.surface {
            Surface::Ground => 0.0,
            Surface::ElementTop { top_y } => top_y,
        }
    }
}

/// Round half up, like `Math.round`
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Horizontal snap increment for a joint thickness
pub fn horizontal_increment(joint: f64) -> f64 {
    let base = if joint > 0.0 { joint } else { FALLBACK_SNAP_INCREMENT };
    base.max(MIN_SNAP_INCREMENT)
}

/// Snap an X or Z center coordinate to the joint grid.
///
/// `_dimension` is the element size along that axis; the center is snapped,
/// so it does not take part in the result.
pub fn snap_horizontal(value: f64, _dimension: f64, joint: f64) -> f64 {
    let increment = horizontal_increment(joint);
    round_half_up(value / increment) * increment
}

/// Edge-aligned variant of [`snap_horizontal`]: snaps the element's lower
/// edge to the grid and returns the resulting center.
pub fn snap_horizontal_edge(value: f64, dimension: f64, joint: f64) -> f64 {
    let increment = horizontal_increment(joint);
    let edge = value - dimension / 2.0;
    round_half_up(edge / increment) * increment + dimension / 2.0
}

/// Snap the bottom Y of an element to the active course.
///
/// Without a usable course height only the floor clamp applies. The result
/// is always `>= 0` and snapping it again yields the same value.
pub fn snap_vertical(target_bottom_y: f64, _element_height: f64, course_height: Option<f64>) -> f64 {
    match course_height {
        Some(c) if c > 0.0 => (round_half_up(target_bottom_y / c) * c).max(0.0),
        _ => target_bottom_y.max(0.0),
    }
}

/// Compute the snapped center of an element dropped on `hit`.
///
/// Returns `None` when the ghost has no dimensions.
pub fn compute_snapped_pose(
    hit: &SurfaceHit,
    ghost_dimensions: Option<&Dimensions>,
    joint: f64,
    course_height: Option<f64>,
) -> Option<DVec3> {
    let dims = ghost_dimensions?;

    let potential_bottom_y = hit.top_y_below() + joint;
    let snapped_bottom_y = snap_vertical(potential_bottom_y, dims.height, course_height);
    let center_y = snapped_bottom_y + dims.height / 2.0;

    let center_x = snap_horizontal(hit.point.x, dims.width, joint);
    let center_z = snap_horizontal(hit.point.z, dims.depth, joint);

    Some(DVec3::new(center_x, center_y, center_z))
}

//! Stateless coordinate math shared by everything that walks grids on a
//! subdivision surface.
//!
//! Two parameterizations are in play:
//!
//! * **Grid UV** – normalized coordinates inside one corner grid. `(0, 0)`
//!   sits at the face center, `(1, 1)` at the corner vertex.
//! * **Ptex face UV** – the evaluator's per-face parameterization. A quad
//!   base face owns a single ptex face shared by its four corner grids (each
//!   grid occupies one quadrant, rotated 90° from its neighbor); an n-gon
//!   owns one ptex face per corner, unrotated.
//!
//! The quad rotation and its inverse are exact bijections per corner. The
//! only caveat is on the quadrant boundaries (grid `u` or `v` of exactly 0):
//! the inverse classifies those onto the lower corner index, which is the
//! same limit-surface point expressed through a neighboring grid.

use glam::{Mat3, Vec3};

/// Side length of a grid stored at `level`: `2^level + 1`.
#[inline]
pub fn grid_size_from_level(level: usize) -> usize {
    (1 << level) + 1
}

/// Map grid-local UV into the owning ptex face's UV.
///
/// The transform is an involution, so it is its own inverse.
#[inline]
pub fn grid_uv_to_ptex_face_uv(grid_u: f32, grid_v: f32) -> (f32, f32) {
    (1.0 - grid_v, 1.0 - grid_u)
}

/// Map ptex-face UV back into grid-local UV.
#[inline]
pub fn ptex_face_uv_to_grid_uv(ptex_u: f32, ptex_v: f32) -> (f32, f32) {
    (1.0 - ptex_v, 1.0 - ptex_u)
}

/// Map grid-local UV of a quad face's `corner` grid into the quad's single
/// shared ptex face.
///
/// Corner 0 lands in the `[0, ½]²` quadrant; each following corner applies a
/// further 90° rotation `(u, v) → (1 − v, u)`.
pub fn rotate_grid_to_quad(corner: usize, grid_u: f32, grid_v: f32) -> (f32, f32) {
    debug_assert!(corner < 4);

    let u = 0.5 - 0.5 * grid_v;
    let v = 0.5 - 0.5 * grid_u;
    match corner {
        0 => (u, v),
        1 => (1.0 - v, u),
        2 => (1.0 - u, 1.0 - v),
        _ => (v, 1.0 - u),
    }
}

/// Inverse of [`rotate_grid_to_quad`]: classify a quad ptex UV into the
/// corner grid owning that quadrant and return `(corner, u, v)` with the UV
/// expressed as corner-local ptex-face UV (feed it through
/// [`ptex_face_uv_to_grid_uv`] to finish the conversion).
pub fn rotate_quad_to_corner(quad_u: f32, quad_v: f32) -> (usize, f32, f32) {
    if quad_u <= 0.5 && quad_v <= 0.5 {
        (0, 2.0 * quad_u, 2.0 * quad_v)
    } else if quad_u > 0.5 && quad_v <= 0.5 {
        (1, 2.0 * quad_v, 2.0 * (1.0 - quad_u))
    } else if quad_u > 0.5 && quad_v > 0.5 {
        (2, 2.0 * (1.0 - quad_u), 2.0 * (1.0 - quad_v))
    } else {
        (3, 2.0 * (1.0 - quad_v), 2.0 * quad_u)
    }
}

/// Build the tangent frame for a grid corner from the surface derivatives at
/// the evaluated ptex coordinate.
///
/// Columns 0 and 1 carry the grid-space U and V directions in object space,
/// column 2 the unit surface normal. For quads the corner index compensates
/// for the per-corner UV rotation of [`rotate_grid_to_quad`], so the signs
/// follow that rotation's Jacobian; callers pass corner 0 for n-gon faces.
pub fn construct_tangent_matrix(derivative_u: Vec3, derivative_v: Vec3, corner: usize) -> Mat3 {
    debug_assert!(corner < 4);

    let (tangent_u, tangent_v) = match corner {
        0 => (-derivative_v, -derivative_u),
        1 => (derivative_u, -derivative_v),
        2 => (derivative_v, derivative_u),
        _ => (-derivative_u, derivative_v),
    };
    let normal = derivative_u.cross(derivative_v).normalize_or_zero();

    Mat3::from_cols(tangent_u, tangent_v, normal)
}

//! Limit-surface sampling at grid coordinates.

use glam::{Mat3, Vec3};

use crate::subdiv::coords::construct_tangent_matrix;

use super::context::MultiresReshapeContext;
use super::coord::GridCoord;

impl MultiresReshapeContext<'_> {
    /// Evaluate the limit surface at a grid coordinate, returning the
    /// position and the 3×3 tangent frame that carries displacement vectors
    /// between tangent space and object space.
    pub fn evaluate_limit_at_grid(&self, grid_coord: &GridCoord) -> (Vec3, Mat3) {
        let ptex_coord = self.grid_coord_to_ptex(grid_coord);
        let sample = self.subdiv().eval_limit_point_and_derivatives(
            ptex_coord.ptex_face_index,
            ptex_coord.u,
            ptex_coord.v,
        );
        let tangent_matrix =
            self.tangent_matrix_for_corner(grid_coord, sample.derivative_u, sample.derivative_v);
        (sample.position, tangent_matrix)
    }

    /// Tangent frame for the grid's corner.
    ///
    /// The four grids of a quad evaluate on one shared, per-corner-rotated
    /// ptex face, so each corner needs a differently oriented basis. N-gon
    /// grids own unrotated ptex faces and always use the corner-0 basis.
    pub fn tangent_matrix_for_corner(
        &self,
        grid_coord: &GridCoord,
        derivative_u: Vec3,
        derivative_v: Vec3,
    ) -> Mat3 {
        let face_index = self.grid_to_face_index(grid_coord.grid_index);
        let effective_corner = if self.is_quad_face(face_index) {
            self.grid_to_corner(grid_coord.grid_index)
        } else {
            0
        };
        construct_tangent_matrix(derivative_u, derivative_v, effective_corner)
    }
}

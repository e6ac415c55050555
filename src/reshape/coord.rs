//! Grid and ptex coordinates, and the conversion between them.
//!
//! The two coordinate spaces address the same sample locations: a
//! [`GridCoord`] is grid-local (which corner grid, where inside it), a
//! [`PTexCoord`] is what the limit-surface evaluator understands. Conversion
//! is lossless up to floating point; the only wrinkle is that the four
//! corner grids of a quad share one ptex face and therefore need the
//! rotation correction from [`crate::subdiv::coords`].

use crate::subdiv::coords::{
    grid_uv_to_ptex_face_uv, ptex_face_uv_to_grid_uv, rotate_grid_to_quad, rotate_quad_to_corner,
};

use super::context::MultiresReshapeContext;

/// One sample location within one displacement grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCoord {
    /// Which grid.
    pub grid_index: usize,
    /// Horizontal grid-local coordinate in `[0, 1]`.
    pub u: f32,
    /// Vertical grid-local coordinate in `[0, 1]`.
    pub v: f32,
}

/// One sample location on the subdivision surface's per-face
/// parameterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PTexCoord {
    /// Which ptex face.
    pub ptex_face_index: usize,
    /// Horizontal ptex-face coordinate in `[0, 1]`.
    pub u: f32,
    /// Vertical ptex-face coordinate in `[0, 1]`.
    pub v: f32,
}

impl MultiresReshapeContext<'_> {
    /// Face owning `grid_index`.
    #[inline]
    pub fn grid_to_face_index(&self, grid_index: usize) -> usize {
        #[cfg(feature = "topology_validation")]
        assert!(
            grid_index < self.num_grids(),
            "Grid index {} is out of range (should be < {}).",
            grid_index,
            self.num_grids()
        );
        #[cfg(not(feature = "topology_validation"))]
        debug_assert!(grid_index < self.num_grids());

        self.tables().grid_to_face_index(grid_index)
    }

    /// Corner of the owning face that `grid_index` belongs to.
    #[inline]
    pub fn grid_to_corner(&self, grid_index: usize) -> usize {
        let face_index = self.grid_to_face_index(grid_index);
        grid_index - self.face_start_grid_index(face_index)
    }

    /// Whether a face has exactly four corners.
    #[inline]
    pub fn is_quad_face(&self, face_index: usize) -> bool {
        self.face_corners_len(face_index) == 4
    }

    /// Ptex face a grid evaluates on. All four grids of a quad collapse
    /// onto the quad's single ptex face; each n-gon corner owns its own.
    #[inline]
    pub fn grid_to_ptex_index(&self, grid_index: usize) -> usize {
        let face_index = self.grid_to_face_index(grid_index);
        let face_ptex_offset = self.subdiv().face_ptex_offset()[face_index];
        if self.is_quad_face(face_index) {
            face_ptex_offset
        } else {
            face_ptex_offset + self.grid_to_corner(grid_index)
        }
    }

    /// Convert a grid coordinate into the ptex coordinate the evaluator
    /// understands.
    pub fn grid_coord_to_ptex(&self, grid_coord: &GridCoord) -> PTexCoord {
        let ptex_face_index = self.grid_to_ptex_index(grid_coord.grid_index);
        let face_index = self.grid_to_face_index(grid_coord.grid_index);

        let (u, v) = if self.is_quad_face(face_index) {
            let corner = self.grid_to_corner(grid_coord.grid_index);
            rotate_grid_to_quad(corner, grid_coord.u, grid_coord.v)
        } else {
            grid_uv_to_ptex_face_uv(grid_coord.u, grid_coord.v)
        };

        PTexCoord {
            ptex_face_index,
            u,
            v,
        }
    }

    /// Convert a ptex coordinate back into a grid coordinate.
    ///
    /// Inverse of [`grid_coord_to_ptex`](Self::grid_coord_to_ptex) up to
    /// floating point; on a quad's quadrant boundaries the result lands in
    /// the lower-indexed corner's grid, which addresses the same
    /// limit-surface point.
    pub fn ptex_coord_to_grid(&self, ptex_coord: &PTexCoord) -> GridCoord {
        let start_grid_index = self.ptex_start_grid_index(ptex_coord.ptex_face_index);
        let face_index = self.grid_to_face_index(start_grid_index);

        let (grid_index, u, v) = if self.is_quad_face(face_index) {
            let (corner_delta, corner_u, corner_v) =
                rotate_quad_to_corner(ptex_coord.u, ptex_coord.v);
            let (u, v) = ptex_face_uv_to_grid_uv(corner_u, corner_v);
            (start_grid_index + corner_delta, u, v)
        } else {
            let (u, v) = ptex_face_uv_to_grid_uv(ptex_coord.u, ptex_coord.v);
            (start_grid_index, u, v)
        };

        GridCoord { grid_index, u, v }
    }
}

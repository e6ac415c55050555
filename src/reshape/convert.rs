//! Displacement space conversion passes.
//!
//! Grids canonically store tangent-space displacement relative to the limit
//! surface. Operations that sample absolute positions (a subdivide, an
//! external deform) leave object-space coordinates in the grids instead;
//! these passes convert between the two conventions, each as one parallel
//! traversal at the top level.
//!
//! The passes are sequential with respect to each other: callers run one to
//! completion before starting the next.

use crate::mesh::Mesh;

use super::context::MultiresReshapeContext;

impl MultiresReshapeContext<'_> {
    /// Convert object-space absolute coordinates stored in the grids into
    /// tangent-space displacement relative to the current limit surface,
    /// in place.
    pub fn object_grids_to_tangent_displacement(&self, mesh: &mut Mesh) {
        self.foreach_grid_coordinate(mesh, self.top().level, |grid_coord, element| {
            let Some(displacement) = element.displacement else {
                return;
            };
            let (position, tangent_matrix) = self.evaluate_limit_at_grid(grid_coord);
            *displacement = tangent_matrix.inverse() * (*displacement - position);
        });
    }

    /// Reconstruct object-space coordinates from the tangent-space
    /// displacement stored in the grids and the current limit surface,
    /// in place.
    pub fn object_grids_from_tangent_displacement(&self, mesh: &mut Mesh) {
        self.foreach_grid_coordinate(mesh, self.top().level, |grid_coord, element| {
            let Some(displacement) = element.displacement else {
                return;
            };
            let (position, tangent_matrix) = self.evaluate_limit_at_grid(grid_coord);
            *displacement = position + tangent_matrix * *displacement;
        });
    }

    /// Reconstruct object-space coordinates from the *original snapshot's*
    /// tangent-space displacement and the current limit surface, writing
    /// into the live grids.
    ///
    /// This is how an edit made against older (possibly lower-resolution)
    /// grids is propagated onto the current grids while respecting a limit
    /// surface that may have changed shape since the snapshot was taken.
    /// Grids with no snapshot data reconstruct from a zero displacement,
    /// i.e. land on the limit surface itself.
    pub fn object_grids_from_orig_tangent_displacement(&self, mesh: &mut Mesh) {
        self.foreach_grid_coordinate(mesh, self.top().level, |grid_coord, element| {
            let Some(displacement) = element.displacement else {
                return;
            };
            let orig = self.orig_grid_element_for_grid_coord(grid_coord);
            let (position, tangent_matrix) = self.evaluate_limit_at_grid(grid_coord);
            *displacement = position + tangent_matrix * orig.displacement;
        });
    }
}

//! Grid lifecycle: allocation to a requested level and the original-grid
//! snapshot.

use crate::mesh::Mesh;

use super::context::{MultiresReshapeContext, OriginalGrids};

/// Make sure every grid of the mesh's layers is allocated at `level` or
/// above.
///
/// Grids that are unallocated or stored below `level` are reallocated
/// zeroed at `level`; grids already at or above it are left untouched.
pub fn ensure_grids(mesh: &mut Mesh, level: usize) {
    let mut reallocated = 0usize;

    if let Some(grids) = mesh.displacement_grids_mut() {
        for grid in grids.iter_mut() {
            if !grid.is_allocated() || grid.level() < level {
                // TODO: Resample the previous level's data into the new
                // buffer instead of discarding it.
                grid.allocate(level);
                reallocated += 1;
            }
        }
    }
    if let Some(grids) = mesh.paint_mask_grids_mut() {
        for grid in grids.iter_mut() {
            if !grid.is_allocated() || grid.level() < level {
                grid.allocate(level);
            }
        }
    }

    log::debug!("ensure_grids: {} displacement grids (re)allocated at level {}", reallocated, level);
}

impl MultiresReshapeContext<'_> {
    /// Deep-copy the mesh's current grid layers onto the context as the
    /// original snapshot.
    ///
    /// Every grid's buffer is copied independently; unallocated grids stay
    /// unallocated in the copy, and readers of the snapshot tolerate that.
    pub fn store_original_grids(&mut self, mesh: &Mesh) {
        debug_assert_eq!(mesh.topology().corners_len(), self.num_grids());

        self.orig = OriginalGrids {
            displacement: mesh.displacement_grids().map(|grids| grids.to_vec()),
            paint_masks: mesh.paint_mask_grids().map(|grids| grids.to_vec()),
        };
        log::trace!("stored original grid snapshot ({} grids)", self.num_grids());
    }

    /// Drop the original snapshot. Safe to call when nothing is stored.
    pub fn free_original_grids(&mut self) {
        self.orig = OriginalGrids::default();
    }
}

//! Grid traversal: drive a visitor over every (grid, cell) pair at a
//! chosen level, parallelized across base-mesh faces.
//!
//! Faces are the unit of dispatch because grid ownership partitions cleanly
//! by face: before dispatch the mutable grid storage is split into disjoint
//! per-face windows, so each worker can only ever touch the grids its own
//! face owns. With the `rayon` feature the windows are processed in
//! parallel, at least one whole face per work unit; otherwise a plain loop
//! does the same walk.

use crate::mesh::{DisplacementGrid, MaskGrid, Mesh};

use super::context::MultiresReshapeContext;
use super::coord::GridCoord;
use super::element::{element_at_cell, grid_cell_index, ReshapeGridElement};

/// The slice of grid storage one face owns during a traversal pass.
struct FaceGridsWindow<'m> {
    face_index: usize,
    start_grid_index: usize,
    displacement: Option<&'m mut [DisplacementGrid]>,
    masks: Option<&'m mut [MaskGrid]>,
}

impl MultiresReshapeContext<'_> {
    /// Invoke `visitor` for every cell of every grid at `level`.
    ///
    /// The visitor receives the grid coordinate and the storage slot that
    /// coordinate resolves to at the context's top level. Invocation order
    /// between faces is unspecified; within a face, cells are visited
    /// row-major per corner grid.
    pub fn foreach_grid_coordinate<F>(&self, mesh: &mut Mesh, level: usize, visitor: F)
    where
        F: Fn(&GridCoord, ReshapeGridElement<'_>) + Sync,
    {
        debug_assert_eq!(mesh.topology().corners_len(), self.num_grids());

        let grid_size = crate::subdiv::coords::grid_size_from_level(level);
        let step = 1.0 / (grid_size - 1) as f32;
        let windows = self.split_grids_by_face(mesh);

        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;

            windows
                .into_par_iter()
                .with_min_len(1)
                .for_each(|mut window| {
                    self.traverse_face_grids(&mut window, grid_size, step, &visitor)
                });
        }
        #[cfg(not(feature = "rayon"))]
        for mut window in windows {
            self.traverse_face_grids(&mut window, grid_size, step, &visitor);
        }
    }

    /// Split both grid layers into per-face mutable windows.
    fn split_grids_by_face<'m>(&self, mesh: &'m mut Mesh) -> Vec<FaceGridsWindow<'m>> {
        let faces_len = self.faces_len();
        let (displacement, masks) = mesh.grid_layers_mut();
        let mut displacement_rest = displacement;
        let mut masks_rest = masks;

        let mut windows = Vec::with_capacity(faces_len);
        for face_index in 0..faces_len {
            let corners = self.face_corners_len(face_index);
            let displacement = match displacement_rest.take() {
                Some(grids) => {
                    let (head, tail) = grids.split_at_mut(corners);
                    displacement_rest = Some(tail);
                    Some(head)
                }
                None => None,
            };
            let masks = match masks_rest.take() {
                Some(grids) => {
                    let (head, tail) = grids.split_at_mut(corners);
                    masks_rest = Some(tail);
                    Some(head)
                }
                None => None,
            };
            windows.push(FaceGridsWindow {
                face_index,
                start_grid_index: self.face_start_grid_index(face_index),
                displacement,
                masks,
            });
        }
        windows
    }

    fn traverse_face_grids<F>(
        &self,
        window: &mut FaceGridsWindow<'_>,
        grid_size: usize,
        step: f32,
        visitor: &F,
    ) where
        F: Fn(&GridCoord, ReshapeGridElement<'_>),
    {
        let corners = self.face_corners_len(window.face_index);
        let top_grid_size = self.top().grid_size;

        for corner in 0..corners {
            let grid_index = window.start_grid_index + corner;
            for y in 0..grid_size {
                let v = y as f32 * step;
                for x in 0..grid_size {
                    let u = x as f32 * step;
                    let grid_coord = GridCoord { grid_index, u, v };
                    let cell = grid_cell_index(u, v, top_grid_size);
                    let element = element_at_cell(
                        window
                            .displacement
                            .as_deref_mut()
                            .map(|grids| &mut grids[corner]),
                        window.masks.as_deref_mut().map(|grids| &mut grids[corner]),
                        cell,
                    );
                    visitor(&grid_coord, element);
                }
            }
        }
    }
}

//! Resolving coordinates to concrete grid storage slots.
//!
//! A [`ReshapeGridElement`] is a view onto one sample slot of the live
//! grids: mutable references into the displacement and paint-mask buffers,
//! either of which is absent when the corresponding layer does not exist.
//! [`ReshapeConstGridElement`] is the read-only counterpart for the
//! original-grid snapshot; it never fails and falls back to zero values,
//! since "no original data" is a valid and common state.

use glam::Vec3;

use crate::mesh::{DisplacementGrid, MaskGrid, Mesh};

use super::context::MultiresReshapeContext;
use super::coord::{GridCoord, PTexCoord};

/// Mutable view onto one sample slot of the live grids.
#[derive(Debug)]
pub struct ReshapeGridElement<'a> {
    /// Displacement slot; `None` when the mesh has no displacement layer.
    pub displacement: Option<&'a mut Vec3>,
    /// Paint-mask slot; `None` when the mesh has no paint-mask layer.
    pub mask: Option<&'a mut f32>,
}

/// Read-only sample value from the original-grid snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReshapeConstGridElement {
    /// Stored displacement, zero when absent.
    pub displacement: Vec3,
    /// Stored paint mask, zero when absent.
    pub mask: f32,
}

/// Nearest-integer cell inside a grid of side length `grid_size`.
#[inline]
pub(crate) fn grid_cell_index(u: f32, v: f32, grid_size: usize) -> usize {
    let x = (u * (grid_size - 1) as f32).round() as usize;
    let y = (v * (grid_size - 1) as f32).round() as usize;
    y * grid_size + x
}

/// Resolve one cell of a grid pair into an element view. Unallocated grids
/// resolve to absent slots.
pub(crate) fn element_at_cell<'a>(
    displacement: Option<&'a mut DisplacementGrid>,
    mask: Option<&'a mut MaskGrid>,
    cell: usize,
) -> ReshapeGridElement<'a> {
    let displacement = match displacement {
        Some(grid) if grid.is_allocated() => Some(&mut grid.data_mut()[cell]),
        _ => None,
    };
    let mask = match mask {
        Some(grid) if grid.is_allocated() => Some(&mut grid.data_mut()[cell]),
        _ => None,
    };
    ReshapeGridElement { displacement, mask }
}

impl MultiresReshapeContext<'_> {
    /// Storage slot for a grid coordinate, at the context's top level.
    pub fn grid_element_for_grid_coord<'m>(
        &self,
        mesh: &'m mut Mesh,
        grid_coord: &GridCoord,
    ) -> ReshapeGridElement<'m> {
        debug_assert_eq!(mesh.topology().corners_len(), self.num_grids());

        let cell = grid_cell_index(grid_coord.u, grid_coord.v, self.top().grid_size);
        let (displacement, masks) = mesh.grid_layers_mut();
        element_at_cell(
            displacement.map(|grids| &mut grids[grid_coord.grid_index]),
            masks.map(|grids| &mut grids[grid_coord.grid_index]),
            cell,
        )
    }

    /// Storage slot for a ptex coordinate, at the context's top level.
    pub fn grid_element_for_ptex_coord<'m>(
        &self,
        mesh: &'m mut Mesh,
        ptex_coord: &PTexCoord,
    ) -> ReshapeGridElement<'m> {
        let grid_coord = self.ptex_coord_to_grid(ptex_coord);
        self.grid_element_for_grid_coord(mesh, &grid_coord)
    }

    /// Sample value from the original-grid snapshot at a grid coordinate.
    ///
    /// Each original grid is read at its own stored level, which may differ
    /// grid-to-grid. Absent snapshots, layers, or unallocated grids all
    /// yield zero values.
    pub fn orig_grid_element_for_grid_coord(&self, grid_coord: &GridCoord) -> ReshapeConstGridElement {
        let mut element = ReshapeConstGridElement::default();

        if let Some(grids) = &self.orig.displacement {
            let grid = &grids[grid_coord.grid_index];
            if grid.is_allocated() {
                let cell = grid_cell_index(grid_coord.u, grid_coord.v, grid.grid_size());
                element.displacement = grid.data()[cell];
            }
        }
        if let Some(grids) = &self.orig.paint_masks {
            let grid = &grids[grid_coord.grid_index];
            if grid.is_allocated() {
                let cell = grid_cell_index(grid_coord.u, grid_coord.v, grid.grid_size());
                element.mask = grid.data()[cell];
            }
        }

        element
    }
}

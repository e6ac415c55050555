//! Base-mesh topology and per-corner grid attribute layers.
//!
//! The mesh consumed by a reshape operation is read-mostly: faces are
//! described as runs of corners ("loops"), and each corner may carry one
//! displacement grid and one paint-mask grid. The grid layers are optional –
//! a mesh without a paint-mask layer is a perfectly normal state – and each
//! grid entry stores its own level so different grids can sit at different
//! resolutions simultaneously.

use glam::Vec3;

use crate::subdiv::coords::grid_size_from_level;
use crate::Result;

/// Face/corner topology of the base mesh.
///
/// Only corner counts matter to grid bookkeeping: grids are allocated one
/// per corner, in face order, so the `k`-th corner of the mesh owns the
/// `k`-th grid.
#[derive(Clone, Debug)]
pub struct MeshTopology {
    corners_per_face: Vec<usize>,
    corners_len: usize,
}

impl MeshTopology {
    /// Build a topology from the number of corners of each face.
    ///
    /// Faces with fewer than three corners are rejected when the
    /// `topology_validation` feature is enabled.
    pub fn new(corners_per_face: &[usize]) -> Result<Self> {
        #[cfg(feature = "topology_validation")]
        for (face_index, &corners) in corners_per_face.iter().enumerate() {
            if corners < 3 {
                return Err(crate::Error::InvalidTopology(format!(
                    "Face {} has {} corners (minimum is 3).",
                    face_index, corners
                )));
            }
        }

        Ok(Self {
            corners_len: corners_per_face.iter().sum(),
            corners_per_face: corners_per_face.to_vec(),
        })
    }

    /// Number of faces.
    #[inline]
    pub fn faces_len(&self) -> usize {
        self.corners_per_face.len()
    }

    /// Total number of corners (loops) over all faces. This is also the
    /// number of grids a fully populated grid layer holds.
    #[inline]
    pub fn corners_len(&self) -> usize {
        self.corners_len
    }

    /// Number of corners of one face.
    #[inline]
    pub fn face_corners_len(&self, face_index: usize) -> usize {
        self.corners_per_face[face_index]
    }
}

/// One square grid of per-corner sample data at some stored level.
///
/// An empty data buffer means the grid was never allocated; consumers of
/// original-grid snapshots must tolerate that state.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    level: usize,
    data: Vec<T>,
}

/// Displacement layer entry: one 3-float vector per grid cell.
pub type DisplacementGrid = Grid<Vec3>;

/// Paint-mask layer entry: one scalar per grid cell.
pub type MaskGrid = Grid<f32>;

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self {
            level: 0,
            data: Vec::new(),
        }
    }
}

impl<T: Copy + Default> Grid<T> {
    /// An entry with no allocated buffer.
    #[inline]
    pub fn unallocated() -> Self {
        Self::default()
    }

    /// (Re)allocate the buffer zeroed at `level`, discarding previous data.
    pub fn allocate(&mut self, level: usize) {
        let grid_size = grid_size_from_level(level);
        self.level = level;
        self.data = vec![T::default(); grid_size * grid_size];
    }

    /// Whether a data buffer exists.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        !self.data.is_empty()
    }

    /// The level this grid is stored at. Only meaningful when allocated.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Side length implied by the stored level.
    #[inline]
    pub fn grid_size(&self) -> usize {
        grid_size_from_level(self.level)
    }

    /// Sample buffer, row-major, `grid_size()`² entries when allocated.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable sample buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

/// A base mesh: topology plus the optional grid layers reshape reads and
/// writes.
#[derive(Clone, Debug)]
pub struct Mesh {
    topology: MeshTopology,
    pub(crate) displacement: Option<Vec<DisplacementGrid>>,
    pub(crate) paint_masks: Option<Vec<MaskGrid>>,
}

impl Mesh {
    /// A mesh with no grid layers.
    pub fn new(topology: MeshTopology) -> Self {
        Self {
            topology,
            displacement: None,
            paint_masks: None,
        }
    }

    /// The face/corner topology.
    #[inline]
    pub fn topology(&self) -> &MeshTopology {
        &self.topology
    }

    /// Add the displacement layer if missing, one unallocated grid per
    /// corner, and return it.
    pub fn ensure_displacement_layer(&mut self) -> &mut [DisplacementGrid] {
        let corners_len = self.topology.corners_len();
        self.displacement
            .get_or_insert_with(|| vec![DisplacementGrid::unallocated(); corners_len])
    }

    /// Add the paint-mask layer if missing, one unallocated grid per
    /// corner, and return it.
    pub fn ensure_paint_mask_layer(&mut self) -> &mut [MaskGrid] {
        let corners_len = self.topology.corners_len();
        self.paint_masks
            .get_or_insert_with(|| vec![MaskGrid::unallocated(); corners_len])
    }

    /// Drop the displacement layer and all its grids.
    pub fn remove_displacement_layer(&mut self) {
        self.displacement = None;
    }

    /// Drop the paint-mask layer and all its grids.
    pub fn remove_paint_mask_layer(&mut self) {
        self.paint_masks = None;
    }

    /// The displacement grids, if the layer exists.
    #[inline]
    pub fn displacement_grids(&self) -> Option<&[DisplacementGrid]> {
        self.displacement.as_deref()
    }

    /// Mutable displacement grids, if the layer exists.
    #[inline]
    pub fn displacement_grids_mut(&mut self) -> Option<&mut [DisplacementGrid]> {
        self.displacement.as_deref_mut()
    }

    /// The paint-mask grids, if the layer exists.
    #[inline]
    pub fn paint_mask_grids(&self) -> Option<&[MaskGrid]> {
        self.paint_masks.as_deref()
    }

    /// Mutable paint-mask grids, if the layer exists.
    #[inline]
    pub fn paint_mask_grids_mut(&mut self) -> Option<&mut [MaskGrid]> {
        self.paint_masks.as_deref_mut()
    }

    /// Both grid layers, mutably and disjointly.
    pub(crate) fn grid_layers_mut(
        &mut self,
    ) -> (Option<&mut [DisplacementGrid]>, Option<&mut [MaskGrid]>) {
        (self.displacement.as_deref_mut(), self.paint_masks.as_deref_mut())
    }
}

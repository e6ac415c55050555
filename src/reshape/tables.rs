//! Grid/face/ptex index tables.
//!
//! Built once per reshape operation from the base-mesh topology, immutable
//! afterwards. The tables answer three lookups: which grid range a face
//! owns, which face owns a grid, and which grid a ptex face starts at.

use crate::mesh::MeshTopology;

/// Precomputed lookup tables mapping grid index ↔ face index ↔ ptex-face
/// index.
#[derive(Clone, Debug)]
pub struct GridIndexTables {
    face_start_grid_index: Vec<usize>,
    grid_to_face_index: Vec<usize>,
    ptex_start_grid_index: Vec<usize>,
    num_grids: usize,
}

impl GridIndexTables {
    /// Walk the faces in order, handing each corner a successive grid index.
    ///
    /// A quad contributes a single ptex face starting at its first grid; an
    /// n-gon contributes one ptex face per corner, each starting at that
    /// corner's own grid.
    pub fn build(topology: &MeshTopology) -> Self {
        let faces_len = topology.faces_len();
        let mut face_start_grid_index = Vec::with_capacity(faces_len);
        let mut grid_to_face_index = Vec::with_capacity(topology.corners_len());
        let mut ptex_start_grid_index = Vec::new();

        let mut grid_index = 0;
        for face_index in 0..faces_len {
            let corners = topology.face_corners_len(face_index);
            face_start_grid_index.push(grid_index);

            let ptex_faces = if corners == 4 { 1 } else { corners };
            for local_ptex in 0..ptex_faces {
                ptex_start_grid_index.push(grid_index + local_ptex);
            }

            for _ in 0..corners {
                grid_to_face_index.push(face_index);
            }
            grid_index += corners;
        }

        Self {
            face_start_grid_index,
            grid_to_face_index,
            ptex_start_grid_index,
            num_grids: grid_index,
        }
    }

    /// Total number of grids (= corners of the base mesh).
    #[inline]
    pub fn num_grids(&self) -> usize {
        self.num_grids
    }

    /// Number of faces the tables were built from.
    #[inline]
    pub fn faces_len(&self) -> usize {
        self.face_start_grid_index.len()
    }

    /// Total number of ptex faces.
    #[inline]
    pub fn ptex_faces_len(&self) -> usize {
        self.ptex_start_grid_index.len()
    }

    /// Index of the first grid belonging to `face_index`.
    #[inline]
    pub fn face_start_grid_index(&self, face_index: usize) -> usize {
        self.face_start_grid_index[face_index]
    }

    /// Face owning `grid_index`.
    #[inline]
    pub fn grid_to_face_index(&self, grid_index: usize) -> usize {
        self.grid_to_face_index[grid_index]
    }

    /// First grid associated with `ptex_face_index`.
    #[inline]
    pub fn ptex_start_grid_index(&self, ptex_face_index: usize) -> usize {
        self.ptex_start_grid_index[ptex_face_index]
    }

    /// Corner count of a face, recovered from the start offsets.
    #[inline]
    pub fn face_corners_len(&self, face_index: usize) -> usize {
        let start = self.face_start_grid_index[face_index];
        let end = self
            .face_start_grid_index
            .get(face_index + 1)
            .copied()
            .unwrap_or(self.num_grids);
        end - start
    }
}

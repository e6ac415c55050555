//! The reshape context: the aggregate object a single reshape operation
//! works through.
//!
//! A context is built from one of three external sources – a multires
//! modifier, an existing control-grid cache, or a subdivide operation – and
//! all three paths converge on the same finish step: validate that the mesh
//! carries a displacement layer, and build the grid/face/ptex index tables.
//! Construction fails with [`Error::MissingDisplacementLayer`] when the mesh
//! has no displacement layer at all; any subdivision surface the failed path
//! already owned is released on the way out.
//!
//! The context never retains a borrow of the mesh. Constructors read the
//! topology transiently, and every grid-mutating entry point takes the mesh
//! as `&mut` – which is what lets grid traversal hand disjoint mutable
//! windows to parallel workers.

use crate::mesh::{DisplacementGrid, MaskGrid, Mesh};
use crate::subdiv::ccg::SubdivCcg;
use crate::subdiv::coords::grid_size_from_level;
use crate::subdiv::{LimitEvaluator, Subdiv, SubdivSettings};
use crate::{Error, Result};

use super::tables::GridIndexTables;

/// Multires modifier inputs consumed by context construction.
#[derive(Clone, Copy, Debug)]
pub struct MultiresModifier {
    /// Level displayed and edited in the viewport.
    pub levels: usize,
    /// Highest level stored on the mesh.
    pub total_levels: usize,
    /// Use simple (linear) subdivision.
    pub simple: bool,
    /// Honor crease weights.
    pub use_creases: bool,
}

impl MultiresModifier {
    /// The level a reshape operates at: the viewport level, never below 1
    /// and never above the stored top.
    #[inline]
    pub fn reshape_level(&self) -> usize {
        self.levels.clamp(1, self.total_levels.max(1))
    }

    /// Subdivision configuration implied by the modifier toggles.
    #[inline]
    pub fn subdiv_settings(&self) -> SubdivSettings {
        SubdivSettings {
            is_simple: self.simple,
            use_creases: self.use_creases,
        }
    }
}

/// One resolution in play during a reshape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelInfo {
    /// Subdivision level.
    pub level: usize,
    /// Grid side length at that level.
    pub grid_size: usize,
}

impl LevelInfo {
    pub(crate) fn new(level: usize) -> Self {
        Self {
            level,
            grid_size: grid_size_from_level(level),
        }
    }
}

/// Owned-versus-borrowed tag for the context's subdivision surface.
///
/// The modifier and subdivide construction paths build a fresh surface the
/// context owns and drops; the CCG path reuses the cache's surface and must
/// never free it.
#[derive(Debug)]
enum SubdivHandle<'a> {
    Owned(Subdiv),
    Borrowed(&'a Subdiv),
}

impl SubdivHandle<'_> {
    #[inline]
    fn get(&self) -> &Subdiv {
        match self {
            SubdivHandle::Owned(subdiv) => subdiv,
            SubdivHandle::Borrowed(subdiv) => subdiv,
        }
    }
}

/// Deep-copied snapshot of the grid layers as they were before editing.
///
/// Either layer may be absent, and individual grids inside a present layer
/// may be unallocated; readers fall back to zero values.
#[derive(Debug, Default)]
pub(crate) struct OriginalGrids {
    pub(crate) displacement: Option<Vec<DisplacementGrid>>,
    pub(crate) paint_masks: Option<Vec<MaskGrid>>,
}

/// Aggregate state of one reshape operation.
#[derive(Debug)]
pub struct MultiresReshapeContext<'a> {
    subdiv: SubdivHandle<'a>,
    tables: GridIndexTables,
    reshape: LevelInfo,
    top: LevelInfo,
    pub(crate) orig: OriginalGrids,
}

impl MultiresReshapeContext<'static> {
    /// Build a context for reshaping through a multires modifier.
    ///
    /// Constructs a fresh subdivision surface from the modifier's settings,
    /// bound to `mesh` and owned by the context. The reshape level comes
    /// from the modifier's level-resolution query, the top level from its
    /// stored total.
    pub fn from_modifier(
        mesh: &Mesh,
        modifier: &MultiresModifier,
        evaluator: Box<dyn LimitEvaluator>,
    ) -> Result<Self> {
        let subdiv = Subdiv::new_from_mesh(modifier.subdiv_settings(), mesh.topology(), evaluator)?;
        Self::finish(
            mesh,
            SubdivHandle::Owned(subdiv),
            modifier.reshape_level(),
            modifier.total_levels,
        )
    }

    /// Build a context for a subdivide operation raising the mesh to
    /// `top_level`.
    ///
    /// The surface is fresh and owned, the reshape level is the modifier's
    /// current total (the level the existing data lives at).
    pub fn from_subdivide(
        mesh: &Mesh,
        modifier: &MultiresModifier,
        top_level: usize,
        evaluator: Box<dyn LimitEvaluator>,
    ) -> Result<Self> {
        let subdiv = Subdiv::new_from_mesh(modifier.subdiv_settings(), mesh.topology(), evaluator)?;
        Self::finish(
            mesh,
            SubdivHandle::Owned(subdiv),
            modifier.total_levels,
            top_level,
        )
    }
}

impl<'a> MultiresReshapeContext<'a> {
    /// Build a context reusing an existing control-grid cache's subdivision
    /// surface.
    ///
    /// The surface stays owned by the cache; the context only borrows it.
    /// The reshape level is the cache's level, the top level is supplied by
    /// the caller.
    pub fn from_ccg(mesh: &Mesh, ccg: &'a SubdivCcg, top_level: usize) -> Result<Self> {
        Self::finish(
            mesh,
            SubdivHandle::Borrowed(ccg.subdiv()),
            ccg.level(),
            top_level,
        )
    }

    fn finish(
        mesh: &Mesh,
        subdiv: SubdivHandle<'a>,
        reshape_level: usize,
        top_level: usize,
    ) -> Result<Self> {
        if mesh.displacement_grids().is_none() {
            // Dropping `subdiv` here releases an owned surface; a borrowed
            // one stays with its cache.
            return Err(Error::MissingDisplacementLayer);
        }

        let tables = GridIndexTables::build(mesh.topology());
        debug_assert_eq!(tables.num_grids(), mesh.topology().corners_len());
        debug_assert_eq!(tables.ptex_faces_len(), subdiv.get().ptex_faces_len());

        log::debug!(
            "reshape context: {} faces, {} grids, {} ptex faces, reshape level {}, top level {}",
            tables.faces_len(),
            tables.num_grids(),
            tables.ptex_faces_len(),
            reshape_level,
            top_level
        );

        Ok(Self {
            subdiv,
            tables,
            reshape: LevelInfo::new(reshape_level),
            top: LevelInfo::new(top_level),
            orig: OriginalGrids::default(),
        })
    }

    /// The subdivision surface in use, whoever owns it.
    #[inline]
    pub fn subdiv(&self) -> &Subdiv {
        self.subdiv.get()
    }

    /// The level actively being edited.
    #[inline]
    pub fn reshape(&self) -> LevelInfo {
        self.reshape
    }

    /// The highest stored level.
    #[inline]
    pub fn top(&self) -> LevelInfo {
        self.top
    }

    /// Total number of grids.
    #[inline]
    pub fn num_grids(&self) -> usize {
        self.tables.num_grids()
    }

    /// Number of base-mesh faces.
    #[inline]
    pub fn faces_len(&self) -> usize {
        self.tables.faces_len()
    }

    /// Total number of ptex faces.
    #[inline]
    pub fn ptex_faces_len(&self) -> usize {
        self.tables.ptex_faces_len()
    }

    /// Corner count of one face.
    #[inline]
    pub fn face_corners_len(&self, face_index: usize) -> usize {
        self.tables.face_corners_len(face_index)
    }

    /// Index of the first grid belonging to `face_index`.
    #[inline]
    pub fn face_start_grid_index(&self, face_index: usize) -> usize {
        self.tables.face_start_grid_index(face_index)
    }

    /// First grid associated with `ptex_face_index`.
    #[inline]
    pub fn ptex_start_grid_index(&self, ptex_face_index: usize) -> usize {
        #[cfg(feature = "topology_validation")]
        assert!(
            ptex_face_index < self.tables.ptex_faces_len(),
            "Ptex face index {} is out of range (should be < {}).",
            ptex_face_index,
            self.tables.ptex_faces_len()
        );
        #[cfg(not(feature = "topology_validation"))]
        debug_assert!(ptex_face_index < self.tables.ptex_faces_len());

        self.tables.ptex_start_grid_index(ptex_face_index)
    }

    #[inline]
    pub(crate) fn tables(&self) -> &GridIndexTables {
        &self.tables
    }
}

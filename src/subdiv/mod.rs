//! Subdivision surface handle and the limit-evaluation contract.
//!
//! The crate never computes Catmull-Clark basis functions itself. Instead
//! the environment supplies a [`LimitEvaluator`] – anything that can return
//! a limit-surface position and its two surface derivatives for a
//! `(ptex face, u, v)` coordinate – and [`Subdiv`] binds that evaluator to a
//! base mesh, owning the per-face offsets into ptex-face index space.
//!
//! Quad base faces own exactly one ptex face; an n-gon owns one ptex face
//! per corner. That rule is the whole of the offset table.

pub mod ccg;
pub mod coords;

use std::fmt;

use glam::Vec3;

use crate::mesh::MeshTopology;
use crate::Result;

/// Position and first derivatives of the limit surface at one ptex
/// coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimitSample {
    /// Limit-surface position.
    pub position: Vec3,
    /// ∂P/∂u of the ptex-face parameterization.
    pub derivative_u: Vec3,
    /// ∂P/∂v of the ptex-face parameterization.
    pub derivative_v: Vec3,
}

/// The black-box limit-surface evaluation service.
///
/// Implementations must be safe to call from several threads at once; grid
/// traversal evaluates concurrently across faces.
pub trait LimitEvaluator: Send + Sync {
    /// Evaluate position and surface derivatives at `(u, v)` on
    /// `ptex_face_index`.
    fn eval_limit_point_and_derivatives(
        &self,
        ptex_face_index: usize,
        u: f32,
        v: f32,
    ) -> LimitSample;
}

/// Subdivision configuration, as derived from the multires modifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubdivSettings {
    /// Simple (linear) subdivision instead of Catmull-Clark smoothing.
    pub is_simple: bool,
    /// Honor crease weights stored on the base mesh.
    pub use_creases: bool,
}

/// A subdivision surface bound to one base mesh.
pub struct Subdiv {
    settings: SubdivSettings,
    evaluator: Box<dyn LimitEvaluator>,
    face_ptex_offset: Vec<usize>,
    ptex_faces_len: usize,
}

impl Subdiv {
    /// Bind `evaluator` to `topology`, computing the per-face ptex offsets.
    pub fn new_from_mesh(
        settings: SubdivSettings,
        topology: &MeshTopology,
        evaluator: Box<dyn LimitEvaluator>,
    ) -> Result<Self> {
        let mut face_ptex_offset = Vec::with_capacity(topology.faces_len());
        let mut ptex_faces_len = 0;
        for face_index in 0..topology.faces_len() {
            face_ptex_offset.push(ptex_faces_len);
            let corners = topology.face_corners_len(face_index);
            ptex_faces_len += if corners == 4 { 1 } else { corners };
        }

        Ok(Self {
            settings,
            evaluator,
            face_ptex_offset,
            ptex_faces_len,
        })
    }

    /// The configuration this surface was built with.
    #[inline]
    pub fn settings(&self) -> SubdivSettings {
        self.settings
    }

    /// Per-face offset into ptex-face index space.
    #[inline]
    pub fn face_ptex_offset(&self) -> &[usize] {
        &self.face_ptex_offset
    }

    /// Total number of ptex faces of the bound mesh.
    #[inline]
    pub fn ptex_faces_len(&self) -> usize {
        self.ptex_faces_len
    }

    /// Evaluate the limit surface at one ptex coordinate.
    #[inline]
    pub fn eval_limit_point_and_derivatives(
        &self,
        ptex_face_index: usize,
        u: f32,
        v: f32,
    ) -> LimitSample {
        #[cfg(feature = "topology_validation")]
        assert!(
            ptex_face_index < self.ptex_faces_len,
            "Ptex face index {} is out of range (should be < {}).",
            ptex_face_index,
            self.ptex_faces_len
        );

        self.evaluator
            .eval_limit_point_and_derivatives(ptex_face_index, u, v)
    }
}

impl fmt::Debug for Subdiv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subdiv")
            .field("settings", &self.settings)
            .field("ptex_faces_len", &self.ptex_faces_len)
            .finish_non_exhaustive()
    }
}

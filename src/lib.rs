//! # Multires Reshape
//!
//! Maps per-vertex displacement stored in a multiresolution mesh's grids to
//! and from a smooth subdivision limit surface, and propagates that data
//! consistently across resolution levels.
//!
//! A multiresolution mesh keeps a low-resolution base mesh plus, per face
//! corner, a square grid of high-resolution displacement samples. The grids
//! canonically store *tangent-space* displacement relative to the limit
//! surface, so sculpted detail survives deformation of the base mesh.
//! "Reshape" is the operation of recomputing those displacements after the
//! base mesh or the subdivision level changed.
//!
//! The crate handles the coordinate plumbing that makes this correct on
//! irregular topology:
//!
//! * quad base faces own a single ptex face shared by four rotated corner
//!   grids, n-gons own one ptex face per corner
//!   ([`subdiv::coords`] and [`MultiresReshapeContext::grid_coord_to_ptex`]);
//! * per-corner tangent frames compensate for that rotation
//!   ([`MultiresReshapeContext::evaluate_limit_at_grid`]);
//! * the three displacement-space conversion passes run one parallel grid
//!   traversal each
//!   ([`MultiresReshapeContext::object_grids_to_tangent_displacement`] and
//!   friends).
//!
//! Subdivision surface evaluation itself is *not* part of this crate: the
//! environment provides a [`LimitEvaluator`] (position plus surface
//! derivatives at a ptex coordinate) and everything else is built on top of
//! that contract.
//!
//! ## Features
#![doc = document_features::document_features!()]

pub mod error;
pub mod mesh;
pub mod reshape;
pub mod subdiv;

pub use error::{Error, Result};
pub use mesh::{DisplacementGrid, Grid, MaskGrid, Mesh, MeshTopology};
pub use reshape::{
    ensure_grids, GridCoord, GridIndexTables, LevelInfo, MultiresModifier,
    MultiresReshapeContext, PTexCoord, ReshapeConstGridElement, ReshapeGridElement,
};
pub use subdiv::ccg::SubdivCcg;
pub use subdiv::{LimitEvaluator, LimitSample, Subdiv, SubdivSettings};

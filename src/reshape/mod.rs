//! Reshape: mapping displacement grids to and from the limit surface.
//!
//! Everything here operates through a [`MultiresReshapeContext`], built
//! from one of three external sources and used for exactly one reshape
//! operation. The context owns the coordinate lookup tables and the
//! optional original-grid snapshot; the mesh it works on is passed to each
//! entry point explicitly.

mod context;
mod convert;
mod coord;
mod element;
mod grids;
mod sample;
mod tables;
mod traverse;

pub use context::{LevelInfo, MultiresModifier, MultiresReshapeContext};
pub use coord::{GridCoord, PTexCoord};
pub use element::{ReshapeConstGridElement, ReshapeGridElement};
pub use grids::ensure_grids;
pub use tables::GridIndexTables;

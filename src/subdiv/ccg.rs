//! Subdivision control-grid cache.
//!
//! A [`SubdivCcg`] is an externally maintained cache of grid data that
//! carries its own subdivision surface. A reshape context built from a CCG
//! borrows that surface instead of constructing one, and never frees it.

use crate::subdiv::coords::grid_size_from_level;
use crate::subdiv::Subdiv;

/// A control-grid cache: an already-built subdivision surface plus the
/// level its grids are stored at.
#[derive(Debug)]
pub struct SubdivCcg {
    subdiv: Subdiv,
    level: usize,
}

impl SubdivCcg {
    /// Wrap an existing subdivision surface at `level`.
    pub fn new(subdiv: Subdiv, level: usize) -> Self {
        Self { subdiv, level }
    }

    /// The cache's subdivision surface.
    #[inline]
    pub fn subdiv(&self) -> &Subdiv {
        &self.subdiv
    }

    /// The level the cached grids are stored at.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Side length of the cached grids.
    #[inline]
    pub fn grid_size(&self) -> usize {
        grid_size_from_level(self.level)
    }
}

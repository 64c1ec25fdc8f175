//! Layout calculation modules for imposition
//!
//! This module handles the geometry of booklet imposition:
//! - Signature planning (which logical page goes on which sheet, side, quadrant)
//! - Region and cell rectangles of a sheet side
//! - Aspect-preserving content placement

mod grid;
mod placement;
mod signature;
mod types;

pub use grid::*;
pub use placement::*;
pub use signature::*;
pub use types::*;

//! Spatial indexing of star catalogs over RA/Dec.

pub mod bounds;
pub mod quadtree;
pub mod shared_index;

pub use bounds::Bounds;
pub use quadtree::{NodeId, QuadTree, QuadTreeParams, RaSeam};
pub use shared_index::SharedStarIndex;

//! Concurrently readable star index.
//!
//! Readers take a snapshot with [`SharedStarIndex::load`] and query it without locking.
//! A rebuild constructs a whole new [`QuadTree`] off to the side and swaps it in
//! atomically, so a reader sees either the old tree or the new one, never a partial
//! build. Writers are serialized by a mutex.

use std::sync::Arc;

use arc_swap::ArcSwap;
use log::info;
use parking_lot::Mutex;

use crate::planisphere_errors::PlanisphereError;
use crate::spatial::bounds::Bounds;
use crate::spatial::quadtree::{QuadTree, QuadTreeParams};
use crate::star::Star;

#[derive(Debug)]
pub struct SharedStarIndex {
    current: ArcSwap<QuadTree>,
    writer: Mutex<()>,
}

impl SharedStarIndex {
    /// Start from an empty sky-wide tree.
    pub fn new(params: QuadTreeParams) -> Result<Self, PlanisphereError> {
        Ok(Self::from_tree(QuadTree::new(Bounds::sky(), params)?))
    }

    pub fn from_tree(tree: QuadTree) -> Self {
        SharedStarIndex {
            current: ArcSwap::from_pointee(tree),
            writer: Mutex::new(()),
        }
    }

    /// Snapshot of the current tree.
    pub fn load(&self) -> Arc<QuadTree> {
        self.current.load_full()
    }

    /// Build a new sky-wide tree from `catalog` and publish it.
    ///
    /// On error the previous tree stays published.
    pub fn rebuild<I>(&self, catalog: I, params: QuadTreeParams) -> Result<Arc<QuadTree>, PlanisphereError>
    where
        I: IntoIterator<Item = Star>,
    {
        let _guard = self.writer.lock();
        let tree = Arc::new(QuadTree::build(catalog, Bounds::sky(), params)?);
        self.current.store(Arc::clone(&tree));
        info!("Published star index with {} stars", tree.size());
        Ok(tree)
    }

    /// Replace the published tree, returning the previous one.
    pub fn publish(&self, tree: QuadTree) -> Arc<QuadTree> {
        let _guard = self.writer.lock();
        self.current.swap(Arc::new(tree))
    }
}

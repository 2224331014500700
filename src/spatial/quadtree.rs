//! # Arena quadtree over the RA/Dec rectangle
//!
//! Nodes live in one `Vec` and refer to each other through [`NodeId`] handles; stars live
//! in a second `Vec` and nodes store their indices. A tree is therefore a flat value that
//! is cheap to build off-line, move, and publish (see
//! [`SharedStarIndex`](crate::spatial::shared_index::SharedStarIndex)).
//!
//! ## Splitting rule
//!
//! A leaf stores an item while it holds fewer than `capacity` items or sits at
//! `max_depth`. Otherwise it splits into NE, NW, SE, SW quadrants at the RA/Dec midpoints
//! and moves its items down; an item that no child accepts stays in the parent.
//!
//! Every node is either a leaf or has exactly four children partitioning its bounds, and
//! no node is deeper than `max_depth`.
//!
//! ## Radius queries and the RA seam
//!
//! [`QuadTree::query_radius`] pre-filters with a rectangle and keeps the candidates whose
//! haversine distance is within the radius. [`RaSeam::Clip`] uses `center ± radius` on both
//! axes without wrapping, so cones crossing 0h/24h lose the far side. [`RaSeam::Wrap`] uses
//! the exact RA extent of the cone and splits it across the seam.

use std::time::Instant;

use log::{info, warn};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hours, DEC_MAX, DEC_MIN, HOURS_TO_DEG, RADEG, RA_MAX, RA_MIN};
use crate::planisphere_errors::PlanisphereError;
use crate::spatial::bounds::Bounds;
use crate::star::{angular_distance, Star};

/// Deepest tree accepted by [`QuadTreeParams::validate`].
pub const MAX_SUPPORTED_DEPTH: u8 = 12;

/// Handle of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Pre-filter rectangle used by radius queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RaSeam {
    /// `center ± radius` on both axes, not wrapped at 0h/24h.
    #[default]
    Clip,
    /// Exact RA extent of the cone, split across the seam.
    Wrap,
}

/// Tuning of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadTreeParams {
    /// Items a leaf holds before it splits.
    pub capacity: usize,
    /// Depth at which leaves stop splitting (root is depth 0).
    pub max_depth: u8,
    pub ra_seam: RaSeam,
}

impl Default for QuadTreeParams {
    fn default() -> Self {
        QuadTreeParams {
            capacity: 50,
            max_depth: 8,
            ra_seam: RaSeam::Clip,
        }
    }
}

impl QuadTreeParams {
    pub fn validate(&self) -> Result<(), PlanisphereError> {
        if self.capacity == 0 {
            return Err(PlanisphereError::InvalidIndexParameter(
                "capacity must be at least 1".into(),
            ));
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(PlanisphereError::InvalidIndexParameter(format!(
                "max_depth must be at most {MAX_SUPPORTED_DEPTH}, got {}",
                self.max_depth
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Node {
    bounds: Bounds,
    depth: u8,
    items: Vec<u32>,
    children: Option<[NodeId; 4]>,
}

impl Node {
    fn leaf(bounds: Bounds, depth: u8) -> Self {
        Node {
            bounds,
            depth,
            items: Vec::new(),
            children: None,
        }
    }
}

/// Spatial index of a star catalog.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<Node>,
    stars: Vec<Star>,
    params: QuadTreeParams,
    rejected: usize,
}

impl QuadTree {
    /// An empty tree covering `bounds`.
    pub fn new(bounds: Bounds, params: QuadTreeParams) -> Result<Self, PlanisphereError> {
        params.validate()?;
        let finite = [bounds.ra_min, bounds.ra_max, bounds.dec_min, bounds.dec_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite || bounds.ra_min > bounds.ra_max || bounds.dec_min > bounds.dec_max {
            return Err(PlanisphereError::InvalidIndexParameter(format!(
                "root bounds must be finite and ordered, got {bounds:?}"
            )));
        }

        Ok(QuadTree {
            nodes: vec![Node::leaf(bounds, 0)],
            stars: Vec::new(),
            params,
            rejected: 0,
        })
    }

    /// Build a tree from a catalog.
    ///
    /// Stars with non-finite or out-of-range coordinates, or outside `bounds`, are
    /// skipped and counted in [`QuadTree::rejected`].
    ///
    /// Arguments
    /// ---------
    /// * `catalog`: the stars to index.
    /// * `bounds`: root rectangle, usually [`Bounds::sky`].
    /// * `params`: capacity, depth limit and seam policy.
    pub fn build<I>(catalog: I, bounds: Bounds, params: QuadTreeParams) -> Result<Self, PlanisphereError>
    where
        I: IntoIterator<Item = Star>,
    {
        let start = Instant::now();
        let mut tree = QuadTree::new(bounds, params)?;

        for star in catalog {
            if !tree.insert(star) {
                tree.rejected += 1;
            }
        }

        if tree.rejected > 0 {
            warn!(
                "Star index rejected {} records with invalid or out-of-bounds coordinates",
                tree.rejected
            );
        }
        info!(
            "Star index built: {} stars, {} nodes, depth {}, in {:?}",
            tree.stars.len(),
            tree.nodes.len(),
            tree.depth(),
            start.elapsed()
        );
        Ok(tree)
    }

    /// Insert a star.
    ///
    /// Return
    /// ------
    /// * `false` if the coordinates are invalid or outside the root bounds.
    pub fn insert(&mut self, star: Star) -> bool {
        if !star.has_valid_coordinates() || !self.root_bounds().contains(star.ra, star.dec) {
            return false;
        }
        let Ok(item) = u32::try_from(self.stars.len()) else {
            return false;
        };

        self.stars.push(star);
        self.insert_at(NodeId::ROOT, item)
    }

    fn insert_at(&mut self, id: NodeId, item: u32) -> bool {
        let (ra, dec) = {
            let star = &self.stars[item as usize];
            (star.ra, star.dec)
        };

        let node = &self.nodes[id.idx()];
        if !node.bounds.contains(ra, dec) {
            return false;
        }

        if node.children.is_none() {
            if node.items.len() < self.params.capacity || node.depth >= self.params.max_depth {
                self.nodes[id.idx()].items.push(item);
                return true;
            }
            self.subdivide(id);
        }

        if let Some(children) = self.nodes[id.idx()].children {
            for child in children {
                if self.insert_at(child, item) {
                    return true;
                }
            }
        }

        self.nodes[id.idx()].items.push(item);
        true
    }

    fn subdivide(&mut self, id: NodeId) {
        let (quadrants, depth) = {
            let node = &self.nodes[id.idx()];
            (node.bounds.quadrants(), node.depth + 1)
        };

        // node count stays far below u32::MAX for depths up to MAX_SUPPORTED_DEPTH
        let first = self.nodes.len() as u32;
        let children = [
            NodeId(first),
            NodeId(first + 1),
            NodeId(first + 2),
            NodeId(first + 3),
        ];
        self.nodes
            .extend(quadrants.into_iter().map(|q| Node::leaf(q, depth)));

        let existing = std::mem::take(&mut self.nodes[id.idx()].items);
        self.nodes[id.idx()].children = Some(children);

        for item in existing {
            let placed = children.iter().any(|&child| self.insert_at(child, item));
            if !placed {
                self.nodes[id.idx()].items.push(item);
            }
        }
    }

    /// Every star inside `range` (inclusive edges).
    pub fn query_region(&self, range: &Bounds) -> Vec<&Star> {
        let mut found = Vec::new();
        self.collect_region(range, &mut found);
        found
    }

    fn collect_region<'a>(&'a self, range: &Bounds, found: &mut Vec<&'a Star>) {
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.idx()];
            if !node.bounds.intersects(range) {
                continue;
            }

            found.extend(
                node.items
                    .iter()
                    .map(|&i| &self.stars[i as usize])
                    .filter(|s| range.contains(s.ra, s.dec)),
            );

            if let Some(children) = node.children {
                stack.extend(children);
            }
        }
    }

    /// Every star within `radius` degrees (great-circle) of `(center_ra, center_dec)`.
    ///
    /// Return
    /// ------
    /// * The matching stars; empty for NaN or negative inputs.
    pub fn query_radius(&self, center_ra: Hours, center_dec: Degree, radius: Degree) -> Vec<&Star> {
        if !center_ra.is_finite() || !center_dec.is_finite() || !(radius >= 0.0) {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for range in self.radius_prefilter(center_ra, center_dec, radius) {
            self.collect_region(&range, &mut candidates);
        }

        let radius_rad = radius * RADEG;
        candidates.retain(|s| angular_distance(center_ra, center_dec, s.ra, s.dec) <= radius_rad);
        candidates
    }

    fn radius_prefilter(&self, center_ra: Hours, center_dec: Degree, radius: Degree) -> Vec<Bounds> {
        match self.params.ra_seam {
            RaSeam::Clip => vec![Bounds::new(
                center_ra - radius,
                center_ra + radius,
                center_dec - radius,
                center_dec + radius,
            )],
            RaSeam::Wrap => wrapped_cone_bounds(center_ra, center_dec, radius),
        }
    }

    /// Nearest star within `max_radius` degrees, `None` if there is none.
    pub fn find_nearest(&self, ra: Hours, dec: Degree, max_radius: Degree) -> Option<&Star> {
        self.query_radius(ra, dec, max_radius)
            .into_iter()
            .min_by_key(|s| OrderedFloat(angular_distance(ra, dec, s.ra, s.dec)))
    }

    /// Number of stored stars, counted over the nodes.
    pub fn size(&self) -> usize {
        self.nodes.iter().map(|n| n.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Reset to an empty root with the same bounds and parameters.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[NodeId::ROOT.idx()];
        root.items.clear();
        root.children = None;
        self.stars.clear();
        self.rejected = 0;
    }

    /// Records skipped by [`QuadTree::build`].
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Stored stars, in insertion order.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn params(&self) -> &QuadTreeParams {
        &self.params
    }

    pub fn root_bounds(&self) -> Bounds {
        self.nodes[NodeId::ROOT.idx()].bounds
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest node depth.
    pub fn depth(&self) -> u8 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn node_bounds(&self, id: NodeId) -> Option<Bounds> {
        self.nodes.get(id.idx()).map(|n| n.bounds)
    }

    pub fn node_depth(&self, id: NodeId) -> Option<u8> {
        self.nodes.get(id.idx()).map(|n| n.depth)
    }

    pub fn node_children(&self, id: NodeId) -> Option<[NodeId; 4]> {
        self.nodes.get(id.idx()).and_then(|n| n.children)
    }

    /// Number of items stored directly in a node.
    pub fn node_len(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(id.idx()).map(|n| n.items.len())
    }

    /// Handles of every node, root first.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }
}

/// Rectangles covering a cone of `radius` degrees, split across the RA seam.
fn wrapped_cone_bounds(center_ra: Hours, center_dec: Degree, radius: Degree) -> Vec<Bounds> {
    // widen slightly so that stars exactly on the circle survive rounding
    const MARGIN: f64 = 1e-9;

    let dec_min = (center_dec - radius - MARGIN).max(DEC_MIN);
    let dec_max = (center_dec + radius + MARGIN).min(DEC_MAX);

    // a cone touching a pole spans every right ascension
    if center_dec + radius >= DEC_MAX || center_dec - radius <= DEC_MIN {
        return vec![Bounds::new(RA_MIN, RA_MAX, dec_min, dec_max)];
    }

    let half_width = ((radius * RADEG).sin() / (center_dec * RADEG).cos())
        .min(1.0)
        .asin()
        .to_degrees()
        / HOURS_TO_DEG
        + MARGIN;

    if 2.0 * half_width >= RA_MAX {
        return vec![Bounds::new(RA_MIN, RA_MAX, dec_min, dec_max)];
    }

    let center = center_ra.rem_euclid(RA_MAX);
    let (lo, hi) = (center - half_width, center + half_width);

    if lo < RA_MIN {
        vec![
            Bounds::new(lo + RA_MAX, RA_MAX, dec_min, dec_max),
            Bounds::new(RA_MIN, hi, dec_min, dec_max),
        ]
    } else if hi > RA_MAX {
        vec![
            Bounds::new(lo, RA_MAX, dec_min, dec_max),
            Bounds::new(RA_MIN, hi - RA_MAX, dec_min, dec_max),
        ]
    } else {
        vec![Bounds::new(lo, hi, dec_min, dec_max)]
    }
}

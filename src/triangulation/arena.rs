//! Append-only triangle tree for point location and edge flips.
//!
//! Every split or flip appends new nodes and records them as the
//! descendants of the nodes they replace; geometry of an existing node is
//! never rewritten. The leaves form the current triangulation, the inner
//! nodes form a history DAG that point location walks from the root.
//!
//! Adjacency handles are written once when a node is created and may later
//! refer to nodes that have since been split. [`TriangleArena::leaf_with_edge`]
//! resolves such a stale handle to the current leaf.

use super::point_ref::{PointRef, PointSet};
use crate::error::{GeometryError, GeometryResult};
use num_traits::Float;

/// Handle of a node in a [`TriangleArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The nodes that replaced a node, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Descendants {
    /// Not replaced; part of the current triangulation.
    Leaf,
    /// Replaced by a flip or an on-edge split.
    Two([NodeId; 2]),
    /// Replaced by an interior split.
    Three([NodeId; 3]),
}

impl Descendants {
    #[inline]
    pub(crate) fn as_slice(&self) -> &[NodeId] {
        match self {
            Descendants::Leaf => &[],
            Descendants::Two(ids) => ids,
            Descendants::Three(ids) => ids,
        }
    }
}

/// A triangle of the history tree.
///
/// `adjacent[i]` is the neighbour across the edge opposite `vertices[i]`,
/// `None` only for edges of the bounding triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TriangleNode {
    pub(crate) vertices: [PointRef; 3],
    pub(crate) adjacent: [Option<NodeId>; 3],
    pub(crate) descendants: Descendants,
}

impl TriangleNode {
    fn new(vertices: [PointRef; 3], adjacent: [Option<NodeId>; 3]) -> Self {
        Self {
            vertices,
            adjacent,
            descendants: Descendants::Leaf,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.descendants == Descendants::Leaf
    }

    /// All three vertices are input points.
    #[inline]
    pub(crate) fn is_inner(&self) -> bool {
        self.vertices.iter().all(|v| v.is_finite())
    }

    #[inline]
    fn slot(&self, v: PointRef) -> Option<usize> {
        self.vertices.iter().position(|&u| u == v)
    }

    /// Does the triangle have `(e0, e1)` as an edge, in either direction?
    #[inline]
    pub(crate) fn has_edge(&self, e0: PointRef, e1: PointRef) -> bool {
        e0 != e1 && self.slot(e0).is_some() && self.slot(e1).is_some()
    }

    /// The vertex that is neither `e0` nor `e1`.
    pub(crate) fn other_vertex(&self, e0: PointRef, e1: PointRef) -> Option<PointRef> {
        if !self.has_edge(e0, e1) {
            return None;
        }
        self.vertices.iter().copied().find(|&v| v != e0 && v != e1)
    }

    /// Neighbour across the edge opposite `v`. Outer `None` if `v` is not
    /// a vertex of this triangle.
    #[inline]
    pub(crate) fn opposite(&self, v: PointRef) -> Option<Option<NodeId>> {
        self.slot(v).map(|i| self.adjacent[i])
    }
}

/// Owner of all triangle nodes of one triangulation run.
#[derive(Debug, Clone, Default)]
pub(crate) struct TriangleArena {
    nodes: Vec<TriangleNode>,
}

impl TriangleArena {
    /// Drops every node, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Resets the arena to the bounding triangle `(Upper, Lower, apex)`.
    pub(crate) fn seed(&mut self, apex: u32) {
        self.nodes.clear();
        self.nodes.push(TriangleNode::new(
            [PointRef::Upper, PointRef::Lower, PointRef::Finite(apex)],
            [None; 3],
        ));
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &TriangleNode {
        &self.nodes[id.index()]
    }

    /// Vertex triples of the leaves with three finite vertices, in
    /// creation order.
    pub(crate) fn inner_leaves(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf() && node.is_inner())
            .filter_map(|node| {
                let [a, b, c] = node.vertices;
                Some([a.index()?, b.index()?, c.index()?])
            })
    }

    fn next_ids<const N: usize>(&self) -> GeometryResult<[NodeId; N]> {
        let base = self.nodes.len();
        let last = base + N - 1;
        if last > u32::MAX as usize {
            return Err(GeometryError::ArenaExhausted { nodes: base });
        }
        Ok(std::array::from_fn(|i| NodeId((base + i) as u32)))
    }

    fn neighbor(&self, id: NodeId, v: PointRef) -> GeometryResult<Option<NodeId>> {
        self.node(id)
            .opposite(v)
            .ok_or(GeometryError::InconsistentTopology { node: id.0 })
    }

    /// Walks from the root to the leaf containing input point `p`.
    pub(crate) fn find_leaf<F: Float>(
        &self,
        points: &PointSet<'_, F>,
        p: u32,
    ) -> GeometryResult<NodeId> {
        let mut current = NodeId::ROOT;
        loop {
            let children = self.node(current).descendants.as_slice();
            if children.is_empty() {
                return Ok(current);
            }
            current = children
                .iter()
                .copied()
                .find(|&child| points.contains(p, self.node(child).vertices))
                .ok_or(GeometryError::PointLocationFailed { index: p as usize })?;
        }
    }

    /// Follows descendants of `start` to the leaf that owns edge `(e0, e1)`.
    pub(crate) fn leaf_with_edge(
        &self,
        start: NodeId,
        e0: PointRef,
        e1: PointRef,
    ) -> GeometryResult<NodeId> {
        let mut current = start;
        loop {
            let children = self.node(current).descendants.as_slice();
            if children.is_empty() {
                return Ok(current);
            }
            current = children
                .iter()
                .copied()
                .find(|&child| self.node(child).has_edge(e0, e1))
                .ok_or(GeometryError::InconsistentTopology { node: current.0 })?;
        }
    }

    /// Splits leaf `(v0, v1, v2)` around an interior point `p` into
    /// `(p, v0, v1)`, `(p, v1, v2)` and `(p, v2, v0)`.
    pub(crate) fn split_interior(&mut self, leaf: NodeId, p: PointRef) -> GeometryResult<[NodeId; 3]> {
        let ids @ [n0, n1, n2] = self.next_ids::<3>()?;
        let TriangleNode {
            vertices: [v0, v1, v2],
            adjacent: [a0, a1, a2],
            ..
        } = *self.node(leaf);

        self.nodes
            .push(TriangleNode::new([p, v0, v1], [a2, Some(n1), Some(n2)]));
        self.nodes
            .push(TriangleNode::new([p, v1, v2], [a0, Some(n2), Some(n0)]));
        self.nodes
            .push(TriangleNode::new([p, v2, v0], [a1, Some(n0), Some(n1)]));
        self.nodes[leaf.index()].descendants = Descendants::Three(ids);

        Ok(ids)
    }

    /// Splits leaf `(c, a, b)`, whose edge `(a, b)` opposite `slot` holds
    /// `p`, together with the neighbour `(b, a, d)` across that edge.
    ///
    /// Produces `(p, b, c)`, `(p, c, a)`, `(p, a, d)` and `(p, d, b)`; the
    /// first two replace the leaf, the last two the neighbour.
    pub(crate) fn split_edge(
        &mut self,
        leaf: NodeId,
        slot: usize,
        p: PointRef,
    ) -> GeometryResult<[NodeId; 4]> {
        let inconsistent = GeometryError::InconsistentTopology { node: leaf.0 };
        let t = *self.node(leaf);
        let c = t.vertices[slot];
        let a = t.vertices[(slot + 1) % 3];
        let b = t.vertices[(slot + 2) % 3];

        let across = t.adjacent[slot].ok_or_else(|| inconsistent.clone())?;
        let other = self.leaf_with_edge(across, a, b)?;
        let d = self
            .node(other)
            .other_vertex(a, b)
            .ok_or_else(|| inconsistent.clone())?;
        let beyond_a = self.neighbor(other, b)?;
        let beyond_b = self.neighbor(other, a)?;

        let ids @ [n0, n1, n2, n3] = self.next_ids::<4>()?;
        self.nodes.push(TriangleNode::new(
            [p, b, c],
            [t.adjacent[(slot + 1) % 3], Some(n1), Some(n3)],
        ));
        self.nodes.push(TriangleNode::new(
            [p, c, a],
            [t.adjacent[(slot + 2) % 3], Some(n2), Some(n0)],
        ));
        self.nodes
            .push(TriangleNode::new([p, a, d], [beyond_a, Some(n3), Some(n1)]));
        self.nodes
            .push(TriangleNode::new([p, d, b], [beyond_b, Some(n0), Some(n2)]));

        self.nodes[leaf.index()].descendants = Descendants::Two([n0, n1]);
        self.nodes[other.index()].descendants = Descendants::Two([n2, n3]);

        Ok(ids)
    }

    /// Replaces the leaves `(p, e0, e1)` and `(e1, e0, q)` by `(p, e0, q)`
    /// and `(p, q, e1)`.
    pub(crate) fn flip(
        &mut self,
        near: NodeId,
        far: NodeId,
        p: PointRef,
        e0: PointRef,
        e1: PointRef,
        q: PointRef,
    ) -> GeometryResult<[NodeId; 2]> {
        let ids @ [t2, t3] = self.next_ids::<2>()?;

        let t2_node = TriangleNode::new(
            [p, e0, q],
            [self.neighbor(far, e1)?, Some(t3), self.neighbor(near, e1)?],
        );
        let t3_node = TriangleNode::new(
            [p, q, e1],
            [self.neighbor(far, e0)?, self.neighbor(near, e0)?, Some(t2)],
        );

        self.nodes.push(t2_node);
        self.nodes.push(t3_node);
        self.nodes[near.index()].descendants = Descendants::Two(ids);
        self.nodes[far.index()].descendants = Descendants::Two(ids);

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point2;

    const A: PointRef = PointRef::Finite(0);
    const B: PointRef = PointRef::Finite(1);
    const C: PointRef = PointRef::Finite(2);

    fn node(vertices: [PointRef; 3]) -> TriangleNode {
        TriangleNode::new(vertices, [None; 3])
    }

    #[test]
    fn test_node_edges() {
        let t = node([A, B, C]);
        assert!(t.has_edge(A, B));
        assert!(t.has_edge(B, A));
        assert!(t.has_edge(C, A));
        assert!(!t.has_edge(A, PointRef::Upper));
        assert!(!t.has_edge(A, A));
        assert_eq!(t.other_vertex(A, B), Some(C));
        assert_eq!(t.other_vertex(C, B), Some(A));
        assert_eq!(t.other_vertex(A, PointRef::Lower), None);
    }

    #[test]
    fn test_node_inner_and_leaf() {
        let t = node([A, B, C]);
        assert!(t.is_leaf());
        assert!(t.is_inner());
        let s = node([PointRef::Upper, B, C]);
        assert!(!s.is_inner());
    }

    #[test]
    fn test_opposite() {
        let t = TriangleNode::new([A, B, C], [Some(NodeId(4)), None, Some(NodeId(6))]);
        assert_eq!(t.opposite(A), Some(Some(NodeId(4))));
        assert_eq!(t.opposite(B), Some(None));
        assert_eq!(t.opposite(PointRef::Upper), None);
    }

    #[test]
    fn test_seed() {
        let mut arena = TriangleArena::default();
        arena.seed(3);
        assert_eq!(arena.len(), 1);
        let root = arena.node(NodeId::ROOT);
        assert_eq!(
            root.vertices,
            [PointRef::Upper, PointRef::Lower, PointRef::Finite(3)]
        );
        assert_eq!(root.adjacent, [None; 3]);
        assert_eq!(arena.inner_leaves().count(), 0);
    }

    #[test]
    fn test_split_interior_wires_siblings() {
        let mut arena = TriangleArena::default();
        arena.seed(0);
        let p = PointRef::Finite(1);
        let [n0, n1, n2] = arena.split_interior(NodeId::ROOT, p).unwrap();

        assert_eq!(arena.len(), 4);
        assert!(!arena.node(NodeId::ROOT).is_leaf());
        assert_eq!(
            arena.node(NodeId::ROOT).descendants,
            Descendants::Three([n0, n1, n2])
        );

        for (id, next, prev) in [(n0, n1, n2), (n1, n2, n0), (n2, n0, n1)] {
            let t = arena.node(id);
            assert_eq!(t.vertices[0], p);
            // Bounding triangle edges have no neighbour
            assert_eq!(t.adjacent[0], None);
            assert_eq!(t.adjacent[1], Some(next));
            assert_eq!(t.adjacent[2], Some(prev));
            // Shared edges really are shared
            let shared = arena.node(next);
            assert!(shared.has_edge(t.vertices[2], t.vertices[0]));
        }
    }

    #[test]
    fn test_find_leaf_and_leaf_with_edge() {
        let pts = vec![
            Point2::new(0.5_f64, 2.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        ];
        let set = PointSet::new(&pts, 0.0);
        let mut arena = TriangleArena::default();
        arena.seed(0);

        let leaf = arena.find_leaf(&set, 1).unwrap();
        assert_eq!(leaf, NodeId::ROOT);
        let [n0, n1, n2] = arena.split_interior(leaf, PointRef::Finite(1)).unwrap();

        // (1, 0) ranks above (0, 0), so it sits in (p, Lower, apex)
        let leaf = arena.find_leaf(&set, 2).unwrap();
        assert_eq!(leaf, n1);
        assert!(arena.node(leaf).is_leaf());

        // Root owns edge (Lower, apex) through n1
        let found = arena
            .leaf_with_edge(NodeId::ROOT, PointRef::Lower, PointRef::Finite(0))
            .unwrap();
        assert_eq!(found, n1);
        let found = arena
            .leaf_with_edge(NodeId::ROOT, PointRef::Upper, PointRef::Lower)
            .unwrap();
        assert_eq!(found, n0);
        let found = arena
            .leaf_with_edge(NodeId::ROOT, PointRef::Finite(0), PointRef::Upper)
            .unwrap();
        assert_eq!(found, n2);
    }

    #[test]
    fn test_leaf_with_edge_lost_edge() {
        let mut arena = TriangleArena::default();
        arena.seed(0);
        arena.split_interior(NodeId::ROOT, PointRef::Finite(1)).unwrap();
        let err = arena
            .leaf_with_edge(NodeId::ROOT, PointRef::Finite(7), PointRef::Finite(8))
            .unwrap_err();
        assert_eq!(err, GeometryError::InconsistentTopology { node: 0 });
    }

    #[test]
    fn test_split_edge_creates_four_children() {
        // Triangle (0, 1, 2) with a neighbour (1, 0, 3) across edge (0, 1)
        let mut arena = TriangleArena::default();
        arena.nodes.push(TriangleNode::new(
            [C, A, B],
            [Some(NodeId(1)), None, None],
        ));
        arena.nodes.push(TriangleNode::new(
            [B, A, PointRef::Finite(3)],
            [None, None, Some(NodeId(0))],
        ));
        let p = PointRef::Finite(4);

        let [n0, n1, n2, n3] = arena.split_edge(NodeId(0), 0, p).unwrap();
        assert_eq!(arena.node(n0).vertices, [p, B, C]);
        assert_eq!(arena.node(n1).vertices, [p, C, A]);
        assert_eq!(arena.node(n2).vertices, [p, A, PointRef::Finite(3)]);
        assert_eq!(arena.node(n3).vertices, [p, PointRef::Finite(3), B]);
        assert_eq!(arena.node(NodeId(0)).descendants, Descendants::Two([n0, n1]));
        assert_eq!(arena.node(NodeId(1)).descendants, Descendants::Two([n2, n3]));

        // Ring of siblings around p
        assert_eq!(arena.node(n0).adjacent[1], Some(n1));
        assert_eq!(arena.node(n1).adjacent[1], Some(n2));
        assert_eq!(arena.node(n2).adjacent[1], Some(n3));
        assert_eq!(arena.node(n3).adjacent[1], Some(n0));
        // Old edge (0, 1) no longer exists among leaves
        assert!(arena.nodes.iter().filter(|t| t.is_leaf()).all(|t| !t.has_edge(A, B)));
    }

    #[test]
    fn test_flip() {
        // near = (p, e0, e1) = (3, 0, 1), far = (1, 0, 2)
        let p = PointRef::Finite(3);
        let mut arena = TriangleArena::default();
        arena.nodes.push(TriangleNode::new(
            [p, A, B],
            [Some(NodeId(1)), Some(NodeId(8)), Some(NodeId(9))],
        ));
        arena.nodes.push(TriangleNode::new(
            [B, A, C],
            [Some(NodeId(5)), Some(NodeId(6)), Some(NodeId(0))],
        ));

        let [t2, t3] = arena.flip(NodeId(0), NodeId(1), p, A, B, C).unwrap();
        assert_eq!(arena.node(t2).vertices, [p, A, C]);
        assert_eq!(arena.node(t3).vertices, [p, C, B]);
        // (e0, q) is across from far's e1 slot, (q, e1) from far's e0 slot
        assert_eq!(arena.node(t2).adjacent, [Some(NodeId(5)), Some(t3), Some(NodeId(9))]);
        assert_eq!(arena.node(t3).adjacent, [Some(NodeId(6)), Some(NodeId(8)), Some(t2)]);
        assert_eq!(arena.node(NodeId(0)).descendants, Descendants::Two([t2, t3]));
        assert_eq!(arena.node(NodeId(1)).descendants, Descendants::Two([t2, t3]));
    }
}

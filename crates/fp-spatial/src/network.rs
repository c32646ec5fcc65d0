//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length`) are sorted by
//! source node and indexed by `EdgeId`, so Dijkstra's inner loop is a
//! contiguous scan.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(x, y)` to the nearest `NodeId`.  It snaps
//! machine positions to waypoints and answers the radius queries used when
//! connecting waypoints.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use fp_core::{EdgeId, NodeId, Point};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated `NodeId`.
#[derive(Clone)]
pub(crate) struct NodeEntry {
    pub(crate) point: [f64; 2],
    pub(crate) id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Bulk-load an R-tree over `nodes`, ids assigned by position.
pub(crate) fn index_nodes(nodes: &[Point]) -> RTree<NodeEntry> {
    let entries: Vec<NodeEntry> = nodes
        .iter()
        .enumerate()
        .map(|(i, p)| NodeEntry { point: [p.x, p.y], id: NodeId(i as u32) })
        .collect();
    RTree::bulk_load(entries)
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Road graph in CSR format plus a spatial index for node snapping.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadNetworkBuilder`] or
/// [`build_road_network`](crate::build_road_network).
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge; used to walk predecessor edges back during
    /// route reconstruction.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Euclidean length of each edge in metres.  Used as Dijkstra cost.
    pub edge_length: Vec<f64>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    ///
    /// Snapping against an empty network returns `None`; path queries fall
    /// back to straight lines.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Nodes directly connected to `node`.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node).map(|e| self.edge_to[e.index()])
    }

    /// Position of `node`.
    #[inline]
    pub fn pos(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    /// Every undirected connection once, as `(a, b)` with `a < b`.
    pub fn connections(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edge_from
            .iter()
            .zip(&self.edge_to)
            .filter(|(a, b)| a < b)
            .map(|(&a, &b)| (a, b))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.  Among equidistant
    /// nodes the choice follows the R-tree's traversal order.
    pub fn snap_to_node(&self, pos: Point) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.id)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Nodes are identified by their coordinates: adding a point that already
/// exists returns the existing `NodeId`.
///
/// # Example
///
/// ```
/// use fp_core::Point;
/// use fp_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(Point::new(0.0, 0.0));
/// let c = b.add_node(Point::new(10.0, 0.0));
/// assert_eq!(b.add_node(Point::new(10.0, 0.0)), c);
/// b.add_road(a, c);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<Point>,
    by_coord:  FxHashMap<(u64, u64), NodeId>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:   NodeId,
    to:     NodeId,
    length: f64,
}

/// Hashable identity of a coordinate pair.  `-0.0` is folded into `0.0` so
/// both spellings of the origin are the same node.
#[inline]
fn coord_key(p: Point) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes:     Vec::new(),
            by_coord:  FxHashMap::default(),
            raw_edges: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut by_coord = FxHashMap::default();
        by_coord.reserve(nodes);
        Self {
            nodes: Vec::with_capacity(nodes),
            by_coord,
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).  A point
    /// already present returns the existing id.
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        let next = NodeId(self.nodes.len() as u32);
        let id = *self.by_coord.entry(coord_key(pos)).or_insert(next);
        if id == next {
            self.nodes.push(pos);
        }
        id
    }

    /// `NodeId` of an existing point, if any.
    pub fn find_node(&self, pos: Point) -> Option<NodeId> {
        self.by_coord.get(&coord_key(pos)).copied()
    }

    /// Add a **directed** edge weighted by the Euclidean distance between
    /// its endpoints.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId) {
        let length = self.nodes[from.index()].distance(self.nodes[to.index()]);
        self.raw_edges.push(RawEdge { from, to, length });
    }

    /// Add edges in **both directions** between `a` and `b`.
    pub fn add_road(&mut self, a: NodeId, b: NodeId) {
        self.add_directed_edge(a, b);
        self.add_directed_edge(b, a);
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> Point {
        self.nodes[id.index()]
    }

    /// All node positions added so far, indexed by `NodeId`.
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for the edge sort + O(N log N) for the
    /// R-tree bulk load.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Sort by (source, destination) so adjacency order is reproducible.
        let mut raw = self.raw_edges;
        raw.sort_unstable_by_key(|e| (e.from.0, e.to.0));

        let edge_from:   Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:     Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length: Vec<f64>    = raw.iter().map(|e| e.length).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let spatial_idx = index_nodes(&self.nodes);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

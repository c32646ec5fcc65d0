//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The planner calls routing via the [`Router`] trait, so applications can
//! swap in custom implementations (A*, visibility graphs) without touching
//! the scheduling loop.  The default [`DijkstraRouter`] uses a binary heap.
//!
//! # Cost units
//!
//! Costs are Euclidean edge lengths in metres (`f64`).

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use fp_core::{EdgeId, NodeId, Point};

use crate::network::RoadNetwork;
use crate::SpatialError;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the origin node, an ordered list of
/// `EdgeId`s and the total length.
#[derive(Debug, Clone)]
pub struct Route {
    /// Node the route starts at.  Needed to materialise trivial routes.
    pub origin: NodeId,
    /// Edges to traverse in order, from source to destination.
    pub edges: Vec<EdgeId>,
    /// Total length in metres.
    pub length: f64,
}

impl Route {
    /// The nodes visited, origin first.
    pub fn nodes(&self, network: &RoadNetwork) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.edges.len() + 1);
        nodes.push(self.origin);
        nodes.extend(self.edges.iter().map(|e| network.edge_to[e.index()]));
        nodes
    }

    /// The waypoint positions visited, origin first.
    pub fn points(&self, network: &RoadNetwork) -> Vec<Point> {
        self.nodes(network).into_iter().map(|n| network.pos(n)).collect()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so independent plans can share one
/// router across worker threads.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields a trivial (edgeless) route.  Returns
    /// [`SpatialError::NoRoute`] when the nodes are in different components.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Single-source Dijkstra over the CSR graph with early exit once the
/// destination is settled.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError> {
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Totally ordered path cost for the heap.  Costs are finite sums of
/// non-negative lengths, so `total_cmp` agrees with numeric order.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError> {
    let n = network.node_count();
    for node in [from, to] {
        if node.index() >= n {
            return Err(SpatialError::NodeNotFound(node));
        }
    }
    if from == to {
        return Ok(Route { origin: from, edges: vec![], length: 0.0 });
    }

    // dist[v] = best known length to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap via Reverse.  Secondary key NodeId makes tie-breaking
    // deterministic.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + network.edge_length[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(
    network:   &RoadNetwork,
    prev_edge: &[EdgeId],
    from:      NodeId,
    to:        NodeId,
    length:    f64,
) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        debug_assert_ne!(e, EdgeId::INVALID, "settled node without predecessor");
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();
    Route { origin: from, edges, length }
}

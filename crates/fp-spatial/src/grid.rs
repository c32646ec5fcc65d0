//! Obstacle-avoiding waypoint grid.
//!
//! [`build_road_network`] turns a set of rectangular fields and the base
//! station into a [`RoadNetwork`] whose nodes and connections stay out of
//! every field interior:
//!
//! 1. Bound all fields and the base station, padded by `grid_padding`.
//! 2. Lay a square grid at `grid_spacing` from the padded minimum corner and
//!    keep every point not strictly inside a field.
//! 3. Add the base station unless it is inside a field.
//! 4. Add the four corners of every field (boundary points always qualify).
//! 5. Connect each pair closer than `grid_spacing * connect_factor` whose
//!    segment passes the sampled crossing test.
//!
//! Step 5 finds candidate pairs through a radius query on an R-tree over the
//! waypoints instead of comparing every pair.
//!
//! No connectivity guarantee is made; isolated components are handled by
//! the straight-line fallback in [`shortest_path`](crate::shortest_path).

use tracing::debug;

use fp_core::{Bounds, Field, NodeId, PlannerConfig, Point, inside_any, segment_clear};

use crate::network::{RoadNetwork, RoadNetworkBuilder, index_nodes};

/// Build the road network for one request.
///
/// Returns [`RoadNetwork::empty`] when `fields` is empty.  Pure: identical
/// inputs produce identical networks (same nodes in the same order).
pub fn build_road_network(fields: &[Field], base: Point, config: &PlannerConfig) -> RoadNetwork {
    let Some(bounds) = Bounds::around(fields, base) else {
        return RoadNetwork::empty();
    };
    let bounds = bounds.padded(config.grid_padding);
    let spacing = config.grid_spacing;

    let cols = ((bounds.max.x - bounds.min.x) / spacing).floor() as usize + 1;
    let rows = ((bounds.max.y - bounds.min.y) / spacing).floor() as usize + 1;
    let mut b = RoadNetworkBuilder::with_capacity(cols * rows + 1 + fields.len() * 4, cols * rows * 8);

    // ── ② grid waypoints ──────────────────────────────────────────────────
    for row in 0..rows {
        let y = bounds.min.y + row as f64 * spacing;
        for col in 0..cols {
            let p = Point::new(bounds.min.x + col as f64 * spacing, y);
            if !inside_any(p, fields) {
                b.add_node(p);
            }
        }
    }
    let grid_nodes = b.node_count();

    // ── ③ base station ────────────────────────────────────────────────────
    if inside_any(base, fields) {
        debug!(%base, "base station lies inside a field; omitted from road network");
    } else {
        b.add_node(base);
    }

    // ── ④ field corners ───────────────────────────────────────────────────
    for field in fields {
        for corner in field.corners() {
            if !inside_any(corner, fields) {
                b.add_node(corner);
            }
        }
    }

    // ── ⑤ connections ─────────────────────────────────────────────────────
    let index = index_nodes(b.nodes());
    let radius = config.connect_radius();
    let radius_sq = radius * radius;
    let mut neighbors: Vec<NodeId> = Vec::new();
    for i in 0..b.node_count() {
        let a = NodeId(i as u32);
        let pa = b.node_pos(a);

        neighbors.clear();
        neighbors.extend(
            index
                .locate_within_distance([pa.x, pa.y], radius_sq)
                .map(|e| e.id)
                .filter(|&other| other > a),
        );
        neighbors.sort_unstable();

        for &other in &neighbors {
            if segment_clear(pa, b.node_pos(other), fields, config.crossing_samples) {
                b.add_road(a, other);
            }
        }
    }

    debug!(
        grid_nodes,
        nodes = b.node_count(),
        connections = b.edge_count() / 2,
        "road network built"
    );
    b.build()
}

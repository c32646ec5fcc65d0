//! Point-to-point travel over the road network.
//!
//! [`shortest_path`] snaps both endpoints to their nearest waypoints, routes
//! between them, and degrades to a straight line when the waypoints are not
//! connected.  A straight-line leg may cross a field; it is flagged on the
//! returned [`TravelPath`] and logged, never silently substituted.

use tracing::warn;

use fp_core::Point;

use crate::network::RoadNetwork;
use crate::router::Router;

/// A materialised travel leg.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelPath {
    /// Waypoints in travel order.  Never empty.
    pub points: Vec<Point>,
    /// Total polyline length in metres.
    pub length: f64,
    /// `true` when no road route existed and the leg is a straight line.
    pub fallback: bool,
}

impl TravelPath {
    /// Straight segment between two points.
    pub fn straight(a: Point, b: Point) -> Self {
        Self { points: vec![a, b], length: a.distance(b), fallback: true }
    }

    /// Travel time at `speed_mps`.
    #[inline]
    pub fn duration_secs(&self, speed_mps: f64) -> f64 {
        self.length / speed_mps
    }

    /// Cumulative distance from the first point to each point.
    pub fn cumulative_lengths(&self) -> Vec<f64> {
        let mut acc = 0.0;
        let mut out = Vec::with_capacity(self.points.len());
        let mut prev = self.points[0];
        for &p in &self.points {
            acc += prev.distance(p);
            out.push(acc);
            prev = p;
        }
        out
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Extend the leg so it runs exactly from `from` to `to`.
    ///
    /// Snapping moves the endpoints onto waypoints; this adds the raw
    /// endpoints back where they differ and recomputes the length.
    pub fn anchored(mut self, from: Point, to: Point) -> Self {
        if self.end() != to {
            self.points.push(to);
        }
        if self.start() != from {
            self.points.insert(0, from);
        }
        self.length = self.points.windows(2).map(|w| w[0].distance(w[1])).sum();
        self
    }
}

/// Shortest road path from `start` to `end`.
///
/// - Both endpoints are replaced by their nearest waypoints.
/// - If they snap to the same waypoint the path is that single point.
/// - If the router finds no route the path is the straight line between the
///   snapped waypoints (`fallback = true`).
/// - On an empty network the path is the raw straight line.
pub fn shortest_path<R: Router + ?Sized>(
    network: &RoadNetwork,
    router:  &R,
    start:   Point,
    end:     Point,
) -> TravelPath {
    let (Some(from), Some(to)) = (network.snap_to_node(start), network.snap_to_node(end)) else {
        return TravelPath::straight(start, end);
    };

    match router.route(network, from, to) {
        Ok(route) => {
            TravelPath { points: route.points(network), length: route.length, fallback: false }
        }
        Err(e) => {
            let (a, b) = (network.pos(from), network.pos(to));
            warn!(error = %e, from = %a, to = %b, "no road route; using straight-line leg");
            TravelPath::straight(a, b)
        }
    }
}

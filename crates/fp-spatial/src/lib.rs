//! `fp-spatial`: road network, spatial indexing, routing and coverage.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`network`]  | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`         |
//! | [`grid`]     | `build_road_network`, obstacle-avoiding waypoint grid      |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`                  |
//! | [`path`]     | `shortest_path`, `TravelPath` with straight-line fallback  |
//! | [`coverage`] | boustrophedon `coverage_path`                              |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                         |

pub mod coverage;
pub mod error;
pub mod grid;
pub mod network;
pub mod path;
pub mod router;


pub use coverage::{coverage_path, row_index, total_rows};
pub use error::{SpatialError, SpatialResult};
pub use grid::build_road_network;
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use path::{TravelPath, shortest_path};
pub use router::{DijkstraRouter, Route, Router};

// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Nearest-vertex lookup and shortest-path search over
//! [OpenStreetMap](https://www.openstreetmap.org/) road networks.
//!
//! Road data is loaded into an undirected [Graph], whose edges are weighted by the
//! great-circle distance between their ends (see [geodesy]). Routes are found with A*,
//! using the great-circle distance to the destination as the heuristic.
//! All distances are expressed in statute miles, all positions in decimal degrees.
//!
//! Once loaded, a [Graph] is only read, and can be shared between any number of
//! threads searching for routes at the same time.
//!
//! # Example
//!
//! ```no_run
//! let mut g = roadroute::Graph::new();
//! let osm_options = roadroute::osm::Options {
//!     profile: &roadroute::osm::ROAD_PROFILE,
//!     file_format: roadroute::osm::FileFormat::Unknown,
//!     bbox: [0.0; 4],
//! };
//! roadroute::osm::add_features_from_file(
//!     &mut g,
//!     &osm_options,
//!     "path/to/berkeley.osm.xml",
//! ).expect("failed to load berkeley.osm.xml");
//!
//! let route = roadroute::shortest_path(&g, -122.2616, 37.8510, -122.2986, 37.8744)
//!     .expect("failed to find route");
//!
//! println!("Route: {:?}", route);
//! println!("Length: {:.3} mi", g.path_length(&route).unwrap());
//! ```

mod astar;
mod error;
pub mod geodesy;
mod graph;
pub mod osm;

pub use astar::{find_route, shortest_path, shortest_path_with_limit, DEFAULT_STEP_LIMIT};
pub use error::{Error, Result};
pub use graph::Graph;

/// Represents a single point of the road network, an element of the [Graph].
///
/// Vertices are identified by their OSM node ids. Neighbors of a vertex
/// are held by the [Graph], see [Graph::neighbors].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub id: i64,

    /// Longitude in decimal degrees, positive east of the prime meridian.
    pub lon: f64,

    /// Latitude in decimal degrees, positive north of the equator.
    pub lat: f64,
}

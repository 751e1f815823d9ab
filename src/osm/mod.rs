// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading of [OpenStreetMap](https://www.openstreetmap.org/) data into a road [Graph](crate::Graph).
//!
//! Every OSM node becomes a vertex, and consecutive nodes of every routable way
//! (as decided by a [Profile]) are connected by an edge. Nodes which don't end up
//! on any routable way are removed once loading is complete.

mod profile;
mod reader;

pub use profile::{Profile, FOOT_PROFILE, ROAD_PROFILE};
pub use reader::{
    add_features_from_buffer, add_features_from_file, add_features_from_io, Error, FileFormat,
    Options,
};

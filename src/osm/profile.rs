// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Describes which OSM ways are part of the road network, when converting
/// OSM data into a [Graph](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile<'a> {
    /// Human readable name of the profile, customary the most specific
    /// [access tag](https://wiki.openstreetmap.org/wiki/Key:access).
    pub name: &'a str,

    /// Values of the [highway](https://wiki.openstreetmap.org/wiki/Key:highway)
    /// tag of ways which can be used for routing.
    pub highways: &'a [&'a str],

    /// Array of OSM [access tags](https://wiki.openstreetmap.org/wiki/Key:access#Land-based_transportation)
    /// (in order from least to most specific) to consider when checking for road prohibitions.
    pub access: &'a [&'a str],
}

impl<'a> Profile<'a> {
    /// Checks if a way with the given tags is part of the road network:
    /// its highway type must be listed in [Profile::highways], and the most
    /// specific access tag (if any) must not be `no` or `private`.
    pub fn is_routable(&self, tags: &HashMap<String, String>) -> bool {
        match tags.get("highway") {
            Some(highway) if self.highways.contains(&highway.as_str()) => {}
            _ => return false,
        }

        self.is_allowed(tags)
    }

    /// Checks the access tags ([Profile::access]) of a way.
    pub fn is_allowed(&self, tags: &HashMap<String, String>) -> bool {
        match self
            .access
            .iter()
            .rev()
            .find_map(|&mode| tags.get(mode).map(|v| v.as_str()))
        {
            Some("no") | Some("private") => false,
            _ => true,
        }
    }
}

/// Routing [Profile] for road vehicles, covering the streets of a city map.
pub const ROAD_PROFILE: Profile = Profile {
    name: "motorcar",
    highways: &[
        "motorway",
        "trunk",
        "primary",
        "secondary",
        "tertiary",
        "unclassified",
        "residential",
        "living_street",
        "motorway_link",
        "trunk_link",
        "primary_link",
        "secondary_link",
        "tertiary_link",
    ],
    access: &["access", "vehicle", "motor_vehicle", "motorcar"],
};

/// Routing [Profile] for pedestrians, adding footpaths to the ordinary streets
/// (except for motorways and trunk roads).
pub const FOOT_PROFILE: Profile = Profile {
    name: "foot",
    highways: &[
        "primary",
        "secondary",
        "tertiary",
        "unclassified",
        "residential",
        "living_street",
        "primary_link",
        "secondary_link",
        "tertiary_link",
        "service",
        "pedestrian",
        "footway",
        "path",
        "steps",
        "track",
    ],
    access: &["access", "foot"],
};

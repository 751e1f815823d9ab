// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Error as GraphError, Graph};

use super::{model, Options};

/// Helper object used for storing state related to converting
/// [OSM features](super::model::Feature) into a [Graph].
pub(super) struct GraphBuilder<'a> {
    g: &'a mut Graph,
    options: &'a Options<'a>,
    ignore_bbox: bool,
}

impl<'a> GraphBuilder<'a> {
    /// Create a new graph builder, adding features to the provided graph.
    pub(super) fn new(g: &'a mut Graph, options: &'a Options<'a>) -> Self {
        let ignore_bbox =
            options.bbox.iter().all(|&x| x == 0.0) || options.bbox.iter().any(|x| !x.is_finite());

        if ignore_bbox && options.bbox.iter().any(|&x| x != 0.0) {
            log::warn!("ignoring invalid bounding box {:?}", options.bbox);
        }

        Self {
            g,
            options,
            ignore_bbox,
        }
    }

    /// Add all features from the provided iterator, then remove
    /// all vertices which didn't end up on any road.
    pub(super) fn add_features<I, E>(&mut self, features: I) -> Result<(), E>
    where
        I: IntoIterator<Item = Result<model::Feature, E>>,
    {
        for f in features {
            self.add_feature(f?);
        }
        self.cleanup();
        Ok(())
    }

    fn cleanup(&mut self) {
        let removed = self.g.remove_isolated();
        log::info!(
            "loaded {} road vertices ({} unused nodes removed)",
            self.g.len(),
            removed
        );
    }

    fn add_feature(&mut self, f: model::Feature) {
        match f {
            model::Feature::Node(n) => self.add_node(n),
            model::Feature::Way(w) => self.add_way(w),
        }
    }

    fn add_node(&mut self, n: model::Node) {
        if !self.is_in_bbox(n.lon, n.lat) {
            return;
        }

        match self.g.add_vertex(n.id, n.lon, n.lat) {
            Ok(()) => {}
            Err(GraphError::DuplicateVertex(id)) => {
                log::warn!("node {} appears more than once - keeping the first one", id)
            }
            Err(e) => log::warn!("skipping node {}: {}", n.id, e),
        }
    }

    fn is_in_bbox(&self, lon: f64, lat: f64) -> bool {
        if self.ignore_bbox {
            return true;
        }
        let [min_lon, min_lat, max_lon, max_lat] = self.options.bbox;
        lat >= min_lat && lat <= max_lat && lon >= min_lon && lon <= max_lon
    }

    fn add_way(&mut self, w: model::Way) {
        if !self.options.profile.is_routable(&w.tags) {
            return;
        }

        let nodes = self.get_way_nodes(&w);
        if nodes.len() < 2 {
            log::debug!("skipping way {}: fewer than 2 known nodes", w.id);
            return;
        }

        for pair in nodes.windows(2) {
            if pair[0] == pair[1] {
                continue;
            }

            if let Err(e) = self.g.add_edge(pair[0], pair[1]) {
                log::warn!("way {}: {}", w.id, e);
            }
        }
    }

    /// Returns nodes of a way, with references to unknown nodes
    /// (e.g. outside of the bounding box) removed.
    fn get_way_nodes(&self, w: &model::Way) -> Vec<i64> {
        w.nodes
            .iter()
            .copied()
            .filter(|&node_id| self.g.get_vertex(node_id).is_some())
            .collect()
    }
}

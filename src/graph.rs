// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::{BTreeMap, Entry};

use crate::{geodesy, Error, Result, Vertex};

/// Represents a road network as a set of [Vertices](Vertex)
/// and undirected edges between them.
///
/// Vertices are kept ordered by their ids. All iteration, including the scan
/// performed by [Graph::nearest_vertex], happens in ascending id order.
///
/// The graph is built once (see [Graph::add_vertex], [Graph::add_edge] and
/// [Graph::remove_isolated]) and is only read afterwards. It can be freely
/// shared between threads running concurrent searches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph(BTreeMap<i64, (Vertex, Vec<i64>)>);

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices in the graph.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over all [Vertices](Vertex) in the graph.
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.0.values().map(|(vertex, _)| vertex)
    }

    /// Returns an iterator over ids of all vertices in the graph.
    pub fn vertex_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.keys().copied()
    }

    /// Retrieves a [Vertex] with the provided id.
    pub fn get_vertex(&self, id: i64) -> Option<Vertex> {
        self.0.get(&id).map(|&(vertex, _)| vertex)
    }

    /// Registers a new [Vertex].
    ///
    /// Vertices are never moved or replaced: adding a vertex with an id
    /// which is already present fails with [Error::DuplicateVertex]
    /// and leaves the existing vertex untouched.
    pub fn add_vertex(&mut self, id: i64, lon: f64, lat: f64) -> Result<()> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(Error::InvalidCoordinate(id));
        }

        match self.0.entry(id) {
            Entry::Vacant(e) => {
                e.insert((Vertex { id, lon, lat }, Vec::default()));
                Ok(())
            }
            Entry::Occupied(_) => Err(Error::DuplicateVertex(id)),
        }
    }

    /// Connects two vertices with an undirected edge.
    ///
    /// Both vertices must already exist, otherwise [Error::VertexNotFound]
    /// is returned and the graph is left unchanged. Adding an edge which
    /// already exists is a no-op.
    pub fn add_edge(&mut self, a: i64, b: i64) -> Result<()> {
        for id in [a, b] {
            if !self.0.contains_key(&id) {
                return Err(Error::VertexNotFound(id));
            }
        }

        self.push_neighbor(a, b);
        self.push_neighbor(b, a);
        Ok(())
    }

    fn push_neighbor(&mut self, from: i64, to: i64) {
        if let Some((_, neighbors)) = self.0.get_mut(&from) {
            if !neighbors.contains(&to) {
                neighbors.push(to);
            }
        }
    }

    /// Deletes every vertex without any neighbors, returning
    /// the number of removed vertices.
    ///
    /// This is meant to be called once, after all edges have been added.
    /// Only trivially isolated vertices are removed; the graph may still
    /// consist of multiple disconnected components.
    pub fn remove_isolated(&mut self) -> usize {
        let before = self.0.len();
        self.0.retain(|_, (_, neighbors)| !neighbors.is_empty());
        let removed = before - self.0.len();
        log::debug!("removed {} isolated vertices", removed);
        removed
    }

    /// Gets ids of all neighbors of a vertex.
    pub fn neighbors(&self, id: i64) -> Result<&[i64]> {
        self.0
            .get(&id)
            .map(|(_, neighbors)| neighbors.as_slice())
            .ok_or(Error::VertexNotFound(id))
    }

    /// Gets the `(lon, lat)` position of a vertex.
    pub fn coordinate_of(&self, id: i64) -> Result<(f64, f64)> {
        self.get_vertex(id)
            .map(|v| (v.lon, v.lat))
            .ok_or(Error::VertexNotFound(id))
    }

    /// Returns the great-circle distance between two vertices, in miles.
    pub fn distance_between(&self, a: i64, b: i64) -> Result<f64> {
        let (lon1, lat1) = self.coordinate_of(a)?;
        let (lon2, lat2) = self.coordinate_of(b)?;
        Ok(geodesy::distance(lon1, lat1, lon2, lat2))
    }

    /// Returns the initial bearing from one vertex to another,
    /// in degrees, as per [geodesy::bearing].
    pub fn bearing_between(&self, a: i64, b: i64) -> Result<f64> {
        let (lon1, lat1) = self.coordinate_of(a)?;
        let (lon2, lat2) = self.coordinate_of(b)?;
        Ok(geodesy::bearing(lon1, lat1, lon2, lat2))
    }

    /// Returns the total length of a sequence of vertices, in miles.
    ///
    /// Consecutive vertices don't have to be neighbors; the great-circle
    /// distances between them are summed up.
    pub fn path_length(&self, path: &[i64]) -> Result<f64> {
        if let [single] = path {
            self.coordinate_of(*single)?;
        }

        path.windows(2)
            .map(|pair| self.distance_between(pair[0], pair[1]))
            .sum()
    }

    /// Finds the id of the vertex closest to the given position.
    ///
    /// This function computes the distance to every vertex in the graph.
    /// If multiple vertices are equally close, the one with the lowest id is returned.
    ///
    /// Fails with [Error::InvalidPosition] if `lon` or `lat` is not finite,
    /// and with [Error::EmptyGraph] if there are no vertices.
    pub fn nearest_vertex(&self, lon: f64, lat: f64) -> Result<i64> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(Error::InvalidPosition);
        }

        let mut best: Option<(i64, f64)> = None;

        for v in self.iter() {
            let d = geodesy::distance(lon, lat, v.lon, v.lat);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((v.id, d)),
            }
        }

        best.map(|(id, _)| id).ok_or(Error::EmptyGraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn square() -> Graph {
        // 2 ── 3
        // │  / │
        // │ /  │
        // 1 ── 4
        let mut g = Graph::new();
        g.add_vertex(1, 0.0, 0.0).unwrap();
        g.add_vertex(2, 0.0, 1.0).unwrap();
        g.add_vertex(3, 1.0, 1.0).unwrap();
        g.add_vertex(4, 1.0, 0.0).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        g.add_edge(3, 4).unwrap();
        g.add_edge(4, 1).unwrap();
        g.add_edge(1, 3).unwrap();
        g
    }

    fn sorted(ids: &[i64]) -> Vec<i64> {
        let mut ids = ids.to_vec();
        ids.sort();
        ids
    }

    #[test]
    fn add_vertex_rejects_duplicates() {
        let mut g = Graph::new();
        g.add_vertex(1, 10.0, 20.0).unwrap();
        assert_eq!(g.add_vertex(1, 30.0, 40.0), Err(Error::DuplicateVertex(1)));
        assert_eq!(g.coordinate_of(1), Ok((10.0, 20.0)));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn add_vertex_rejects_non_finite_coordinates() {
        let mut g = Graph::new();
        assert_eq!(g.add_vertex(1, f64::NAN, 0.0), Err(Error::InvalidCoordinate(1)));
        assert_eq!(
            g.add_vertex(2, 0.0, f64::INFINITY),
            Err(Error::InvalidCoordinate(2))
        );
        assert!(g.is_empty());
    }

    #[test]
    fn add_edge_is_symmetric() {
        let g = square();
        assert_eq!(sorted(g.neighbors(1).unwrap()), vec![2, 3, 4]);
        assert_eq!(sorted(g.neighbors(2).unwrap()), vec![1, 3]);
        assert_eq!(sorted(g.neighbors(3).unwrap()), vec![1, 2, 4]);
        assert_eq!(sorted(g.neighbors(4).unwrap()), vec![1, 3]);
    }

    #[test]
    fn add_edge_ignores_duplicates() {
        let mut g = square();
        g.add_edge(2, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        assert_eq!(sorted(g.neighbors(2).unwrap()), vec![1, 3]);
    }

    #[test]
    fn add_edge_rejects_unknown_vertices() {
        let mut g = square();
        let before = g.clone();
        assert_eq!(g.add_edge(1, 99), Err(Error::VertexNotFound(99)));
        assert_eq!(g.add_edge(98, 1), Err(Error::VertexNotFound(98)));
        assert_eq!(g, before);
    }

    #[test]
    fn lookups_of_unknown_vertices() {
        let g = square();
        assert_eq!(g.neighbors(5), Err(Error::VertexNotFound(5)));
        assert_eq!(g.coordinate_of(5), Err(Error::VertexNotFound(5)));
        assert_eq!(g.distance_between(1, 5), Err(Error::VertexNotFound(5)));
        assert_eq!(g.distance_between(5, 1), Err(Error::VertexNotFound(5)));
        assert_eq!(g.get_vertex(5), None);
    }

    #[test]
    fn vertex_ids_are_ascending() {
        let mut g = Graph::new();
        for id in [5, -3, 12, 0, 7] {
            g.add_vertex(id, id as f64, 0.0).unwrap();
        }
        assert_eq!(g.vertex_ids().collect::<Vec<_>>(), vec![-3, 0, 5, 7, 12]);
    }

    #[test]
    fn distance_between_vertices() {
        let g = square();
        assert_relative_eq!(
            g.distance_between(1, 2).unwrap(),
            geodesy::distance(0.0, 0.0, 0.0, 1.0)
        );
        assert_relative_eq!(
            g.distance_between(1, 3).unwrap(),
            g.distance_between(3, 1).unwrap(),
            max_relative = 1e-9
        );
        assert_eq!(g.distance_between(2, 2), Ok(0.0));
    }

    #[test]
    fn bearing_between_vertices() {
        let g = square();
        assert_abs_diff_eq!(g.bearing_between(1, 2).unwrap(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(g.bearing_between(1, 4).unwrap(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn path_length() {
        let g = square();
        assert_eq!(g.path_length(&[]), Ok(0.0));
        assert_eq!(g.path_length(&[1]), Ok(0.0));
        assert_eq!(g.path_length(&[42]), Err(Error::VertexNotFound(42)));
        assert_relative_eq!(
            g.path_length(&[1, 2, 3]).unwrap(),
            g.distance_between(1, 2).unwrap() + g.distance_between(2, 3).unwrap()
        );
        assert_eq!(g.path_length(&[1, 2, 42]), Err(Error::VertexNotFound(42)));
    }

    #[test]
    fn remove_isolated() {
        let mut g = square();
        g.add_vertex(10, 5.0, 5.0).unwrap();
        g.add_vertex(11, 6.0, 6.0).unwrap();
        assert_eq!(g.len(), 6);

        assert_eq!(g.remove_isolated(), 2);
        assert_eq!(g.vertex_ids().collect::<Vec<_>>(), vec![1, 2, 3, 4]);

        let once = g.clone();
        assert_eq!(g.remove_isolated(), 0);
        assert_eq!(g, once);
    }

    #[test]
    fn remove_isolated_keeps_disconnected_components() {
        let mut g = square();
        g.add_vertex(10, 5.0, 5.0).unwrap();
        g.add_vertex(11, 6.0, 6.0).unwrap();
        g.add_edge(10, 11).unwrap();

        assert_eq!(g.remove_isolated(), 0);
        assert_eq!(g.len(), 6);
    }

    #[test]
    fn remove_isolated_can_empty_the_graph() {
        let mut g = Graph::new();
        g.add_vertex(1, 0.0, 0.0).unwrap();
        g.add_vertex(2, 1.0, 1.0).unwrap();

        assert_eq!(g.remove_isolated(), 2);
        assert!(g.is_empty());
        assert_eq!(g.nearest_vertex(0.0, 0.0), Err(Error::EmptyGraph));
    }

    #[test]
    fn nearest_vertex() {
        let g = square();
        assert_eq!(g.nearest_vertex(0.1, 0.1), Ok(1));
        assert_eq!(g.nearest_vertex(-0.2, 1.3), Ok(2));
        assert_eq!(g.nearest_vertex(0.9, 0.8), Ok(3));
        assert_eq!(g.nearest_vertex(1.0, 0.0), Ok(4));
        assert_eq!(g.nearest_vertex(40.0, -10.0), Ok(4));
    }

    #[test]
    fn nearest_vertex_ties_go_to_lowest_id() {
        let mut g = Graph::new();
        g.add_vertex(7, 1.0, 0.0).unwrap();
        g.add_vertex(3, -1.0, 0.0).unwrap();
        g.add_vertex(5, 1.0, 0.0).unwrap();
        assert_eq!(g.nearest_vertex(0.0, 0.0), Ok(3));
        assert_eq!(g.nearest_vertex(1.0, 0.0), Ok(5));
    }

    #[test]
    fn nearest_vertex_is_never_farther_than_any_other() {
        let mut g = Graph::new();
        for i in 0..50_i64 {
            let lon = -122.3 + (i % 7) as f64 * 0.013;
            let lat = 37.8 + (i % 11) as f64 * 0.007;
            g.add_vertex(i, lon, lat).unwrap();
        }

        for (lon, lat) in [(-122.29, 37.81), (-122.25, 37.86), (-122.0, 38.0), (-122.35, 37.7)] {
            let nearest = g.nearest_vertex(lon, lat).unwrap();
            let (n_lon, n_lat) = g.coordinate_of(nearest).unwrap();
            let best = geodesy::distance(lon, lat, n_lon, n_lat);
            for v in g.iter() {
                assert!(geodesy::distance(lon, lat, v.lon, v.lat) >= best);
            }
        }
    }

    #[test]
    fn nearest_vertex_rejects_non_finite_positions() {
        let g = square();
        assert_eq!(g.nearest_vertex(f64::NAN, 0.0), Err(Error::InvalidPosition));
        assert_eq!(g.nearest_vertex(0.0, f64::NAN), Err(Error::InvalidPosition));
        assert_eq!(g.nearest_vertex(f64::INFINITY, 0.0), Err(Error::InvalidPosition));
        assert_eq!(
            g.nearest_vertex(0.0, f64::NEG_INFINITY),
            Err(Error::InvalidPosition)
        );
        assert_eq!(
            Graph::new().nearest_vertex(f64::NAN, f64::NAN),
            Err(Error::InvalidPosition)
        );
    }

    #[test]
    fn nearest_vertex_of_empty_graph() {
        assert_eq!(Graph::new().nearest_vertex(0.0, 0.0), Err(Error::EmptyGraph));
    }
}

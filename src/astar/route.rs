// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use super::frontier::Frontier;
use crate::{geodesy, Error, Graph, Result, Vertex};

fn reconstruct_path(came_from: &HashMap<i64, i64>, mut last: i64) -> Vec<i64> {
    let mut path = vec![last];

    while let Some(&v) = came_from.get(&last) {
        path.push(v);
        last = v;
    }

    path.reverse();
    path
}

#[inline]
fn crow_flies(a: &Vertex, b: &Vertex) -> f64 {
    geodesy::distance(a.lon, a.lat, b.lon, b.lat)
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the shortest route between two vertices in the provided graph.
///
/// Edges are weighted by the great-circle distance between their vertices,
/// and the great-circle distance to the destination is used as the heuristic.
/// The returned path starts with `from_id` and ends with `to_id`.
///
/// Returns [Error::VertexNotFound] if either vertex doesn't exist, and
/// [Error::PathNotFound] if the vertices are in disconnected parts of the graph.
///
/// `step_limit` limits how many vertices may be expanded during the search
/// before returning [Error::StepLimitExceeded]. Concluding that no route exists
/// requires expanding all vertices reachable from the start. Pass `usize::MAX`
/// for an unbounded search, or [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn find_route(g: &Graph, from_id: i64, to_id: i64, step_limit: usize) -> Result<Vec<i64>> {
    let to = g.get_vertex(to_id).ok_or(Error::VertexNotFound(to_id))?;
    let from = g.get_vertex(from_id).ok_or(Error::VertexNotFound(from_id))?;

    if from_id == to_id {
        return Ok(vec![from_id]);
    }

    let mut frontier = Frontier::default();
    let mut came_from: HashMap<i64, i64> = HashMap::default();
    let mut known_costs: HashMap<i64, f64> = HashMap::default();
    let mut steps: usize = 0;

    frontier.push(from_id, 0.0, crow_flies(&from, &to));
    known_costs.insert(from_id, 0.0);

    while let Some(item) = frontier.pop() {
        if item.at == to_id {
            log::debug!(
                "route {} -> {}: {:.3} mi after {} steps",
                from_id,
                to_id,
                item.cost,
                steps
            );
            return Ok(reconstruct_path(&came_from, to_id));
        }

        // A cheaper way to this vertex was found after this entry was pushed
        if item.cost > known_costs.get(&item.at).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        steps += 1;
        if steps > step_limit {
            log::debug!("route {} -> {}: step limit exceeded", from_id, to_id);
            return Err(Error::StepLimitExceeded);
        }

        let current = g.get_vertex(item.at).ok_or(Error::VertexNotFound(item.at))?;

        for &neighbor_id in g.neighbors(item.at)? {
            let neighbor = g
                .get_vertex(neighbor_id)
                .ok_or(Error::VertexNotFound(neighbor_id))?;

            let neighbor_cost = item.cost + crow_flies(&current, &neighbor);
            if neighbor_cost
                >= known_costs
                    .get(&neighbor_id)
                    .copied()
                    .unwrap_or(f64::INFINITY)
            {
                continue;
            }

            came_from.insert(neighbor_id, item.at);
            known_costs.insert(neighbor_id, neighbor_cost);
            frontier.push(
                neighbor_id,
                neighbor_cost,
                neighbor_cost + crow_flies(&neighbor, &to),
            );
        }
    }

    log::debug!(
        "route {} -> {}: no path after {} steps",
        from_id,
        to_id,
        steps
    );
    Err(Error::PathNotFound {
        from: from_id,
        to: to_id,
    })
}

/// Finds the shortest route between the vertices nearest to the two given
/// positions, as per [Graph::nearest_vertex] and [find_route].
///
/// The search is unbounded; see [shortest_path_with_limit] to limit the
/// amount of work done when the positions can't be connected.
pub fn shortest_path(
    g: &Graph,
    start_lon: f64,
    start_lat: f64,
    dest_lon: f64,
    dest_lat: f64,
) -> Result<Vec<i64>> {
    shortest_path_with_limit(g, start_lon, start_lat, dest_lon, dest_lat, usize::MAX)
}

/// Same as [shortest_path], but gives up with [Error::StepLimitExceeded]
/// after expanding `step_limit` vertices.
pub fn shortest_path_with_limit(
    g: &Graph,
    start_lon: f64,
    start_lat: f64,
    dest_lon: f64,
    dest_lat: f64,
    step_limit: usize,
) -> Result<Vec<i64>> {
    let source = g.nearest_vertex(start_lon, start_lat)?;
    let goal = g.nearest_vertex(dest_lon, dest_lat)?;
    find_route(g, source, goal, step_limit)
}

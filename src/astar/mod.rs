// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod frontier;
mod route;

/// Recommended number of allowed vertex expansions in [find_route] and
/// [shortest_path_with_limit] before [Error::StepLimitExceeded](crate::Error::StepLimitExceeded)
/// is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

pub use route::{find_route, shortest_path, shortest_path_with_limit};

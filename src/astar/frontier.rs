// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A single entry of the A* frontier.
///
/// Multiple entries for the same vertex may be present in the frontier
/// at the same time; only the one whose `cost` matches the best known
/// cost of reaching `at` is current, all others are stale.
#[derive(Debug, Clone, Copy)]
pub(super) struct FrontierEntry {
    pub at: i64,
    pub cost: f64,
    pub score: f64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.at.cmp(&self.at))
    }
}

/// Min-priority queue of [FrontierEntries](FrontierEntry), ordered by `score`.
///
/// Pushing never replaces existing entries, which is why callers must
/// discard stale entries after [Frontier::pop].
#[derive(Debug, Default)]
pub(super) struct Frontier(BinaryHeap<FrontierEntry>);

impl Frontier {
    pub fn push(&mut self, at: i64, cost: f64, score: f64) {
        self.0.push(FrontierEntry { at, cost, score });
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.0.pop()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

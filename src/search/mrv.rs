//! Variable selection.
//!
//! Minimum remaining values, tie-broken by degree (most unassigned
//! neighbors), then by lowest session index.
//!
//! # Reference
//! Brélaz (1979), "New Methods to Color the Vertices of a Graph"
//! Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//! Constraint Satisfaction Problems"

use std::cmp::Reverse;

use crate::domain::Domain;
use crate::models::Candidate;

/// Picks the next session to decide, or `None` if all are assigned.
pub fn select_mrv(
    domains: &[Domain],
    neighbors: &[Vec<usize>],
    values: &[Option<Candidate>],
) -> Option<usize> {
    (0..domains.len())
        .filter(|&s| values[s].is_none())
        .min_by_key(|&s| {
            let degree = neighbors[s]
                .iter()
                .filter(|&&t| values[t].is_none())
                .count();
            (domains[s].len(), Reverse(degree), s)
        })
}

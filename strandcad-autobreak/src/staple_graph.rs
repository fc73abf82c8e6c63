/*
strandcad, a toolkit for DNA origami strand design.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
//! Optimal segmentation of a token list into staples.
//!
//! The boundaries between tokens are the nodes of a directed acyclic graph. There is an edge from
//! boundary `i` to boundary `j > i` if the tokens between them form a staple whose length is in
//! `[min_staple_len, max_staple_len]`, weighted by the cube of the distance between that length
//! and the target length. The best segmentation is the shortest path from the first to the last
//! boundary.

use super::{AutobreakSettings, Tokens};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A path in the boundary graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// The boundaries of the path, including the first and the last one.
    pub boundaries: Vec<usize>,
    pub cost: u64,
}

impl Segmentation {
    /// The length of each staple of the segmentation.
    pub fn staple_lengths(&self, tokens: &[usize]) -> Vec<usize> {
        self.boundaries
            .windows(2)
            .map(|w| tokens[w[0]..w[1]].iter().sum())
            .collect()
    }
}

pub fn staple_cost(length: usize, settings: &AutobreakSettings) -> u64 {
    let distance = (length as i64 - settings.tgt_staple_len as i64).unsigned_abs();
    distance.pow(3)
}

/// Find the cheapest segmentation of `tokens` into staples, read from the first token to the
/// last one. Returns `None` if no segmentation satisfies the length constraints.
pub fn shortest_path(tokens: &[usize], settings: &AutobreakSettings) -> Option<Segmentation> {
    let nb_nodes = tokens.len() + 1;
    let target = tokens.len();
    let mut dist = vec![u64::MAX; nb_nodes];
    let mut previous: Vec<Option<usize>> = vec![None; nb_nodes];
    let mut heap = BinaryHeap::new();
    dist[0] = 0;
    heap.push(Reverse((0u64, 0usize)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if cost > dist[node] {
            continue;
        }
        if node == target {
            break;
        }
        let mut length = 0;
        for next in (node + 1)..nb_nodes {
            length += tokens[next - 1];
            if length > settings.max_staple_len {
                break;
            }
            if length < settings.min_staple_len {
                continue;
            }
            let new_cost = cost + staple_cost(length, settings);
            if new_cost < dist[next] {
                dist[next] = new_cost;
                previous[next] = Some(node);
                heap.push(Reverse((new_cost, next)));
            }
        }
    }

    if dist[target] == u64::MAX || target == 0 {
        return None;
    }
    let mut boundaries = vec![target];
    let mut current = target;
    while let Some(p) = previous[current] {
        boundaries.push(p);
        current = p;
    }
    boundaries.reverse();
    Some(Segmentation {
        boundaries,
        cost: dist[target],
    })
}

/// The number of rotations of a loop that are worth trying: rotations are tried while the
/// tokens skipped at the beginning add up to at most twice the maximal staple length.
pub fn nb_rotations(tokens: &[usize], settings: &AutobreakSettings) -> usize {
    let mut skipped = 0;
    let mut ret = 0;
    for t in tokens.iter() {
        if skipped > 2 * settings.max_staple_len {
            break;
        }
        ret += 1;
        skipped += t;
    }
    ret
}

/// Find the best segmentation of a loop. Every candidate rotation is solved in parallel and the
/// cheapest one is kept, the smallest rotation winning ties.
///
/// Returns the rotation and the segmentation of the rotated tokens.
pub fn best_rotation(tokens: &[usize], settings: &AutobreakSettings) -> Option<(usize, Segmentation)> {
    (0..nb_rotations(tokens, settings))
        .into_par_iter()
        .filter_map(|r| {
            let rotated: Vec<usize> = tokens[r..].iter().chain(tokens[..r].iter()).cloned().collect();
            shortest_path(&rotated, settings).map(|s| (r, s))
        })
        .min_by_key(|(r, s)| (s.cost, *r))
}

/// The boundaries of `tokens` at which the oligo must be broken, in the order in which they are
/// met when reading the oligo from the first break. For a loop the first boundary is the one
/// that opens the loop.
pub fn break_boundaries(tokens: &Tokens, settings: &AutobreakSettings) -> Option<Vec<usize>> {
    let n = tokens.lengths.len();
    if tokens.is_loop {
        let (r, segmentation) = best_rotation(&tokens.lengths, settings)?;
        let last = segmentation.boundaries.len() - 1;
        Some(
            segmentation.boundaries[..last]
                .iter()
                .map(|b| (b + r) % n)
                .collect(),
        )
    } else {
        let segmentation = shortest_path(&tokens.lengths, settings)?;
        let last = segmentation.boundaries.len() - 1;
        Some(segmentation.boundaries[1..last].to_vec())
    }
}

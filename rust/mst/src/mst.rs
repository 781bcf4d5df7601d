// Copyright 2018-2020 Daniël de Kok and Tobias Pütz
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option.

//! Find the maximum spanning arborescence using Chu Liu Edmonds

use std::cmp::Reverse;
use std::collections::HashMap;

use ndarray::{s, Array2, ArrayView2};
use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::error::DecodeError;

// The implementation follows the description of:
//
// https://en.wikipedia.org/wiki/Edmonds%27_algorithm
//
// with the following differences:
//
// - We compute the maximum spanning arborescence, so we pick the
//   incoming edge with the maximum score and score the edges that
//   enter a contracted cycle as in Kübler et al., 2009, pp. 47,
//   leaving out the constant cycle sum.
// - The input is a dense score matrix, so there are no parallel
//   edges. After contraction, we only keep the highest scoring of
//   the parallel edges between a cycle and an outside vertex. The
//   next round would discard the others anyway.
// - Contracted cycles get their own slots in the working graph,
//   after the slots of the original vertices. A slot is never
//   reused, so the bookkeeping of a contraction stays valid until
//   the cycle is expanded again.

/// Chu-Liu-Edmonds maximum spanning arborescence for dense graphs
///
/// This function returns the head of each vertex in the maximum
/// spanning arborescence of the `scores` square matrix, rooted at
/// `root`. Each row of the matrix holds the scores of the candidate
/// heads of one dependent, so `scores[(dependent, head)]` is the
/// weight of the edge from `head` to `dependent`. The diagonal is
/// never read.
///
/// Returns vertex heads. The length of the returned `Vec` equals the
/// number of rows/columns of the score matrix, the root is the only
/// vertex without a head.
///
/// Fails when `scores` is not square, when `root` is not a vertex of
/// the graph, or when an off-diagonal score is not finite.
pub fn decode(scores: ArrayView2<f32>, root: usize) -> Result<Vec<Option<usize>>, DecodeError> {
    validate(scores, root)?;

    let n_vertices = scores.nrows();
    let mut graph = WorkingGraph::new(scores);
    let mut heads = graph.resolve(root);
    heads.truncate(n_vertices);

    Ok(heads)
}

/// Alias of [`decode`].
pub fn chu_liu_edmonds(
    scores: ArrayView2<f32>,
    root: usize,
) -> Result<Vec<Option<usize>>, DecodeError> {
    decode(scores, root)
}

fn validate(scores: ArrayView2<f32>, root: usize) -> Result<(), DecodeError> {
    let (rows, cols) = scores.dim();

    if rows != cols {
        return Err(DecodeError::NotSquare { rows, cols });
    }

    if root >= rows {
        return Err(DecodeError::RootOutOfBounds { root, rows, cols });
    }

    for ((dependent, head), &score) in scores.indexed_iter() {
        if dependent != head && !score.is_finite() {
            return Err(DecodeError::NonFiniteScore {
                dependent,
                head,
                score,
            });
        }
    }

    Ok(())
}

/// Graph that is contracted and expanded during decoding.
///
/// Slots `0..n` are the vertices of the input graph, higher slots
/// are contracted cycles.
struct WorkingGraph {
    /// Edge weights, indexed as `(dependent, head)`.
    weights: Array2<f32>,

    /// Slots that are part of the current (contracted) graph.
    active: Vec<bool>,

    /// The slot that the next contraction will use.
    next_slot: usize,
}

/// Bookkeeping of a contracted cycle, needed to expand it again.
struct Contraction {
    /// Slot of the contracted cycle.
    slot: usize,

    /// Cycle vertices with their heads inside the cycle.
    members: Vec<(usize, usize)>,

    /// Vertex outside the cycle -> cycle vertex that the best edge
    /// from the outside vertex enters.
    entries: HashMap<usize, usize>,

    /// Vertex outside the cycle -> cycle vertex that is the head of
    /// the best edge to the outside vertex.
    exits: HashMap<usize, usize>,
}

impl WorkingGraph {
    fn new(scores: ArrayView2<f32>) -> Self {
        let n_vertices = scores.nrows();

        // Every contraction merges at least two slots into one, so
        // there are fewer contractions than vertices.
        let capacity = 2 * n_vertices;

        let mut weights = Array2::from_elem((capacity, capacity), f32::NEG_INFINITY);
        weights
            .slice_mut(s![..n_vertices, ..n_vertices])
            .assign(&scores);

        let mut active = vec![false; capacity];
        active[..n_vertices].fill(true);

        WorkingGraph {
            weights,
            active,
            next_slot: n_vertices,
        }
    }

    fn active_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(|&(_, &active)| active)
            .map(|(slot, _)| slot)
    }

    /// Decode the current graph, returning the head of every slot.
    fn resolve(&mut self, root: usize) -> Vec<Option<usize>> {
        // For each vertex, find the head with the highest incoming
        // edge score.
        let heads = self.best_heads(root);

        // Base case: if the selected edges do not contain a cycle, we
        // have found the MST of the (possibly contracted) graph.
        let cycle = match find_cycle(&heads) {
            Some(cycle) => cycle,
            None => return heads,
        };

        let contraction = self.contract(&heads, &cycle);

        // Recursively decode the graph with the contracted cycle,
        // until we hit the base case.
        let mut tree = self.resolve(root);

        self.expand(contraction, &mut tree);

        tree
    }

    /// Find the head with the highest edge score for every active
    /// vertex except the root.
    ///
    /// Ties are broken in favor of the lowest slot.
    fn best_heads(&self, root: usize) -> Vec<Option<usize>> {
        let mut heads = vec![None; self.active.len()];

        for dependent in self.active_slots() {
            // Do not search for the head of the root.
            if dependent == root {
                continue;
            }

            heads[dependent] = self
                .active_slots()
                // Ignore self-loops.
                .filter(|&head| head != dependent)
                .max_by_key(|&head| {
                    (OrderedFloat(self.weights[(dependent, head)]), Reverse(head))
                });
        }

        trace!(heads = ?heads, "selected best heads");

        heads
    }

    /// Contract the given cycle into a new slot.
    ///
    /// The edge from an outside vertex `u` into the cycle gets the
    /// best score `scores[(v, u)] - scores[(v, head(v))]` over all
    /// cycle vertices `v`: entering the cycle at `v` replaces the
    /// edge from `v`'s head inside the cycle. The edge from the
    /// cycle to an outside vertex gets the best unadjusted score over
    /// all cycle vertices.
    fn contract(&mut self, heads: &[Option<usize>], cycle: &[usize]) -> Contraction {
        let slot = self.next_slot;
        self.next_slot += 1;

        let members = cycle
            .iter()
            .filter_map(|&vertex| heads[vertex].map(|head| (vertex, head)))
            .collect::<Vec<_>>();

        for &(member, _) in &members {
            self.active[member] = false;
        }

        let outside = self.active_slots().collect::<Vec<_>>();

        let mut entries = HashMap::with_capacity(outside.len());
        let mut exits = HashMap::with_capacity(outside.len());
        for vertex in outside {
            // Replace (u, v) by (u, v_cycle).
            let best_entry = members
                .iter()
                .map(|&(member, head)| {
                    let weight =
                        self.weights[(member, vertex)] - self.weights[(member, head)];
                    (member, weight)
                })
                .max_by_key(|&(member, weight)| (OrderedFloat(weight), Reverse(member)));

            // Replace (v, w) by (v_cycle, w).
            let best_exit = members
                .iter()
                .map(|&(member, _)| (member, self.weights[(vertex, member)]))
                .max_by_key(|&(member, weight)| (OrderedFloat(weight), Reverse(member)));

            if let Some((member, weight)) = best_entry {
                self.weights[(slot, vertex)] = weight;
                entries.insert(vertex, member);
            }

            if let Some((member, weight)) = best_exit {
                self.weights[(vertex, slot)] = weight;
                exits.insert(vertex, member);
            }
        }

        self.active[slot] = true;

        debug!(
            slot,
            cycle = ?cycle,
            "contracted cycle of {} vertices",
            members.len()
        );

        Contraction {
            slot,
            members,
            entries,
            exits,
        }
    }

    /// Expand a contracted cycle in the tree of the contracted graph.
    fn expand(&mut self, contraction: Contraction, tree: &mut [Option<usize>]) {
        let Contraction {
            slot,
            members,
            entries,
            exits,
        } = contraction;

        // The contracted cycle is never the root, so it has a head.
        // The cycle vertex that this edge enters has its edge inside
        // the cycle kicked out, breaking the cycle.
        debug_assert!(
            tree[slot].is_some(),
            "Contracted cycle {} has no head in {:?}",
            slot,
            tree
        );
        if let Some(source) = tree[slot] {
            let kicked_out = entries[&source];
            for &(member, head) in &members {
                tree[member] = if member == kicked_out {
                    Some(source)
                } else {
                    Some(head)
                };
            }
        }

        // Restore original outgoing edges, replacing (v_cycle, w) by
        // (v, w).
        for (vertex, member) in exits {
            if tree[vertex] == Some(slot) {
                tree[vertex] = Some(member);
            }
        }

        tree[slot] = None;
        self.active[slot] = false;
        for (member, _) in members {
            self.active[member] = true;
        }

        debug!(slot, "expanded cycle");
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

/// Find a cycle in the graph formed by the given heads.
///
/// The vertices of the cycle are returned in the order of the walk
/// along the head pointers.
pub(crate) fn find_cycle(heads: &[Option<usize>]) -> Option<Vec<usize>> {
    let mut state = vec![Visit::Unvisited; heads.len()];
    let mut path = Vec::new();

    for start in 0..heads.len() {
        if state[start] != Visit::Unvisited {
            continue;
        }

        let mut vertex = start;
        loop {
            state[vertex] = Visit::InProgress;
            path.push(vertex);

            let head = match heads[vertex] {
                Some(head) if head < heads.len() => head,
                _ => break,
            };

            match state[head] {
                Visit::Unvisited => vertex = head,
                // The head is on the current path, so the path from
                // the head onwards is a cycle.
                Visit::InProgress => {
                    return path
                        .iter()
                        .position(|&path_vertex| path_vertex == head)
                        .map(|cycle_start| path.split_off(cycle_start));
                }
                Visit::Done => break,
            }
        }

        for vertex in path.drain(..) {
            state[vertex] = Visit::Done;
        }
    }

    None
}

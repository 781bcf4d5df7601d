// Copyright 2018-2020 Daniël de Kok and Tobias Pütz
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option.

//! Inspection of decoded trees

use ndarray::ArrayView2;

/// Sum of the scores of the edges in a tree.
///
/// `scores` is indexed as `(dependent, head)`, vertices without a
/// head do not contribute.
pub fn tree_score(scores: ArrayView2<f32>, heads: &[Option<usize>]) -> f32 {
    heads
        .iter()
        .enumerate()
        .filter_map(|(dependent, &head)| head.map(|head| scores[(dependent, head)]))
        .sum()
}

/// Check that `heads` is an arborescence rooted at `root`.
///
/// The root must be the only vertex without a head, every head must
/// be another vertex of the graph, and following heads from any
/// vertex must reach the root in at most `n - 1` steps.
pub fn is_arborescence(heads: &[Option<usize>], root: usize) -> bool {
    let n_vertices = heads.len();

    if root >= n_vertices || heads[root].is_some() {
        return false;
    }

    for (vertex, &head) in heads.iter().enumerate() {
        match head {
            None if vertex != root => return false,
            Some(head) if head >= n_vertices || head == vertex => return false,
            _ => (),
        }
    }

    (0..n_vertices).all(|start| {
        let mut vertex = start;
        for _ in 0..n_vertices {
            match heads[vertex] {
                Some(head) => vertex = head,
                None => return vertex == root,
            }
        }

        false
    })
}

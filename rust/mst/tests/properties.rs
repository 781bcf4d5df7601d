// Copyright 2018-2020 Daniël de Kok and Tobias Pütz
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option.

use ndarray::Array2;
use proptest::collection::vec;
use proptest::prelude::*;

use mst::{decode, is_arborescence, tree_score};

/// Square score matrix with a root vertex.
///
/// Scores are small integers, so that ties are common and sums of
/// scores are exact.
fn arb_graph(max_vertices: usize) -> impl Strategy<Value = (Array2<f32>, usize)> {
    (1..=max_vertices).prop_flat_map(|n_vertices| {
        (
            vec(-5i8..=5, n_vertices * n_vertices),
            0..n_vertices,
        )
            .prop_map(move |(scores, root)| {
                let scores = scores.into_iter().map(f32::from).collect();
                let scores = Array2::from_shape_vec((n_vertices, n_vertices), scores)
                    .expect("score vector has n * n elements");
                (scores, root)
            })
    })
}

/// Score of the best arborescence, by trying every assignment of heads.
fn brute_force_best_score(scores: &Array2<f32>, root: usize) -> f32 {
    let n_vertices = scores.nrows();

    let mut best = f32::NEG_INFINITY;
    let mut heads = vec![None; n_vertices];
    let mut candidate = vec![0; n_vertices];
    loop {
        let mut valid = true;
        for (dependent, head) in heads.iter_mut().enumerate() {
            *head = if dependent == root {
                None
            } else {
                valid &= candidate[dependent] != dependent;
                Some(candidate[dependent])
            };
        }

        if valid && is_arborescence(&heads, root) {
            best = best.max(tree_score(scores.view(), &heads));
        }

        // Advance to the next assignment, skipping the root's digit.
        let mut idx = 0;
        loop {
            if idx == n_vertices {
                return best;
            }

            if idx != root {
                candidate[idx] += 1;
                if candidate[idx] < n_vertices {
                    break;
                }
                candidate[idx] = 0;
            }

            idx += 1;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_decodes_arborescence((scores, root) in arb_graph(12)) {
        let heads = decode(scores.view(), root).expect("valid input must decode");
        prop_assert_eq!(heads.len(), scores.nrows());
        prop_assert_eq!(heads.iter().filter(|head| head.is_none()).count(), 1);
        prop_assert_eq!(heads[root], None);
        for (vertex, &head) in heads.iter().enumerate() {
            prop_assert_ne!(head, Some(vertex));
        }
        prop_assert!(is_arborescence(&heads, root));
    }

    #[test]
    fn prop_decoding_is_deterministic((scores, root) in arb_graph(12)) {
        let first = decode(scores.view(), root).expect("valid input must decode");
        let second = decode(scores.view(), root).expect("valid input must decode");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_root_can_be_any_vertex((scores, _) in arb_graph(8)) {
        for root in 0..scores.nrows() {
            let heads = decode(scores.view(), root).expect("valid input must decode");
            prop_assert!(is_arborescence(&heads, root));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_decodes_maximum_arborescence((scores, root) in arb_graph(6)) {
        let heads = decode(scores.view(), root).expect("valid input must decode");
        prop_assert_eq!(
            tree_score(scores.view(), &heads),
            brute_force_best_score(&scores, root)
        );
    }
}

#[test]
fn brute_force_finds_best_tree() {
    let scores = ndarray::array![
        [0f32, 0., 0., 0.],
        [0., 0., 2., 1.],
        [0., 3., 0., 1.],
        [5., 0., 0., 0.]
    ];
    assert_eq!(brute_force_best_score(&scores, 0), 9.);

    let scores = Array2::<f32>::zeros((1, 1));
    assert_eq!(brute_force_best_score(&scores, 0), 0.);
}

// Copyright 2018-2020 Daniël de Kok and Tobias Pütz
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option.

//! Decoder errors

use thiserror::Error;

/// Precondition failures of [`decode`](crate::decode).
///
/// All variants are caller bugs that are detected before any decoding
/// work starts. Retrying with the same input fails the same way.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DecodeError {
    /// The score matrix is not square.
    #[error("Edge weight matrix with shape ({rows}, {cols}) is not a square matrix")]
    NotSquare { rows: usize, cols: usize },

    /// The root is not a vertex of the score matrix.
    #[error("Head {root} out of bounds for edge weight matrix with shape ({rows}, {cols})")]
    RootOutOfBounds {
        root: usize,
        rows: usize,
        cols: usize,
    },

    /// An off-diagonal score is NaN or infinite.
    #[error("Score {score} of head {head} for dependent {dependent} is not finite")]
    NonFiniteScore {
        dependent: usize,
        head: usize,
        score: f32,
    },
}

impl DecodeError {
    /// Shape of the offending score matrix, if the error carries one.
    pub fn shape(&self) -> Option<(usize, usize)> {
        match *self {
            DecodeError::NotSquare { rows, cols } => Some((rows, cols)),
            DecodeError::RootOutOfBounds { rows, cols, .. } => Some((rows, cols)),
            DecodeError::NonFiniteScore { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DecodeError;

    #[test]
    fn messages_identify_shape_and_index() {
        let err = DecodeError::NotSquare { rows: 5, cols: 4 };
        assert_eq!(
            err.to_string(),
            "Edge weight matrix with shape (5, 4) is not a square matrix"
        );
        assert_eq!(err.shape(), Some((5, 4)));

        let err = DecodeError::RootOutOfBounds {
            root: 5,
            rows: 5,
            cols: 5,
        };
        assert_eq!(
            err.to_string(),
            "Head 5 out of bounds for edge weight matrix with shape (5, 5)"
        );
        assert_eq!(err.shape(), Some((5, 5)));

        let err = DecodeError::NonFiniteScore {
            dependent: 1,
            head: 2,
            score: f32::NAN,
        };
        assert!(err.to_string().contains("head 2 for dependent 1"));
        assert_eq!(err.shape(), None);
    }
}

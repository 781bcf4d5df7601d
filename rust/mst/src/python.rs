// Copyright 2018-2020 Daniël de Kok and Tobias Pütz
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option.

use numpy::PyReadonlyArray2;
use pyo3::{
    exceptions::{PyIndexError, PyValueError},
    prelude::*,
};

use crate::error::DecodeError;

impl From<DecodeError> for PyErr {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::RootOutOfBounds { .. } => PyIndexError::new_err(err.to_string()),
            DecodeError::NotSquare { .. } | DecodeError::NonFiniteScore { .. } => {
                PyValueError::new_err(err.to_string())
            }
        }
    }
}

/// Decode the maximum spanning tree of a `(dependent, head)` score
/// matrix, rooted at `root_vertex`.
#[pyfunction]
fn chu_liu_edmonds(
    edge_weights: PyReadonlyArray2<f32>,
    root_vertex: usize,
) -> PyResult<Vec<Option<usize>>> {
    Ok(crate::mst::decode(edge_weights.as_array(), root_vertex)?)
}

#[pymodule]
fn mst(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(chu_liu_edmonds, m)?)?;
    Ok(())
}

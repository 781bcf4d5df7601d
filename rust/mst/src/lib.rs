// Copyright 2018-2020 Daniël de Kok and Tobias Pütz
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option.

//! Maximum spanning arborescence decoding for dependency parsers.
//!
//! A biaffine parser scores every (dependent, head) pair of a
//! sentence. [`decode`] turns such a score matrix into the single
//! highest-scoring dependency tree rooted at a given vertex.

mod error;
pub use error::DecodeError;

mod mst;
pub use crate::mst::{chu_liu_edmonds, decode};

mod tree;
pub use tree::{is_arborescence, tree_score};

#[cfg(feature = "python")]
mod python;

// Copyright 2018-2020 Daniël de Kok and Tobias Pütz
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option.

//! Decode the maximum spanning tree of a score matrix.
//!
//! Usage:
//!     mst-decode --input scores.json --root 0
//!     cat scores.json | mst-decode --pretty
//!
//! The input is a JSON array of rows, row `i` holding the scores of
//! the candidate heads of dependent `i`. Set `RUST_LOG=debug` to log
//! cycle contractions.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ndarray::{Array2, ArrayView2};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mst-decode")]
#[command(about = "Decode the maximum spanning tree of a dependency score matrix")]
struct Args {
    /// JSON score matrix, read from stdin when absent.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Root vertex of the tree.
    #[arg(long, default_value_t = 0)]
    root: usize,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct Output {
    heads: Vec<Option<usize>>,
    score: f32,
}

fn read_scores(reader: impl Read) -> Result<Array2<f32>> {
    let rows: Vec<Vec<f32>> =
        serde_json::from_reader(reader).context("Cannot parse score matrix")?;

    let n_cols = rows.first().map(Vec::len).unwrap_or(0);
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != n_cols {
            bail!(
                "Row {} has {} scores, expected {} like the first row",
                idx,
                row.len(),
                n_cols
            );
        }
    }

    let n_rows = rows.len();
    Array2::from_shape_vec((n_rows, n_cols), rows.into_iter().flatten().collect())
        .context("Cannot construct score matrix")
}

/// Decode `scores` and score the resulting tree.
fn run(scores: ArrayView2<f32>, root: usize) -> Result<Output> {
    let heads = mst::decode(scores, root).context("Cannot decode score matrix")?;

    Ok(Output {
        score: mst::tree_score(scores, &heads),
        heads,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let scores = match &args.input {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("Cannot open score matrix: {}", path.display()))?;
            read_scores(BufReader::new(f))?
        }
        None => read_scores(io::stdin().lock())?,
    };

    info!(shape = ?scores.dim(), root = args.root, "decoding score matrix");

    let output = run(scores.view(), args.root)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    Ok(())
}

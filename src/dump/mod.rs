// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing every attribute and dataset of a [`Container`] as lines of text.
//!
//! Problems with any one attribute, dataset or group are written into the
//! output where that item's line would have been, and the walk carries on.
//! Only failures to write the output itself stop a dump.


use std::io::Write;

use tracing::debug;

use crate::{
    container::{Array, Container, Node, Object},
    format::render,
};

/// Counts of what was written during a dump.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DumpStats {
    /// Groups and datasets visited.
    pub nodes: usize,
    pub datasets: usize,
    /// Attributes attempted, successfully or not.
    pub attributes: usize,
    /// Error lines written.
    pub errors: usize,
}

impl std::fmt::Display for DumpStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes ({} datasets), {} attributes, {} errors",
            self.nodes, self.datasets, self.attributes, self.errors
        )
    }
}

/// Walk all of `container` and write its contents to `out`.
pub fn dump<C: Container, W: Write>(container: &C, out: &mut W) -> std::io::Result<DumpStats> {
    let mut stats = DumpStats::default();
    for (name, node) in container.nodes() {
        match node {
            Ok(Node::Group(group)) => {
                debug!("Visiting group '{name}'");
                stats.nodes += 1;
                write_attrs(&name, &group, out, &mut stats)?;
            }

            Ok(Node::Dataset(dataset)) => {
                debug!("Visiting dataset '{name}'");
                stats.nodes += 1;
                stats.datasets += 1;
                write_attrs(&name, &dataset, out, &mut stats)?;
                write_dataset(&name, &dataset, out, &mut stats)?;
            }

            // The node couldn't be opened, or its members couldn't be listed.
            Err(e) => {
                debug!("Node '{name}' failed: {e}");
                stats.errors += 1;
                writeln!(out, "Error processing {name}: {e}")?;
            }
        }
    }
    Ok(stats)
}

fn write_attrs<O: Object, W: Write>(
    name: &str,
    obj: &O,
    out: &mut W,
    stats: &mut DumpStats,
) -> std::io::Result<()> {
    let keys = match obj.attr_names() {
        Ok(k) => k,
        Err(e) => {
            stats.errors += 1;
            return writeln!(out, "Error processing attributes of {name}: {e}");
        }
    };

    for key in keys {
        stats.attributes += 1;
        match obj.attr(&key).and_then(|v| render(&v)) {
            Ok(text) => writeln!(out, "{name}: {key} -> {text}")?,
            Err(e) => {
                debug!("Attribute '{key}' of '{name}' failed: {e}");
                stats.errors += 1;
                writeln!(out, "Error processing attribute {key} in {name}: {e}")?;
            }
        }
    }
    Ok(())
}

fn write_dataset<D: Array, W: Write>(
    name: &str,
    dataset: &D,
    out: &mut W,
    stats: &mut DumpStats,
) -> std::io::Result<()> {
    match dataset.values().and_then(|v| render(&v)) {
        Ok(text) => writeln!(out, "{name} dataset values: {text}"),
        Err(e) => {
            debug!("Dataset '{name}' failed: {e}");
            stats.errors += 1;
            writeln!(out, "Error processing dataset {name}: {e}")
        }
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The view of a hierarchical data file that the dumper works against.

use crate::{error::ReadError, values::Values};

/// A named entry in the container's tree.
pub enum Node<G, D> {
    /// Organises other nodes; never has values of its own.
    Group(G),
    /// Carries an n-dimensional array; never has children.
    Dataset(D),
}

/// Anything that carries attributes.
pub trait Object {
    /// Attribute names, in the container's native order.
    fn attr_names(&self) -> Result<Vec<String>, ReadError>;

    /// Read a single attribute's value.
    fn attr(&self, key: &str) -> Result<Values, ReadError>;
}

/// An [`Object`] that also has array values.
pub trait Array: Object {
    /// Read the entire array into memory.
    fn values(&self) -> Result<Values, ReadError>;
}

/// One item of a traversal. The name is always available, even if the node
/// itself couldn't be handled.
pub type Visit<G, D> = (String, Result<Node<G, D>, ReadError>);

/// A source of named nodes.
pub trait Container {
    type Group: Object;
    type Dataset: Array;

    /// Every node in the container, each exactly once, in the container's own
    /// traversal order. The root itself is not included.
    fn nodes(&self) -> Box<dyn Iterator<Item = Visit<Self::Group, Self::Dataset>> + '_>;
}

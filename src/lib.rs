// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Dump every attribute and dataset of an HDF5 file as text.
 */

pub mod container;
mod convert;
pub mod dump;
mod error;
pub mod format;
pub mod h5;
#[cfg(test)]
mod test_files;
pub mod values;

pub use container::{Array, Container, Node, Object};
pub use convert::{convert, output_path};
pub use dump::{dump, DumpStats};
pub use error::{ConvertError, ReadError};
pub use h5::H5Container;
pub use values::Values;

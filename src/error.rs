// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with converting HDF5 files.

use thiserror::Error;

/// An error that stops a conversion. Nothing useful can be written once one of
/// these has happened.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Specified input file '{0}' doesn't exist")]
    InputFileDoesntExist(String),

    /// The input already has the extension that the output would get.
    #[error("Input file '{0}' already has a .txt extension; refusing to overwrite it with its own dump")]
    OutputIsInput(String),

    /// An error associated with the hdf5 crate.
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

/// An error confined to a single attribute, dataset or group. These are
/// written into the output in place of the value that couldn't be read.
#[derive(Error, Debug)]
pub enum ReadError {
    /// An error associated with the hdf5 crate.
    #[error("{0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("{0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unsupported datatype {0}")]
    UnsupportedType(String),

    #[error("data doesn't fit its dataspace: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("libhdf5 failed to read the raw bytes of '{name}'")]
    RawRead { name: String },
}

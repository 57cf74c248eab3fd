// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Converting an HDF5 file into a text file next to it.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{dump::dump, error::ConvertError, h5::H5Container};

/// The text file that `input` gets dumped into: the same path with its
/// extension replaced by (or, if it had none, extended with) ".txt".
pub fn output_path<T: AsRef<Path>>(input: T) -> PathBuf {
    input.as_ref().with_extension("txt")
}

/// Dump every attribute and dataset in the HDF5 file `input` into the file at
/// [`output_path`]`(input)`, overwriting it, and return that path.
///
/// Problems with individual attributes or datasets are written into the
/// output; only problems opening the HDF5 file or writing the output are
/// returned as errors.
pub fn convert<T: AsRef<Path>>(input: T) -> Result<PathBuf, ConvertError> {
    let input = input.as_ref();
    // If the file doesn't exist, hdf5::File::open will handle it, but the
    // error message is horrendous.
    if !input.exists() {
        return Err(ConvertError::InputFileDoesntExist(
            input.display().to_string(),
        ));
    }
    let output = output_path(input);
    if output == input {
        return Err(ConvertError::OutputIsInput(input.display().to_string()));
    }

    // so that libhdf5 doesn't print errors to stdout
    hdf5::silence_errors(true);

    let container = H5Container::open(input)?;
    let mut out = BufWriter::new(File::create(&output)?);
    let stats = dump(&container, &mut out)?;
    out.flush()?;
    info!("Wrote {stats} to '{}'", output.display());

    Ok(output)
}

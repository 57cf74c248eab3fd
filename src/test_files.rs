// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! HDF5 files for tests. libhdf5 isn't safe to call from several threads at
//! once, so tests using these should be `#[serial]`.

use std::path::{Path, PathBuf};

use hdf5::types::{FixedAscii, VarLenAscii, VarLenUnicode};

pub(crate) fn text(s: &str) -> VarLenUnicode {
    s.parse().unwrap()
}

pub(crate) fn write_text_attr(loc: &hdf5::Location, key: &str, value: &str) {
    loc.new_attr::<VarLenUnicode>()
        .shape(())
        .create(key)
        .unwrap()
        .write_scalar(&text(value))
        .unwrap();
}

/// A group "measurements" (units -> meters) holding a dataset "temp"
/// (sensor -> A1) of [1.0, 2.0, 3.0].
pub(crate) fn write_measurements<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref().to_path_buf();
    let file = hdf5::File::create(&path).unwrap();
    let group = file.create_group("measurements").unwrap();
    write_text_attr(&group, "units", "meters");
    let temp = group.new_dataset::<f64>().shape(3).create("temp").unwrap();
    temp.write_raw(&[1.0, 2.0, 3.0]).unwrap();
    write_text_attr(&temp, "sensor", "A1");
    path
}

/// A file with a bit of everything: nested groups, several datatypes, a
/// fixed-length string attribute, enums and a compound dataset that can't be
/// dumped.
pub(crate) fn write_assorted<P: AsRef<Path>>(path: P) -> PathBuf {
    #[derive(hdf5::H5Type, Clone, Copy)]
    #[repr(C)]
    struct Pair {
        a: i32,
        b: f32,
    }

    #[derive(hdf5::H5Type, Clone, Copy)]
    #[repr(u8)]
    enum Level {
        Low = 1,
        High = 2,
    }

    #[derive(hdf5::H5Type, Clone, Copy)]
    #[repr(i16)]
    enum Offset {
        Back = -1,
    }

    let path = path.as_ref().to_path_buf();
    let file = hdf5::File::create(&path).unwrap();
    // The root's attributes aren't part of the dump.
    write_text_attr(&file, "title", "assorted");

    let b = file.create_group("b").unwrap();
    b.new_attr::<i32>()
        .shape(())
        .create("count")
        .unwrap()
        .write_scalar(&-4)
        .unwrap();

    let a = file.create_group("a").unwrap();
    a.new_attr::<FixedAscii<8>>()
        .shape(())
        .create("code")
        .unwrap()
        .write_scalar(&FixedAscii::<8>::from_ascii(b"xyz").unwrap())
        .unwrap();

    let grid = a.new_dataset::<i32>().shape((2, 3)).create("grid").unwrap();
    grid.write_raw(&[1, 2, 3, 4, 5, 6]).unwrap();

    let sub = a.create_group("sub").unwrap();
    let flags = sub.new_dataset::<bool>().shape(2).create("flags").unwrap();
    flags.write_raw(&[true, false]).unwrap();
    let names = sub
        .new_dataset::<VarLenUnicode>()
        .shape(2)
        .create("names")
        .unwrap();
    names.write_raw(&[text("x"), text("yz")]).unwrap();
    let scale = sub.new_dataset::<f64>().shape(()).create("scale").unwrap();
    scale.write_scalar(&0.25).unwrap();
    let levels = sub.new_dataset::<Level>().shape(3).create("levels").unwrap();
    levels
        .write_raw(&[Level::High, Level::Low, Level::High])
        .unwrap();
    levels
        .new_attr::<Offset>()
        .shape(())
        .create("offset")
        .unwrap()
        .write_scalar(&Offset::Back)
        .unwrap();

    let pairs = a.new_dataset::<Pair>().shape(1).create("pairs").unwrap();
    pairs.write_raw(&[Pair { a: 1, b: 2.0 }]).unwrap();
    write_text_attr(&pairs, "note", "still here");

    path
}

/// Group "s" with string attributes "ascii" (variable-length ASCII), "bad"
/// (fixed-length, not UTF-8) and "unicode", and fixed-length string datasets
/// "grid" (2x2) and "row" (2).
pub(crate) fn write_strings<P: AsRef<Path>>(path: P) -> PathBuf {
    fn fixed(s: &str) -> FixedAscii<4> {
        FixedAscii::from_ascii(s).unwrap()
    }

    let path = path.as_ref().to_path_buf();
    let file = hdf5::File::create(&path).unwrap();
    let s = file.create_group("s").unwrap();

    s.new_attr::<VarLenAscii>()
        .shape(())
        .create("ascii")
        .unwrap()
        .write_scalar(&VarLenAscii::from_ascii("plain").unwrap())
        .unwrap();
    // 0xff never appears in UTF-8.
    let bad = unsafe { FixedAscii::<4>::from_ascii_unchecked(&[b'A', 0xff]) };
    s.new_attr::<FixedAscii<4>>()
        .shape(())
        .create("bad")
        .unwrap()
        .write_scalar(&bad)
        .unwrap();
    write_text_attr(&s, "unicode", "héllo");

    s.new_dataset::<FixedAscii<4>>()
        .shape((2, 2))
        .create("grid")
        .unwrap()
        .write_raw(&[fixed("a"), fixed("bb"), fixed("ccc"), fixed("dddd")])
        .unwrap();
    s.new_dataset::<FixedAscii<4>>()
        .shape(2)
        .create("row")
        .unwrap()
        .write_raw(&[fixed("ab"), fixed("c")])
        .unwrap();

    path
}

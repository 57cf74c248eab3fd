// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Code to walk an HDF5 file and read its attributes and datasets.
 */


use std::path::Path;

use hdf5::{
    types::{EnumType, IntSize, TypeDescriptor, VarLenAscii, VarLenUnicode},
    Dataset, Datatype, Group, LinkType, Location, LocationToken, LocationType,
};
use hdf5_sys::{h5a::H5Aread, h5d::H5Dread, h5p::H5P_DEFAULT, h5s::H5S_ALL};
use tracing::debug;

use crate::{
    container::{Array, Container, Node, Object, Visit},
    error::ReadError,
    values::Values,
};

/// An HDF5 file opened for reading.
pub struct H5Container {
    /// Keeps the file open for as long as we have handles into it.
    _file: hdf5::File,
    root: Group,
}

impl H5Container {
    /// Open the HDF5 file at `file` read-only.
    pub fn open<T: AsRef<Path>>(file: T) -> Result<Self, hdf5::Error> {
        let file = hdf5::File::open(file)?;
        let root = file.group("/")?;
        Ok(Self { _file: file, root })
    }
}

impl Container for H5Container {
    type Group = Group;
    type Dataset = Dataset;

    fn nodes(&self) -> Box<dyn Iterator<Item = Visit<Group, Dataset>> + '_> {
        Box::new(Walk::new(self.root.clone()))
    }
}

/// The members of a group that haven't been visited yet.
struct Frame {
    group: Group,
    /// The group's name with a trailing slash, or empty for the root.
    prefix: String,
    members: std::vec::IntoIter<String>,
}

/// A pre-order, depth-first walk over every group and dataset below a root
/// group. Members of a group are visited in ascending name order.
///
/// Only hard links are followed, and an object with several hard links is
/// visited once, under the first name the walk reaches it by. Soft and
/// external links are never followed.
pub struct Walk {
    stack: Vec<Frame>,
    /// Objects with more than one hard link that have been handed out
    /// already. Objects with a single link can only be reached once, so they
    /// aren't recorded.
    seen: Vec<LocationToken>,
    /// A group that was just handed out but whose members couldn't be
    /// listed. It's reported on the next call to `next`.
    deferred: Option<(String, ReadError)>,
}

impl Walk {
    pub fn new(root: Group) -> Self {
        let mut walk = Self {
            stack: vec![],
            seen: vec![],
            deferred: None,
        };
        // A hard link back to the root mustn't bring the whole file around
        // again.
        if let Ok(info) = root.loc_info() {
            walk.seen.push(info.token);
        }
        walk.descend(root, "/".to_string(), String::new());
        walk
    }

    /// Queue up the members of `group`.
    fn descend(&mut self, group: Group, name: String, prefix: String) {
        match hard_links(&group) {
            Ok(members) => self.stack.push(Frame {
                group,
                prefix,
                members: members.into_iter(),
            }),
            Err(e) => self.deferred = Some((name, e.into())),
        }
    }
}

impl Iterator for Walk {
    type Item = Visit<Group, Dataset>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((name, e)) = self.deferred.take() {
                return Some((name, Err(e)));
            }

            let frame = self.stack.last_mut()?;
            let Some(member) = frame.members.next() else {
                self.stack.pop();
                continue;
            };
            let name = format!("{}{member}", frame.prefix);

            match open_member(&frame.group, &member, &mut self.seen) {
                Ok(Some(Node::Group(group))) => {
                    self.descend(group.clone(), name.clone(), format!("{name}/"));
                    return Some((name, Ok(Node::Group(group))));
                }
                Ok(Some(node)) => return Some((name, Ok(node))),
                Ok(None) => debug!("Skipping '{name}'"),
                Err(e) => return Some((name, Err(e.into()))),
            }
        }
    }
}

/// The names of the hard links in `group`, sorted.
fn hard_links(group: &Group) -> hdf5::Result<Vec<String>> {
    let mut names = group.iter_visit_default(vec![], |_, name, info, names: &mut Vec<String>| {
        if info.link_type == LinkType::Hard {
            names.push(name.to_string());
        } else {
            debug!("Not following {:?} link '{name}'", info.link_type);
        }
        true
    })?;
    names.sort_unstable();
    Ok(names)
}

/// Open the object that `member` of `group` links to. `None` for committed
/// datatypes and for objects already in `seen`.
fn open_member(
    group: &Group,
    member: &str,
    seen: &mut Vec<LocationToken>,
) -> hdf5::Result<Option<Node<Group, Dataset>>> {
    let info = group.loc_info_by_name(member)?;
    if info.num_links > 1 {
        if seen.contains(&info.token) {
            return Ok(None);
        }
        seen.push(info.token);
    }
    Ok(match info.loc_type {
        LocationType::Group => Some(Node::Group(group.group(member)?)),
        LocationType::Dataset => Some(Node::Dataset(group.dataset(member)?)),
        _ => None,
    })
}

impl Object for Group {
    fn attr_names(&self) -> Result<Vec<String>, ReadError> {
        list_attrs(self)
    }

    fn attr(&self, key: &str) -> Result<Values, ReadError> {
        read_attr(self, key)
    }
}

impl Object for Dataset {
    fn attr_names(&self) -> Result<Vec<String>, ReadError> {
        list_attrs(self)
    }

    fn attr(&self, key: &str) -> Result<Values, ReadError> {
        read_attr(self, key)
    }
}

impl Array for Dataset {
    fn values(&self) -> Result<Values, ReadError> {
        read_values(self, Source::Dataset, &self.name())
    }
}

fn list_attrs(loc: &Location) -> Result<Vec<String>, ReadError> {
    Ok(loc.attr_names()?)
}

fn read_attr(loc: &Location, key: &str) -> Result<Values, ReadError> {
    let attr = loc.attr(key)?;
    read_values(&attr, Source::Attribute, key)
}

/// What an [`hdf5::Container`] really is; the raw C API needs to know.
#[derive(Debug, Clone, Copy)]
enum Source {
    Attribute,
    Dataset,
}

/// Read all of an attribute's or a dataset's values. `name` is only used for
/// error messages.
fn read_values(c: &hdf5::Container, source: Source, name: &str) -> Result<Values, ReadError> {
    let dtype = c.dtype()?;
    let shape = c.shape();
    match dtype.to_descriptor()? {
        TypeDescriptor::Integer(_) => {
            Values::from_shape_vec(&shape, c.read_raw::<i64>()?, Values::Int)
        }
        TypeDescriptor::Unsigned(_) => {
            Values::from_shape_vec(&shape, c.read_raw::<u64>()?, Values::Uint)
        }
        TypeDescriptor::Float(_) => {
            Values::from_shape_vec(&shape, c.read_raw::<f64>()?, Values::Float)
        }
        TypeDescriptor::Boolean => {
            Values::from_shape_vec(&shape, c.read_raw::<bool>()?, Values::Bool)
        }

        TypeDescriptor::VarLenUnicode => {
            let strings = c
                .read_raw::<VarLenUnicode>()?
                .iter()
                .map(|s| s.as_bytes().to_vec())
                .collect();
            Values::from_shape_vec(&shape, strings, Values::Bytes)
        }
        TypeDescriptor::VarLenAscii => {
            let strings = c
                .read_raw::<VarLenAscii>()?
                .iter()
                .map(|s| s.as_bytes().to_vec())
                .collect();
            Values::from_shape_vec(&shape, strings, Values::Bytes)
        }
        TypeDescriptor::FixedAscii(_) | TypeDescriptor::FixedUnicode(_) => {
            let strings = read_fixed_strings(c, &dtype, source, name)?;
            Values::from_shape_vec(&shape, strings, Values::Bytes)
        }

        TypeDescriptor::Enum(e) => read_enum(c, &e, &shape, source, name),

        other => Err(ReadError::UnsupportedType(format!("{other:?}"))),
    }
}

/// Read every element of `c`, converted by libhdf5 to `mem_type`, as raw
/// bytes.
fn read_bytes(
    c: &hdf5::Container,
    mem_type: &Datatype,
    source: Source,
    name: &str,
) -> Result<Vec<u8>, ReadError> {
    let mut buf = vec![0_u8; mem_type.size() * c.size()];
    if buf.is_empty() {
        return Ok(buf);
    }

    // H5S_ALL selects the whole dataspace, i.e. `c.size()` elements of
    // `mem_type.size()` bytes each, which is exactly the length of `buf`.
    let status = unsafe {
        match source {
            Source::Attribute => H5Aread(c.id(), mem_type.id(), buf.as_mut_ptr().cast()),
            Source::Dataset => H5Dread(
                c.id(),
                mem_type.id(),
                H5S_ALL,
                H5S_ALL,
                H5P_DEFAULT,
                buf.as_mut_ptr().cast(),
            ),
        }
    };
    if status < 0 {
        return Err(ReadError::RawRead {
            name: name.to_string(),
        });
    }
    Ok(buf)
}

/// Read fixed-length strings as bytes, with their NUL padding removed.
///
/// The hdf5 crate can only read these into types whose length is known at
/// compile time, so go through libhdf5 directly.
fn read_fixed_strings(
    c: &hdf5::Container,
    dtype: &Datatype,
    source: Source,
    name: &str,
) -> Result<Vec<Vec<u8>>, ReadError> {
    let width = dtype.size();
    if width == 0 {
        return Ok(vec![vec![]; c.size()]);
    }

    // Fixed-length strings need no conversion, so the file's datatype is used
    // as the memory datatype.
    let strings = read_bytes(c, dtype, source, name)?
        .chunks(width)
        .map(|s| {
            let end = s.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            s[..end].to_vec()
        })
        .collect();
    Ok(strings)
}

/// Read an enum's values as the integers underneath them.
///
/// libhdf5 won't convert enums to plain integers, only to other enums, so the
/// values are read as the same enum in native byte order and decoded here.
fn read_enum(
    c: &hdf5::Container,
    e: &EnumType,
    shape: &[usize],
    source: Source,
    name: &str,
) -> Result<Values, ReadError> {
    let mem_type = Datatype::from_descriptor(&TypeDescriptor::Enum(e.clone()))?;
    let bytes = read_bytes(c, &mem_type, source, name)?;
    let elements = bytes.chunks_exact(e.size as usize);
    if e.signed {
        let ints: Vec<i64> = elements
            .map(|b| match e.size {
                IntSize::U1 => i8::from_ne_bytes(ne(b)).into(),
                IntSize::U2 => i16::from_ne_bytes(ne(b)).into(),
                IntSize::U4 => i32::from_ne_bytes(ne(b)).into(),
                IntSize::U8 => i64::from_ne_bytes(ne(b)),
            })
            .collect();
        Values::from_shape_vec(shape, ints, Values::Int)
    } else {
        let ints: Vec<u64> = elements
            .map(|b| match e.size {
                IntSize::U1 => u8::from_ne_bytes(ne(b)).into(),
                IntSize::U2 => u16::from_ne_bytes(ne(b)).into(),
                IntSize::U4 => u32::from_ne_bytes(ne(b)).into(),
                IntSize::U8 => u64::from_ne_bytes(ne(b)),
            })
            .collect();
        Values::from_shape_vec(shape, ints, Values::Uint)
    }
}

/// `bytes` as an array. `bytes` must be exactly `N` long.
fn ne<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut a = [0; N];
    a.copy_from_slice(bytes);
    a
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Materialised attribute and dataset values.

use ndarray::{ArrayD, IxDyn};

use crate::error::ReadError;

/// A fully-read, n-dimensional array of values. Scalars are 0-dimensional.
///
/// Every kind of string is kept as raw bytes; they're only decoded when
/// they're rendered to text, so that a bad string is an error for that one
/// item only.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Int(ArrayD<i64>),
    Uint(ArrayD<u64>),
    Float(ArrayD<f64>),
    Bool(ArrayD<bool>),
    Bytes(ArrayD<Vec<u8>>),
}

impl Values {
    /// A 0-dimensional text value.
    pub fn text<S: Into<String>>(s: S) -> Self {
        Values::Bytes(ArrayD::from_elem(IxDyn(&[]), s.into().into_bytes()))
    }

    /// A 0-dimensional float value.
    pub fn float(v: f64) -> Self {
        Values::Float(ArrayD::from_elem(IxDyn(&[]), v))
    }

    /// A 0-dimensional integer value.
    pub fn int(v: i64) -> Self {
        Values::Int(ArrayD::from_elem(IxDyn(&[]), v))
    }

    /// Lay out a flat, row-major vector with the given shape. An empty
    /// `shape` means a scalar.
    pub fn from_shape_vec<T, F>(shape: &[usize], data: Vec<T>, wrap: F) -> Result<Self, ReadError>
    where
        F: FnOnce(ArrayD<T>) -> Values,
    {
        let arr = ArrayD::from_shape_vec(IxDyn(shape), data)?;
        Ok(wrap(arr))
    }

    /// The dimensions of the values; empty for a scalar.
    pub fn shape(&self) -> &[usize] {
        match self {
            Values::Int(a) => a.shape(),
            Values::Uint(a) => a.shape(),
            Values::Float(a) => a.shape(),
            Values::Bool(a) => a.shape(),
            Values::Bytes(a) => a.shape(),
        }
    }

    /// Whether these are 0-d values, i.e. a single value.
    pub fn is_scalar(&self) -> bool {
        self.shape().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_scalar() {
        let v = Values::text("meters");
        assert!(v.is_scalar());
        match v {
            Values::Bytes(a) => assert_eq!(a.iter().next().unwrap().as_slice(), b"meters"),
            _ => panic!("expected bytes"),
        }
    }

    #[test]
    fn test_from_shape_vec() {
        let v = Values::from_shape_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6], Values::Int).unwrap();
        assert_eq!(v.shape(), &[2, 3]);
        assert!(!v.is_scalar());

        // Wrong number of elements for the shape.
        let result = Values::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0], Values::Float);
        assert!(matches!(result, Err(ReadError::Shape(_))));
    }
}

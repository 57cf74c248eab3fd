// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Rendering of [`Values`] as text.

The layout is modelled on NumPy's default printing, but it is fixed here rather
than being whatever a library happens to do:

- scalars print bare; floats always carry a decimal point (`1.0`), or use an
  exponent (`1e-05`) when very small or very large; strings are unquoted;
- arrays are bracketed and space-separated, one bracket level per dimension,
  all on one line (`[[1 2] [3 4]]`); nothing is summarised;
- array elements share a common width. Floats are aligned on the decimal
  point (`[1.  2.5 3. ]`), everything else is right-aligned, except strings,
  which are quoted and not padded.
 */

use ndarray::{ArrayD, IxDyn};

use crate::{error::ReadError, values::Values};

/// Floats with a magnitude outside of this range (zero excepted) are written
/// with an exponent.
const POSITIONAL_RANGE: std::ops::Range<f64> = 1e-4..1e16;

/// Render `values` as a single piece of text. Fails only if a string isn't
/// valid UTF-8.
pub fn render(values: &Values) -> Result<String, ReadError> {
    if values.is_scalar() {
        return render_scalar(values);
    }

    let cells = match values {
        Values::Int(a) => right_align(a.iter().map(|v| v.to_string()).collect()),
        Values::Uint(a) => right_align(a.iter().map(|v| v.to_string()).collect()),
        Values::Bool(a) => right_align(a.iter().map(|&b| py_bool(b).to_string()).collect()),
        Values::Float(a) => float_cells(&a.iter().copied().collect::<Vec<_>>()),
        Values::Bytes(a) => a
            .iter()
            .map(|b| decode(b).map(|s| quote(&s)))
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(nest(&cells, values.shape()))
}

fn render_scalar(values: &Values) -> Result<String, ReadError> {
    let s = match values {
        Values::Int(a) => the_one(a).to_string(),
        Values::Uint(a) => the_one(a).to_string(),
        Values::Bool(a) => py_bool(*the_one(a)).to_string(),
        Values::Float(a) => float_repr(*the_one(a)),
        Values::Bytes(a) => decode(the_one::<Vec<u8>>(a))?,
    };
    Ok(s)
}

/// The element of a 0-dimensional array.
fn the_one<T>(a: &ArrayD<T>) -> &T {
    &a[IxDyn(&[])]
}

fn decode(bytes: &[u8]) -> Result<String, ReadError> {
    Ok(String::from_utf8(bytes.to_vec())?)
}

fn py_bool(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

fn non_finite(v: f64) -> &'static str {
    if v.is_nan() {
        "nan"
    } else if v > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

fn needs_exponent(v: f64) -> bool {
    v.is_finite() && v != 0.0 && !POSITIONAL_RANGE.contains(&v.abs())
}

/// Split a float into its shortest round-trip mantissa and its exponent,
/// e.g. 1.5e20 -> ("1.5", 20).
fn split_exp(v: f64) -> (String, i32) {
    let s = format!("{v:e}");
    match s.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

/// A lone float, e.g. `1.0`, `0.25`, `1e-05`, `1.5e+20`.
fn float_repr(v: f64) -> String {
    if !v.is_finite() {
        return non_finite(v).to_string();
    }
    if needs_exponent(v) {
        let (mantissa, exp) = split_exp(v);
        return format!("{mantissa}e{exp:+03}");
    }
    let s = v.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

/// Array elements for floats. If any one of them needs an exponent, they all
/// get one.
fn float_cells(values: &[f64]) -> Vec<String> {
    if values.iter().any(|&v| needs_exponent(v)) {
        let cells = values
            .iter()
            .map(|&v| {
                if v.is_finite() {
                    let (mut mantissa, exp) = split_exp(v);
                    if !mantissa.contains('.') {
                        mantissa.push('.');
                    }
                    format!("{mantissa}e{exp:+03}")
                } else {
                    non_finite(v).to_string()
                }
            })
            .collect();
        return right_align(cells);
    }

    // Integer and fractional parts of every finite value.
    let parts: Vec<Option<(String, String)>> = values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return None;
            }
            let s = v.to_string();
            Some(match s.split_once('.') {
                Some((int, frac)) => (int.to_string(), frac.to_string()),
                None => (s, String::new()),
            })
        })
        .collect();
    let int_width = parts.iter().flatten().map(|(i, _)| i.len()).max().unwrap_or(0);
    let frac_width = parts.iter().flatten().map(|(_, f)| f.len()).max().unwrap_or(0);

    let cells = parts
        .into_iter()
        .zip(values)
        .map(|(p, &v)| match p {
            Some((int, frac)) => format!("{int:>int_width$}.{frac:<frac_width$}"),
            None => non_finite(v).to_string(),
        })
        .collect();
    right_align(cells)
}

fn right_align(cells: Vec<String>) -> Vec<String> {
    let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    cells.into_iter().map(|c| format!("{c:>width$}")).collect()
}

/// Quote a string the way Python's `repr` does.
fn quote(s: &str) -> String {
    let q = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(q);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

/// Wrap row-major `cells` in one level of brackets per dimension of `shape`.
fn nest(cells: &[String], shape: &[usize]) -> String {
    match shape.split_first() {
        None => cells.first().cloned().unwrap_or_default(),
        Some((&len, rest)) => {
            let stride: usize = rest.iter().product();
            let inner: Vec<String> = if stride == 0 {
                (0..len).map(|_| nest(&[], rest)).collect()
            } else {
                cells.chunks(stride).map(|c| nest(c, rest)).collect()
            };
            format!("[{}]", inner.join(" "))
        }
    }
}

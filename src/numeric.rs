//! Tolerance-based comparison of floating point values, and a diagnostic
//! comparison of raw number buffers.

use std::fmt;
use std::fmt::Write;

use crate::{DataType, Number};

/// Default maximum relative difference for `f32` values to be considered
/// nearly equal.
pub const DEFAULT_MAX_RELATIVE_DIFF_FLOAT: f64 = 1.0e-5;

/// Default maximum relative difference for `f64` values to be considered
/// nearly equal.
pub const DEFAULT_MAX_RELATIVE_DIFF_DOUBLE: f64 = 1.0e-8;

/// Return the difference of `a` and `b` relative to the larger magnitude.
///
/// This is 0 if both are zero and 1 if exactly one of them is zero. NaN
/// inputs give NaN.
pub fn relative_difference(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    match (a == 0., b == 0.) {
        (true, true) => 0.,
        (true, false) | (false, true) => 1.,
        (false, false) => (a - b).abs() / a.abs().max(b.abs()),
    }
}

/// Return `|a - b|`, or NaN if either input is NaN.
pub fn absolute_difference(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// Return true if the relative difference of `a` and `b` is less than
/// `max_rel_diff`.
pub fn nearly_equals(a: f64, b: f64, max_rel_diff: f64) -> bool {
    relative_difference(a, b) < max_rel_diff
}

/// Return true if the absolute difference of `a` and `b` is less than
/// `max_abs_diff`.
pub fn nearly_equals_abs(a: f64, b: f64, max_abs_diff: f64) -> bool {
    absolute_difference(a, b) < max_abs_diff
}

/// Write a line to the sink, if there is one. Errors from the sink are
/// ignored.
fn report(sink: &mut Option<&mut dyn fmt::Write>, args: fmt::Arguments<'_>) {
    if let Some(sink) = sink {
        let _ = sink.write_fmt(args);
    }
}

fn values_match<T: Number>(a: T, b: T) -> bool {
    let max_rel_diff = match T::DATA_TYPE {
        DataType::Float => DEFAULT_MAX_RELATIVE_DIFF_FLOAT,
        DataType::Double => DEFAULT_MAX_RELATIVE_DIFF_DOUBLE,
        _ => return a == b,
    };
    a == b || (a.is_nan() && b.is_nan()) || nearly_equals(a.to_f64(), b.to_f64(), max_rel_diff)
}

/// Compare two buffers of numbers and report the differences to `sink`.
///
/// Returns true if both buffers are present, have the same length and equal
/// values. Floating point values are compared with [`nearly_equals`] at the
/// default tolerance for their type, and NaN matches NaN. Integers must be
/// equal.
///
/// If either buffer is `None`, returns false without writing anything. If
/// the lengths differ, one line naming both lengths is written. Otherwise one
/// line is written per differing element, followed by a summary line.
pub fn compare<T: Number>(
    a: Option<&[T]>,
    b: Option<&[T]>,
    mut sink: Option<&mut dyn fmt::Write>,
) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };

    if a.len() != b.len() {
        report(&mut sink, format_args!("lengths differ: {} != {}\n", a.len(), b.len()));
        return false;
    }

    let mut n_different = 0;
    for (i, (&x, &y)) in a.iter().zip(b).enumerate() {
        if !values_match(x, y) {
            report(&mut sink, format_args!("{} : {} != {}\n", i, x, y));
            n_different += 1;
        }
    }

    if n_different > 0 {
        report(&mut sink, format_args!(
            "{} {}s, {} are different\n",
            a.len(),
            T::DATA_TYPE,
            n_different
        ));
    }
    n_different == 0
}

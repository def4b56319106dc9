use ncarray_view::{ArrayView, AsView, Layout};

use crate::numeric::relative_difference;
use crate::ops::{check_numeric, OpError};
use crate::value::number_array;
use crate::{Number, ValueView};

/// A number read from an array, kept exact for integer kinds.
#[derive(Clone, Copy, Debug)]
enum Exact {
    Integer(i128),
    Float(f64),
}

impl Exact {
    fn of<T: Number>(value: T) -> Exact {
        if T::DATA_TYPE.is_floating_point() {
            Exact::Float(value.to_f64())
        } else {
            Exact::Integer(value.to_i128())
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Exact::Integer(x) => x as f64,
            Exact::Float(x) => x,
        }
    }

    /// Return true if both numbers have the same mathematical value.
    fn equals(self, other: Exact) -> bool {
        match (self, other) {
            (Exact::Integer(x), Exact::Integer(y)) => x == y,
            (Exact::Float(x), Exact::Float(y)) => x == y,
            (Exact::Integer(i), Exact::Float(f)) | (Exact::Float(f), Exact::Integer(i)) => {
                // `as` saturates, and no stored integer is near the `i128` limits.
                f.fract() == 0. && f as i128 == i
            }
        }
    }

    fn relative_difference(self, other: Exact) -> f64 {
        match (self, other) {
            (Exact::Integer(x), Exact::Integer(y)) if x != 0 && y != 0 => {
                x.abs_diff(y) as f64 / x.unsigned_abs().max(y.unsigned_abs()) as f64
            }
            _ => relative_difference(self.to_f64(), other.to_f64()),
        }
    }
}

fn boxed_exact<'a, T: Number>(array: &ArrayView<'a, T>) -> Box<dyn Iterator<Item = Exact> + 'a> {
    Box::new(array.iter().map(|&x| Exact::of(x)))
}

/// Return the elements of a numeric view in logical order.
fn exact_values<'a>(
    view: &ValueView<'a>,
) -> Result<Box<dyn Iterator<Item = Exact> + 'a>, OpError> {
    check_numeric(view.kind())?;
    Ok(number_array!(view, array => boxed_exact(array), _ => {
        return Err(OpError::NotNumeric(view.kind()))
    }))
}

/// Return true if two numeric arrays have the same number of elements and
/// the same values in logical order.
///
/// The shapes and kinds of the arrays may differ. Values are compared by
/// their mathematical value, so 64-bit integers are compared exactly and an
/// integer equals a float only if the float is integral.
pub fn equal_numbers(a: &ValueView, b: &ValueView) -> Result<bool, OpError> {
    let (a_values, b_values) = (exact_values(a)?, exact_values(b)?);
    if a.len() != b.len() {
        return Ok(false);
    }
    Ok(a_values.zip(b_values).all(|(x, y)| x.equals(y)))
}

/// Return true if two `f64` arrays have the same number of elements and
/// exactly equal values in logical order.
pub fn equal_doubles<A, B>(a: &A, b: &B) -> bool
where
    A: AsView<Elem = f64>,
    B: AsView<Elem = f64>,
{
    a.len() == b.len() && a.iter().eq(b.iter())
}

/// Return true if two `f32` arrays have the same number of elements and
/// exactly equal values in logical order.
pub fn equal_floats<A, B>(a: &A, b: &B) -> bool
where
    A: AsView<Elem = f32>,
    B: AsView<Elem = f32>,
{
    a.len() == b.len() && a.iter().eq(b.iter())
}

/// Return true if two numeric arrays have the same number of elements and
/// values whose relative difference is less than `max_rel_diff`.
///
/// NaN values compare equal to each other.
pub fn near_equals(a: &ValueView, b: &ValueView, max_rel_diff: f64) -> Result<bool, OpError> {
    let (a_values, b_values) = (exact_values(a)?, exact_values(b)?);
    if a.len() != b.len() {
        return Ok(false);
    }
    Ok(a_values.zip(b_values).all(|(x, y)| {
        let (xf, yf) = (x.to_f64(), y.to_f64());
        x.equals(y) || (xf.is_nan() && yf.is_nan()) || x.relative_difference(y) < max_rel_diff
    }))
}

//! Reductions, comparisons and conversions over kind-tagged arrays.

use ncarray_view::errors::LayoutError;
use thiserror::Error;

use crate::value::number_array;
use crate::{CastError, DataType, Number, ValueView};

mod chars;
mod compare;
mod convert;
mod parse;
mod reduce;

pub use chars::{make_char_from_strings, make_string_from_char, make_strings_from_char};
pub use compare::{equal_doubles, equal_floats, equal_numbers, near_equals};
pub use convert::{convert, to_double};
pub use parse::{make_array, make_array_sequence, ParseError};
pub use reduce::{min_max, min_max_skip_missing, sum, sum_skip_missing, MinMax, MissingEvaluator};

/// Errors from operations on kind-tagged arrays.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OpError {
    /// The operation needs numbers but the array holds another kind.
    #[error("operation requires numeric values but the array has kind {0}")]
    NotNumeric(DataType),

    /// The operation needs a specific kind.
    #[error("expected an array of kind {expected} but the array has kind {actual}")]
    KindMismatch { actual: DataType, expected: DataType },

    #[error("cannot convert {from} values to {to}")]
    UnsupportedConversion { from: DataType, to: DataType },

    #[error("expected an array with {expected} dims but it has {actual} dims")]
    WrongRank { actual: usize, expected: usize },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Cast(#[from] CastError),
}

/// Return true if elements of `kind` are stored as a primitive number type.
///
/// This includes characters and enumerations as well as the numeric kinds.
fn is_number_like(kind: DataType) -> bool {
    kind.is_numeric() || kind.is_enum() || kind == DataType::Char
}

/// Fail unless `kind` is numeric or an enumeration.
fn check_numeric(kind: DataType) -> Result<(), OpError> {
    if kind.is_numeric() || kind.is_enum() {
        Ok(())
    } else {
        Err(OpError::NotNumeric(kind))
    }
}

fn boxed_values<'a, T: Number>(
    array: &ncarray_view::ArrayView<'a, T>,
) -> Box<dyn Iterator<Item = f64> + 'a> {
    Box::new(array.iter().map(|x| x.to_f64()))
}

/// Return the elements of a numeric view, in logical order, as `f64`.
fn number_values<'a>(
    view: &ValueView<'a>,
) -> Result<Box<dyn Iterator<Item = f64> + 'a>, OpError> {
    check_numeric(view.kind())?;
    Ok(number_array!(view, array => boxed_values(array), _ => {
        return Err(OpError::NotNumeric(view.kind()))
    }))
}

/// Evaluate `$body` with `$type` declared as an alias for the Rust storage
/// type of the number-like kind `$kind`. Other kinds evaluate `$fallback`.
macro_rules! with_number_type {
    ($kind:expr, $type:ident => $body:expr, _ => $fallback:expr) => {
        match $kind {
            DataType::Byte => {
                type $type = i8;
                $body
            }
            DataType::UByte | DataType::Char | DataType::Enum1 => {
                type $type = u8;
                $body
            }
            DataType::Short => {
                type $type = i16;
                $body
            }
            DataType::UShort | DataType::Enum2 => {
                type $type = u16;
                $body
            }
            DataType::Int => {
                type $type = i32;
                $body
            }
            DataType::UInt | DataType::Enum4 => {
                type $type = u32;
                $body
            }
            DataType::Long => {
                type $type = i64;
                $body
            }
            DataType::ULong => {
                type $type = u64;
                $body
            }
            DataType::Float => {
                type $type = f32;
                $body
            }
            DataType::Double => {
                type $type = f64;
                $body
            }
            _ => $fallback,
        }
    };
}

use with_number_type;

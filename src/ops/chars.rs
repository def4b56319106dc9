use ncarray_view::{Array, AsView, Layout};

use crate::ops::OpError;
use crate::{DataType, Value, ValueView};

/// Decode bytes as UTF-8, stopping at the first NUL.
fn decode(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

fn char_array<'a>(view: &ValueView<'a>) -> Result<ncarray_view::ArrayView<'a, u8>, OpError> {
    match view {
        ValueView::Char(array) => Ok(array.clone()),
        _ => Err(OpError::KindMismatch {
            actual: view.kind(),
            expected: DataType::Char,
        }),
    }
}

/// Decode a 1-D character array as a single string.
pub fn make_string_from_char(view: &ValueView) -> Result<String, OpError> {
    let array = char_array(view)?;
    if array.ndim() != 1 {
        return Err(OpError::WrongRank {
            actual: array.ndim(),
            expected: 1,
        });
    }
    Ok(decode(&array.to_vec()))
}

/// Decode a character array of shape `[..., strlen]` as an array of strings
/// with shape `[...]`.
///
/// Each string is decoded from exactly `strlen` characters, stopping at the
/// first NUL.
pub fn make_strings_from_char(view: &ValueView) -> Result<Array<String>, OpError> {
    let array = char_array(view)?;
    let Some((&strlen, outer_shape)) = array.shape().split_last() else {
        return Err(OpError::WrongRank {
            actual: 0,
            expected: 1,
        });
    };
    let count: usize = outer_shape.iter().product();
    let strings = if strlen == 0 {
        vec![String::new(); count]
    } else {
        array.to_vec().chunks(strlen).map(decode).collect()
    };
    Array::from_data(outer_shape, strings).map_err(|err| OpError::Cast(err.into()))
}

/// Encode strings as a character array of shape `[..., strlen]`.
///
/// Each string is padded with NULs to `strlen` bytes. Longer strings are
/// truncated to at most `strlen` bytes at a character boundary, so a
/// multi-byte character that does not fit is dropped and replaced by padding.
pub fn make_char_from_strings<A>(strings: &A, strlen: usize) -> Result<Value, OpError>
where
    A: AsView<Elem = String>,
{
    let mut data = Vec::with_capacity(strings.len() * strlen);
    for string in strings.iter() {
        let mut len = string.len().min(strlen);
        while !string.is_char_boundary(len) {
            len -= 1;
        }
        data.extend_from_slice(&string.as_bytes()[..len]);
        data.resize(data.len() + strlen - len, 0);
    }
    let mut shape = strings.shape().to_vec();
    shape.push(strlen);
    Ok(Value::factory(DataType::Char, &shape, data)?)
}

use ncarray_view::{Array, ArrayView, AsView, Layout};
use tracing::debug;

use crate::ops::{is_number_like, with_number_type, OpError};
use crate::value::number_array;
use crate::{DataType, Number, Value, ValueView};

fn convert_array<S: Number, D: Number + crate::Element>(
    array: &ArrayView<S>,
    kind: DataType,
) -> Result<Value, OpError> {
    let data: Vec<D> = array.iter().map(|&x| D::cast_from(x)).collect();
    Ok(Value::factory(kind, array.shape(), data)?)
}

/// Return a new canonical array holding the elements of `view` converted to
/// `kind`.
///
/// Numeric, character and enumeration kinds convert between each other
/// with `as` semantics: floats truncate toward zero and integer narrowing
/// keeps the low bits. Converting to the view's own kind copies the
/// elements unchanged, for any kind.
pub fn convert(view: &ValueView, kind: DataType) -> Result<Value, OpError> {
    if view.kind() == kind {
        return Ok(view.to_owned());
    }
    let unsupported = OpError::UnsupportedConversion {
        from: view.kind(),
        to: kind,
    };
    if !is_number_like(view.kind()) || !is_number_like(kind) {
        return Err(unsupported);
    }
    debug!(from = %view.kind(), to = %kind, len = view.len(), "converting array");

    number_array!(view, array => {
        with_number_type!(kind, T => convert_array::<_, T>(array, kind), _ => Err(unsupported))
    }, _ => Err(unsupported))
}

/// Return the elements of a numeric array converted to `f64`, with the same
/// shape.
pub fn to_double(view: &ValueView) -> Result<Array<f64>, OpError> {
    super::check_numeric(view.kind())?;
    number_array!(view, array => Ok(array.map(|x| x.to_f64())), _ => {
        Err(OpError::NotNumeric(view.kind()))
    })
}

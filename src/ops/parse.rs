use thiserror::Error;
use tracing::debug;

use crate::ops::with_number_type;
use crate::{CastError, DataType, Element, Number, Value};

/// Errors when creating arrays from text.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    /// A string is not a valid value of the kind.
    #[error("cannot parse \"{text}\" as {kind}")]
    Invalid { kind: DataType, text: String },

    /// Values of the kind cannot be created from text.
    #[error("cannot create {0} values from text")]
    UnsupportedType(DataType),

    #[error(transparent)]
    Cast(#[from] CastError),
}

/// Parse an integer which is valid if it lies in `min..=max`.
///
/// Negative values are mapped to the unsigned type by keeping the low bits,
/// as a signed narrowing would.
fn parse_integer<T: Number>(text: &str, min: i64, max: u64) -> Option<T> {
    let text = text.trim();
    if let Ok(value) = text.parse::<u64>() {
        return (value <= max).then(|| T::from_i64(value as i64));
    }
    let value = text.parse::<i64>().ok()?;
    (value >= min).then(|| T::from_i64(value))
}

fn parse_all<T, S, F>(kind: DataType, strings: &[S], parse: F) -> Result<Vec<T>, ParseError>
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<T>,
{
    strings
        .iter()
        .map(|s| {
            let s = s.as_ref();
            parse(s).ok_or_else(|| ParseError::Invalid {
                kind,
                text: s.to_string(),
            })
        })
        .collect()
}

fn make<T: Element>(kind: DataType, data: Vec<T>) -> Result<Value, ParseError> {
    let len = data.len();
    Ok(Value::factory(kind, &[len], data)?)
}

/// Create a 1-D array of kind `kind` with one element per string.
///
/// Signed integers must lie in the range of their type. Unsigned integers
/// and enumerations accept any value from the signed minimum to the unsigned
/// maximum of their width, and negative values keep their bit pattern, so
/// `"-9"` parses as 247 for [`DataType::UByte`]. Character arrays need
/// exactly one byte per string. Strings are stored as given.
pub fn make_array<S: AsRef<str>>(kind: DataType, strings: &[S]) -> Result<Value, ParseError> {
    debug!(%kind, count = strings.len(), "parsing array from text");

    macro_rules! integers {
        ($type:ty, $signed:ty) => {
            make(
                kind,
                parse_all(kind, strings, |s| {
                    parse_integer::<$type>(s, <$signed>::MIN as i64, <$type>::MAX as u64)
                })?,
            )
        };
    }

    match kind {
        DataType::Byte => integers!(i8, i8),
        DataType::UByte | DataType::Enum1 => integers!(u8, i8),
        DataType::Short => integers!(i16, i16),
        DataType::UShort | DataType::Enum2 => integers!(u16, i16),
        DataType::Int => integers!(i32, i32),
        DataType::UInt | DataType::Enum4 => integers!(u32, i32),
        DataType::Long => integers!(i64, i64),
        DataType::ULong => integers!(u64, i64),
        DataType::Float => make(kind, parse_all(kind, strings, |s| s.trim().parse::<f32>().ok())?),
        DataType::Double => make(kind, parse_all(kind, strings, |s| s.trim().parse::<f64>().ok())?),
        DataType::Char => make(
            kind,
            parse_all(kind, strings, |s| match s.as_bytes() {
                [byte] => Some(*byte),
                _ => None,
            })?,
        ),
        DataType::String => make(kind, parse_all(kind, strings, |s| Some(s.to_string()))?),
        DataType::Opaque | DataType::Structure | DataType::Sequence => {
            Err(ParseError::UnsupportedType(kind))
        }
    }
}

/// Create a 1-D array of `len` values `start, start + step, ...` converted
/// to the numeric kind `kind`.
pub fn make_array_sequence(
    kind: DataType,
    len: usize,
    start: f64,
    step: f64,
) -> Result<Value, ParseError> {
    if !kind.is_numeric() {
        return Err(ParseError::UnsupportedType(kind));
    }
    let values = (0..len).map(|i| start + i as f64 * step);
    with_number_type!(kind, T => make(kind, values.map(T::from_f64).collect::<Vec<_>>()), _ => {
        Err(ParseError::UnsupportedType(kind))
    })
}

#[cfg(test)]
mod tests {
    use ncarray_testing::TestCases;

    use super::{make_array, make_array_sequence, ParseError};
    use crate::{DataType, Value};

    #[test]
    fn test_make_array() {
        #[derive(Debug)]
        struct Case<'a> {
            kind: DataType,
            strings: &'a [&'a str],
            expected: Result<Value, ParseError>,
        }

        let invalid = |kind, text: &str| {
            Err(ParseError::Invalid {
                kind,
                text: text.to_string(),
            })
        };

        let cases = [
            Case {
                kind: DataType::Byte,
                strings: &["1", "-128", " 127 "],
                expected: Ok(Value::factory(DataType::Byte, &[3], vec![1i8, -128, 127]).unwrap()),
            },
            Case {
                kind: DataType::Byte,
                strings: &["128"],
                expected: invalid(DataType::Byte, "128"),
            },
            Case {
                kind: DataType::UByte,
                strings: &["-9", "255", "-128"],
                expected: Ok(Value::factory(DataType::UByte, &[3], vec![247u8, 255, 128]).unwrap()),
            },
            Case {
                kind: DataType::UByte,
                strings: &["256"],
                expected: invalid(DataType::UByte, "256"),
            },
            Case {
                kind: DataType::UByte,
                strings: &["-129"],
                expected: invalid(DataType::UByte, "-129"),
            },
            Case {
                kind: DataType::Enum2,
                strings: &["-1", "65535"],
                expected: Ok(Value::factory(DataType::Enum2, &[2], vec![65535u16, 65535]).unwrap()),
            },
            Case {
                kind: DataType::ULong,
                strings: &["18446744073709551615", "-1"],
                expected: Ok(Value::factory(DataType::ULong, &[2], vec![u64::MAX, u64::MAX]).unwrap()),
            },
            Case {
                kind: DataType::Int,
                strings: &["1.5"],
                expected: invalid(DataType::Int, "1.5"),
            },
            Case {
                kind: DataType::Double,
                strings: &["1.5", "-2e3"],
                expected: Ok(Value::factory(DataType::Double, &[2], vec![1.5, -2000.]).unwrap()),
            },
            Case {
                kind: DataType::Float,
                strings: &["abc"],
                expected: invalid(DataType::Float, "abc"),
            },
            Case {
                kind: DataType::Char,
                strings: &["a", "b"],
                expected: Ok(Value::factory(DataType::Char, &[2], b"ab".to_vec()).unwrap()),
            },
            Case {
                kind: DataType::Char,
                strings: &["ab"],
                expected: invalid(DataType::Char, "ab"),
            },
            Case {
                kind: DataType::String,
                strings: &["x", " y "],
                expected: Ok(Value::factory(
                    DataType::String,
                    &[2],
                    vec!["x".to_string(), " y ".to_string()],
                )
                .unwrap()),
            },
            Case {
                kind: DataType::Opaque,
                strings: &["00"],
                expected: Err(ParseError::UnsupportedType(DataType::Opaque)),
            },
            Case {
                kind: DataType::Int,
                strings: &[],
                expected: Ok(Value::factory(DataType::Int, &[0], Vec::<i32>::new()).unwrap()),
            },
        ];

        cases.test_each(|case| {
            assert_eq!(make_array(case.kind, case.strings), case.expected);
        })
    }

    #[test]
    fn test_make_array_sequence() {
        assert_eq!(
            make_array_sequence(DataType::Int, 4, 1., 2.5),
            Ok(Value::factory(DataType::Int, &[4], vec![1i32, 3, 6, 8]).unwrap())
        );
        assert_eq!(
            make_array_sequence(DataType::Double, 3, 0., -0.5),
            Ok(Value::factory(DataType::Double, &[3], vec![0., -0.5, -1.]).unwrap())
        );
        assert_eq!(
            make_array_sequence(DataType::Enum1, 2, 0., 1.),
            Err(ParseError::UnsupportedType(DataType::Enum1))
        );
    }

    #[test]
    fn test_error_message() {
        let err = make_array(DataType::Short, &["x"]).unwrap_err();
        assert_eq!(err.to_string(), "cannot parse \"x\" as short");
    }
}

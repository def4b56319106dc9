use std::fmt;

use num_traits::AsPrimitive;

use crate::DataType;

/// Primitive element types of the numeric kinds.
///
/// Conversions between number types follow Rust's `as` semantics: floats
/// convert to integers by truncating toward zero, and integer narrowing
/// keeps the low bits.
pub trait Number: Copy + fmt::Debug + fmt::Display + PartialOrd + Send + Sync + 'static {
    /// The kind whose storage uses this type.
    ///
    /// `u8`, `u16` and `u32` also store character and enumeration kinds.
    const DATA_TYPE: DataType;

    fn to_f64(self) -> f64;
    fn to_i64(self) -> i64;

    /// Convert to `i128`. This is lossless for every integer type.
    fn to_i128(self) -> i128;

    fn from_f64(value: f64) -> Self;
    fn from_i64(value: i64) -> Self;

    /// Return true if this value is a floating point NaN.
    fn is_nan(self) -> bool {
        false
    }

    /// Convert a value of another number type to this type.
    ///
    /// Integer to integer conversions go through `i64` so that 64-bit values
    /// convert without loss of precision.
    fn cast_from<S: Number>(value: S) -> Self {
        if S::DATA_TYPE.is_floating_point() || Self::DATA_TYPE.is_floating_point() {
            Self::from_f64(value.to_f64())
        } else {
            Self::from_i64(value.to_i64())
        }
    }
}

macro_rules! impl_number {
    ($type:ty, $kind:ident) => {
        impl Number for $type {
            const DATA_TYPE: DataType = DataType::$kind;

            fn to_f64(self) -> f64 {
                AsPrimitive::<f64>::as_(self)
            }

            fn to_i64(self) -> i64 {
                AsPrimitive::<i64>::as_(self)
            }

            fn to_i128(self) -> i128 {
                AsPrimitive::<i128>::as_(self)
            }

            fn from_f64(value: f64) -> Self {
                value.as_()
            }

            fn from_i64(value: i64) -> Self {
                value.as_()
            }
        }
    };

    ($type:ty, $kind:ident, float) => {
        impl Number for $type {
            const DATA_TYPE: DataType = DataType::$kind;

            fn to_f64(self) -> f64 {
                AsPrimitive::<f64>::as_(self)
            }

            fn to_i64(self) -> i64 {
                AsPrimitive::<i64>::as_(self)
            }

            fn to_i128(self) -> i128 {
                AsPrimitive::<i128>::as_(self)
            }

            fn from_f64(value: f64) -> Self {
                value.as_()
            }

            fn from_i64(value: i64) -> Self {
                value.as_()
            }

            fn is_nan(self) -> bool {
                <$type>::is_nan(self)
            }
        }
    };
}

impl_number!(i8, Byte);
impl_number!(u8, UByte);
impl_number!(i16, Short);
impl_number!(u16, UShort);
impl_number!(i32, Int);
impl_number!(u32, UInt);
impl_number!(i64, Long);
impl_number!(u64, ULong);
impl_number!(f32, Float, float);
impl_number!(f64, Double, float);

#[cfg(test)]
mod tests {
    use super::Number;
    use crate::DataType;

    #[test]
    fn test_data_type() {
        assert_eq!(i8::DATA_TYPE, DataType::Byte);
        assert_eq!(u64::DATA_TYPE, DataType::ULong);
        assert_eq!(f32::DATA_TYPE, DataType::Float);
    }

    #[test]
    fn test_cast_from() {
        // Float to integer truncates toward zero.
        assert_eq!(i32::cast_from(-2.7f64), -2);
        assert_eq!(u8::cast_from(3.9f32), 3);

        // Integer narrowing keeps the low bits.
        assert_eq!(u8::cast_from(-9i32), 247);
        assert_eq!(i8::cast_from(300i32), 44);
        assert_eq!(i16::cast_from(u64::MAX), -1);

        // 64-bit integers convert without going through f64.
        assert_eq!(u64::cast_from(i64::MAX), i64::MAX as u64);
        assert_eq!(f64::cast_from(u64::MAX), u64::MAX as f64);

        assert_eq!(f32::cast_from(0.5f64), 0.5);
    }

    #[test]
    fn test_to_i128() {
        assert_eq!(u64::MAX.to_i128(), u64::MAX as i128);
        assert_eq!(i64::MIN.to_i128(), i64::MIN as i128);
        assert_eq!((-1i8).to_i128(), -1);
        assert_ne!(u64::MAX.to_i128(), (-1i64).to_i128());
    }

    #[test]
    fn test_is_nan() {
        assert!(f32::NAN.is_nan());
        assert!(Number::is_nan(f64::NAN));
        assert!(!Number::is_nan(0u8));
    }
}

//! Kind-tagged arrays.
//!
//! [`ValueView`], [`Value`] and [`CowValue`] wrap a typed array together with
//! the [`DataType`] of its elements. They have one variant per kind, so every
//! operation on them is an exhaustive `match`.

use std::any::type_name;

use ncarray_view::errors::{FromDataError, LayoutError};
use ncarray_view::{Array, ArrayView, AsView, CowArray, Index, Layout, Section};
use thiserror::Error;
use tracing::trace;

use crate::{DataType, SequenceData, StructureData};

/// Errors when creating a kind-tagged array or extracting a typed array
/// from one.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CastError {
    /// The element type cannot store values of the kind.
    #[error("element type {element} cannot store {kind} values")]
    WrongType {
        kind: DataType,
        element: &'static str,
    },

    /// The storage does not match the shape.
    #[error(transparent)]
    Data(#[from] FromDataError),
}

/// Evaluate `$body` with `$array` bound to the typed array in each variant of
/// `$value`.
macro_rules! dispatch {
    ($value:expr, $enum:ident, $array:ident => $body:expr) => {
        match $value {
            $enum::Byte($array) => $body,
            $enum::UByte($array) => $body,
            $enum::Short($array) => $body,
            $enum::UShort($array) => $body,
            $enum::Int($array) => $body,
            $enum::UInt($array) => $body,
            $enum::Long($array) => $body,
            $enum::ULong($array) => $body,
            $enum::Float($array) => $body,
            $enum::Double($array) => $body,
            $enum::Char($array) => $body,
            $enum::String($array) => $body,
            $enum::Opaque($array) => $body,
            $enum::Enum1($array) => $body,
            $enum::Enum2($array) => $body,
            $enum::Enum4($array) => $body,
            $enum::Structure($array) => $body,
            $enum::Sequence($array) => $body,
        }
    };
}

/// Map each variant of `$value` to the same variant of `$to`, with the
/// array produced by `$body`.
macro_rules! map_variant {
    ($value:expr, $from:ident => $to:ident, $array:ident => $body:expr) => {
        match $value {
            $from::Byte($array) => $to::Byte($body),
            $from::UByte($array) => $to::UByte($body),
            $from::Short($array) => $to::Short($body),
            $from::UShort($array) => $to::UShort($body),
            $from::Int($array) => $to::Int($body),
            $from::UInt($array) => $to::UInt($body),
            $from::Long($array) => $to::Long($body),
            $from::ULong($array) => $to::ULong($body),
            $from::Float($array) => $to::Float($body),
            $from::Double($array) => $to::Double($body),
            $from::Char($array) => $to::Char($body),
            $from::String($array) => $to::String($body),
            $from::Opaque($array) => $to::Opaque($body),
            $from::Enum1($array) => $to::Enum1($body),
            $from::Enum2($array) => $to::Enum2($body),
            $from::Enum4($array) => $to::Enum4($body),
            $from::Structure($array) => $to::Structure($body),
            $from::Sequence($array) => $to::Sequence($body),
        }
    };
}

macro_rules! kind_of {
    ($value:expr, $enum:ident) => {
        match $value {
            $enum::Byte(_) => DataType::Byte,
            $enum::UByte(_) => DataType::UByte,
            $enum::Short(_) => DataType::Short,
            $enum::UShort(_) => DataType::UShort,
            $enum::Int(_) => DataType::Int,
            $enum::UInt(_) => DataType::UInt,
            $enum::Long(_) => DataType::Long,
            $enum::ULong(_) => DataType::ULong,
            $enum::Float(_) => DataType::Float,
            $enum::Double(_) => DataType::Double,
            $enum::Char(_) => DataType::Char,
            $enum::String(_) => DataType::String,
            $enum::Opaque(_) => DataType::Opaque,
            $enum::Enum1(_) => DataType::Enum1,
            $enum::Enum2(_) => DataType::Enum2,
            $enum::Enum4(_) => DataType::Enum4,
            $enum::Structure(_) => DataType::Structure,
            $enum::Sequence(_) => DataType::Sequence,
        }
    };
}

/// Evaluate `$body` with `$array` bound to the typed array of a view whose
/// elements are stored as a primitive number type. This covers the numeric,
/// character and enumeration kinds. Other kinds evaluate `$fallback`.
macro_rules! number_array {
    ($value:expr, $array:ident => $body:expr, _ => $fallback:expr) => {
        match $value {
            $crate::ValueView::Byte($array) => $body,
            $crate::ValueView::UByte($array)
            | $crate::ValueView::Char($array)
            | $crate::ValueView::Enum1($array) => $body,
            $crate::ValueView::Short($array) => $body,
            $crate::ValueView::UShort($array) | $crate::ValueView::Enum2($array) => $body,
            $crate::ValueView::Int($array) => $body,
            $crate::ValueView::UInt($array) | $crate::ValueView::Enum4($array) => $body,
            $crate::ValueView::Long($array) => $body,
            $crate::ValueView::ULong($array) => $body,
            $crate::ValueView::Float($array) => $body,
            $crate::ValueView::Double($array) => $body,
            _ => $fallback,
        }
    };
}

pub(crate) use number_array;

/// Generate the body of a [`Layout`] impl for a kind-tagged array.
macro_rules! impl_proxy_layout {
    ($enum:ident) => {
        fn shape(&self) -> &[usize] {
            dispatch!(self, $enum, array => array.shape())
        }

        fn strides(&self) -> &[isize] {
            dispatch!(self, $enum, array => array.strides())
        }

        fn try_offset(&self, index: &[usize]) -> Option<usize> {
            dispatch!(self, $enum, array => array.try_offset(index))
        }
    };
}

/// A kind-tagged view over caller-owned storage.
///
/// All transformations return views which borrow the same storage. The
/// storage cannot be modified while any of them exist.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueView<'a> {
    Byte(ArrayView<'a, i8>),
    UByte(ArrayView<'a, u8>),
    Short(ArrayView<'a, i16>),
    UShort(ArrayView<'a, u16>),
    Int(ArrayView<'a, i32>),
    UInt(ArrayView<'a, u32>),
    Long(ArrayView<'a, i64>),
    ULong(ArrayView<'a, u64>),
    Float(ArrayView<'a, f32>),
    Double(ArrayView<'a, f64>),
    Char(ArrayView<'a, u8>),
    String(ArrayView<'a, String>),
    Opaque(ArrayView<'a, Vec<u8>>),
    Enum1(ArrayView<'a, u8>),
    Enum2(ArrayView<'a, u16>),
    Enum4(ArrayView<'a, u32>),
    Structure(ArrayView<'a, StructureData>),
    Sequence(ArrayView<'a, SequenceData>),
}

impl<'a> ValueView<'a> {
    /// Create a view of kind `kind` over `data`, with a canonical layout for
    /// `shape`.
    ///
    /// Fails if `T` is not the storage type of `kind` or if the length of
    /// `data` is not the product of `shape`. The data is never copied.
    pub fn factory<T: Element>(
        kind: DataType,
        shape: &[usize],
        data: &'a [T],
    ) -> Result<ValueView<'a>, CastError> {
        if !T::KINDS.contains(&kind) {
            return Err(CastError::WrongType {
                kind,
                element: type_name::<T>(),
            });
        }
        let array = ArrayView::from_data(shape, data)?;
        trace!(%kind, ?shape, "created view from caller storage");
        T::wrap_view(kind, array).ok_or(CastError::WrongType {
            kind,
            element: type_name::<T>(),
        })
    }

    /// Return the kind of elements in this view.
    pub fn kind(&self) -> DataType {
        kind_of!(self, ValueView)
    }

    /// Return the addressing function of this view.
    pub fn layout(&self) -> &ncarray_view::DynLayout {
        dispatch!(self, ValueView, array => AsView::layout(array))
    }

    /// Return a fresh cursor bound to the current layout of this view.
    pub fn index(&self) -> Index {
        Index::new(self.layout().clone())
    }

    /// Return the typed array in this view.
    ///
    /// Fails if `T` is not the storage type of this view's kind.
    pub fn as_array<T: Element>(&self) -> Result<ArrayView<'a, T>, CastError> {
        T::unwrap_view(self).ok_or(CastError::WrongType {
            kind: self.kind(),
            element: type_name::<T>(),
        })
    }

    pub fn flip(&self, dim: usize) -> Result<ValueView<'a>, LayoutError> {
        Ok(map_variant!(self, ValueView => ValueView, array => array.flip(dim)?))
    }

    pub fn permute(&self, order: &[usize]) -> Result<ValueView<'a>, LayoutError> {
        Ok(map_variant!(self, ValueView => ValueView, array => array.permute(order)?))
    }

    pub fn transpose(&self, dim1: usize, dim2: usize) -> Result<ValueView<'a>, LayoutError> {
        Ok(map_variant!(self, ValueView => ValueView, array => array.transpose(dim1, dim2)?))
    }

    pub fn reduce(&self) -> ValueView<'a> {
        map_variant!(self, ValueView => ValueView, array => array.reduce())
    }

    pub fn reduce_dim(&self, dim: usize) -> Result<ValueView<'a>, LayoutError> {
        Ok(map_variant!(self, ValueView => ValueView, array => array.reduce_dim(dim)?))
    }

    pub fn reduce_first(&self, max: usize) -> ValueView<'a> {
        map_variant!(self, ValueView => ValueView, array => array.reduce_first(max))
    }

    pub fn section(&self, section: &Section) -> Result<ValueView<'a>, LayoutError> {
        Ok(map_variant!(self, ValueView => ValueView, array => array.section(section)?))
    }

    pub fn slice(&self, dim: usize, index: usize) -> Result<ValueView<'a>, LayoutError> {
        Ok(map_variant!(self, ValueView => ValueView, array => array.slice(dim, index)?))
    }

    /// Return a view with a canonical layout for `shape`.
    ///
    /// The storage is shared if this view is contiguous, otherwise the
    /// elements are copied in logical order.
    pub fn reshape(&self, shape: &[usize]) -> Result<CowValue<'a>, LayoutError> {
        Ok(map_variant!(self, ValueView => CowValue, array => array.reshape(shape)?))
    }

    /// Return an owned copy of this view with a canonical layout.
    pub fn to_owned(&self) -> Value {
        map_variant!(self, ValueView => Value, array => array.to_array())
    }
}

impl Layout for ValueView<'_> {
    impl_proxy_layout!(ValueView);
}

/// An owned kind-tagged array.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Byte(Array<i8>),
    UByte(Array<u8>),
    Short(Array<i16>),
    UShort(Array<u16>),
    Int(Array<i32>),
    UInt(Array<u32>),
    Long(Array<i64>),
    ULong(Array<u64>),
    Float(Array<f32>),
    Double(Array<f64>),
    Char(Array<u8>),
    String(Array<String>),
    Opaque(Array<Vec<u8>>),
    Enum1(Array<u8>),
    Enum2(Array<u16>),
    Enum4(Array<u32>),
    Structure(Array<StructureData>),
    Sequence(Array<SequenceData>),
}

impl Value {
    /// Create an array of kind `kind` which owns `data`, with a canonical
    /// layout for `shape`.
    pub fn factory<T: Element>(
        kind: DataType,
        shape: &[usize],
        data: Vec<T>,
    ) -> Result<Value, CastError> {
        if !T::KINDS.contains(&kind) {
            return Err(CastError::WrongType {
                kind,
                element: type_name::<T>(),
            });
        }
        let array = Array::from_data(shape, data)?;
        T::wrap(kind, array).ok_or(CastError::WrongType {
            kind,
            element: type_name::<T>(),
        })
    }

    pub fn kind(&self) -> DataType {
        kind_of!(self, Value)
    }

    /// Return a borrowed view of this array.
    pub fn view(&self) -> ValueView<'_> {
        map_variant!(self, Value => ValueView, array => array.view())
    }

    /// Return a view of the typed array in this value.
    pub fn as_array<T: Element>(&self) -> Result<ArrayView<'_, T>, CastError> {
        self.view().as_array()
    }

    /// Extract the typed array in this value.
    pub fn into_array<T: Element>(self) -> Result<Array<T>, CastError> {
        let kind = self.kind();
        T::unwrap(self).ok_or(CastError::WrongType {
            kind,
            element: type_name::<T>(),
        })
    }
}

impl Layout for Value {
    impl_proxy_layout!(Value);
}

impl<'a> From<&'a Value> for ValueView<'a> {
    fn from(value: &'a Value) -> ValueView<'a> {
        value.view()
    }
}

/// A kind-tagged array which either borrows its storage or owns a copy.
///
/// This is the result of reshaping a [`ValueView`].
#[derive(Clone, Debug, PartialEq)]
pub enum CowValue<'a> {
    Byte(CowArray<'a, i8>),
    UByte(CowArray<'a, u8>),
    Short(CowArray<'a, i16>),
    UShort(CowArray<'a, u16>),
    Int(CowArray<'a, i32>),
    UInt(CowArray<'a, u32>),
    Long(CowArray<'a, i64>),
    ULong(CowArray<'a, u64>),
    Float(CowArray<'a, f32>),
    Double(CowArray<'a, f64>),
    Char(CowArray<'a, u8>),
    String(CowArray<'a, String>),
    Opaque(CowArray<'a, Vec<u8>>),
    Enum1(CowArray<'a, u8>),
    Enum2(CowArray<'a, u16>),
    Enum4(CowArray<'a, u32>),
    Structure(CowArray<'a, StructureData>),
    Sequence(CowArray<'a, SequenceData>),
}

impl CowValue<'_> {
    pub fn kind(&self) -> DataType {
        kind_of!(self, CowValue)
    }

    pub fn view(&self) -> ValueView<'_> {
        map_variant!(self, CowValue => ValueView, array => array.view())
    }

    /// Return true if this array borrows the storage of the view it was
    /// created from.
    pub fn is_borrowed(&self) -> bool {
        dispatch!(self, CowValue, array => array.is_borrowed())
    }

    pub fn into_owned(self) -> Value {
        map_variant!(self, CowValue => Value, array => array.to_array())
    }
}

impl Layout for CowValue<'_> {
    impl_proxy_layout!(CowValue);
}

/// Rust types used to store the elements of one or more kinds.
pub trait Element: Clone + std::fmt::Debug + 'static {
    /// The kinds whose elements are stored as this type.
    const KINDS: &'static [DataType];

    /// Tag `array` with `kind`, if this type stores that kind.
    fn wrap_view(kind: DataType, array: ArrayView<'_, Self>) -> Option<ValueView<'_>>;

    /// Tag the owned `array` with `kind`, if this type stores that kind.
    fn wrap(kind: DataType, array: Array<Self>) -> Option<Value>;

    fn unwrap_view<'a>(value: &ValueView<'a>) -> Option<ArrayView<'a, Self>>;

    fn unwrap(value: Value) -> Option<Array<Self>>;
}

macro_rules! impl_element {
    ($type:ty, $default:ident $(, $kind:ident)*) => {
        impl Element for $type {
            const KINDS: &'static [DataType] = &[DataType::$default $(, DataType::$kind)*];

            fn wrap_view(kind: DataType, array: ArrayView<'_, $type>) -> Option<ValueView<'_>> {
                match kind {
                    DataType::$default => Some(ValueView::$default(array)),
                    $(DataType::$kind => Some(ValueView::$kind(array)),)*
                    _ => None,
                }
            }

            fn wrap(kind: DataType, array: Array<$type>) -> Option<Value> {
                match kind {
                    DataType::$default => Some(Value::$default(array)),
                    $(DataType::$kind => Some(Value::$kind(array)),)*
                    _ => None,
                }
            }

            fn unwrap_view<'a>(value: &ValueView<'a>) -> Option<ArrayView<'a, $type>> {
                match value {
                    ValueView::$default(array) $(| ValueView::$kind(array))* => Some(array.clone()),
                    _ => None,
                }
            }

            fn unwrap(value: Value) -> Option<Array<$type>> {
                match value {
                    Value::$default(array) $(| Value::$kind(array))* => Some(array),
                    _ => None,
                }
            }
        }

        // Untagged arrays convert to the first kind stored as this type.
        impl<'a> From<ArrayView<'a, $type>> for ValueView<'a> {
            fn from(array: ArrayView<'a, $type>) -> ValueView<'a> {
                ValueView::$default(array)
            }
        }

        impl From<Array<$type>> for Value {
            fn from(array: Array<$type>) -> Value {
                Value::$default(array)
            }
        }
    };
}

impl_element!(i8, Byte);
impl_element!(u8, UByte, Char, Enum1);
impl_element!(i16, Short);
impl_element!(u16, UShort, Enum2);
impl_element!(i32, Int);
impl_element!(u32, UInt, Enum4);
impl_element!(i64, Long);
impl_element!(u64, ULong);
impl_element!(f32, Float);
impl_element!(f64, Double);
impl_element!(String, String);
impl_element!(Vec<u8>, Opaque);
impl_element!(StructureData, Structure);
impl_element!(SequenceData, Sequence);

#[cfg(test)]
mod tests {
    use ncarray_testing::TestCases;
    use ncarray_view::errors::{FromDataError, LayoutError};
    use ncarray_view::{Array, ArrayView, AsView, Layout, Range, Section};

    use super::{CastError, CowValue, Element, Value, ValueView};
    use crate::{DataType, StructureData};

    fn data_1_to_6() -> Vec<i32> {
        (1..=6).collect()
    }

    #[test]
    fn test_factory() {
        let data = data_1_to_6();
        let view = ValueView::factory(DataType::Int, &[1, 2, 3], &data).unwrap();
        assert_eq!(view.kind(), DataType::Int);
        assert_eq!(view.shape(), [1, 2, 3]);
        assert_eq!(view.len(), 6);

        let bytes = [1u8, 2, 3];
        for kind in [DataType::UByte, DataType::Char, DataType::Enum1] {
            let view = ValueView::factory(kind, &[3], &bytes).unwrap();
            assert_eq!(view.kind(), kind);
        }
    }

    #[test]
    fn test_factory_errors() {
        let data = data_1_to_6();
        assert_eq!(
            ValueView::factory(DataType::Float, &[6], &data),
            Err(CastError::WrongType {
                kind: DataType::Float,
                element: "i32",
            })
        );
        assert_eq!(
            ValueView::factory(DataType::Int, &[4], &data),
            Err(CastError::Data(FromDataError::StorageLengthMismatch {
                len: 6,
                shape: vec![4],
            }))
        );
        assert_eq!(
            Value::factory(DataType::Char, &[2], vec![1i8, 2]),
            Err(CastError::WrongType {
                kind: DataType::Char,
                element: "i8",
            })
        );
    }

    #[test]
    fn test_element_kinds() {
        assert_eq!(u8::KINDS, [DataType::UByte, DataType::Char, DataType::Enum1]);
        assert_eq!(u16::KINDS, [DataType::UShort, DataType::Enum2]);
        assert_eq!(String::KINDS, [DataType::String]);

        // Every kind has exactly one storage type.
        fn kinds<T: Element>() -> &'static [DataType] {
            T::KINDS
        }
        let mut all: Vec<DataType> = [
            kinds::<i8>(),
            kinds::<u8>(),
            kinds::<i16>(),
            kinds::<u16>(),
            kinds::<i32>(),
            kinds::<u32>(),
            kinds::<i64>(),
            kinds::<u64>(),
            kinds::<f32>(),
            kinds::<f64>(),
            kinds::<String>(),
            kinds::<Vec<u8>>(),
            kinds::<StructureData>(),
            kinds::<crate::SequenceData>(),
        ]
        .concat();
        all.sort_by_key(|kind| DataType::ALL.iter().position(|k| k == kind));
        assert_eq!(all, DataType::ALL);
    }

    #[test]
    fn test_transforms_keep_kind() {
        let data = [1u16, 2, 3, 4, 5, 6];
        let view = ValueView::factory(DataType::Enum2, &[1, 2, 3], &data).unwrap();

        let section = Section::new(vec![None, None, Some(Range::with_stride(0, 2, 2).unwrap())]);
        let section = Section::fill(&section, view.shape()).unwrap();

        let results = [
            view.flip(2).unwrap(),
            view.permute(&[2, 0, 1]).unwrap(),
            view.transpose(0, 2).unwrap(),
            view.reduce(),
            view.reduce_dim(0).unwrap(),
            view.reduce_first(1),
            view.section(&section).unwrap(),
            view.slice(1, 1).unwrap(),
        ];
        let shapes: Vec<Vec<usize>> = results.iter().map(|r| r.shape().to_vec()).collect();
        results.test_each(|result| assert_eq!(result.kind(), DataType::Enum2));

        assert_eq!(
            shapes,
            [
                vec![1, 2, 3],
                vec![3, 1, 2],
                vec![3, 2, 1],
                vec![2, 3],
                vec![2, 3],
                vec![2, 3],
                vec![1, 2, 2],
                vec![1, 3],
            ]
        );
    }

    #[test]
    fn test_flip_and_read() {
        let data = data_1_to_6();
        let view = ValueView::factory(DataType::Int, &[1, 2, 3], &data).unwrap();
        let flipped = view.flip(2).unwrap();
        let array = flipped.as_array::<i32>().unwrap();
        assert_eq!(array.get(&[0, 0, 2]), Ok(&1));
        assert_eq!(array.iter().copied().collect::<Vec<_>>(), [3, 2, 1, 6, 5, 4]);

        let mut index = flipped.index();
        index.set(&[0, 1, 0]).unwrap();
        assert_eq!(array.get_at(&index), Ok(&6));
    }

    #[test]
    fn test_transform_errors() {
        let data = data_1_to_6();
        let view = ValueView::factory(DataType::Int, &[2, 3], &data).unwrap();
        assert_eq!(
            view.permute(&[0, 0]),
            Err(LayoutError::InvalidPermutation(vec![0, 0]))
        );
        assert!(view.flip(2).is_err());
        assert!(view.reduce_dim(0).is_err());
        assert_eq!(
            view.reshape(&[4]),
            Err(LayoutError::LengthMismatch { from: 6, to: 4 })
        );
    }

    #[test]
    fn test_reshape() {
        let data = data_1_to_6();
        let view = ValueView::factory(DataType::Int, &[2, 3], &data).unwrap();

        let reshaped = view.reshape(&[3, 2]).unwrap();
        assert!(reshaped.is_borrowed());
        assert_eq!(reshaped.kind(), DataType::Int);
        assert_eq!(reshaped.shape(), [3, 2]);

        let reshaped = view.transpose(0, 1).unwrap().reshape(&[6]).unwrap();
        assert!(!reshaped.is_borrowed());
        let CowValue::Int(array) = &reshaped else {
            panic!("expected int array");
        };
        assert_eq!(array.to_vec(), [1, 4, 2, 5, 3, 6]);

        let owned = reshaped.into_owned();
        assert_eq!(owned.into_array::<i32>().unwrap().into_data(), [1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_to_owned_and_back() {
        let data = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let view = ValueView::factory(DataType::String, &[3], &data).unwrap();
        let owned = view.flip(0).unwrap().to_owned();
        assert_eq!(owned.kind(), DataType::String);
        assert_eq!(owned.shape(), [3]);
        assert_eq!(
            owned.as_array::<String>().unwrap().to_vec(),
            ["c", "b", "a"]
        );
        assert_eq!(
            owned.as_array::<u8>().unwrap_err(),
            CastError::WrongType {
                kind: DataType::String,
                element: "u8",
            }
        );
        assert_eq!(ValueView::from(&owned).kind(), DataType::String);
    }

    #[test]
    fn test_from_typed_arrays() {
        let array = Array::from_data(&[2], vec![1u8, 2]).unwrap();
        let view: ValueView = array.view().into();
        assert_eq!(view.kind(), DataType::UByte);

        let value: Value = Array::from_data(&[1], vec![0.5f64]).unwrap().into();
        assert_eq!(value.kind(), DataType::Double);

        let typed: ArrayView<f64> = value.as_array().unwrap();
        assert_eq!(typed.item(), Some(&0.5));
        assert_eq!(typed.get(&[0]), Ok(&0.5));
    }

    #[test]
    fn test_nested_structures() {
        let record = StructureData::default().with_member(
            "depth",
            Value::factory(DataType::Float, &[2], vec![1.0f32, 2.0]).unwrap(),
        );
        let value = Value::factory(DataType::Structure, &[1], vec![record.clone()]).unwrap();
        assert_eq!(value.kind(), DataType::Structure);
        let records = value.as_array::<StructureData>().unwrap();
        assert_eq!(records.get(&[0]), Ok(&record));
    }
}

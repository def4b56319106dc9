use std::fmt;

use serde::de::{Deserialize, Deserializer, Error, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::errors::RangeError;
use crate::iterators::Iter;
use crate::{Array, ArrayBase, AsView, Layout, Range, Storage};

struct ArrayData<'a, T> {
    iter: Iter<'a, T>,
}

impl<T> Serialize for ArrayData<'_, T>
where
    T: Serialize,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serializer.collect_seq(self.iter.clone())
    }
}

/// Arrays serialize as a struct with a `shape` and the elements in logical
/// order as `data`, regardless of layout.
impl<S: Storage> Serialize for ArrayBase<S>
where
    S::Elem: Serialize,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        let mut array = serializer.serialize_struct("Array", 2)?;
        array.serialize_field("shape", self.shape())?;
        array.serialize_field("data", &ArrayData { iter: self.iter() })?;
        array.end()
    }
}

struct ArrayVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

impl<'de, T> Visitor<'de> for ArrayVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Array<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "an array with \"shape\" and \"data\" fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut data: Option<Vec<T>> = None;
        let mut shape: Option<Vec<usize>> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "data" => {
                    if data.is_some() {
                        return Err(A::Error::duplicate_field("data"));
                    }
                    data = Some(map.next_value()?);
                }
                "shape" => {
                    if shape.is_some() {
                        return Err(A::Error::duplicate_field("shape"));
                    }
                    shape = Some(map.next_value()?);
                }
                _ => {
                    return Err(A::Error::unknown_field(&key, &["data", "shape"]));
                }
            }
        }

        let Some(shape) = shape else {
            return Err(A::Error::missing_field("shape"));
        };
        let Some(data) = data else {
            return Err(A::Error::missing_field("data"));
        };

        Array::from_data(&shape, data).map_err(A::Error::custom)
    }
}

impl<'de, T> Deserialize<'de> for Array<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Array<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct(
            "Array",
            &["shape", "data"],
            ArrayVisitor::<T> {
                marker: std::marker::PhantomData,
            },
        )
    }
}

/// Serialized form of a [`Range`].
///
/// An empty range is written with `first`, `last` and `stride` omitted.
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RangeRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stride: Option<usize>,
}

impl From<Range> for RangeRepr {
    fn from(range: Range) -> RangeRepr {
        let bounds = (!range.is_empty()).then(|| (range.first(), range.last(), range.stride()));
        RangeRepr {
            name: range.name().map(str::to_string),
            first: bounds.map(|b| b.0),
            last: bounds.map(|b| b.1),
            stride: bounds.map(|b| b.2),
        }
    }
}

impl TryFrom<RangeRepr> for Range {
    type Error = RangeError;

    fn try_from(repr: RangeRepr) -> Result<Range, RangeError> {
        let range = match (repr.first, repr.last) {
            (Some(first), Some(last)) => Range::with_stride(first, last, repr.stride.unwrap_or(1))?,
            (None, None) => Range::EMPTY,
            _ => return Err(RangeError::Syntax("range needs both first and last".into())),
        };
        Ok(match repr.name {
            Some(name) => range.with_name(name),
            None => range,
        })
    }
}

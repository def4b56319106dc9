use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Kind of the elements stored in an array.
///
/// The set of kinds is closed. Each kind has a fixed Rust element type used
/// for storage (see [`ValueView`](crate::ValueView)).
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DataType {
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Char,
    String,
    Opaque,
    Enum1,
    Enum2,
    Enum4,
    Structure,
    Sequence,
}

/// Whether the values of an integral kind are interpreted as signed.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Signedness {
    Signed,
    Unsigned,
}

impl DataType {
    /// All kinds, in declaration order.
    pub const ALL: [DataType; 18] = [
        DataType::Byte,
        DataType::UByte,
        DataType::Short,
        DataType::UShort,
        DataType::Int,
        DataType::UInt,
        DataType::Long,
        DataType::ULong,
        DataType::Float,
        DataType::Double,
        DataType::Char,
        DataType::String,
        DataType::Opaque,
        DataType::Enum1,
        DataType::Enum2,
        DataType::Enum4,
        DataType::Structure,
        DataType::Sequence,
    ];

    /// Return the size of an element of this kind in bytes.
    ///
    /// String and sequence sizes are the size of a reference. A structure
    /// reports 0 because its size depends on its members.
    pub fn size(self) -> usize {
        match self {
            DataType::Byte | DataType::UByte | DataType::Char => 1,
            DataType::Opaque | DataType::Enum1 => 1,
            DataType::Short | DataType::UShort | DataType::Enum2 => 2,
            DataType::Int | DataType::UInt | DataType::Float | DataType::Enum4 => 4,
            DataType::String | DataType::Sequence => 4,
            DataType::Long | DataType::ULong | DataType::Double => 8,
            DataType::Structure => 0,
        }
    }

    pub fn signedness(self) -> Signedness {
        match self {
            DataType::UByte
            | DataType::UShort
            | DataType::UInt
            | DataType::ULong
            | DataType::Char
            | DataType::Enum1
            | DataType::Enum2
            | DataType::Enum4 => Signedness::Unsigned,
            _ => Signedness::Signed,
        }
    }

    /// Return true for integral and floating point kinds.
    ///
    /// Enumerations are stored as unsigned integers but are not numeric.
    pub fn is_numeric(self) -> bool {
        self.is_integral() || self.is_floating_point()
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            DataType::Byte
                | DataType::UByte
                | DataType::Short
                | DataType::UShort
                | DataType::Int
                | DataType::UInt
                | DataType::Long
                | DataType::ULong
        )
    }

    pub fn is_floating_point(self) -> bool {
        matches!(self, DataType::Float | DataType::Double)
    }

    /// Return true for unsigned integers and enumerations.
    pub fn is_unsigned(self) -> bool {
        (self.is_integral() || self.is_enum()) && self.signedness() == Signedness::Unsigned
    }

    pub fn is_enum(self) -> bool {
        matches!(self, DataType::Enum1 | DataType::Enum2 | DataType::Enum4)
    }

    /// Return true for character and string kinds.
    pub fn is_string(self) -> bool {
        matches!(self, DataType::Char | DataType::String)
    }

    /// Return the integral kind with the same size as this one and the given
    /// signedness.
    ///
    /// Kinds that are not integral are returned unchanged.
    pub fn with_signedness(self, signedness: Signedness) -> DataType {
        use DataType::*;
        match (self, signedness) {
            (Byte | UByte, Signedness::Signed) => Byte,
            (Byte | UByte, Signedness::Unsigned) => UByte,
            (Short | UShort, Signedness::Signed) => Short,
            (Short | UShort, Signedness::Unsigned) => UShort,
            (Int | UInt, Signedness::Signed) => Int,
            (Int | UInt, Signedness::Unsigned) => UInt,
            (Long | ULong, Signedness::Signed) => Long,
            (Long | ULong, Signedness::Unsigned) => ULong,
            (other, _) => other,
        }
    }

    /// Return the lowercase name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Byte => "byte",
            DataType::UByte => "ubyte",
            DataType::Short => "short",
            DataType::UShort => "ushort",
            DataType::Int => "int",
            DataType::UInt => "uint",
            DataType::Long => "long",
            DataType::ULong => "ulong",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Char => "char",
            DataType::String => "string",
            DataType::Opaque => "opaque",
            DataType::Enum1 => "enum1",
            DataType::Enum2 => "enum2",
            DataType::Enum4 => "enum4",
            DataType::Structure => "structure",
            DataType::Sequence => "sequence",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown kind name.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("unknown data type \"{0}\"")]
pub struct ParseDataTypeError(String);

impl FromStr for DataType {
    type Err = ParseDataTypeError;

    /// Parse a kind from its lowercase name. Matching ignores case.
    fn from_str(s: &str) -> Result<DataType, ParseDataTypeError> {
        DataType::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDataTypeError(s.to_string()))
    }
}

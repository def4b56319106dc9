//! ncarray provides kind-tagged, shaped and strided array views for
//! scientific data, such as the variables of netCDF, HDF or GRIB files.
//!
//! # Element kinds
//!
//! Every array has an element kind ([`DataType`]): signed and unsigned
//! integers of 8, 16, 32 and 64 bits, 32 and 64-bit floats, characters,
//! strings, opaque blobs, enumerations, structure records and sequences of
//! records. Each kind is stored as a fixed Rust type, given by the
//! [`Element`] trait.
//!
//! # Views
//!
//! [`ValueView`] wraps a typed [`ArrayView`] from
//! [ncarray-view](ncarray_view) with its kind. Views borrow caller-owned
//! storage and never copy it:
//!
//! ```
//! use ncarray::{DataType, Layout, ValueView};
//!
//! let data = [1, 2, 3, 4, 5, 6];
//! let view = ValueView::factory(DataType::Int, &[1, 2, 3], &data).unwrap();
//!
//! // Reverse the last axis. The result shares `data`.
//! let flipped = view.flip(2).unwrap();
//! let values: Vec<i32> = flipped.as_array::<i32>().unwrap().iter().copied().collect();
//! assert_eq!(values, [3, 2, 1, 6, 5, 4]);
//! assert_eq!(flipped.shape(), [1, 2, 3]);
//! ```
//!
//! Flipping, permuting, sectioning, slicing and reducing only change the
//! view's layout. Reshaping shares the storage when the view is contiguous
//! and copies it otherwise, producing a [`CowValue`]. [`Value`] is the owned
//! counterpart of a view.
//!
//! # Operations
//!
//! The [`ops`] module has reductions (sum, min/max with optional missing
//! values), comparisons, kind conversion, parsing of arrays from text and
//! conversion between character arrays and strings. The [`numeric`] module
//! has tolerance-based float comparison.
//!
//! # Logging
//!
//! Copies made by reshaping, kind conversion and parsing are logged at the
//! `debug` level using [tracing](https://docs.rs/tracing). This crate does
//! not install a subscriber.

mod data_type;
mod number;
mod structure;
mod value;

pub mod numeric;
pub mod ops;

pub use data_type::{DataType, ParseDataTypeError, Signedness};
pub use number::Number;
pub use ops::{MinMax, MissingEvaluator, OpError, ParseError};
pub use structure::{Member, SequenceData, StructureData};
pub use value::{CastError, CowValue, Element, Value, ValueView};

pub use ncarray_view::{
    Array, ArrayView, AsView, CompositeRange, CowArray, DynLayout, Index, Layout, Range, Section,
};

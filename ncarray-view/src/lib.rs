//! ncarray_view provides typed, shaped and strided views over flat buffers
//! of elements.
//!
//! # Storage and layout
//!
//! An array is a combination of data storage and a layout. The storage
//! determines the element type and how the data is owned. An array can be:
//!
//! - Owned (like `Vec<T>`)
//! - Borrowed (like `&[T]`)
//! - Maybe-owned (like `Cow<[T]>`)
//! - Shared / reference-counted (like `Arc<[T]>`)
//!
//! The layout ([`DynLayout`]) holds the shape, a signed stride per dimension
//! and a base offset. It maps a multi-dimensional index to a storage offset
//! with `offset + sum(index[i] * strides[i])`. Reversing an axis, reordering
//! axes, selecting a strided [`Section`] or slicing out a sub-array only
//! produce a new layout, so they never copy elements.
//!
//! # Array types and traits
//!
//! The base type for all arrays is [`ArrayBase`]. It is normally used via an
//! alias which specifies the data ownership: [`Array`], [`ArrayView`],
//! [`CowArray`] or [`ArcArray`].
//!
//! All arrays implement the [`Layout`] trait, which provides methods to
//! query the shape, dimension count and strides. The [`AsView`] trait
//! provides the indexing, iteration and transformation methods of
//! [`ArrayView`] for every array type. The preferred way to import the
//! traits is via the prelude:
//!
//! ```
//! use ncarray_view::prelude::*;
//! use ncarray_view::Array;
//!
//! let array = Array::from_data(&[2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
//!
//! let flipped: Vec<_> = array.flip(1).unwrap().iter().copied().collect();
//! assert_eq!(flipped, [3, 2, 1, 6, 5, 4]);
//! ```
//!
//! # Serialization
//!
//! If the `serde` feature is enabled, arrays serialize with their shape and
//! elements in row-major (C) order:
//!
//! ```json
//! {
//!   "shape": [2, 2],
//!   "data": [0.5, 1.0, 1.5, 2.0]
//! }
//! ```
//!
//! [`Range`], [`CompositeRange`] and [`Section`] are also serializable, so
//! selections can be described independently of any array.

pub mod errors;
mod index;
mod index_iterator;
pub mod iterators;
pub mod layout;
pub mod range;
pub mod section;
pub mod storage;

mod impl_debug;
#[cfg(feature = "serde")]
mod impl_serialize;
mod view;

pub use index::Index;
pub use index_iterator::{DynIndex, Indices};
pub use layout::{is_valid_permutation, DynLayout, Layout};
pub use range::{CompositeRange, Range, RangeIter};
pub use section::Section;
pub use storage::{IntoStorage, Storage, StorageMut};
pub use view::{ArcArray, Array, ArrayBase, ArrayView, AsView, CowArray};

/// This module provides a convenient way to import the most common traits
/// from this library via a glob import.
pub mod prelude {
    pub use super::{AsView, Layout};
}

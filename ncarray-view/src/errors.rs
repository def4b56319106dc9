//! Error types that are reported by view construction and transformations.

use thiserror::Error;

/// Errors when mapping a multi-dimensional index to a storage offset.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum IndexError {
    /// The index has a different number of components than the view has dims.
    #[error("index has {actual} dims but view has {expected}")]
    RankMismatch { actual: usize, expected: usize },

    /// A component of the index is outside `[0, size)` for its dimension.
    #[error("index {index} is out of bounds for dim {dim} with size {size}")]
    OutOfBounds {
        dim: usize,
        index: usize,
        size: usize,
    },
}

/// Errors when constructing or parsing a [`Range`](crate::Range).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("range stride must be >= 1")]
    InvalidStride,

    #[error("range first ({first}) must be <= last ({last})")]
    FirstAfterLast { first: usize, last: usize },

    /// A composed or shifted range falls outside the range it is applied to.
    #[error("range {0} is out of bounds")]
    OutOfBounds(String),

    #[error("invalid range syntax \"{0}\"")]
    Syntax(String),

    /// The range would select more indices than fit in a `usize`.
    #[error("range is too large")]
    TooLarge,
}

/// Errors when resolving a [`Section`](crate::Section) against a shape.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SectionError {
    #[error("section has {actual} ranges but shape has {expected} dims")]
    RankMismatch { actual: usize, expected: usize },

    /// A "whole dimension" entry has not been resolved with
    /// [`Section::fill`](crate::Section::fill).
    #[error("section range for dim {0} is unresolved")]
    Unresolved(usize),

    #[error("section range last index {last} is out of bounds for dim {dim} with size {size}")]
    OutOfBounds { dim: usize, last: usize, size: usize },

    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Errors from layout transformations (flip, permute, reshape, reduce,
/// section, slice).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("axis {axis} is out of range for view with {ndim} dims")]
    InvalidAxis { axis: usize, ndim: usize },

    #[error("permutation {0:?} is invalid")]
    InvalidPermutation(Vec<usize>),

    /// The reshaped layout would have a different length than the current
    /// layout.
    #[error("cannot reshape {from} elements into a shape with {to} elements")]
    LengthMismatch { from: usize, to: usize },

    #[error("cannot remove axis {axis} with size {size}")]
    NotUnitAxis { axis: usize, size: usize },

    #[error("slice index {index} is out of bounds for axis {axis} with size {size}")]
    InvalidIndex {
        axis: usize,
        index: usize,
        size: usize,
    },

    #[error(transparent)]
    Section(#[from] SectionError),
}

/// Errors that can occur when constructing a view from existing data.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FromDataError {
    /// The storage length was expected to exactly match the product of the
    /// shape, and it did not.
    #[error("data length {len} does not match shape {shape:?}")]
    StorageLengthMismatch { len: usize, shape: Vec<usize> },

    /// Some indices will map to offsets that are beyond the end of the storage.
    #[error("data too short")]
    StorageTooShort,

    #[error("layout has {ndim} dims but {strides} strides")]
    StrideCountMismatch { ndim: usize, strides: usize },

    /// Some indices would map to offsets before the start of the storage.
    #[error("layout maps indices to negative offsets")]
    NegativeOffset,
}

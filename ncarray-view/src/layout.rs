use std::iter::zip;

use smallvec::SmallVec;

use crate::errors::{FromDataError, IndexError, LayoutError};
use crate::index_iterator::{DynIndex, Indices};
use crate::section::Section;

/// Return true if `permutation` is a valid permutation of dimensions for
/// a view of rank `ndim`.
pub fn is_valid_permutation(ndim: usize, permutation: &[usize]) -> bool {
    permutation.len() == ndim
        && (0..ndim).all(|dim| permutation.iter().filter(|d| **d == dim).count() == 1)
}

/// Layouts describe the shape of a view, ie. the number of dimensions and
/// size of each, and the mapping between indices and offsets in the data
/// storage.
pub trait Layout {
    /// Return the number of dimensions.
    fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Returns the number of elements in the array.
    fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// Returns true if the array has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sizes of each dimension.
    fn shape(&self) -> &[usize];

    /// Returns the size of the dimension `dim`.
    fn size(&self, dim: usize) -> usize {
        self.shape()[dim]
    }

    /// Returns the signed strides of each dimension.
    fn strides(&self) -> &[isize];

    /// Returns the offset between adjacent indices along dimension `dim`.
    fn stride(&self, dim: usize) -> isize {
        self.strides()[dim]
    }

    /// Map an index to a storage offset, or return `None` if the index has
    /// the wrong length or is out of bounds along any dimension.
    fn try_offset(&self, index: &[usize]) -> Option<usize>;

    /// Map an index to a storage offset.
    ///
    /// Unlike [`try_offset`](Layout::try_offset) this reports which
    /// component of the index is invalid.
    fn offset_of(&self, index: &[usize]) -> Result<usize, IndexError> {
        let shape = self.shape();
        if index.len() != shape.len() {
            return Err(IndexError::RankMismatch {
                actual: index.len(),
                expected: shape.len(),
            });
        }
        if let Some((dim, (&index, &size))) = zip(index, shape)
            .enumerate()
            .find(|(_, (idx, size))| idx >= size)
        {
            return Err(IndexError::OutOfBounds { dim, index, size });
        }
        self.try_offset(index).ok_or(IndexError::RankMismatch {
            actual: index.len(),
            expected: shape.len(),
        })
    }

    /// Return true if this layout describes a contiguous array, where the
    /// logical order of elements matches the order in which they are stored.
    ///
    /// The base offset is not considered.
    fn is_contiguous(&self) -> bool {
        is_contiguous(self.shape(), self.strides())
    }

    /// Return true if iterating over elements in this layout will visit
    /// the same storage element multiple times.
    fn is_broadcast(&self) -> bool {
        !self.is_empty() && self.strides().iter().any(|&stride| stride == 0)
    }

    /// Return an iterator over all valid indices in this layout, in
    /// row-major order.
    fn indices(&self) -> Indices {
        Indices::from_shape(self.shape())
    }
}

/// Return true if `shape` and `strides` describe a layout where elements are
/// stored in row-major order with no gaps.
///
/// Strides of size-1 dimensions are ignored since they are never used to
/// compute an offset.
fn is_contiguous(shape: &[usize], strides: &[isize]) -> bool {
    if shape.iter().product::<usize>() == 0 {
        return true;
    }
    let mut expected_stride = 1;
    for (&size, &stride) in zip(shape, strides).rev() {
        if size == 1 {
            continue;
        }
        if stride != expected_stride {
            return false;
        }
        expected_stride *= size as isize;
    }
    true
}

/// Addressing function for a view with a dimension count known only at
/// runtime.
///
/// Maps an N-dimensional index to a storage offset using
/// `offset + sum(index[i] * strides[i])`. Strides are signed, so axes can run
/// backwards through storage after a [`flipped`](DynLayout::flipped)
/// transformation. Every transformation returns a new layout and leaves the
/// source untouched.
///
/// A layout is always constructed such that every valid index maps to a
/// non-negative offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynLayout {
    shape: SmallVec<[usize; 4]>,
    strides: SmallVec<[isize; 4]>,

    /// Storage offset of the element at index `[0, 0, ...]`.
    offset: usize,
}

impl Layout for DynLayout {
    #[inline]
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    fn try_offset(&self, index: &[usize]) -> Option<usize> {
        let mut valid = index.len() == self.shape.len();
        let mut offset = self.offset as isize;
        for (&idx, (&size, &stride)) in zip(index, zip(&self.shape, &self.strides)) {
            valid = valid && idx < size;
            offset += idx as isize * stride;
        }
        valid.then_some(offset as usize)
    }
}

impl DynLayout {
    /// Construct a layout with dimension sizes given by `shape` and canonical
    /// (contiguous, row-major) strides.
    pub fn from_shape(shape: &[usize]) -> DynLayout {
        DynLayout {
            shape: shape.into(),
            strides: Self::contiguous_strides(shape),
            offset: 0,
        }
    }

    /// Return the canonical strides for `shape`. The last axis has stride 1
    /// and `strides[i] = strides[i + 1] * shape[i + 1]`.
    pub fn contiguous_strides(shape: &[usize]) -> SmallVec<[isize; 4]> {
        let mut strides: SmallVec<[isize; 4]> = SmallVec::from_elem(1, shape.len());
        for dim in (0..shape.len().saturating_sub(1)).rev() {
            strides[dim] = strides[dim + 1] * shape[dim + 1].max(1) as isize;
        }
        strides
    }

    /// Construct a layout from explicit shape, strides and base offset.
    ///
    /// Fails if the number of strides does not match the number of dims, or
    /// if any valid index would map to a negative offset.
    pub fn try_from_parts(
        shape: &[usize],
        strides: &[isize],
        offset: usize,
    ) -> Result<DynLayout, FromDataError> {
        if shape.len() != strides.len() {
            return Err(FromDataError::StrideCountMismatch {
                ndim: shape.len(),
                strides: strides.len(),
            });
        }
        let layout = DynLayout {
            shape: shape.into(),
            strides: strides.into(),
            offset,
        };
        if !layout.is_empty() && layout.signed_min_offset() < 0 {
            return Err(FromDataError::NegativeOffset);
        }
        Ok(layout)
    }

    /// Construct a layout which maps every index in `shape` to offset 0.
    pub fn constant(shape: &[usize]) -> DynLayout {
        DynLayout {
            shape: shape.into(),
            strides: SmallVec::from_elem(0, shape.len()),
            offset: 0,
        }
    }

    /// Return the storage offset of the element at index `[0, 0, ...]`.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Return true if the layout is contiguous and starts at offset zero.
    pub fn is_canonical(&self) -> bool {
        self.offset == 0 && self.is_contiguous()
    }

    fn signed_min_offset(&self) -> isize {
        zip(&self.shape, &self.strides)
            .filter(|(_, &stride)| stride < 0)
            .fold(self.offset as isize, |min, (&size, &stride)| {
                min + (size as isize - 1) * stride
            })
    }

    /// Return the smallest storage offset that any valid index maps to.
    ///
    /// For an empty layout this is the base offset.
    pub fn min_offset(&self) -> usize {
        if self.is_empty() {
            return self.offset;
        }
        self.signed_min_offset() as usize
    }

    /// Return the largest storage offset that any valid index maps to.
    ///
    /// For an empty layout this is the base offset.
    pub fn max_offset(&self) -> usize {
        if self.is_empty() {
            return self.offset;
        }
        zip(&self.shape, &self.strides)
            .filter(|(_, &stride)| stride > 0)
            .fold(self.offset as isize, |max, (&size, &stride)| {
                max + (size as isize - 1) * stride
            }) as usize
    }

    /// Return the minimum length a storage buffer must have for every valid
    /// index to map to an element.
    pub fn min_data_len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.max_offset() + 1
        }
    }

    /// Convert a linear position in row-major order into a multi-index.
    ///
    /// This only depends on the shape, not on the strides, so iterating
    /// `0..len` visits elements in logical order regardless of how they are
    /// arranged in storage.
    pub fn odometer(&self, mut linear: usize) -> DynIndex {
        let mut index = DynIndex::from_elem(0, self.ndim());
        for (idx, &size) in index.iter_mut().zip(&self.shape).rev() {
            if size == 0 {
                continue;
            }
            *idx = linear % size;
            linear /= size;
        }
        index
    }

    fn check_axis(&self, axis: usize) -> Result<(), LayoutError> {
        if axis >= self.ndim() {
            return Err(LayoutError::InvalidAxis {
                axis,
                ndim: self.ndim(),
            });
        }
        Ok(())
    }

    /// Return a layout with the order of indices along `axis` reversed.
    ///
    /// The stride of `axis` is negated and the base offset moves to the last
    /// element along that axis.
    pub fn flipped(&self, axis: usize) -> Result<DynLayout, LayoutError> {
        self.check_axis(axis)?;
        let mut flipped = self.clone();
        let size = self.shape[axis];
        let stride = self.strides[axis];
        if size > 0 {
            flipped.offset = (self.offset as isize + (size as isize - 1) * stride) as usize;
        }
        flipped.strides[axis] = -stride;
        Ok(flipped)
    }

    /// Return a layout where dimension `i` is dimension `order[i]` of this
    /// layout.
    pub fn permuted(&self, order: &[usize]) -> Result<DynLayout, LayoutError> {
        if !is_valid_permutation(self.ndim(), order) {
            return Err(LayoutError::InvalidPermutation(order.to_vec()));
        }
        Ok(DynLayout {
            shape: order.iter().map(|&dim| self.shape[dim]).collect(),
            strides: order.iter().map(|&dim| self.strides[dim]).collect(),
            offset: self.offset,
        })
    }

    /// Return a layout with axes `dim1` and `dim2` swapped.
    pub fn transposed(&self, dim1: usize, dim2: usize) -> Result<DynLayout, LayoutError> {
        self.check_axis(dim1)?;
        self.check_axis(dim2)?;
        let mut transposed = self.clone();
        transposed.shape.swap(dim1, dim2);
        transposed.strides.swap(dim1, dim2);
        Ok(transposed)
    }

    /// Return a layout with all size-one dimensions removed.
    pub fn squeezed(&self) -> DynLayout {
        let (shape, strides) = zip(&self.shape, &self.strides)
            .filter(|(&size, _)| size != 1)
            .map(|(&size, &stride)| (size, stride))
            .unzip();
        DynLayout {
            shape,
            strides,
            offset: self.offset,
        }
    }

    /// Return a layout with the size-one dimension `axis` removed.
    pub fn remove_axis(&self, axis: usize) -> Result<DynLayout, LayoutError> {
        self.check_axis(axis)?;
        if self.shape[axis] != 1 {
            return Err(LayoutError::NotUnitAxis {
                axis,
                size: self.shape[axis],
            });
        }
        let mut removed = self.clone();
        removed.shape.remove(axis);
        removed.strides.remove(axis);
        Ok(removed)
    }

    /// Remove up to `max` leading size-one dimensions, stopping at the first
    /// dimension whose size is not one.
    pub fn squeeze_leading(&self, max: usize) -> DynLayout {
        let n_leading = self
            .shape
            .iter()
            .take(max)
            .take_while(|&&size| size == 1)
            .count();
        DynLayout {
            shape: self.shape[n_leading..].into(),
            strides: self.strides[n_leading..].into(),
            offset: self.offset,
        }
    }

    /// Return the layout of a sub-array selected by `section`.
    ///
    /// Entries of `section` which are `None` select the whole dimension. The
    /// rank is preserved. Along each axis the size becomes the range length,
    /// the stride is multiplied by the range stride and the base offset
    /// moves to the range's first element.
    pub fn sectioned(&self, section: &Section) -> Result<DynLayout, LayoutError> {
        let section = Section::fill(section, &self.shape)?;
        section.check_in_range(&self.shape)?;

        let mut sectioned = self.clone();
        for (dim, range) in section.ranges().iter().enumerate() {
            let Some(range) = range else {
                continue;
            };
            let stride = self.strides[dim];
            sectioned.shape[dim] = range.len();
            sectioned.strides[dim] = stride * range.stride() as isize;
            if !range.is_empty() {
                sectioned.offset =
                    (sectioned.offset as isize + range.first() as isize * stride) as usize;
            }
        }
        Ok(sectioned)
    }

    /// Return the layout of the sub-array at position `index` along `axis`,
    /// with `axis` removed.
    pub fn sliced(&self, axis: usize, index: usize) -> Result<DynLayout, LayoutError> {
        self.check_axis(axis)?;
        let size = self.shape[axis];
        if index >= size {
            return Err(LayoutError::InvalidIndex { axis, index, size });
        }
        let mut sliced = self.clone();
        sliced.offset = (self.offset as isize + index as isize * self.strides[axis]) as usize;
        sliced.shape.remove(axis);
        sliced.strides.remove(axis);
        Ok(sliced)
    }

    /// Return a canonical layout with the given shape, for use with storage
    /// that holds this layout's elements contiguously from offset zero.
    ///
    /// Fails if `shape` has a different number of elements.
    pub fn reshaped(&self, shape: &[usize]) -> Result<DynLayout, LayoutError> {
        let to: usize = shape.iter().product();
        if to != self.len() {
            return Err(LayoutError::LengthMismatch {
                from: self.len(),
                to,
            });
        }
        Ok(DynLayout::from_shape(shape))
    }
}

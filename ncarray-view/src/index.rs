use std::iter::zip;

use crate::errors::IndexError;
use crate::index_iterator::DynIndex;
use crate::layout::{DynLayout, Layout};

/// A mutable cursor over the elements of an array.
///
/// A cursor holds a copy of an array's layout and a current multi-index,
/// which starts at `[0, 0, ...]`. It is used to address single elements,
/// eg. via [`AsView::get_at`](crate::AsView::get_at) or
/// [`ArrayBase::set`](crate::ArrayBase::set).
///
/// ```
/// use ncarray_view::{AsView, ArrayView};
///
/// let data = [1, 2, 3, 4, 5, 6];
/// let view = ArrayView::from_data(&[2, 3], data.as_slice()).unwrap();
/// let mut index = view.index();
/// index.set(&[1, 2]).unwrap();
/// assert_eq!(view.get_at(&index), Ok(&6));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Index {
    layout: DynLayout,
    current: DynIndex,
}

impl Index {
    /// Create a cursor positioned at the first element of `layout`.
    pub fn new(layout: DynLayout) -> Index {
        let current = DynIndex::from_elem(0, layout.ndim());
        Index { layout, current }
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn rank(&self) -> usize {
        self.current.len()
    }

    /// Set the whole multi-index.
    pub fn set(&mut self, index: &[usize]) -> Result<&mut Self, IndexError> {
        if index.len() != self.rank() {
            return Err(IndexError::RankMismatch {
                actual: index.len(),
                expected: self.rank(),
            });
        }
        for (dim, (&idx, &size)) in zip(index, self.layout.shape()).enumerate() {
            if idx >= size {
                return Err(IndexError::OutOfBounds {
                    dim,
                    index: idx,
                    size,
                });
            }
        }
        self.current.copy_from_slice(index);
        Ok(self)
    }

    /// Set the index along one dimension, leaving the others unchanged.
    pub fn set_dim(&mut self, dim: usize, value: usize) -> Result<&mut Self, IndexError> {
        let Some(&size) = self.layout.shape().get(dim) else {
            return Err(IndexError::RankMismatch {
                actual: dim + 1,
                expected: self.rank(),
            });
        };
        if value >= size {
            return Err(IndexError::OutOfBounds {
                dim,
                index: value,
                size,
            });
        }
        self.current[dim] = value;
        Ok(self)
    }

    /// Set the index along the first dimension.
    pub fn set_first(&mut self, value: usize) -> Result<&mut Self, IndexError> {
        self.set_dim(0, value)
    }

    /// Advance to the next index in row-major order, incrementing the last
    /// dimension and carrying into earlier dimensions.
    ///
    /// Returns `false` if the cursor was at the last element, in which case
    /// it wraps around to the first.
    pub fn incr(&mut self) -> bool {
        for (idx, &size) in zip(self.current.iter_mut(), self.layout.shape()).rev() {
            *idx += 1;
            if *idx < size {
                return true;
            }
            *idx = 0;
        }
        false
    }

    /// Return the current multi-index.
    pub fn current_counter(&self) -> &[usize] {
        &self.current
    }

    /// Return the storage offset of the current index.
    pub fn current_element(&self) -> usize {
        let offset = zip(&self.current, self.layout.strides())
            .fold(self.layout.offset() as isize, |offset, (&idx, &stride)| {
                offset + idx as isize * stride
            });
        offset as usize
    }
}

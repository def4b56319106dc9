use std::iter::FusedIterator;
use std::slice;

use crate::index_iterator::Indices;
use crate::layout::{DynLayout, Layout};

/// Iterator over elements of an array, in their logical (row-major) order.
///
/// Contiguous arrays are iterated by walking the storage directly. Other
/// arrays map each index to a storage offset.
pub struct Iter<'a, T> {
    iter: IterKind<'a, T>,
}

enum IterKind<'a, T> {
    Direct(slice::Iter<'a, T>),
    Indexing(IndexingIter<'a, T>),
}

// Derived `Clone` would require `T: Clone`.
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        let iter = match &self.iter {
            IterKind::Direct(iter) => IterKind::Direct(iter.clone()),
            IterKind::Indexing(iter) => IterKind::Indexing(iter.clone()),
        };
        Iter { iter }
    }
}

impl<'a, T> Iter<'a, T> {
    /// Create an iterator over the elements of `data` selected by `layout`.
    ///
    /// Every valid index of `layout` must map to an offset inside `data`.
    pub(crate) fn new(data: &'a [T], layout: &DynLayout) -> Iter<'a, T> {
        let iter = if layout.is_contiguous() {
            let start = layout.offset();
            let elements = data.get(start..start + layout.len()).unwrap_or_default();
            IterKind::Direct(elements.iter())
        } else {
            IterKind::Indexing(IndexingIter {
                data,
                indices: layout.indices(),
                layout: layout.clone(),
            })
        };
        Iter { iter }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        match &mut self.iter {
            IterKind::Direct(iter) => iter.next(),
            IterKind::Indexing(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.iter {
            IterKind::Direct(iter) => iter.size_hint(),
            IterKind::Indexing(iter) => iter.indices.size_hint(),
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator which visits elements of a non-contiguous layout by computing
/// the offset of each index.
struct IndexingIter<'a, T> {
    data: &'a [T],
    layout: DynLayout,
    indices: Indices,
}

impl<T> Clone for IndexingIter<'_, T> {
    fn clone(&self) -> Self {
        IndexingIter {
            data: self.data,
            layout: self.layout.clone(),
            indices: self.indices.clone(),
        }
    }
}

impl<'a, T> Iterator for IndexingIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let index = self.indices.next()?;
        let offset = self.layout.try_offset(&index)?;
        self.data.get(offset)
    }
}
